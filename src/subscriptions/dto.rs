use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::crud::Validate;
use crate::error::{AppError, AppResult};

pub const COLLECTION: &str = "subscriptions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Pending,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Expired => "expired",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

/// A customer's plan over a date window. `payment_screenshot` is an
/// opaque reference recorded by staff, never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub customer_id: String,
    pub plan_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    pub status: SubscriptionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_screenshot: Option<String>,
    pub assigned_by: String,
}

impl Validate for Subscription {
    fn validate(&self) -> AppResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(AppError::Validation(
                "customerId",
                "Customer ID is required".to_string(),
            ));
        }
        if self.plan_name.trim().is_empty() {
            return Err(AppError::Validation("planName", "Plan name is required".to_string()));
        }
        if self.assigned_by.trim().is_empty() {
            return Err(AppError::Validation(
                "assignedBy",
                "Assigned by is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none", default)]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none", default)]
    pub end_date: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubscriptionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_screenshot: Option<String>,
}

impl Validate for UpdateSubscriptionRequest {
    fn validate(&self) -> AppResult<()> {
        if let Some(plan_name) = &self.plan_name {
            if plan_name.trim().is_empty() {
                return Err(AppError::Validation(
                    "planName",
                    "Plan name is required".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionStatus::Cancelled).expect("serialize"),
            "\"cancelled\""
        );
    }

    #[test]
    fn requires_customer_and_plan() {
        let sub = Subscription {
            customer_id: "".into(),
            plan_name: "Gold".into(),
            start_date: datetime!(2026-01-01 00:00:00 UTC),
            end_date: datetime!(2026-02-01 00:00:00 UTC),
            status: SubscriptionStatus::Active,
            payment_screenshot: None,
            assigned_by: "admin-1".into(),
        };
        assert!(matches!(sub.validate(), Err(AppError::Validation("customerId", _))));
    }

    #[test]
    fn dates_travel_as_rfc3339() {
        let sub = Subscription {
            customer_id: "cust-1".into(),
            plan_name: "Gold".into(),
            start_date: datetime!(2026-01-01 00:00:00 UTC),
            end_date: datetime!(2026-02-01 00:00:00 UTC),
            status: SubscriptionStatus::Pending,
            payment_screenshot: None,
            assigned_by: "admin-1".into(),
        };
        let body = serde_json::to_value(&sub).expect("serialize");
        assert_eq!(body["startDate"], "2026-01-01T00:00:00Z");
        assert_eq!(body["status"], "pending");
    }
}
