use sqlx::PgPool;
use time::OffsetDateTime;

use crate::error::AppResult;
use crate::orm::{self, rfc3339, Document, Filter, Sort};

use super::dto::COLLECTION;

/// The subscription currently in force for a customer: status active
/// and today inside the start/end window. Newest wins if staff left
/// overlapping windows behind.
pub async fn find_active(pool: &PgPool, customer_id: &str) -> AppResult<Option<Document>> {
    let now = rfc3339(OffsetDateTime::now_utc());
    let filter = Filter::new()
        .eq("customerId", customer_id)
        .eq("status", "active")
        .lte("startDate", now.as_str())
        .gte("endDate", now.as_str());
    let sort = Sort::new().desc("createdAt");
    let mut matches = orm::find_all(pool, COLLECTION, &filter, &sort).await?;
    if matches.is_empty() {
        Ok(None)
    } else {
        Ok(Some(matches.remove(0)))
    }
}
