use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};
use crate::exercises::Exercise;
use crate::meals::Meal;
use crate::templates::DayExercises;

pub const COLLECTION: &str = "daily_assignments";

/// One customer-day of meals and exercises. Both arrays are
/// denormalized copies frozen at assignment time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAssignment {
    pub customer_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub meals: Vec<Meal>,
    pub exercises: Vec<Exercise>,
    pub assigned_by: String,
}

impl Validate for DailyAssignment {
    fn validate(&self) -> AppResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(AppError::Validation(
                "customerId",
                "Customer ID is required".to_string(),
            ));
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
pub struct UpdateAssignmentRequest {
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none", default)]
    pub date: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<Meal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

impl Validate for UpdateAssignmentRequest {
    fn validate(&self) -> AppResult<()> {
        Ok(())
    }
}

/// One weekday's meals; day 0 is Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayMeals {
    pub day: u8,
    pub meals: Vec<Meal>,
}

/// A whole week assigned at once, expanded server-side into seven
/// daily documents.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAssignmentRequest {
    pub customer_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    pub meals: Vec<DayMeals>,
    pub exercises: Vec<DayExercises>,
    pub assigned_by: String,
}

impl Validate for WeeklyAssignmentRequest {
    fn validate(&self) -> AppResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(AppError::Validation(
                "customerId",
                "Customer ID is required".to_string(),
            ));
        }
        if self.meals.iter().any(|g| g.day > 6)
            || self.exercises.iter().any(|g| g.day > 6)
        {
            return Err(AppError::Validation("day", "Day must be between 0 and 6".to_string()));
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

/// Seven consecutive days starting at the given date; days without a
/// listed group get empty arrays.
pub fn expand_week(input: &WeeklyAssignmentRequest) -> Vec<DailyAssignment> {
    (0..7)
        .map(|day| {
            let meals = input
                .meals
                .iter()
                .find(|g| i64::from(g.day) == day)
                .map(|g| g.meals.clone())
                .unwrap_or_default();
            let exercises = input
                .exercises
                .iter()
                .find(|g| i64::from(g.day) == day)
                .map(|g| g.exercises.clone())
                .unwrap_or_default();
            DailyAssignment {
                customer_id: input.customer_id.clone(),
                date: input.start_date + Duration::days(day),
                meals,
                exercises,
                assigned_by: input.assigned_by.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealType;
    use time::macros::datetime;

    fn meal(name: &str) -> Meal {
        Meal {
            name: name.into(),
            description: None,
            calories: 100.0,
            protein: 10.0,
            carbs: 10.0,
            fats: 2.0,
            meal_type: MealType::Snack,
        }
    }

    fn weekly() -> WeeklyAssignmentRequest {
        WeeklyAssignmentRequest {
            customer_id: "cust-1".into(),
            start_date: datetime!(2026-08-02 00:00:00 UTC),
            meals: vec![
                DayMeals { day: 0, meals: vec![meal("Oats")] },
                DayMeals { day: 3, meals: vec![meal("Rice"), meal("Eggs")] },
            ],
            exercises: vec![],
            assigned_by: "trainer-1".into(),
        }
    }

    #[test]
    fn expands_to_seven_consecutive_days() {
        let days = expand_week(&weekly());
        assert_eq!(days.len(), 7);
        for (i, assignment) in days.iter().enumerate() {
            assert_eq!(
                assignment.date,
                datetime!(2026-08-02 00:00:00 UTC) + Duration::days(i as i64)
            );
            assert_eq!(assignment.customer_id, "cust-1");
            assert_eq!(assignment.assigned_by, "trainer-1");
        }
    }

    #[test]
    fn unlisted_days_get_empty_arrays() {
        let days = expand_week(&weekly());
        assert_eq!(days[0].meals.len(), 1);
        assert_eq!(days[1].meals.len(), 0);
        assert_eq!(days[3].meals.len(), 2);
        assert!(days.iter().all(|d| d.exercises.is_empty()));
    }

    #[test]
    fn weekly_rejects_day_out_of_range() {
        let mut input = weekly();
        input.meals.push(DayMeals { day: 7, meals: vec![] });
        assert!(matches!(input.validate(), Err(AppError::Validation("day", _))));
    }

    #[test]
    fn assignment_date_serializes_as_rfc3339() {
        let assignment = DailyAssignment {
            customer_id: "c".into(),
            date: datetime!(2026-08-02 00:00:00 UTC),
            meals: vec![],
            exercises: vec![],
            assigned_by: "t".into(),
        };
        let body = serde_json::to_value(&assignment).expect("serialize");
        assert_eq!(body["date"], "2026-08-02T00:00:00Z");
    }
}
