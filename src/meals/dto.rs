use serde::{Deserialize, Serialize};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};

pub const COLLECTION: &str = "meals";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

/// A meal as stored and as embedded by value inside templates and
/// assignments. Embedded copies are snapshots; editing the source meal
/// later does not reach into them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub meal_type: MealType,
}

impl Validate for Meal {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name", "Name is required".to_string()));
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ] {
            if value < 0.0 {
                return Err(AppError::Validation(field, format!("{field} must be 0 or more")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
}

impl Validate for UpdateMealRequest {
    fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name", "Name is required".to_string()));
            }
        }
        for (field, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fats", self.fats),
        ] {
            if let Some(value) = value {
                if value < 0.0 {
                    return Err(AppError::Validation(field, format!("{field} must be 0 or more")));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meal() -> Meal {
        Meal {
            name: "Grilled chicken".into(),
            description: None,
            calories: 420.0,
            protein: 40.0,
            carbs: 10.0,
            fats: 18.0,
            meal_type: MealType::Lunch,
        }
    }

    #[test]
    fn wire_format_is_camel_case() {
        let body = serde_json::to_value(meal()).expect("serialize");
        assert_eq!(body["mealType"], "lunch");
        assert!(body.get("description").is_none());
        assert_eq!(body["calories"], 420.0);
    }

    #[test]
    fn negative_macros_fail_validation() {
        let mut m = meal();
        m.protein = -1.0;
        assert!(matches!(m.validate(), Err(AppError::Validation("protein", _))));
    }

    #[test]
    fn update_patch_serializes_only_provided_fields() {
        let patch: UpdateMealRequest =
            serde_json::from_value(json!({ "calories": 500 })).expect("deserialize");
        let body = serde_json::to_value(&patch).expect("serialize");
        assert_eq!(body, json!({ "calories": 500.0 }));
    }

    #[test]
    fn update_rejects_blank_name() {
        let patch: UpdateMealRequest =
            serde_json::from_value(json!({ "name": "  " })).expect("deserialize");
        assert!(matches!(patch.validate(), Err(AppError::Validation("name", _))));
    }
}
