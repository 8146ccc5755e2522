use serde::{Deserialize, Serialize};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};
use crate::exercises::Exercise;
use crate::meals::Meal;

pub const MEAL_COLLECTION: &str = "meal_templates";
pub const EXERCISE_COLLECTION: &str = "exercise_templates";

/// Reusable meal plan. The meals are denormalized copies taken at
/// creation time, not references into the meals collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTemplate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub meals: Vec<Meal>,
    pub created_by: String,
}

impl Validate for MealTemplate {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name", "Name is required".to_string()));
        }
        if self.meals.is_empty() {
            return Err(AppError::Validation("meals", "At least one meal is required".to_string()));
        }
        if self.created_by.trim().is_empty() {
            return Err(AppError::Validation("createdBy", "Created by is required".to_string()));
        }
        Ok(())
    }
}

/// One weekday's exercises; day 0 is Sunday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayExercises {
    pub day: u8,
    pub exercises: Vec<Exercise>,
}

pub(crate) fn validate_days(groups: &[DayExercises]) -> AppResult<()> {
    if groups.iter().any(|g| g.day > 6) {
        return Err(AppError::Validation("day", "Day must be between 0 and 6".to_string()));
    }
    Ok(())
}

/// Reusable weekly exercise plan, one entry per covered weekday, with
/// the exercises embedded by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTemplate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exercises: Vec<DayExercises>,
    pub created_by: String,
}

impl Validate for ExerciseTemplate {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name", "Name is required".to_string()));
        }
        validate_days(&self.exercises)?;
        if self.created_by.trim().is_empty() {
            return Err(AppError::Validation("createdBy", "Created by is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealTemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals: Option<Vec<Meal>>,
}

impl Validate for UpdateMealTemplateRequest {
    fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name", "Name is required".to_string()));
            }
        }
        if let Some(meals) = &self.meals {
            if meals.is_empty() {
                return Err(AppError::Validation(
                    "meals",
                    "At least one meal is required".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseTemplateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<DayExercises>>,
}

impl Validate for UpdateExerciseTemplateRequest {
    fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name", "Name is required".to_string()));
            }
        }
        if let Some(exercises) = &self.exercises {
            validate_days(exercises)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meals::MealType;

    fn meal() -> Meal {
        Meal {
            name: "Oats".into(),
            description: None,
            calories: 320.0,
            protein: 12.0,
            carbs: 50.0,
            fats: 8.0,
            meal_type: MealType::Breakfast,
        }
    }

    #[test]
    fn meal_template_needs_at_least_one_meal() {
        let template = MealTemplate {
            name: "Cut week".into(),
            description: None,
            meals: vec![],
            created_by: "trainer-1".into(),
        };
        assert!(matches!(template.validate(), Err(AppError::Validation("meals", _))));
    }

    #[test]
    fn embedded_meals_are_copies_in_the_document() {
        let template = MealTemplate {
            name: "Bulk week".into(),
            description: None,
            meals: vec![meal()],
            created_by: "trainer-1".into(),
        };
        let body = serde_json::to_value(&template).expect("serialize");
        // The template document holds the full meal, not a reference.
        assert_eq!(body["meals"][0]["name"], "Oats");
        assert_eq!(body["meals"][0]["calories"], 320.0);
        assert_eq!(body["createdBy"], "trainer-1");
    }

    #[test]
    fn exercise_template_rejects_out_of_range_days() {
        let template = ExerciseTemplate {
            name: "Push pull legs".into(),
            description: None,
            exercises: vec![DayExercises { day: 7, exercises: vec![] }],
            created_by: "trainer-1".into(),
        };
        assert!(matches!(template.validate(), Err(AppError::Validation("day", _))));
    }
}
