use serde::{Deserialize, Serialize};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};

pub const COLLECTION: &str = "exercises";

/// An exercise as stored and as embedded by value inside templates and
/// assignments. Duration is minutes, rest time seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    pub muscle_groups: Vec<String>,
}

impl Validate for Exercise {
    fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name", "Name is required".to_string()));
        }
        if self.muscle_groups.is_empty() {
            return Err(AppError::Validation(
                "muscleGroups",
                "At least one muscle group is required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExerciseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_groups: Option<Vec<String>>,
}

impl Validate for UpdateExerciseRequest {
    fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::Validation("name", "Name is required".to_string()));
            }
        }
        if let Some(groups) = &self.muscle_groups {
            if groups.is_empty() {
                return Err(AppError::Validation(
                    "muscleGroups",
                    "At least one muscle group is required".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn requires_a_muscle_group() {
        let exercise = Exercise {
            name: "Squat".into(),
            description: None,
            sets: Some(5),
            reps: Some(5),
            duration: None,
            rest_time: Some(120),
            muscle_groups: vec![],
        };
        assert!(matches!(exercise.validate(), Err(AppError::Validation("muscleGroups", _))));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let exercise = Exercise {
            name: "Squat".into(),
            description: None,
            sets: Some(5),
            reps: Some(5),
            duration: None,
            rest_time: Some(120),
            muscle_groups: vec!["legs".into(), "core".into()],
        };
        let body = serde_json::to_value(&exercise).expect("serialize");
        assert_eq!(body["restTime"], 120);
        assert_eq!(body["muscleGroups"], json!(["legs", "core"]));
        assert!(body.get("duration").is_none());
    }
}
