mod dto;
pub mod handlers;

pub use dto::{
    DayExercises, ExerciseTemplate, MealTemplate, UpdateExerciseTemplateRequest,
    UpdateMealTemplateRequest, EXERCISE_COLLECTION, MEAL_COLLECTION,
};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
