mod dto;
pub mod handlers;

pub use dto::{Meal, MealType, UpdateMealRequest, COLLECTION};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
