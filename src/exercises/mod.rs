mod dto;
pub mod handlers;

pub use dto::{Exercise, UpdateExerciseRequest, COLLECTION};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
