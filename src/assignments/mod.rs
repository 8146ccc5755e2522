mod dto;
pub mod handlers;
mod repo;

pub use dto::{
    expand_week, DailyAssignment, DayMeals, UpdateAssignmentRequest, WeeklyAssignmentRequest,
    COLLECTION,
};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
