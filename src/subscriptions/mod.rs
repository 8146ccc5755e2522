mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{Subscription, SubscriptionStatus, UpdateSubscriptionRequest, COLLECTION};

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
