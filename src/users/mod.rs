mod dto;
pub mod handlers;
pub mod repo;

pub use dto::{
    is_valid_email, CreateUserRequest, PublicUser, UpdateUserRequest, UserDoc, UserRecord,
    COLLECTION,
};

use axum::Router;

use crate::state::AppState;

/// Admin-facing user management, mounted under `/admin`.
pub fn admin_router() -> Router<AppState> {
    Router::new().merge(handlers::admin_routes())
}

/// Trainer-facing customer listing, mounted under `/trainer`.
pub fn trainer_router() -> Router<AppState> {
    Router::new().merge(handlers::customer_routes())
}
