use axum::Router;

use crate::state::AppState;

mod claims;
mod dto;
pub mod handlers;
mod jwt;
mod password;
mod service;
mod session;

pub use claims::Claims;
pub use jwt::{decode_session_unverified, AuthUser, JwtKeys};
pub use password::{hash_password, verify_password};
pub use session::{clear_cookie, read_session_cookie, set_cookie, SESSION_COOKIE};

/// Routes mounted under `/api/auth`; the route guard passes the whole
/// `/api` namespace through untouched.
pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes()).merge(handlers::me_routes())
}

/// Public login/register page metadata, mounted at the root.
pub fn pages_router() -> Router<AppState> {
    handlers::page_routes()
}
