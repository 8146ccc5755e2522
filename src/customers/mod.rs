pub mod handlers;

use axum::Router;

use crate::state::AppState;

/// Customer-area routes, mounted at the root namespace.
pub fn router() -> Router<AppState> {
    handlers::routes()
}
