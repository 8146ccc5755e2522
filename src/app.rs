use std::net::SocketAddr;

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::instrument;

use crate::error::AppResult;
use crate::orm::{self, Filter};
use crate::state::AppState;
use crate::{assignments, auth, customers, exercises, guard, meals, subscriptions, templates, users};

pub fn build_app(state: AppState) -> Router {
    let trainer = Router::new()
        .route("/", get(trainer_dashboard))
        .route("/login", get(auth::handlers::trainer_login_page))
        .merge(meals::router())
        .merge(exercises::router())
        .merge(templates::router())
        .merge(assignments::router())
        .merge(users::trainer_router());

    let admin = Router::new()
        .route("/", get(admin_dashboard))
        .route("/login", get(auth::handlers::admin_login_page))
        .merge(users::admin_router())
        .merge(subscriptions::router());

    Router::new()
        .nest("/api/auth", auth::router())
        .route("/api/health", get(|| async { "ok" }))
        .merge(auth::pages_router())
        .merge(customers::router())
        .nest("/trainer", trainer)
        .nest("/admin", admin)
        .with_state(state)
        .layer(middleware::from_fn(guard::route_guard))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!("request", method = %req.method(), uri = %req.uri())
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let status = res.status();
                        if status.is_server_error() {
                            tracing::error!(%status, latency_ms = latency.as_millis() as u64, "response");
                        } else {
                            tracing::info!(%status, latency_ms = latency.as_millis() as u64, "response");
                        }
                    },
                ),
        )
}

#[instrument(skip(state))]
async fn admin_dashboard(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let none = Filter::new();
    let users = orm::count(&state.db, users::COLLECTION, &none).await?;
    let subscriptions = orm::count(&state.db, subscriptions::COLLECTION, &none).await?;
    Ok(Json(json!({
        "success": true,
        "stats": { "users": users, "subscriptions": subscriptions },
    })))
}

#[instrument(skip(state))]
async fn trainer_dashboard(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let none = Filter::new();
    let meals = orm::count(&state.db, meals::COLLECTION, &none).await?;
    let exercises = orm::count(&state.db, exercises::COLLECTION, &none).await?;
    let meal_templates = orm::count(&state.db, templates::MEAL_COLLECTION, &none).await?;
    let exercise_templates = orm::count(&state.db, templates::EXERCISE_COLLECTION, &none).await?;
    let assignments = orm::count(&state.db, assignments::COLLECTION, &none).await?;
    Ok(Json(json!({
        "success": true,
        "stats": {
            "meals": meals,
            "exercises": exercises,
            "mealTemplates": meal_templates,
            "exerciseTemplates": exercise_templates,
            "assignments": assignments,
        },
    })))
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "8080".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
