use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::instrument;

use crate::assignments::handlers::date_range_filter;
use crate::assignments::COLLECTION as ASSIGNMENTS;
use crate::auth::AuthUser;
use crate::crud;
use crate::error::AppResult;
use crate::orm::{Document, Sort};
use crate::response::success;
use crate::state::AppState;
use crate::subscriptions;
use crate::users::{repo as users_repo, UpdateUserRequest, COLLECTION as USERS};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/assignments", get(my_assignments))
        .route("/subscription", get(my_subscription))
}

/// Landing data for the customer area: the profile plus whatever
/// subscription is currently in force (or null).
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> AppResult<Json<Value>> {
    let user = users_repo::get_by_id(&state.db, claims.sub).await?.into_public()?;
    let subscription = subscriptions::repo::find_active(&state.db, &claims.sub.to_string())
        .await?
        .map(Document::into_json);
    Ok(Json(json!({
        "success": true,
        "user": user,
        "subscription": subscription,
    })))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> AppResult<Json<Value>> {
    let user = users_repo::get_by_id(&state.db, claims.sub).await?.into_public()?;
    Ok(success("user", user))
}

/// Profile self-service never touches the role; that is an admin
/// operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub instagram: Option<String>,
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<Value>> {
    let patch = UpdateUserRequest {
        name: payload.name,
        phone: payload.phone,
        instagram: payload.instagram,
        role: None,
    }
    .into_patch();
    let document =
        crud::update_document(&state.db, USERS, &claims.sub.to_string(), &patch, "User").await?;
    let user = crate::users::UserRecord::from_document(document)?.into_public()?;
    Ok(success("user", user))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyAssignmentsQuery {
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub end_date: Option<OffsetDateTime>,
}

#[instrument(skip(state))]
pub async fn my_assignments(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Query(query): Query<MyAssignmentsQuery>,
) -> AppResult<Json<Value>> {
    let customer_id = claims.sub.to_string();
    let filter = date_range_filter(Some(customer_id.as_str()), query.start_date, query.end_date);
    let sort = Sort::new().asc("date");
    let assignments = crud::list_documents(&state.db, ASSIGNMENTS, &filter, &sort).await?;
    Ok(success("assignments", assignments))
}

#[instrument(skip(state))]
pub async fn my_subscription(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> AppResult<Json<Value>> {
    let subscription = subscriptions::repo::find_active(&state.db, &claims.sub.to_string())
        .await?
        .map(Document::into_json);
    Ok(Json(json!({ "success": true, "subscription": subscription })))
}
