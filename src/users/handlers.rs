use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::auth::hash_password;
use crate::crud;
use crate::error::{AppError, AppResult};
use crate::response::{success, success_empty, ListResponse};
use crate::roles::Role;
use crate::state::AppState;

use super::dto::{CreateUserRequest, PublicUser, UpdateUserRequest, UserDoc, UserRecord, COLLECTION};
use super::repo;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
}

pub fn customer_routes() -> Router<AppState> {
    Router::new().route("/customers", get(list_customers))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub role: Option<Role>,
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<ListResponse<PublicUser>>> {
    let page = repo::find_users_page(&state.db, query.role, query.page, query.page_size).await?;
    Ok(Json(ListResponse::from_page(page)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCustomersQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> AppResult<Json<ListResponse<PublicUser>>> {
    let page =
        repo::find_users_page(&state.db, Some(Role::Customer), query.page, query.page_size).await?;
    Ok(Json(ListResponse::from_page(page)))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateUserRequest>,
) -> AppResult<Json<Value>> {
    payload.email = payload.email.trim().to_lowercase();
    crud::Validate::validate(&payload)?;

    if repo::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::UserExists);
    }

    let password = match &payload.password {
        Some(plain) => Some(hash_password(plain).map_err(AppError::internal)?),
        None => None,
    };
    let doc = UserDoc {
        email: payload.email.clone(),
        password,
        name: payload.name.clone(),
        role_id: payload.role.id(),
        phone: payload.phone.clone(),
        instagram: payload.instagram.clone(),
    };

    let user = repo::insert_user(&state.db, &doc).await?.into_public()?;
    info!(user_id = %user.id, email = %user.email, role = %user.role, "user created");
    Ok(success("user", user))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let document = crud::get_document(&state.db, COLLECTION, &id, "User").await?;
    let user = UserRecord::from_document(document)?.into_public()?;
    Ok(success("user", user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<Value>> {
    let patch = payload.into_patch();
    let document = crud::update_document(&state.db, COLLECTION, &id, &patch, "User").await?;
    let user = UserRecord::from_document(document)?.into_public()?;
    info!(user_id = %user.id, "user updated");
    Ok(success("user", user))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    crud::delete_document(&state.db, COLLECTION, &id, "User").await?;
    info!(%id, "user deleted");
    Ok(success_empty())
}
