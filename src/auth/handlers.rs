use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, HeaderMap},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::crud::Validate;
use crate::error::{AppError, AppResult};
use crate::response::success;
use crate::roles::{routing_for, Role};
use crate::state::AppState;
use crate::users::{repo, PublicUser, UserDoc};

use super::dto::{AuthResponse, LoginRequest, OAuthLoginRequest, RegisterRequest};
use super::jwt::{AuthUser, JwtKeys};
use super::password::hash_password;
use super::service;
use super::session;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/oauth", post(oauth_login))
        .route("/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

// The role-specific login pages live inside their namespace routers so
// the nested /trainer and /admin subtrees own every path under them.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(customer_login_page))
        .route("/register", get(register_page))
}

fn session_response(
    keys: &JwtKeys,
    user: PublicUser,
    is_new: Option<bool>,
) -> AppResult<(HeaderMap, Json<AuthResponse>)> {
    let token = keys
        .sign_session(user.id, user.role, &user.name, &user.email)
        .map_err(AppError::Internal)?;
    let mut headers = HeaderMap::new();
    headers.insert(
        SET_COOKIE,
        session::set_cookie(&token, keys.ttl_minutes).parse().map_err(AppError::internal)?,
    );
    Ok((headers, Json(AuthResponse { success: true, token, user, is_new })))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> AppResult<(HeaderMap, Json<AuthResponse>)> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    // Friendly pre-check; the unique index on email closes the race.
    if repo::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::UserExists);
    }

    let hash = hash_password(&payload.password).map_err(AppError::Internal)?;
    let doc = UserDoc {
        email: payload.email.clone(),
        password: Some(hash),
        name: payload.name.clone(),
        role_id: payload.role.id(),
        phone: payload.phone.clone(),
        instagram: payload.instagram.clone(),
    };
    let user = repo::insert_user(&state.db, &doc).await?.into_public()?;
    info!(user_id = %user.id, email = %user.email, "user registered");

    session_response(&JwtKeys::from_ref(&state), user, None)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<AuthResponse>)> {
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    let user = service::login_with_credentials(&state.db, &payload.email, &payload.password).await?;
    session_response(&JwtKeys::from_ref(&state), user, None)
}

#[instrument(skip(state, payload))]
pub async fn oauth_login(
    State(state): State<AppState>,
    Json(mut payload): Json<OAuthLoginRequest>,
) -> AppResult<(HeaderMap, Json<AuthResponse>)> {
    if state.config.oauth.is_none() {
        return Err(AppError::OAuthDisabled);
    }
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    let name = payload.name.as_deref().unwrap_or("User");
    let login = service::login_or_register_oauth(&state.db, &payload.email, name).await?;
    session_response(&JwtKeys::from_ref(&state), login.user, Some(login.is_new))
}

#[instrument]
pub async fn logout() -> AppResult<(HeaderMap, Json<Value>)> {
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session::clear_cookie().parse().map_err(AppError::internal)?);
    Ok((headers, Json(json!({ "success": true }))))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> AppResult<Json<Value>> {
    let user = repo::get_by_id(&state.db, claims.sub).await?.into_public()?;
    Ok(success("user", user))
}

fn login_page_body(role: Role) -> Json<Value> {
    let routing = routing_for(role);
    Json(json!({
        "success": true,
        "role": role,
        "banner": routing.login_banner,
        "dashboardUrl": routing.dashboard_url,
    }))
}

pub async fn customer_login_page() -> Json<Value> {
    login_page_body(Role::Customer)
}

pub async fn trainer_login_page() -> Json<Value> {
    login_page_body(Role::Trainer)
}

pub async fn admin_login_page() -> Json<Value> {
    login_page_body(Role::Admin)
}

pub async fn register_page() -> Json<Value> {
    let roles: Vec<&str> = Role::REGISTERABLE.iter().map(|r| r.name()).collect();
    Json(json!({
        "success": true,
        "roles": roles,
        "banner": routing_for(Role::Customer).login_banner,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    #[tokio::test]
    async fn session_response_sets_the_cookie_and_token() {
        let keys = JwtKeys::from_ref(&AppState::fake());
        let user = PublicUser {
            id: Uuid::new_v4(),
            email: "ana@example.com".into(),
            name: "Ana".into(),
            role: Role::Customer,
            role_id: 1,
            phone: None,
            instagram: None,
            created_at: datetime!(2026-01-01 00:00:00 UTC),
            updated_at: None,
        };
        let (headers, Json(body)) = session_response(&keys, user, Some(true)).expect("response");
        let cookie = headers.get(SET_COOKIE).expect("cookie").to_str().expect("ascii");
        assert!(cookie.starts_with("gd_session="));
        assert!(body.success);
        assert_eq!(body.is_new, Some(true));
        let claims = keys.verify(&body.token).expect("token verifies");
        assert_eq!(claims.role, Role::Customer);
    }
}
