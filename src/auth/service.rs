use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::roles::Role;
use crate::users::{repo, PublicUser, UserDoc};

use super::password::verify_password;

/// Credentials login. Every failure mode (unknown email, OAuth-only
/// account, wrong password) yields the same `InvalidCredentials` so
/// the response never reveals which check failed.
pub async fn login_with_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> AppResult<PublicUser> {
    let Some(user) = repo::find_by_email(pool, email).await? else {
        warn!(%email, "login with unknown email");
        return Err(AppError::InvalidCredentials);
    };
    let Some(hash) = user.doc.password.as_deref() else {
        warn!(%email, "login against password-less account");
        return Err(AppError::InvalidCredentials);
    };
    let ok = verify_password(password, hash).map_err(AppError::Internal)?;
    if !ok {
        warn!(%email, user_id = %user.id, "login with invalid password");
        return Err(AppError::InvalidCredentials);
    }
    let user = user.into_public()?;
    info!(user_id = %user.id, %email, "user logged in");
    Ok(user)
}

pub struct OAuthLogin {
    pub user: PublicUser,
    pub is_new: bool,
}

/// OAuth sign-in: a known email is touched and returned, an unknown
/// one becomes a fresh password-less customer account. The avatar is
/// accepted from the provider but not persisted.
pub async fn login_or_register_oauth(
    pool: &PgPool,
    email: &str,
    name: &str,
) -> AppResult<OAuthLogin> {
    if let Some(existing) = repo::find_by_email(pool, email).await? {
        repo::touch_updated(pool, existing.id).await?;
        let user = existing.into_public()?;
        info!(user_id = %user.id, %email, "oauth login for existing user");
        return Ok(OAuthLogin { user, is_new: false });
    }

    let doc = UserDoc {
        email: email.to_string(),
        password: None,
        name: name.to_string(),
        role_id: Role::DEFAULT.id(),
        phone: None,
        instagram: None,
    };
    let user = repo::insert_user(pool, &doc).await?.into_public()?;
    info!(user_id = %user.id, %email, "oauth login created new customer");
    Ok(OAuthLogin { user, is_new: true })
}
