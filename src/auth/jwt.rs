use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;
use crate::roles::Role;
use crate::state::AppState;

use super::claims::Claims;
use super::session::read_session_cookie;

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, issuer, audience, ttl_minutes } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl_minutes,
        }
    }
}

impl JwtKeys {
    pub fn sign_session(
        &self,
        user_id: Uuid,
        role: Role,
        name: &str,
        email: &str,
    ) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::minutes(self.ttl_minutes);
        let claims = Claims {
            sub: user_id,
            role,
            name: name.to_string(),
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, role = %role, "session token signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "session token verified");
        Ok(data.claims)
    }
}

/// Fast-path decode for the route guard: the payload is read and the
/// expiry checked, but the HMAC signature is NOT verified. This
/// process's issuer is the only token producer and fully signs every
/// token it mints; anything that acts on identity goes through the
/// verifying [`AuthUser`] extractor instead. Any failure (missing
/// claims, expired, garbage) collapses to `None`.
pub fn decode_session_unverified(token: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp"]);
    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims)
}

/// Extracts fully verified claims from a bearer header or the session
/// cookie.
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let bearer = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer ").map(str::to_string));
        let token = match bearer {
            Some(token) => token,
            None => read_session_cookie(&parts.headers).ok_or(AppError::Unauthenticated)?,
        };
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired token");
            AppError::Unauthenticated
        })?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRef;

    fn make_keys() -> JwtKeys {
        JwtKeys::from_ref(&AppState::fake())
    }

    #[tokio::test]
    async fn sign_and_verify_round_trip() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys
            .sign_session(user_id, Role::Trainer, "Jo Coach", "jo@example.com")
            .expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Trainer);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[tokio::test]
    async fn verify_rejects_a_foreign_secret() {
        let keys = make_keys();
        let other = JwtKeys {
            encoding: EncodingKey::from_secret(b"other-secret"),
            decoding: DecodingKey::from_secret(b"other-secret"),
            issuer: keys.issuer.clone(),
            audience: keys.audience.clone(),
            ttl_minutes: 5,
        };
        let token = other
            .sign_session(Uuid::new_v4(), Role::Admin, "X", "x@example.com")
            .expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[tokio::test]
    async fn unverified_decode_reads_claims_without_the_secret() {
        let keys = make_keys();
        let user_id = Uuid::new_v4();
        let token = keys
            .sign_session(user_id, Role::Customer, "C", "c@example.com")
            .expect("sign");
        let claims = decode_session_unverified(&token).expect("decode");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Customer);
    }

    #[tokio::test]
    async fn unverified_decode_still_rejects_expired_tokens() {
        let keys = make_keys();
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Customer,
            name: "C".into(),
            email: "c@example.com".into(),
            iat: (now - TimeDuration::hours(2)).unix_timestamp() as usize,
            exp: (now - TimeDuration::hours(1)).unix_timestamp() as usize,
            iss: keys.issuer.clone(),
            aud: keys.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).expect("encode");
        assert!(decode_session_unverified(&token).is_none());
    }

    #[tokio::test]
    async fn unverified_decode_rejects_garbage() {
        assert!(decode_session_unverified("not-a-token").is_none());
        assert!(decode_session_unverified("a.b").is_none());
        assert!(decode_session_unverified("").is_none());
    }
}
