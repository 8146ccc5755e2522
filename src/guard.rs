use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::auth::{decode_session_unverified, read_session_cookie};
use crate::roles::{has_route_access, login_url_for_path, routing_for};

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/register", "/admin/login", "/trainer/login"];

fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|route| path == *route || path.starts_with(&format!("{route}/")))
}

/// Role-to-namespace enforcement in front of every non-API route.
///
/// The token is decoded on the fast path: expiry checked, signature
/// not re-verified, since issuance is the trusted layer (see
/// [`decode_session_unverified`]). A missing or unusable token always
/// degrades to a login redirect carrying the original path, never to a
/// hard error; a valid token outside its namespace bounces to the
/// role's own dashboard.
pub async fn route_guard(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    if is_public(&path) || path == "/api" || path.starts_with("/api/") {
        return next.run(req).await;
    }

    let claims = read_session_cookie(req.headers())
        .and_then(|token| decode_session_unverified(&token));

    let Some(claims) = claims else {
        let login_url = login_url_for_path(&path);
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("callbackUrl", &path)
            .finish();
        debug!(%path, %login_url, "unauthenticated request redirected to login");
        return Redirect::to(&format!("{login_url}?{query}")).into_response();
    };

    if has_route_access(claims.role, &path) {
        next.run(req).await
    } else {
        let dashboard = routing_for(claims.role).dashboard_url;
        debug!(%path, role = %claims.role, %dashboard, "request outside role namespace");
        Redirect::to(dashboard).into_response()
    }
}
