use axum::http::HeaderMap;

pub const SESSION_COOKIE: &str = "gd_session";

/// Pulls the session token out of the Cookie header, if present.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    for header in headers.get_all(axum::http::header::COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// Set-Cookie value for a freshly issued session token.
pub fn set_cookie(token: &str, ttl_minutes: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl_minutes.max(0) * 60
    )
}

/// Set-Cookie value that expires the session immediately.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, value.parse().expect("header value"));
        headers
    }

    #[test]
    fn reads_the_session_cookie_among_others() {
        let headers = headers("theme=dark; gd_session=tok123; lang=en");
        assert_eq!(read_session_cookie(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn missing_or_empty_cookie_is_none() {
        assert_eq!(read_session_cookie(&HeaderMap::new()), None);
        assert_eq!(read_session_cookie(&headers("theme=dark")), None);
        assert_eq!(read_session_cookie(&headers("gd_session=")), None);
    }

    #[test]
    fn set_and_clear_are_http_only_and_scoped_to_root() {
        let set = set_cookie("tok", 2);
        assert!(set.starts_with("gd_session=tok;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=120"));
        let clear = clear_cookie();
        assert!(clear.contains("Max-Age=0"));
    }
}
