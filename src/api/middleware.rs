/// Token extraction and the dashboard route gate
use crate::context::AppContext;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};

/// Cookie that carries the session token
pub const AUTH_COOKIE: &str = "auth-token";

/// Extract the session token from the raw Cookie header
pub fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;

    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == AUTH_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Extract bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Session token from either transport, cookie first
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie_token(headers).or_else(|| extract_bearer_token(headers))
}

/// Route gate for the dashboard
///
/// Requests under /dashboard must carry a session cookie whose token passes
/// full verification (signature and expiry); anything else is redirected to
/// the public entry point. One predicate, one code path, in every deployment
/// mode. Security headers go on every matching response, redirects included.
pub async fn dashboard_gate(
    State(ctx): State<AppContext>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with("/dashboard") {
        return next.run(request).await;
    }

    let autorizado = extract_cookie_token(request.headers())
        .map(|token| ctx.tokens.verify(&token).is_ok())
        .unwrap_or(false);

    let mut response = if autorizado {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "dashboard request without valid session");
        Response::builder()
            .status(StatusCode::TEMPORARY_REDIRECT)
            .header(header::LOCATION, "/")
            .body(axum::body::Body::empty())
            .unwrap_or_default()
    };

    apply_security_headers(response.headers_mut());
    response
}

fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_cookie_token_extraction() {
        let headers = headers_with(header::COOKIE, "auth-token=abc123");
        assert_eq!(extract_cookie_token(&headers), Some("abc123".to_string()));

        // Among other cookies, with surrounding whitespace
        let headers = headers_with(header::COOKIE, "theme=dark; auth-token=abc123; lang=es");
        assert_eq!(extract_cookie_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_cookie_token_absent_or_empty() {
        assert_eq!(extract_cookie_token(&HeaderMap::new()), None);

        let headers = headers_with(header::COOKIE, "theme=dark");
        assert_eq!(extract_cookie_token(&headers), None);

        let headers = headers_with(header::COOKIE, "auth-token=");
        assert_eq!(extract_cookie_token(&headers), None);
    }

    #[test]
    fn test_bearer_token_extraction() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer abc123");
        assert_eq!(extract_bearer_token(&headers), Some("abc123".to_string()));

        let headers = headers_with(header::AUTHORIZATION, "Basic abc123");
        assert_eq!(extract_bearer_token(&headers), None);

        let headers = headers_with(header::AUTHORIZATION, "Bearer ");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_cookie_preferred_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "auth-token=de-cookie".parse().unwrap());
        headers.insert(header::AUTHORIZATION, "Bearer de-header".parse().unwrap());

        assert_eq!(extract_token(&headers), Some("de-cookie".to_string()));
    }

    #[test]
    fn test_bearer_fallback() {
        let headers = headers_with(header::AUTHORIZATION, "Bearer de-header");
        assert_eq!(extract_token(&headers), Some("de-header".to_string()));
    }
}
