use axum::{
    extract::Request,
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::Response,
};

/// Header the platform reads the Django CSRF token from.
pub const CSRF_HEADER_NAME: &str = "x-csrftoken";

/// Token taken from the caller's request, forwarded to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(pub String);

pub fn csrf_token_from_headers(headers: &HeaderMap) -> Option<CsrfToken> {
    headers
        .get(CSRF_HEADER_NAME)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| CsrfToken(token.to_string()))
}

/// Requires `X-CSRFToken` on state-changing requests.
///
/// The gateway does not validate the token itself; the platform does. The
/// token is stored in request extensions for the proxy handlers.
pub async fn csrf_middleware(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let method = request.method();
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    match csrf_token_from_headers(request.headers()) {
        Some(token) => {
            tracing::debug!("CSRF header present");
            request.extensions_mut().insert(token);
            Ok(next.run(request).await)
        }
        None => {
            tracing::warn!("CSRF check failed: missing {} header", CSRF_HEADER_NAME);
            Err(StatusCode::FORBIDDEN)
        }
    }
}
