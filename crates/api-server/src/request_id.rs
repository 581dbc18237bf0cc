use axum::{
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Inbound `X-Request-Id` when it is set and printable, otherwise a fresh UUID v4.
pub fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Tags the trace span and the response with the request ID. Server errors
/// are logged once more with the ID so they can be matched to client reports.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let id = resolve_request_id(request.headers());
    tracing::Span::current().record("request_id", id.as_str());

    let mut response = next.run(request).await;
    if response.status().is_server_error() {
        tracing::warn!(request_id = %id, status = response.status().as_u16(), "Request failed");
    }

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}
