//! Request correlation middleware.
//!
//! Every response carries an `x-request-id` header so a visitor report can
//! be matched against logs and Sentry events. Upstream proxies may supply
//! the id; otherwise one is minted here.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Take the upstream-provided request id, or mint a fresh UUID v4.
fn incoming_request_id(request: &Request) -> String {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned)
}

/// Middleware that ensures every request has a request ID.
///
/// The id is tagged onto the Sentry scope for error correlation and echoed
/// in the response headers for client visibility.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request);

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });
    tracing::debug!(%request_id, "handling request");

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_upstream_id_is_reused() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "proxy-supplied-id")
            .body(Body::empty())
            .expect("request");

        assert_eq!(incoming_request_id(&request), "proxy-supplied-id");
    }

    #[test]
    fn test_missing_id_is_minted() {
        let request = Request::builder().body(Body::empty()).expect("request");

        let id = incoming_request_id(&request);
        assert!(Uuid::parse_str(&id).is_ok(), "minted id is a UUID: {id}");
    }
}
