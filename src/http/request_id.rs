//! Request-id correlation middleware.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::{info_span, Instrument};

/// Header carrying the correlation token in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation token of the current request, available as an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Tag each request with a request id.
///
/// Uses the caller's `X-Request-ID` when present, otherwise generates one.
/// The id is echoed back in the response and recorded on the span the rest
/// of the request runs in.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map_or_else(generate, str::to_owned);

    req.extensions_mut().insert(RequestId(id.clone()));

    let span = info_span!(
        "http_request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let mut response = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn generate() -> String {
    format!("{:032x}", rand::random::<u128>())
}
