//! Mock-serving handler: resolves any inbound request and replays the
//! stored response.

use axum::{
    body::{to_bytes, Body},
    extract::{Query, Request, State},
    http::{self, Method},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::http::state::AppState;
use crate::multimap::decanonicalize;
use crate::resolver::RequestShape;
use crate::storage::Mock;

/// Largest request body read for matching.
pub const MAX_BODY_SIZE: usize = 16 * 1024 * 1024;

/// Serve a mocked response for any method on any path.
///
/// # Returns
///
/// Returns the matched mock's status, headers and body; `not_found` (404)
/// when nothing matches; `internal` (500) when the store or the stored
/// response cannot be used.
pub async fn serve_mock(State(state): State<AppState>, req: Request) -> Response {
    info!("mocking response...");

    match resolve_and_replay(&state, req).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn resolve_and_replay(state: &AppState, req: Request) -> Result<Response, ApiError> {
    let Query(query) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let method = req.method().clone();
    let path = decode_path(req.uri().path())?;

    let body = if method == Method::GET {
        Vec::new()
    } else {
        to_bytes(req.into_body(), MAX_BODY_SIZE)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to read request body: {e}")))?
            .to_vec()
    };

    let shape = RequestShape::new(method.as_str(), path, body, query);
    let mock = state.resolver.resolve(&shape)?.ok_or(ApiError::NotFound)?;

    info!(mock_id = mock.id, status = mock.rs_status, "replaying mock");
    replay(mock)
}

/// Percent-decode the request path so it compares against stored paths.
fn decode_path(raw: &str) -> Result<String, ApiError> {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|path| path.into_owned())
        .map_err(|e| ApiError::BadRequest(format!("request path [{raw}] is not valid UTF-8: {e}")))
}

/// Build the outbound response from a mock's stored status, headers and body.
///
/// The body is handed to the server only after status and headers are in
/// place; a failure while streaming it out can no longer change the status
/// and is only logged by the server.
fn replay(mock: Mock) -> Result<Response, ApiError> {
    let mut builder = http::Response::builder().status(mock.rs_status);

    for (name, values) in decanonicalize(&mock.rs_headers) {
        for value in values {
            builder = builder.header(&name, value);
        }
    }

    builder.body(Body::from(mock.rs_body)).map_err(|e| {
        warn!(mock_id = mock.id, "stored response is not a valid HTTP response");
        ApiError::Internal(format!("failed to build response for mock [{}]: {e}", mock.id))
    })
}

#[cfg(test)]
mod tests {
    use crate::multimap::MultiMapEntry;

    use super::*;

    fn mock(status: u16, headers: Vec<MultiMapEntry>, body: &str) -> Mock {
        Mock {
            id: 1,
            group_id: 1,
            name: "m".into(),
            active: true,
            rq_method: "GET".into(),
            rq_path: "/".into(),
            rq_body: String::new(),
            rq_query_params: Vec::new(),
            rs_status: status,
            rs_headers: headers,
            rs_body: body.into(),
        }
    }

    /// Test replaying status, multi-valued headers and body.
    #[tokio::test]
    async fn test_replay() {
        let response = replay(mock(
            201,
            vec![
                MultiMapEntry::new("Set-Cookie", ["a=1", "b=2"]),
                MultiMapEntry::new("Content-Type", ["application/json"]),
            ],
            r#"{"ok":true}"#,
        ))
        .expect("valid response");

        assert_eq!(response.status(), axum::http::StatusCode::CREATED);
        let cookies: Vec<&str> = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .map(|v| v.to_str().expect("ascii"))
            .collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert_eq!(response.headers()["content-type"], "application/json");

        let (_, body) = response.into_parts();
        let body_bytes = to_bytes(body, usize::MAX).await.expect("read body");
        assert_eq!(&body_bytes[..], br#"{"ok":true}"#);
    }

    /// Test that an empty stored body produces an empty response body.
    #[tokio::test]
    async fn test_replay_empty_body() {
        let response = replay(mock(204, Vec::new(), "")).expect("valid response");
        assert_eq!(response.status(), axum::http::StatusCode::NO_CONTENT);

        let (_, body) = response.into_parts();
        let body_bytes = to_bytes(body, usize::MAX).await.expect("read body");
        assert!(body_bytes.is_empty());
    }

    /// Test that encoded paths are decoded and invalid UTF-8 is refused.
    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/users/john%20doe").expect("valid"), "/users/john doe");
        assert_eq!(decode_path("/caf%C3%A9").expect("valid"), "/café");
        assert_eq!(decode_path("/plain").expect("valid"), "/plain");

        let err = decode_path("/bad%FF").expect_err("invalid utf-8");
        assert_eq!(err.code(), crate::error::ErrorCode::BadRequest);
    }

    /// Test that an unusable stored header is an internal error.
    #[test]
    fn test_replay_invalid_header() {
        let err = replay(mock(200, vec![MultiMapEntry::new("bad header", ["v"])], ""))
            .expect_err("invalid header name");
        assert_eq!(err.code(), crate::error::ErrorCode::Internal);
    }
}
