//! Request decoding helpers shared by the HTTP handlers.

use libris_http::error::AppError;
use serde::de::DeserializeOwned;

/// Parse a path segment as an integer id.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(format!(
            "id received from request path cannot be converted to an integer: '{raw}'"
        ))
        .with_code("bad_identifier")
    })
}

/// Decode a JSON request body regardless of its declared content type.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(
            AppError::bad_request("empty request body received; body required")
                .with_code("invalid_input"),
        );
    }

    serde_json::from_slice(body).map_err(|err| {
        AppError::bad_request(format!("request body is not a valid book: {err}"))
            .with_code("invalid_input")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn parses_integer_ids() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn non_integer_id_is_bad_identifier() {
        match parse_id("abc") {
            Err(AppError::BadRequest { code, .. }) => assert_eq!(code, "bad_identifier"),
            other => panic!("expected bad identifier, got {other:?}"),
        }
    }

    #[test]
    fn blank_body_is_rejected() {
        let err = decode_json::<serde_json::Value>(b"  \n").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = decode_json::<serde_json::Value>(b"{\"bookName\":").unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
