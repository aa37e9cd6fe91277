use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BarkResult, ServerError};
use crate::transport::RawResponse;

/// Gateway `code` meaning the notification was accepted
pub const SUCCESS_CODE: i64 = 200;

/// HTTP status the gateway answers with on a well-formed request
pub const SUCCESS_STATUS: u16 = 200;

/// JSON document returned by the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Unix seconds at which the gateway handled the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl GatewayResponse {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn handled_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Turn one transport outcome into a result.
///
/// Order matters: transport failures pass through untouched, the HTTP status is
/// checked before any parsing, and only then is the gateway `code` inspected.
pub fn classify(outcome: BarkResult<RawResponse>) -> BarkResult<GatewayResponse> {
    let raw = outcome?;

    if raw.status != SUCCESS_STATUS {
        return Err(ServerError::http_status(raw.status, raw.body).into());
    }

    let response: GatewayResponse = match serde_json::from_str(&raw.body) {
        Ok(response) => response,
        Err(e) => return Err(ServerError::invalid_response(raw.status, e, raw.body).into()),
    };

    if !response.is_success() {
        return Err(ServerError::gateway(raw.status, response).into());
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BarkError, ServerErrorKind};
    use serde_json::json;

    fn raw(status: u16, body: &str) -> BarkResult<RawResponse> {
        Ok(RawResponse {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn test_success() {
        let response = classify(raw(200, r#"{"code":200,"message":"ok"}"#)).unwrap();
        assert_eq!(
            response,
            GatewayResponse {
                code: 200,
                message: "ok".to_string(),
                data: None,
                timestamp: None,
            }
        );
    }

    #[test]
    fn test_success_with_extra_fields() {
        let response = classify(raw(
            200,
            r#"{"code":200,"message":"success","timestamp":1700000000,"data":{"id":7},"extra":true}"#,
        ))
        .unwrap();

        assert_eq!(response.data, Some(json!({"id": 7})));
        assert_eq!(response.timestamp, Some(1_700_000_000));
        assert_eq!(
            response.handled_at().map(|t| t.to_rfc3339()),
            Some("2023-11-14T22:13:20+00:00".to_string())
        );
    }

    #[test]
    fn test_http_status_failure_keeps_raw_body() {
        let err = classify(raw(500, "Internal Server Error")).unwrap_err();
        let server = err.as_server_error().expect("server error");

        assert_eq!(server.kind, ServerErrorKind::HttpStatus);
        assert_eq!(server.status_code, 500);
        assert_eq!(server.raw_body.as_deref(), Some("Internal Server Error"));
        assert!(server.response.is_none());
    }

    #[test]
    fn test_http_status_checked_before_parsing() {
        // A JSON body claiming success must not mask a bad HTTP status
        let err = classify(raw(404, r#"{"code":200,"message":"ok"}"#)).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.as_server_error().map(|e| e.kind), Some(ServerErrorKind::HttpStatus));
    }

    #[test]
    fn test_unparsable_body() {
        let err = classify(raw(200, "<html>oops</html>")).unwrap_err();
        let server = err.as_server_error().expect("server error");

        assert_eq!(server.kind, ServerErrorKind::InvalidResponse);
        assert_eq!(server.status_code, 200);
        assert!(server.message.starts_with("failed to parse response"));
        assert_eq!(server.raw_body.as_deref(), Some("<html>oops</html>"));
    }

    #[test]
    fn test_missing_code_is_unparsable() {
        let err = classify(raw(200, r#"{"message":"ok"}"#)).unwrap_err();
        assert_eq!(
            err.as_server_error().map(|e| e.kind),
            Some(ServerErrorKind::InvalidResponse)
        );
    }

    #[test]
    fn test_gateway_code_failure_attaches_response() {
        let err = classify(raw(200, r#"{"code":400,"message":"invalid key"}"#)).unwrap_err();
        let server = err.as_server_error().expect("server error");

        assert_eq!(server.kind, ServerErrorKind::Gateway);
        assert_eq!(server.status_code, 200);
        assert_eq!(server.message, "API error: invalid key");
        assert!(server.raw_body.is_none());
        let response = server.response.as_ref().expect("parsed response");
        assert_eq!(response.code, 400);
        assert_eq!(response.message, "invalid key");
    }

    #[test]
    fn test_transport_failure_passes_through() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        let err = classify(Err(BarkError::network("request timed out", io))).unwrap_err();
        assert!(matches!(err, BarkError::Network { .. }));
    }
}
