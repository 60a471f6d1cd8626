//! Response status handling shared by the Discord requests.
//!
//! 429 becomes [`ChatError::RateLimited`] with the wait taken from the JSON
//! `retry_after` field, then the `Retry-After` header, then one second.
//! Other non-success statuses become [`ChatError::Api`].

use crate::error::ChatError;

const DEFAULT_RETRY_AFTER_SECS: f64 = 1.0;
const MAX_RETRY_AFTER_SECS: f64 = 60.0;
const ERROR_BODY_PREVIEW: usize = 800;

/// Check an HTTP response for rate limiting and error statuses.
///
/// Returns the response unchanged on success.
///
/// # Errors
///
/// `RateLimited` for 429, `Api` for any other non-success status.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ChatError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let header = retry_after_header(&resp);
        let body = resp.text().await.unwrap_or_default();
        return Err(ChatError::RateLimited {
            retry_after_secs: retry_after_body(&body)
                .or(header)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ChatError::Api {
            status: status.as_u16(),
            message: preview(&body),
        });
    }
    Ok(resp)
}

fn retry_after_header(resp: &reqwest::Response) -> Option<f64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .and_then(sane_wait)
}

/// Discord reports the wait as fractional seconds in the JSON body.
fn retry_after_body(body: &str) -> Option<f64> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("retry_after")?
        .as_f64()
        .and_then(sane_wait)
}

fn sane_wait(secs: f64) -> Option<f64> {
    (secs.is_finite() && secs > 0.0).then(|| secs.min(MAX_RETRY_AFTER_SECS))
}

fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW {
        return body.to_string();
    }
    let mut out: String = body.chars().take(ERROR_BODY_PREVIEW).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn rate_limit_reads_body_retry_after() {
        let resp = mock_response(429, r#"{"message": "You are being rate limited.", "retry_after": 2.5}"#);
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ChatError::RateLimited { retry_after_secs } if (retry_after_secs - 2.5).abs() < f64::EPSILON));
    }

    #[tokio::test]
    async fn rate_limit_falls_back_to_header() {
        let resp = mock_response_with_retry_after(429, "3");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ChatError::RateLimited { retry_after_secs } if (retry_after_secs - 3.0).abs() < f64::EPSILON));
    }

    #[tokio::test]
    async fn rate_limit_defaults_to_one_second() {
        let resp = mock_response(429, "not json");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(err, ChatError::RateLimited { retry_after_secs } if (retry_after_secs - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn absurd_waits_are_capped_or_ignored() {
        assert_eq!(retry_after_body(r#"{"retry_after": 5000}"#), Some(60.0));
        assert_eq!(retry_after_body(r#"{"retry_after": -1}"#), None);
        assert_eq!(retry_after_body(r#"{"retry_after": "soon"}"#), None);
    }

    #[tokio::test]
    async fn api_error_keeps_status_and_body() {
        let resp = mock_response(403, r#"{"message": "Missing Access"}"#);
        let err = check_response(resp).await.unwrap_err();
        match err {
            ChatError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("Missing Access"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = mock_response(200, "[]");
        assert!(check_response(resp).await.is_ok());
    }

    #[test]
    fn long_error_bodies_are_shortened() {
        let body = "x".repeat(2_000);
        let shortened = preview(&body);
        assert_eq!(shortened.chars().count(), ERROR_BODY_PREVIEW + 3);
        assert!(shortened.ends_with("..."));
    }
}
