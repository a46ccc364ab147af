//! Assessment service client.
//!
//! [`Assessor`] is the seam the session depends on. [`HttpReviewClient`] is the
//! production implementation: one JSON `POST` per submission, no retries.
//! Transport, status, and payload failures all come back as [`ReviewError`].

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ReviewError;
use crate::types::{Metrics, ReviewResult};

/// Assessment endpoint used when neither config nor environment names one.
pub const DEFAULT_ENDPOINT: &str = "https://code-review-main-backend.onrender.com/ai/get-review";

/// Longest slice of an error body kept in [`ReviewError::Service`].
const MAX_ERROR_BODY: usize = 200;

/// Something that can turn source code into a [`ReviewResult`].
pub trait Assessor: Send + Sync + 'static {
    /// Submits `code` for assessment. Resolves once, with a result or an error.
    fn submit(&self, code: String) -> impl Future<Output = Result<ReviewResult, ReviewError>> + Send;
}

/// HTTP client for the external assessment service.
#[derive(Clone)]
pub struct HttpReviewClient {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    code: &'a str,
}

#[derive(Deserialize)]
struct RawAssessment {
    #[serde(rename = "reviewText", default)]
    review_text: Option<String>,
    #[serde(default)]
    score: Option<i64>,
    #[serde(default)]
    metrics: Option<Metrics>,
}

impl HttpReviewClient {
    /// Builds a client for `endpoint`.
    ///
    /// Only the connection phase is bounded by `connect_timeout`; the request
    /// itself runs until the service answers or the network gives up.
    pub fn new(endpoint: impl Into<String>, connect_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_client(client, endpoint)
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Assessor for HttpReviewClient {
    async fn submit(&self, code: String) -> Result<ReviewResult, ReviewError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = code.len(), "submitting code for review");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&SubmitRequest { code: &code })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReviewError::Service {
                status: status.as_u16(),
                body: truncate(body, MAX_ERROR_BODY),
            });
        }

        let bytes = response.bytes().await?;
        parse_assessment(&bytes)
    }
}

/// Normalizes a raw response body into a [`ReviewResult`].
///
/// Missing `reviewText` becomes an empty narrative and missing metric counts
/// become 0. A missing `score`, or a body that is not an assessment object,
/// is a [`ReviewError::Parse`].
pub fn parse_assessment(body: &[u8]) -> Result<ReviewResult, ReviewError> {
    let raw: RawAssessment =
        serde_json::from_slice(body).map_err(|e| ReviewError::Parse(e.to_string()))?;

    let score = raw
        .score
        .ok_or_else(|| ReviewError::Parse("response has no score".to_owned()))?;

    Ok(ReviewResult {
        review_text: raw.review_text.unwrap_or_default(),
        score,
        metrics: raw.metrics.unwrap_or_default(),
    })
}

fn truncate(mut s: String, max: usize) -> String {
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push('…');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpReviewClient {
        HttpReviewClient::new(format!("{}/ai/get-review", server.uri()), Duration::from_secs(2))
    }

    #[test]
    fn parse_fills_defaults_for_missing_fields() {
        let result = parse_assessment(br#"{"score": 55}"#).unwrap();
        assert_eq!(result.review_text, "");
        assert_eq!(result.score, 55);
        assert_eq!(result.metrics, Metrics::default());

        let result =
            parse_assessment(br#"{"reviewText": "ok", "score": 92, "metrics": {"insights": 3}}"#)
                .unwrap();
        assert_eq!(result.review_text, "ok");
        assert_eq!(result.metrics, Metrics { insights: 3, suggestions: 0, issues: 0 });
    }

    #[test]
    fn parse_treats_null_counts_as_zero() {
        let result =
            parse_assessment(br#"{"score": 80, "metrics": {"insights": null, "suggestions": 2}}"#)
                .unwrap();
        assert_eq!(result.score, 80);
        assert_eq!(result.metrics, Metrics { insights: 0, suggestions: 2, issues: 0 });

        let result = parse_assessment(br#"{"score": 80, "metrics": null}"#).unwrap();
        assert_eq!(result.metrics, Metrics::default());
    }

    #[test]
    fn parse_rejects_missing_score() {
        let err = parse_assessment(br#"{"reviewText": "fine", "metrics": {}}"#).unwrap_err();
        assert!(matches!(err, ReviewError::Parse(_)));
    }

    #[test]
    fn parse_rejects_non_object_bodies() {
        assert!(matches!(parse_assessment(b"\"Internal error\""), Err(ReviewError::Parse(_))));
        assert!(matches!(parse_assessment(b"<html></html>"), Err(ReviewError::Parse(_))));
        assert!(matches!(parse_assessment(br#"{"score": "high"}"#), Err(ReviewError::Parse(_))));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short".to_owned(), 10), "short");
        assert_eq!(truncate("ééé".to_owned(), 3), "é…");
    }

    #[tokio::test]
    async fn submit_posts_code_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai/get-review"))
            .and(body_json(serde_json::json!({ "code": "fn main() {}" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reviewText": "## Looks fine",
                "score": 81,
                "metrics": { "insights": 1, "suggestions": 2, "issues": 0 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server).submit("fn main() {}".to_owned()).await.unwrap();
        assert_eq!(result.score, 81);
        assert_eq!(result.review_text, "## Looks fine");
        assert_eq!(result.metrics.suggestions, 2);
    }

    #[tokio::test]
    async fn submit_maps_error_status_to_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ai/get-review"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server).submit("x".to_owned()).await.unwrap_err();
        match err {
            ReviewError::Service { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn submit_maps_bare_error_payload_to_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "model unavailable" })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).submit("x".to_owned()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Parse(_)));
    }

    #[tokio::test]
    async fn submit_maps_unreachable_service_to_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = HttpReviewClient::new("http://127.0.0.1:9/ai/get-review", Duration::from_secs(2));
        let err = client.submit("x".to_owned()).await.unwrap_err();
        assert!(matches!(err, ReviewError::Transport(_)));
    }
}
