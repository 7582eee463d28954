//! LINE Notify client - one bearer-authenticated form POST per message.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Why a notification attempt failed.
///
/// The handler collapses all of these into a generic 500 for the browser;
/// the variant detail exists for logs only.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to build notification request: {0}")]
    BuildFailed(#[source] reqwest::Error),

    #[error("failed to send notification request: {0}")]
    TransportFailed(#[source] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("failed to read notification response body: {0}")]
    ReadFailed(#[source] reqwest::Error),
}

/// Client for the push-notification endpoint.
///
/// The endpoint URL is injected at construction so tests can point it at a
/// mock server. Cloning is cheap: the inner `reqwest::Client` is a handle.
#[derive(Clone)]
pub struct Notifier {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl Notifier {
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            timeout,
        }
    }

    /// Send one message, authenticated with the given bearer token.
    ///
    /// Builds an `application/x-www-form-urlencoded` body with a single
    /// `message` field and POSTs it once. Success is exactly HTTP 200; any
    /// other status is a [`NotifyError::Rejected`]. No retries.
    pub async fn send(&self, message: &str, token: &str) -> Result<(), NotifyError> {
        info!(
            message_length = message.len(),
            endpoint = %self.endpoint,
            timeout_seconds = self.timeout.as_secs_f64(),
            "notify_send_starting"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(token)
            .form(&[("message", message)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    NotifyError::BuildFailed(e)
                } else {
                    NotifyError::TransportFailed(e)
                }
            })?;

        let status = response.status();

        // The remote returns a small JSON payload; it is captured for
        // diagnostics only, never parsed.
        let body = response.text().await.map_err(NotifyError::ReadFailed)?;

        if status != StatusCode::OK {
            warn!(status_code = status.as_u16(), body = %body, "notify_rejected");
            return Err(NotifyError::Rejected { status, body });
        }

        debug!(status_code = status.as_u16(), body = %body, "notify_response_received");
        info!(status_code = status.as_u16(), "notify_send_complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notifier_for(server: &MockServer) -> Notifier {
        let endpoint = Url::parse(&server.uri()).unwrap();
        Notifier::new(endpoint, Duration::from_millis(2000))
    }

    #[tokio::test]
    async fn send_posts_bearer_token_and_encoded_form_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("Authorization", "Bearer test_token"))
            .and(header("Content-Type", "application/x-www-form-urlencoded"))
            .and(body_string("message=Test+message"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"status":200,"message":"ok"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let result = notifier_for(&server).send("Test message", "test_token").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn send_treats_non_200_as_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"status":401,"message":"Invalid access token"}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = notifier_for(&server)
            .send("Test message", "invalid_token")
            .await
            .unwrap_err();
        match &err {
            NotifyError::Rejected { status, body } => {
                assert_eq!(*status, StatusCode::UNAUTHORIZED);
                assert!(body.contains("Invalid access token"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        // The body is diagnostic; it must survive into the logged error.
        assert!(err.to_string().contains("Invalid access token"));
    }

    #[tokio::test]
    async fn send_maps_timeout_to_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let endpoint = Url::parse(&server.uri()).unwrap();
        let notifier = Notifier::new(endpoint, Duration::from_millis(50));

        let result = notifier.send("Test message", "test_token").await;
        match result {
            Err(NotifyError::TransportFailed(e)) => assert!(e.is_timeout()),
            other => panic!("expected TransportFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_maps_connection_failure_to_transport_error() {
        // Nothing listens on this port.
        let endpoint = Url::parse("http://127.0.0.1:9").unwrap();
        let notifier = Notifier::new(endpoint, Duration::from_millis(2000));

        let result = notifier.send("Test message", "test_token").await;
        assert!(matches!(result, Err(NotifyError::TransportFailed(_))));
    }
}
