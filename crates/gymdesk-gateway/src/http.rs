//! REST backend client over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use tracing::debug;

use gymdesk_core::config::gateway::GatewayConfig;
use gymdesk_core::error::AppError;
use gymdesk_core::result::AppResult;
use gymdesk_core::types::id::{SessionId, TrainerId};
use gymdesk_entity::member::MemberProfile;
use gymdesk_entity::session::{SessionStatus, TrainingSession};

use crate::dto::{ApiErrorBody, CreateSessionRequest, UpdateStatusRequest};
use crate::gateway::ScheduleGateway;

/// HTTP implementation of [`ScheduleGateway`].
#[derive(Debug, Clone)]
pub struct HttpScheduleGateway {
    /// Shared reqwest client with the configured timeout.
    client: reqwest::Client,
    /// Backend base URL without a trailing slash.
    base_url: String,
    /// Bearer token, if configured.
    api_token: Option<String>,
}

impl HttpScheduleGateway {
    /// Build a gateway from configuration.
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.client.request(method, url);
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a transport-level failure into the engine's error taxonomy.
    fn transport_error(err: reqwest::Error) -> AppError {
        let message = if err.is_timeout() {
            "Backend request timed out".to_string()
        } else if err.is_connect() {
            "Could not reach the backend".to_string()
        } else {
            format!("Backend request failed: {err}")
        };
        AppError::with_source(gymdesk_core::error::ErrorKind::Transport, message, err)
    }

    /// Turn a non-success response into an [`AppError`], preferring the
    /// backend's machine-readable error code over the bare status.
    async fn rejection(response: Response) -> AppError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .unwrap_or_else(|| format!("Backend rejected the request ({status})"));

        match (status, body.code.as_deref()) {
            (_, Some("transition_not_allowed")) => AppError::transition(message),
            (_, Some("schedule_conflict")) | (StatusCode::CONFLICT, _) => {
                AppError::conflict(message)
            }
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
                AppError::validation(message)
            }
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
                AppError::authentication(message)
            }
            (StatusCode::NOT_FOUND, _) => AppError::not_found(message),
            _ => AppError::transport(message),
        }
    }

    async fn check(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::rejection(response).await)
        }
    }
}

#[async_trait]
impl ScheduleGateway for HttpScheduleGateway {
    async fn list_sessions_for_trainer(
        &self,
        trainer_id: TrainerId,
    ) -> AppResult<Vec<TrainingSession>> {
        debug!(%trainer_id, "Fetching trainer sessions");
        let response = self
            .request(Method::GET, &format!("/api/trainers/{trainer_id}/sessions"))
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport_error)
    }

    async fn create_session(&self, request: CreateSessionRequest) -> AppResult<TrainingSession> {
        debug!(trainer_id = %request.trainer_id, starts_at = %request.starts_at, "Booking session");
        let response = self
            .request(Method::POST, "/api/sessions")
            .json(&request)
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport_error)
    }

    async fn update_session_status(
        &self,
        session_id: SessionId,
        status: SessionStatus,
    ) -> AppResult<TrainingSession> {
        debug!(%session_id, %status, "Requesting status transition");
        let response = self
            .request(Method::PATCH, &format!("/api/sessions/{session_id}/status"))
            .json(&UpdateStatusRequest { status })
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport_error)
    }

    async fn delete_session(&self, session_id: SessionId) -> AppResult<()> {
        debug!(%session_id, "Deleting session");
        let response = self
            .request(Method::DELETE, &format!("/api/sessions/{session_id}"))
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_eligible_members(
        &self,
        trainer_id: TrainerId,
    ) -> AppResult<Vec<MemberProfile>> {
        debug!(%trainer_id, "Fetching bookable members");
        let response = self
            .request(
                Method::GET,
                &format!("/api/trainers/{trainer_id}/bookable-members"),
            )
            .send()
            .await
            .map_err(Self::transport_error)?;
        Self::check(response)
            .await?
            .json()
            .await
            .map_err(Self::transport_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gymdesk_core::error::ErrorKind;

    #[test]
    fn test_base_url_trailing_slash_is_stripped() {
        let config = GatewayConfig {
            base_url: "http://gym.example.com/".to_string(),
            api_token: None,
            timeout_seconds: 5,
        };
        let gateway = HttpScheduleGateway::new(&config).unwrap();
        assert_eq!(gateway.base_url, "http://gym.example.com");
    }

    #[tokio::test]
    async fn test_connect_failure_maps_to_transport() {
        // Nothing listens on this port; reqwest fails at connect time.
        let config = GatewayConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_token: None,
            timeout_seconds: 1,
        };
        let gateway = HttpScheduleGateway::new(&config).unwrap();
        let err = gateway
            .list_sessions_for_trainer(TrainerId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transport);
    }
}
