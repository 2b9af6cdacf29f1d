//! FCM multicast send implementation.
//!
//! Sends one batched request to the configured endpoint using the global
//! `HTTP_CLIENT`. Per-token failures are reported in aggregate only; no
//! stale-token pruning or per-token retry happens here.

use std::time::Duration;

use async_trait::async_trait;

use super::types::{DataPayload, MulticastRequest, MulticastResponse, NotificationPayload};
use crate::config::FcmConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;
use crate::services::notifier::{PingMessage, PushReport, PushSender};

/// FCM multicast push client
pub struct FcmClient {
    config: FcmConfig,
}

impl FcmClient {
    /// Creates a new client from configuration
    pub fn new(config: FcmConfig) -> Self {
        Self { config }
    }

    fn build_request(tokens: &[String], message: &PingMessage) -> MulticastRequest {
        MulticastRequest {
            registration_ids: tokens.to_vec(),
            notification: NotificationPayload {
                title: message.title.clone(),
                body: message.body.clone(),
                sound: message.sound.clone(),
            },
            data: DataPayload {
                click_action: message.click_action.clone(),
                ping_id: message.ping_id.clone(),
                group_id: message.group_id.clone(),
            },
        }
    }
}

#[async_trait]
impl PushSender for FcmClient {
    /// Sends the message to all tokens in a single multicast call.
    ///
    /// Transport and HTTP-level failures surface as upstream errors so the
    /// invoking platform can retry the whole invocation; per-token rejections
    /// only lower the aggregate success count.
    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PingMessage,
    ) -> AppResult<PushReport> {
        let request = Self::build_request(tokens, message);

        let response = HTTP_CLIENT
            .post(&self.config.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("key={}", self.config.server_key),
            )
            .timeout(Duration::from_secs(self.config.request_timeout))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::fcm("multicast send", e))?
            .error_for_status()
            .map_err(|e| AppError::fcm("multicast status", e))?;

        let body: MulticastResponse = response
            .json()
            .await
            .map_err(|e| AppError::fcm("multicast response body", e))?;

        for result in &body.results {
            if let Some(error) = &result.error {
                tracing::debug!(error = %error, "Per-token delivery failure");
            }
        }

        Ok(PushReport {
            success_count: body.success,
            failure_count: body.failure,
        })
    }

    fn name(&self) -> &'static str {
        "fcm"
    }
}
