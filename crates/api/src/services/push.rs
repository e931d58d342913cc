//! Expo push notification service.
//!
//! Implements the NotificationService trait against the Expo push
//! gateway, which fans out to APNs/FCM for the mobile client.

use std::sync::Arc;
use std::time::Duration;

use domain::services::{
    MockNotificationService, NotificationResult, NotificationService, UnlockRequestedPayload,
    UnlockResponsePayload,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::PushConfig;

/// Expo push message body.
#[derive(Debug, Serialize)]
struct ExpoPushMessage {
    to: String,
    title: String,
    body: String,
    data: serde_json::Value,
}

/// Single ticket in an Expo push response.
#[derive(Debug, Deserialize)]
struct ExpoPushTicket {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Expo push response envelope.
#[derive(Debug, Deserialize)]
struct ExpoPushResponse {
    data: Vec<ExpoPushTicket>,
}

/// Error type for push operations.
#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Push gateway rejected the message: {0}")]
    Rejected(String),

    #[error("Push dispatch is not enabled")]
    NotEnabled,
}

/// Push notification service backed by the Expo push gateway.
pub struct ExpoPushService {
    client: Client,
    config: PushConfig,
}

impl ExpoPushService {
    /// Create a new Expo push service.
    pub fn new(config: PushConfig) -> Result<Self, PushError> {
        if !config.enabled {
            return Err(PushError::NotEnabled);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Send a single message through the gateway.
    async fn send(
        &self,
        push_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> Result<(), PushError> {
        let message = ExpoPushMessage {
            to: push_token.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            data,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&message)
            .send()
            .await?
            .error_for_status()?;

        let tickets: ExpoPushResponse = response.json().await?;

        for ticket in &tickets.data {
            if ticket.status != "ok" {
                return Err(PushError::Rejected(
                    ticket
                        .message
                        .clone()
                        .unwrap_or_else(|| "unknown gateway error".to_string()),
                ));
            }
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationService for ExpoPushService {
    async fn send_unlock_requested(
        &self,
        push_token: &str,
        payload: UnlockRequestedPayload,
    ) -> NotificationResult {
        if push_token.is_empty() {
            return NotificationResult::NoToken;
        }

        let body = match &payload.message {
            Some(message) => format!("{}: {}", payload.requester_name, message),
            None => format!("{} is asking to see this list", payload.requester_name),
        };

        let data = match serde_json::to_value(&payload) {
            Ok(data) => data,
            Err(e) => return NotificationResult::Failed(e.to_string()),
        };

        match self
            .send(push_token, &format!("Unlock request for {}", payload.list_name), &body, data)
            .await
        {
            Ok(()) => NotificationResult::Sent,
            Err(e) => {
                tracing::warn!(
                    list_id = %payload.list_id,
                    error = %e,
                    "Failed to send unlock request notification"
                );
                NotificationResult::Failed(e.to_string())
            }
        }
    }

    async fn send_unlock_response(
        &self,
        push_token: &str,
        payload: UnlockResponsePayload,
    ) -> NotificationResult {
        if push_token.is_empty() {
            return NotificationResult::NoToken;
        }

        let body = format!("Unlock request {}", payload.status);

        let data = match serde_json::to_value(&payload) {
            Ok(data) => data,
            Err(e) => return NotificationResult::Failed(e.to_string()),
        };

        match self.send(push_token, "Unlock request resolved", &body, data).await {
            Ok(()) => NotificationResult::Sent,
            Err(e) => {
                tracing::warn!(
                    request_id = %payload.request_id,
                    error = %e,
                    "Failed to send unlock response notification"
                );
                NotificationResult::Failed(e.to_string())
            }
        }
    }
}

/// Build the notifier for the application.
///
/// Returns the Expo service when push is enabled and configured, and the
/// logging mock otherwise so callers never have to special-case dispatch.
pub fn build_notifier(config: &PushConfig) -> Arc<dyn NotificationService> {
    match ExpoPushService::new(config.clone()) {
        Ok(service) => {
            tracing::info!(url = %config.url, "Push dispatch enabled");
            Arc::new(service)
        }
        Err(PushError::NotEnabled) => {
            tracing::info!("Push dispatch disabled, using mock notifier");
            Arc::new(MockNotificationService::new())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Push service failed to initialize, using mock notifier");
            Arc::new(MockNotificationService::new())
        }
    }
}
