//! Notification service for push notifications.
//!
//! Dispatch is strictly best-effort and fire-and-forget: callers spawn it
//! after their own transaction commits, and a failed send is logged, never
//! surfaced or rolled back into the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    UnlockRequested,
    UnlockResponse,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::UnlockRequested => write!(f, "unlock_requested"),
            NotificationType::UnlockResponse => write!(f, "unlock_response"),
        }
    }
}

/// Payload sent to a list owner when someone requests unlocking their list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequestedPayload {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub list_id: Uuid,
    pub list_name: String,
    pub requester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Payload sent to a requester when the owner responds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponsePayload {
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub request_id: Uuid,
    pub list_id: Uuid,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Result of a notification send attempt.
#[derive(Debug, Clone)]
pub enum NotificationResult {
    /// Notification was sent successfully.
    Sent,
    /// The target has no push token registered.
    NoToken,
    /// Sending failed (non-blocking; logged by the caller).
    Failed(String),
}

/// Notification service trait for sending push notifications.
#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Notify a list owner that an unlock request was filed.
    async fn send_unlock_requested(
        &self,
        push_token: &str,
        payload: UnlockRequestedPayload,
    ) -> NotificationResult;

    /// Notify a requester of the owner's decision.
    async fn send_unlock_response(
        &self,
        push_token: &str,
        payload: UnlockResponsePayload,
    ) -> NotificationResult;
}

/// Mock notification service for development and testing.
///
/// Logs notifications but doesn't actually send them.
#[derive(Debug, Clone, Default)]
pub struct MockNotificationService {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
}

impl MockNotificationService {
    /// Create a new mock notification service.
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    /// Create a mock service that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl NotificationService for MockNotificationService {
    async fn send_unlock_requested(
        &self,
        push_token: &str,
        payload: UnlockRequestedPayload,
    ) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                push_token = %push_token,
                list_id = %payload.list_id,
                "Mock notification service simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            push_token = %push_token,
            list_id = %payload.list_id,
            requester = %payload.requester_name,
            "Mock: Would send unlock_requested notification"
        );

        NotificationResult::Sent
    }

    async fn send_unlock_response(
        &self,
        push_token: &str,
        payload: UnlockResponsePayload,
    ) -> NotificationResult {
        if self.simulate_failure {
            tracing::warn!(
                push_token = %push_token,
                request_id = %payload.request_id,
                "Mock notification service simulating failure"
            );
            return NotificationResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            push_token = %push_token,
            request_id = %payload.request_id,
            status = %payload.status,
            "Mock: Would send unlock_response notification"
        );

        NotificationResult::Sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_display() {
        assert_eq!(
            NotificationType::UnlockRequested.to_string(),
            "unlock_requested"
        );
        assert_eq!(NotificationType::UnlockResponse.to_string(), "unlock_response");
    }

    #[test]
    fn test_unlock_requested_payload_serialization() {
        let payload = UnlockRequestedPayload {
            notification_type: NotificationType::UnlockRequested,
            list_id: Uuid::nil(),
            list_name: "Wedding registry".to_string(),
            requester_name: "Uncle Bo".to_string(),
            message: None,
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("unlock_requested"));
        assert!(json.contains("Wedding registry"));
        assert!(!json.contains("message"));
    }

    #[test]
    fn test_unlock_response_payload_serialization() {
        let payload = UnlockResponsePayload {
            notification_type: NotificationType::UnlockResponse,
            request_id: Uuid::nil(),
            list_id: Uuid::nil(),
            status: "approved".to_string(),
            note: Some("Come on in".to_string()),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("unlock_response"));
        assert!(json.contains("approved"));
    }

    #[tokio::test]
    async fn test_mock_notification_service_send() {
        let service = MockNotificationService::new();

        let payload = UnlockRequestedPayload {
            notification_type: NotificationType::UnlockRequested,
            list_id: Uuid::nil(),
            list_name: "Test".to_string(),
            requester_name: "Test".to_string(),
            message: None,
            timestamp: Utc::now(),
        };

        let result = service.send_unlock_requested("token123", payload).await;
        assert!(matches!(result, NotificationResult::Sent));
    }

    #[tokio::test]
    async fn test_mock_notification_service_failure() {
        let service = MockNotificationService::failing();

        let payload = UnlockResponsePayload {
            notification_type: NotificationType::UnlockResponse,
            request_id: Uuid::nil(),
            list_id: Uuid::nil(),
            status: "denied".to_string(),
            note: None,
            timestamp: Utc::now(),
        };

        let result = service.send_unlock_response("token123", payload).await;
        assert!(matches!(result, NotificationResult::Failed(_)));
    }
}
