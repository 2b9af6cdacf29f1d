//! Wire types for the FCM multicast send endpoint.

use serde::{Deserialize, Serialize};

/// Multicast send request: one payload fanned out to many tokens
#[derive(Debug, Clone, Serialize)]
pub struct MulticastRequest {
    /// Recipient device tokens
    pub registration_ids: Vec<String>,
    /// Display payload
    pub notification: NotificationPayload,
    /// Data payload for client-side routing
    pub data: DataPayload,
}

/// Display portion of the push payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub sound: String,
}

/// Data portion of the push payload, consumed by the mobile client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPayload {
    /// Client-side routing marker
    pub click_action: String,
    /// Ping document id for deep-linking
    #[serde(rename = "pingId")]
    pub ping_id: String,
    /// Group document id for deep-linking
    #[serde(rename = "groupId")]
    pub group_id: String,
}

/// Multicast send response with aggregate counts and per-token results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MulticastResponse {
    /// Number of messages accepted for delivery
    #[serde(default)]
    pub success: u64,
    /// Number of messages rejected
    #[serde(default)]
    pub failure: u64,
    /// Per-token results, positionally matching the request token list
    #[serde(default)]
    pub results: Vec<SendResult>,
}

/// Per-token send result
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendResult {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multicast_request_serialization() {
        let request = MulticastRequest {
            registration_ids: vec!["T2".to_string()],
            notification: NotificationPayload {
                title: "New Ping in the Group!".to_string(),
                body: "Alice started a ping: \"Lunch\"".to_string(),
                sound: "default".to_string(),
            },
            data: DataPayload {
                click_action: "FLUTTER_NOTIFICATION_CLICK".to_string(),
                ping_id: "p1".to_string(),
                group_id: "g1".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["registration_ids"][0], "T2");
        assert_eq!(json["notification"]["sound"], "default");
        assert_eq!(json["data"]["click_action"], "FLUTTER_NOTIFICATION_CLICK");
        assert_eq!(json["data"]["pingId"], "p1");
        assert_eq!(json["data"]["groupId"], "g1");
    }

    #[test]
    fn test_multicast_response_deserialization() {
        let json = r#"{
            "multicast_id": 123,
            "success": 1,
            "failure": 1,
            "results": [
                {"message_id": "m1"},
                {"error": "NotRegistered"}
            ]
        }"#;
        let response: MulticastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.success, 1);
        assert_eq!(response.failure, 1);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].message_id.as_deref(), Some("m1"));
        assert_eq!(response.results[1].error.as_deref(), Some("NotRegistered"));
    }

    #[test]
    fn test_multicast_response_defaults() {
        let response: MulticastResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.success, 0);
        assert_eq!(response.failure, 0);
        assert!(response.results.is_empty());
    }
}
