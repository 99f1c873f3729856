//! Inbound event envelope

use serde::{Deserialize, Serialize};

/// The event delivered by the notification topic.
///
/// Only the fields the bridge reads are modelled; anything else in the
/// envelope is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnsEvent {
    /// Event records; budget alerts arrive one per event
    #[serde(rename = "Records", default)]
    pub records: Vec<SnsRecord>,
}

/// A single record in the envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsRecord {
    /// The topic message
    #[serde(rename = "Sns")]
    pub sns: SnsMessage,
}

/// The topic message carrying the serialized budget notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnsMessage {
    /// JSON-encoded budget notification
    #[serde(rename = "Message", default)]
    pub message: String,

    /// Optional subject line
    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl SnsEvent {
    /// Wrap a raw message in a single-record envelope
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            records: vec![SnsRecord {
                sns: SnsMessage {
                    message: message.into(),
                    subject: None,
                },
            }],
        }
    }

    /// The embedded message of the first record
    pub fn first_message(&self) -> Option<&str> {
        self.records.first().map(|r| r.sns.message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let raw = r#"{
            "Records": [{
                "EventSource": "aws:sns",
                "Sns": {
                    "Type": "Notification",
                    "Subject": "AWS Budgets: Monthly-EC2 has exceeded your alert threshold",
                    "Message": "{\"Account\":\"123456789012\"}"
                }
            }]
        }"#;

        let event: SnsEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.first_message(), Some("{\"Account\":\"123456789012\"}"));
        assert!(event.records[0].sns.subject.is_some());
    }

    #[test]
    fn test_empty_envelope_has_no_message() {
        let event: SnsEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(event.first_message(), None);
    }
}
