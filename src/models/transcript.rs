//! Call and SMS transcript DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptKind {
    Sms,
    Voice,
}

impl TranscriptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptKind::Sms => "sms",
            TranscriptKind::Voice => "voice",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TranscriptKind::Sms => "SMS",
            TranscriptKind::Voice => "Voice",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" => Some(TranscriptKind::Sms),
            "voice" | "call" => Some(TranscriptKind::Voice),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptMessage {
    /// `user`, `assistant` or `system`
    pub role: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TranscriptMessage {
    pub fn is_customer(&self) -> bool {
        matches!(self.role.as_str(), "user" | "customer" | "caller")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TranscriptKind,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub messages: Vec<TranscriptMessage>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<u32>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transcript {
    /// Messages in chronological order; untimestamped messages keep their position
    pub fn ordered_messages(&self) -> Vec<&TranscriptMessage> {
        let mut messages: Vec<_> = self.messages.iter().collect();
        if messages.iter().all(|m| m.timestamp.is_some()) {
            messages.sort_by_key(|m| m.timestamp);
        }
        messages
    }

    /// Summary if present, otherwise the first customer message
    pub fn preview(&self) -> String {
        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            return summary.to_string();
        }
        self.messages
            .iter()
            .find(|m| m.is_customer())
            .map(|m| m.content.chars().take(120).collect())
            .unwrap_or_else(|| "No messages".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_decoding_and_preview() {
        let json = r#"{
            "id": "t1",
            "type": "voice",
            "customer_phone": "+15550001111",
            "messages": [
                {"role": "assistant", "content": "Thanks for calling!", "timestamp": "2024-01-01T10:00:00Z"},
                {"role": "user", "content": "I'd like a pizza", "timestamp": "2024-01-01T10:00:05Z"}
            ],
            "duration_seconds": 95,
            "order_id": "o1"
        }"#;
        let t: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(t.kind, TranscriptKind::Voice);
        assert_eq!(t.preview(), "I'd like a pizza");
        assert_eq!(t.ordered_messages()[0].role, "assistant");
    }

    #[test]
    fn test_messages_sorted_by_timestamp() {
        let json = r#"{
            "id": "t2",
            "type": "sms",
            "messages": [
                {"role": "assistant", "content": "second", "timestamp": "2024-01-01T10:01:00Z"},
                {"role": "user", "content": "first", "timestamp": "2024-01-01T10:00:00Z"}
            ],
            "summary": "Asked about hours"
        }"#;
        let t: Transcript = serde_json::from_str(json).unwrap();
        assert_eq!(t.ordered_messages()[0].content, "first");
        assert_eq!(t.preview(), "Asked about hours");
    }
}
