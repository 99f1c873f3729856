//! Slack message payload types

use serde::{Deserialize, Serialize};

/// Alert severity level, derived from the budget threshold percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational
    Info,
    /// Warning
    Warning,
    /// Critical
    Critical,
}

impl Severity {
    /// Critical at or above this percentage
    pub const CRITICAL_THRESHOLD: f64 = 90.0;
    /// Warning at or above this percentage
    pub const WARNING_THRESHOLD: f64 = 80.0;

    /// Classify a threshold percentage, highest band first.
    ///
    /// `None` (a threshold that is not a number) is informational.
    pub fn from_threshold(threshold: Option<f64>) -> Self {
        match threshold {
            Some(t) if t >= Self::CRITICAL_THRESHOLD => Self::Critical,
            Some(t) if t >= Self::WARNING_THRESHOLD => Self::Warning,
            _ => Self::Info,
        }
    }

    /// Attachment color for this severity
    pub fn color(self) -> &'static str {
        match self {
            Self::Critical => "#ff0000",
            Self::Warning => "#ffa500",
            Self::Info => "#36a64f",
        }
    }
}

/// Top-level incoming-webhook message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackPayload {
    /// Message attachments; budget alerts always carry exactly one
    pub attachments: Vec<SlackAttachment>,
}

/// A colored attachment block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackAttachment {
    /// Sidebar color, `#rrggbb`
    pub color: String,
    /// Attachment title
    pub title: String,
    /// Labeled fields, rendered in order
    pub fields: Vec<SlackField>,
    /// Footer label
    pub footer: String,
    /// Footer timestamp, seconds since the epoch
    pub ts: i64,
}

/// A labeled value inside an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackField {
    /// Field label
    pub title: String,
    /// Field value
    pub value: String,
    /// Render side by side with neighbouring short fields
    pub short: bool,
}

impl SlackField {
    /// Create a short field
    pub fn short(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: true,
        }
    }
}

impl SlackPayload {
    /// The first attachment, if any
    pub fn attachment(&self) -> Option<&SlackAttachment> {
        self.attachments.first()
    }
}

impl SlackAttachment {
    /// Value of the field with the given title
    pub fn field(&self, title: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.title == title)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100.0, Severity::Critical)]
    #[case(90.0, Severity::Critical)]
    #[case(89.0, Severity::Warning)]
    #[case(89.99, Severity::Warning)]
    #[case(80.0, Severity::Warning)]
    #[case(79.0, Severity::Info)]
    #[case(0.0, Severity::Info)]
    #[case(-5.0, Severity::Info)]
    fn test_severity_bands(#[case] threshold: f64, #[case] expected: Severity) {
        assert_eq!(Severity::from_threshold(Some(threshold)), expected);
    }

    #[test]
    fn test_non_numeric_threshold_is_info() {
        assert_eq!(Severity::from_threshold(None), Severity::Info);
    }

    #[test]
    fn test_colors() {
        assert_eq!(Severity::Critical.color(), "#ff0000");
        assert_eq!(Severity::Warning.color(), "#ffa500");
        assert_eq!(Severity::Info.color(), "#36a64f");
    }

    #[test]
    fn test_field_serializes_short_flag() {
        let json = serde_json::to_value(SlackField::short("Account", "123")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Account", "value": "123", "short": true })
        );
    }
}
