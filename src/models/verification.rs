use std::{fmt, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Three-way outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    True,
    Misleading,
    NeedsReview,
}

impl Default for Verdict {
    fn default() -> Self {
        Verdict::NeedsReview
    }
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::True => "true",
            Verdict::Misleading => "misleading",
            Verdict::NeedsReview => "needs review",
        }
    }

    /// Maps any label onto the taxonomy. Unknown labels become `NeedsReview`.
    pub fn from_label(value: &str) -> Self {
        Self::parse_known(value).unwrap_or(Verdict::NeedsReview)
    }

    fn parse_known(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "true" => Some(Verdict::True),
            "misleading" => Some(Verdict::Misleading),
            "needs review" => Some(Verdict::NeedsReview),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_known(s).ok_or_else(|| anyhow!("unknown verdict '{s}'"))
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Verdict::from_label(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub title: String,
    pub source: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub confidence: f64,
    pub explanation: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time: Option<String>,
    /// Completion time reported by the backend, passed through as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A completed verification as kept in history. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    id: String,
    input: String,
    result: VerificationResult,
    timestamp: DateTime<Utc>,
}

impl VerificationRecord {
    /// Builds a record with a fresh random id stamped at the current time.
    pub fn new(input: impl Into<String>, result: VerificationResult) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input, result, Utc::now())
    }

    pub fn with_id(
        id: impl Into<String>,
        input: impl Into<String>,
        result: VerificationResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            input: input.into(),
            result,
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn result(&self) -> &VerificationResult {
        &self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_labels_are_case_insensitive() {
        assert_eq!(Verdict::from_label("TRUE"), Verdict::True);
        assert_eq!(Verdict::from_label("Misleading"), Verdict::Misleading);
        assert_eq!(Verdict::from_label("Needs Review"), Verdict::NeedsReview);
        assert_eq!(Verdict::from_label("needs_review"), Verdict::NeedsReview);
    }

    #[test]
    fn unknown_verdict_is_coerced_to_needs_review() {
        let result: VerificationResult = serde_json::from_str(
            r#"{"verdict":"partially true","confidence":40,"explanation":"x"}"#,
        )
        .unwrap();
        assert_eq!(result.verdict, Verdict::NeedsReview);
        assert!(result.citations.is_empty());
        assert!("partially true".parse::<Verdict>().is_err());
    }

    #[test]
    fn result_uses_camel_case_on_the_wire() {
        let result: VerificationResult = serde_json::from_str(
            r#"{
                "verdict": "true",
                "confidence": 88.5,
                "explanation": "supported",
                "citations": [{"title": "t", "source": "WHO", "url": "https://who.int", "publishedAt": "2024-03-01"}],
                "language": "English",
                "model": "BioBERT + GPT-4",
                "processingTime": "2.1s"
            }"#,
        )
        .unwrap();
        assert_eq!(result.processing_time.as_deref(), Some("2.1s"));
        assert_eq!(result.citations[0].published_at.as_deref(), Some("2024-03-01"));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["verdict"], "true");
        assert_eq!(value["processingTime"], "2.1s");
        assert!(value["citations"][0].get("summary").is_none());
    }

    #[test]
    fn record_reads_browser_style_timestamps() {
        let record: VerificationRecord = serde_json::from_str(
            r#"{
                "id": "1704067200000",
                "input": "claim A",
                "result": {"verdict": "needs review", "confidence": 50, "explanation": "...", "citations": []},
                "timestamp": "2024-01-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(record.id(), "1704067200000");
        assert_eq!(record.timestamp().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
