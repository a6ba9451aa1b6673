use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::ContextEqError;

/// Offset inside a clip, parsed from an `mm:ss` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp {
    seconds: u32,
}

impl Timestamp {
    pub fn from_seconds(seconds: u32) -> Self {
        Self { seconds }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }
}

impl FromStr for Timestamp {
    type Err = ContextEqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ContextEqError::InvalidTimestamp(s.to_string());
        let (mins, secs) = s.trim().split_once(':').ok_or_else(invalid)?;
        let mins: u32 = mins.parse().map_err(|_| invalid())?;
        let secs: u32 = secs.parse().map_err(|_| invalid())?;
        if secs >= 60 {
            return Err(invalid());
        }
        let seconds = mins
            .checked_mul(60)
            .and_then(|total| total.checked_add(secs))
            .ok_or_else(invalid)?;
        Ok(Self { seconds })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// Anything that covers a time range of the clip.
pub trait Timed {
    fn start(&self) -> &str;
    fn end(&self) -> &str;

    fn span(&self) -> crate::Result<(Timestamp, Timestamp)> {
        Ok((self.start().parse()?, self.end().parse()?))
    }

    /// True when both ends parse and `start <= end`.
    fn is_ordered(&self) -> bool {
        matches!(self.span(), Ok((start, end)) if start <= end)
    }
}

/// Decodes a field, falling back to its default when it is null or has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "field defaulted");
        T::default()
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    /// Position on the [0, 1] scale.
    pub fn ordinal(&self) -> f64 {
        match self {
            Severity::Low => 0.0,
            Severity::Medium => 0.5,
            Severity::High => 1.0,
        }
    }
}

// Null maps to the default, unrecognised levels to the midpoint.
impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let severity = match Value::deserialize(deserializer)? {
            Value::Null => Severity::default(),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "low" => Severity::Low,
                "medium" => Severity::Medium,
                "high" => Severity::High,
                _ => Severity::Medium,
            },
            _ => Severity::Medium,
        };
        Ok(severity)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyFlag {
    #[serde(deserialize_with = "lenient")]
    pub label: String,
    #[serde(deserialize_with = "lenient")]
    pub start: String,
    #[serde(deserialize_with = "lenient")]
    pub end: String,
    #[serde(deserialize_with = "lenient")]
    pub evidence: String,
    pub severity: Severity,
}

/// A detected object or emotion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Detection {
    #[serde(deserialize_with = "lenient")]
    pub label: String,
    #[serde(deserialize_with = "lenient")]
    pub start: String,
    #[serde(deserialize_with = "lenient")]
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient")]
    pub video_id: String,
    #[serde(deserialize_with = "lenient")]
    pub brand_safety_score: f64,
    #[serde(deserialize_with = "lenient")]
    pub flags: Vec<SafetyFlag>,
    #[serde(deserialize_with = "lenient")]
    pub objects: Vec<Detection>,
    #[serde(deserialize_with = "lenient")]
    pub emotions: Vec<Detection>,
    #[serde(deserialize_with = "lenient")]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneMatch {
    #[serde(deserialize_with = "lenient")]
    pub start: String,
    #[serde(deserialize_with = "lenient")]
    pub end: String,
    #[serde(deserialize_with = "lenient")]
    pub confidence: f64,
    #[serde(deserialize_with = "lenient")]
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    #[serde(deserialize_with = "lenient")]
    pub query: String,
    #[serde(deserialize_with = "lenient")]
    pub matches: Vec<SceneMatch>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KpiRow {
    #[serde(deserialize_with = "lenient")]
    pub moment: String,
    #[serde(rename = "CTR", deserialize_with = "lenient")]
    pub ctr: f64,
    #[serde(rename = "Retention", deserialize_with = "lenient")]
    pub retention: f64,
    #[serde(rename = "ROAS", deserialize_with = "lenient")]
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Embedding {
    #[serde(deserialize_with = "lenient")]
    pub vector: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Default for Ack {
    fn default() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReceipt {
    pub job_id: uuid::Uuid,
    pub video_id: String,
    pub model: String,
    pub library: String,
    pub status: String,
}

impl Timed for SafetyFlag {
    fn start(&self) -> &str {
        &self.start
    }
    fn end(&self) -> &str {
        &self.end
    }
}

impl Timed for Detection {
    fn start(&self) -> &str {
        &self.start
    }
    fn end(&self) -> &str {
        &self.end
    }
}

impl Timed for SceneMatch {
    fn start(&self) -> &str {
        &self.start
    }
    fn end(&self) -> &str {
        &self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamp_parses_minutes_and_seconds() {
        let ts: Timestamp = "01:18".parse().unwrap();
        assert_eq!(ts.seconds(), 78);
        assert_eq!(ts.to_string(), "01:18");
    }

    #[test]
    fn timestamp_rejects_garbage() {
        assert!("".parse::<Timestamp>().is_err());
        assert!("0118".parse::<Timestamp>().is_err());
        assert!("00:75".parse::<Timestamp>().is_err());
        assert!("aa:10".parse::<Timestamp>().is_err());
    }

    #[test]
    fn timestamp_overflow_is_rejected() {
        assert!("99999999:00".parse::<Timestamp>().is_err());
        let flag = SafetyFlag {
            start: "00:10".into(),
            end: "99999999:00".into(),
            ..SafetyFlag::default()
        };
        assert!(!flag.is_ordered());
    }

    #[test]
    fn reversed_range_is_not_ordered() {
        let d = Detection {
            label: "x".into(),
            start: "00:40".into(),
            end: "00:30".into(),
        };
        assert!(!d.is_ordered());
    }

    #[test]
    fn missing_fields_default_to_neutral_values() {
        let res: AnalysisResult = serde_json::from_str(r#"{"video_id": "vid_x"}"#).unwrap();
        assert_eq!(res.video_id, "vid_x");
        assert_eq!(res.brand_safety_score, 0.0);
        assert!(res.flags.is_empty());
        assert!(res.summary.is_empty());
    }

    #[test]
    fn bad_fields_default_without_losing_the_rest() {
        let res: AnalysisResult = serde_json::from_str(
            r#"{
                "brand_safety_score": 0.7,
                "summary": null,
                "objects": "n/a",
                "flags": [{"label": "smoke", "start": "00:01", "end": "00:02", "evidence": null, "severity": "critical"}]
            }"#,
        )
        .unwrap();
        assert_eq!(res.brand_safety_score, 0.7);
        assert!(res.summary.is_empty());
        assert!(res.objects.is_empty());
        assert_eq!(res.flags.len(), 1);
        assert_eq!(res.flags[0].label, "smoke");
        assert!(res.flags[0].evidence.is_empty());
        assert_eq!(res.flags[0].severity, Severity::Medium);
    }

    #[test]
    fn severity_decoding_is_forgiving() {
        let parse = |raw: &str| serde_json::from_str::<Severity>(raw).unwrap();
        assert_eq!(parse(r#""HIGH""#), Severity::High);
        assert_eq!(parse(r#""low""#), Severity::Low);
        assert_eq!(parse("null"), Severity::Low);
        assert_eq!(parse(r#""critical""#), Severity::Medium);
        assert_eq!(parse("3"), Severity::Medium);
    }

    #[test]
    fn kpi_row_uses_display_column_names() {
        let row: KpiRow =
            serde_json::from_str(r#"{"moment":"m","CTR":2.8,"Retention":42,"ROAS":1.4}"#).unwrap();
        assert_eq!(row.retention, 42.0);
        assert_eq!(row.roas, 1.4);
    }

    #[test]
    fn severity_ordinals_stay_in_unit_range() {
        for s in [Severity::Low, Severity::Medium, Severity::High] {
            assert!((0.0..=1.0).contains(&s.ordinal()));
        }
    }
}
