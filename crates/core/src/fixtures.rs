use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::types::{AnalysisResult, KpiRow, SearchResult};

pub const ANALYZE: &str = "analyze";
pub const SEARCH: &str = "search";
pub const KPI: &str = "kpi";

static BUILTIN: LazyLock<FixtureStore> = LazyLock::new(FixtureStore::new);

/// Read-only table of canned payloads served in fixture mode.
pub struct FixtureStore {
    entries: Map<String, Value>,
}

impl FixtureStore {
    fn new() -> Self {
        let mut entries = Map::new();
        entries.insert(
            ANALYZE.to_string(),
            json!({
                "video_id": "vid_demo_001",
                "brand_safety_score": 0.84,
                "flags": [
                    {"label": "mild_violence", "start": "00:23", "end": "00:27", "evidence": "crowd push", "severity": "low"},
                    {"label": "sarcasm_audio", "start": "00:54", "end": "00:59", "evidence": "voice tone", "severity": "low"}
                ],
                "objects": [
                    {"label": "logo_visible", "start": "00:12", "end": "00:18"},
                    {"label": "smiling_people", "start": "00:30", "end": "00:37"},
                    {"label": "soccer_ball", "start": "00:44", "end": "00:47"}
                ],
                "emotions": [
                    {"label": "joy", "start": "00:30", "end": "00:37"},
                    {"label": "excitement", "start": "00:44", "end": "00:47"}
                ],
                "summary": "Energetic outdoor scenes with smiling people, a visible brand logo early on, and a short sports moment."
            }),
        );
        entries.insert(
            SEARCH.to_string(),
            json!({
                "query": "sports",
                "matches": [
                    {"start": "00:41", "end": "00:49", "confidence": 0.91, "evidence": "soccer play, cheering"},
                    {"start": "01:18", "end": "01:27", "confidence": 0.86, "evidence": "stadium crowd, fast motion"}
                ]
            }),
        );
        entries.insert(
            KPI.to_string(),
            json!({
                "rows": [
                    {"moment": "logo_visible@00:12-00:18", "CTR": 2.8, "Retention": 42.0, "ROAS": 1.4},
                    {"moment": "smile@00:30-00:37", "CTR": 3.4, "Retention": 57.0, "ROAS": 1.8},
                    {"moment": "sports@00:44-00:47", "CTR": 3.1, "Retention": 51.0, "ROAS": 1.6}
                ]
            }),
        );
        Self { entries }
    }

    pub fn builtin() -> &'static FixtureStore {
        &BUILTIN
    }

    /// Returns the named payload, or an empty mapping for unknown names.
    pub fn get(&self, name: &str) -> Map<String, Value> {
        match self.entries.get(name) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn analysis(&self) -> AnalysisResult {
        self.typed(ANALYZE)
    }

    pub fn search(&self) -> SearchResult {
        self.typed(SEARCH)
    }

    pub fn kpi_rows(&self) -> Vec<KpiRow> {
        self.get(KPI)
            .remove("rows")
            .and_then(|rows| serde_json::from_value(rows).ok())
            .unwrap_or_default()
    }

    fn typed<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        serde_json::from_value(Value::Object(self.get(name))).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Severity, Timed};
    use pretty_assertions::assert_eq;

    #[test]
    fn holds_exactly_three_entries() {
        let mut names: Vec<_> = FixtureStore::builtin().names().collect();
        names.sort();
        assert_eq!(names, vec!["analyze", "kpi", "search"]);
    }

    #[test]
    fn unknown_name_is_empty_mapping() {
        assert!(FixtureStore::builtin().get("transcribe").is_empty());
        assert!(FixtureStore::builtin().get("").is_empty());
    }

    #[test]
    fn analyze_fixture_shape() {
        let res = FixtureStore::builtin().analysis();
        assert_eq!(res.video_id, "vid_demo_001");
        assert_eq!(res.brand_safety_score, 0.84);
        assert_eq!(res.flags.len(), 2);
        assert_eq!(res.flags[0].label, "mild_violence");
        assert_eq!(res.flags[1].evidence, "voice tone");
        assert!(res.flags.iter().all(|f| f.severity == Severity::Low));
        let objects: Vec<_> = res.objects.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(objects, vec!["logo_visible", "smiling_people", "soccer_ball"]);
        let emotions: Vec<_> = res.emotions.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(emotions, vec!["joy", "excitement"]);
        assert!(res.summary.starts_with("Energetic outdoor scenes"));
    }

    #[test]
    fn search_fixture_shape() {
        let res = FixtureStore::builtin().search();
        assert_eq!(res.query, "sports");
        assert_eq!(res.matches.len(), 2);
        assert_eq!(res.matches[0].confidence, 0.91);
        assert_eq!(res.matches[1].start, "01:18");
        assert_eq!(res.matches[1].evidence, "stadium crowd, fast motion");
    }

    #[test]
    fn kpi_fixture_shape() {
        let rows = FixtureStore::builtin().kpi_rows();
        let moments: Vec<_> = rows.iter().map(|r| r.moment.as_str()).collect();
        assert_eq!(
            moments,
            vec![
                "logo_visible@00:12-00:18",
                "smile@00:30-00:37",
                "sports@00:44-00:47"
            ]
        );
        let ctr: Vec<_> = rows.iter().map(|r| r.ctr).collect();
        assert_eq!(ctr, vec![2.8, 3.4, 3.1]);
        let retention: Vec<_> = rows.iter().map(|r| r.retention).collect();
        assert_eq!(retention, vec![42.0, 57.0, 51.0]);
    }

    #[test]
    fn fixture_ranges_and_scores_are_bounded() {
        let store = FixtureStore::builtin();
        let analysis = store.analysis();
        assert!((0.0..=1.0).contains(&analysis.brand_safety_score));
        for flag in &analysis.flags {
            assert!(flag.is_ordered(), "{} out of order", flag.label);
            assert!((0.0..=1.0).contains(&flag.severity.ordinal()));
        }
        for d in analysis.objects.iter().chain(&analysis.emotions) {
            assert!(d.is_ordered(), "{} out of order", d.label);
        }
        for m in &store.search().matches {
            assert!(m.is_ordered());
            assert!((0.0..=1.0).contains(&m.confidence));
        }
    }

    #[test]
    fn get_returns_a_copy() {
        let store = FixtureStore::builtin();
        let mut copy = store.get(ANALYZE);
        copy.insert("video_id".into(), json!("mutated"));
        assert_eq!(store.analysis().video_id, "vid_demo_001");
    }
}
