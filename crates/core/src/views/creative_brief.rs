use serde::Serialize;

use crate::{fixtures::FixtureStore, types::AnalysisResult, views::Widget};

pub const COLUMNS: [&str; 5] = ["Type", "Label", "Start", "End", "Notes"];

const OBJECT_NOTE: &str = "Potential brand cue";
const EMOTION_NOTE: &str = "Positive audience resonance";

pub const AB_IDEAS: [&str; 3] = [
    "Cut A: Emphasize early logo visibility (00:12–00:18)",
    "Cut B: Highlight smiling crowd (00:30–00:37)",
    "Cut C: Sports action hook (00:44–00:47)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefRow {
    pub kind: &'static str,
    pub label: String,
    pub start: String,
    pub end: String,
    pub notes: &'static str,
}

impl BriefRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.kind.to_string(),
            self.label.clone(),
            self.start.clone(),
            self.end.clone(),
            self.notes.to_string(),
        ]
    }
}

/// Objects first, then emotions, each tagged with its editorial note.
pub fn brief_rows(analysis: &AnalysisResult) -> Vec<BriefRow> {
    let objects = analysis.objects.iter().map(|o| BriefRow {
        kind: "Object",
        label: o.label.clone(),
        start: o.start.clone(),
        end: o.end.clone(),
        notes: OBJECT_NOTE,
    });
    let emotions = analysis.emotions.iter().map(|e| BriefRow {
        kind: "Emotion",
        label: e.label.clone(),
        start: e.start.clone(),
        end: e.end.clone(),
        notes: EMOTION_NOTE,
    });
    objects.chain(emotions).collect()
}

pub fn render(analysis: &AnalysisResult) -> Vec<Widget> {
    vec![
        Widget::Table {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: brief_rows(analysis).iter().map(BriefRow::cells).collect(),
        },
        Widget::label("Suggested A/B Test Ideas"),
        Widget::Bullets {
            items: AB_IDEAS.iter().map(|i| i.to_string()).collect(),
        },
    ]
}

/// The brief is built from the sample analysis, not a gateway call.
pub fn run() -> Vec<Widget> {
    render(&FixtureStore::builtin().analysis())
}
