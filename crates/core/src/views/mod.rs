//! Per-tab view controllers.
//!
//! Every tab turns (user input, gateway result) into a flat list of
//! [`Widget`]s. Front-ends only decide how a widget looks.

pub mod campaign_explainer;
pub mod context_match;
pub mod creative_brief;
pub mod realtime_bot;
pub mod safety_radar;
pub mod upload_index;

use chrono::Datelike;
use serde::Serialize;
use serde_json::Value;

use crate::{config::GatewayMode, error::ContextEqError};

pub const APP_NAME: &str = "ContextEQ";
pub const TAGLINE: &str = "Where Ads & Brand Safety Meets Business Growth at Enterprise Scale";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    Heading {
        text: String,
    },
    Caption {
        text: String,
    },
    /// Bold section label.
    Label {
        text: String,
    },
    Text {
        text: String,
    },
    Metric {
        label: String,
        value: String,
    },
    Notice {
        level: NoticeLevel,
        text: String,
    },
    Expander {
        title: String,
        body: Vec<Widget>,
    },
    Json {
        value: Value,
    },
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    BarChart {
        title: String,
        x_label: String,
        y_label: String,
        bars: Vec<Bar>,
    },
    Bullets {
        items: Vec<String>,
    },
    /// Widgets laid out side by side.
    Columns {
        columns: Vec<Vec<Widget>>,
    },
}

impl Widget {
    pub fn heading(text: impl Into<String>) -> Self {
        Widget::Heading { text: text.into() }
    }

    pub fn caption(text: impl Into<String>) -> Self {
        Widget::Caption { text: text.into() }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Widget::Label { text: text.into() }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Widget::Text { text: text.into() }
    }

    pub fn metric(label: impl Into<String>, value: impl Into<String>) -> Self {
        Widget::Metric {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn notice(level: NoticeLevel, text: impl Into<String>) -> Self {
        Widget::Notice {
            level,
            text: text.into(),
        }
    }

    pub fn json<T: Serialize>(value: &T) -> Self {
        Widget::Json {
            value: serde_json::to_value(value).unwrap_or(Value::Null),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    UploadIndex,
    SafetyRadar,
    ContextMatch,
    CreativeBrief,
    CampaignExplainer,
    RealTimeBot,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::UploadIndex,
        Tab::SafetyRadar,
        Tab::ContextMatch,
        Tab::CreativeBrief,
        Tab::CampaignExplainer,
        Tab::RealTimeBot,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::UploadIndex => "Upload & Index",
            Tab::SafetyRadar => "Safety Radar",
            Tab::ContextMatch => "Context Match",
            Tab::CreativeBrief => "Creative Brief",
            Tab::CampaignExplainer => "Campaign Explainer",
            Tab::RealTimeBot => "Real-Time Bot",
        }
    }

    pub fn intro(&self) -> Vec<Widget> {
        let (heading, caption) = match self {
            Tab::UploadIndex => (
                "Upload & Index",
                "Upload a video asset and create an index for analysis, search, and embeddings.",
            ),
            Tab::SafetyRadar => (
                "Safety Radar — Brand Safety & Suitability",
                "Automated detection with transparent, time-stamped evidence.",
            ),
            Tab::ContextMatch => (
                "Context Match — Find the Best Scenes for Placement",
                "Semantic search over video to suggest high-fit moments.",
            ),
            Tab::CreativeBrief => (
                "Creative Brief — Scene-by-Scene Intelligence",
                "Accelerate production and A/B testing with AI-generated briefs.",
            ),
            Tab::CampaignExplainer => (
                "Campaign Explainer — Map Moments to KPIs",
                "Explain why a campaign worked by linking scenes to CTR/Retention/ROAS.",
            ),
            Tab::RealTimeBot => (
                "Real-Time Intelligence Bot",
                "Automatically analyze new uploads and return safety/context scores.",
            ),
        };
        vec![Widget::heading(heading), Widget::caption(caption)]
    }
}

pub fn header() -> Vec<Widget> {
    vec![
        Widget::heading(format!(
            "{APP_NAME} — Where Ads and Brand Safety Meets Business Growth at Enterprise Scale"
        )),
        Widget::label(
            "AI-powered contextual and safety intelligence for video advertising — with explainable insights, creative acceleration, and ROI mapping.",
        ),
    ]
}

pub fn sidebar(mode: GatewayMode) -> Vec<Widget> {
    vec![
        Widget::heading(format!("🎬 {APP_NAME}")),
        Widget::caption(TAGLINE),
        Widget::label(mode.banner()),
        Widget::label("Dashboard"),
        Widget::Bullets {
            items: Tab::ALL.iter().map(|t| t.title().to_string()).collect(),
        },
    ]
}

pub fn footer() -> Widget {
    footer_for_year(chrono::Local::now().year())
}

pub fn footer_for_year(year: i32) -> Widget {
    Widget::caption(format!(
        "© {year} {APP_NAME} • AI-powered contextual & safety intelligence for video advertising"
    ))
}

/// Splits a gateway outcome into an optional warning and a value to display.
/// Failures show neutral defaults instead of aborting the render.
pub(crate) fn settle<T: Default>(outcome: crate::Result<T>) -> (Option<Widget>, T) {
    match outcome {
        Ok(value) => (None, value),
        Err(err) => (Some(failure_notice(&err)), T::default()),
    }
}

pub fn failure_notice(err: &ContextEqError) -> Widget {
    Widget::notice(
        NoticeLevel::Warning,
        format!("Request failed ({err}). Showing empty results."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sidebar_reports_mode_and_lists_tabs() {
        let widgets = sidebar(GatewayMode::Live);
        assert!(widgets.contains(&Widget::label("Mode: Live API")));
        let Some(Widget::Bullets { items }) = widgets.last() else {
            panic!("expected tab list");
        };
        assert_eq!(items.len(), 6);
        assert_eq!(items[0], "Upload & Index");
        assert_eq!(items[5], "Real-Time Bot");
    }

    #[test]
    fn footer_carries_year() {
        let Widget::Caption { text } = footer_for_year(2026) else {
            panic!("expected caption");
        };
        assert!(text.starts_with("© 2026 ContextEQ"));
    }

    #[test]
    fn widgets_serialize_with_tag() {
        let value = serde_json::to_value(Widget::metric("Safety Score", "84%")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"widget": "metric", "label": "Safety Score", "value": "84%"})
        );
    }

    #[test]
    fn settle_degrades_errors_to_defaults() {
        let (notice, value) =
            settle::<Vec<String>>(Err(ContextEqError::InvalidTimestamp("x".into())));
        assert!(value.is_empty());
        assert!(matches!(
            notice,
            Some(Widget::Notice {
                level: NoticeLevel::Warning,
                ..
            })
        ));
    }
}
