use std::{collections::BTreeSet, time::Duration};

use crate::{
    format::format_percent,
    gateway::{Gateway, Request, Response},
    types::AnalysisResult,
    views::{NoticeLevel, Widget, settle},
};

pub const NEW_ASSET_ID: &str = "vid_new_001";

/// Extra pause before analysis to mimic ingestion. Skipped when the gateway has no latency.
pub const INGEST_DELAY: Duration = Duration::from_millis(800);

pub fn request() -> Request {
    Request::analyze(NEW_ASSET_ID, &["safety", "summary"])
}

/// Distinct object labels, sorted.
pub fn top_contexts(res: &AnalysisResult) -> String {
    res.objects
        .iter()
        .map(|o| o.label.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render(file_name: Option<&str>, outcome: crate::Result<AnalysisResult>) -> Vec<Widget> {
    let processing = match file_name {
        Some(name) => format!("Processing {name}…"),
        None => "Processing…".to_string(),
    };
    let mut widgets = vec![Widget::notice(NoticeLevel::Info, processing)];

    let (warning, res) = settle(outcome);
    match warning {
        Some(w) => widgets.push(w),
        None => widgets.push(Widget::notice(NoticeLevel::Success, "Analysis complete.")),
    }

    widgets.push(Widget::Columns {
        columns: vec![
            vec![Widget::metric(
                "Safety Score",
                format_percent(res.brand_safety_score),
            )],
            vec![Widget::text(format!("Top Contexts: {}", top_contexts(&res)))],
        ],
    });
    widgets.push(Widget::Expander {
        title: "Details".to_string(),
        body: vec![Widget::text(&res.summary), Widget::json(&res.flags)],
    });
    widgets
}

pub async fn run(gateway: &Gateway, file_name: Option<&str>) -> Vec<Widget> {
    if !gateway.config().latency.is_zero() {
        tokio::time::sleep(INGEST_DELAY).await;
    }
    let outcome = gateway
        .invoke(request())
        .await
        .and_then(Response::into_analysis);
    render(file_name, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GatewayConfig, types::Detection};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn condensed_summary_of_new_asset() {
        let widgets = run(&Gateway::new(GatewayConfig::instant()), Some("promo.mp4")).await;
        assert_eq!(
            widgets[0],
            Widget::notice(NoticeLevel::Info, "Processing promo.mp4…")
        );
        assert_eq!(
            widgets[1],
            Widget::notice(NoticeLevel::Success, "Analysis complete.")
        );
        let Widget::Columns { columns } = &widgets[2] else {
            panic!("expected columns");
        };
        assert_eq!(columns[0], vec![Widget::metric("Safety Score", "84%")]);
        assert_eq!(
            columns[1],
            vec![Widget::text(
                "Top Contexts: logo_visible, smiling_people, soccer_ball"
            )]
        );
    }

    #[test]
    fn contexts_are_sorted_and_deduplicated() {
        let det = |label: &str| Detection {
            label: label.into(),
            ..Detection::default()
        };
        let res = AnalysisResult {
            objects: vec![det("tree"), det("car"), det("tree")],
            ..AnalysisResult::default()
        };
        assert_eq!(top_contexts(&res), "car, tree");
        assert_eq!(top_contexts(&AnalysisResult::default()), "");
    }

    #[test]
    fn request_targets_new_asset() {
        assert_eq!(request(), Request::analyze("vid_new_001", &["safety", "summary"]));
    }
}
