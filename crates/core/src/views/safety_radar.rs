use crate::{
    format::{format_percent, format_range},
    gateway::{DEMO_VIDEO_ID, Gateway, Request, Response},
    types::{AnalysisResult, SafetyFlag},
    views::{NoticeLevel, Widget, settle},
};

const TASKS: [&str; 4] = ["safety", "summary", "objects", "emotions"];

pub fn request() -> Request {
    Request::analyze(DEMO_VIDEO_ID, &TASKS)
}

pub fn flag_title(flag: &SafetyFlag) -> String {
    format!(
        "⚠️ {} • {} (severity: {})",
        flag.label,
        format_range(&flag.start, &flag.end),
        flag.severity
    )
}

pub fn render(outcome: crate::Result<AnalysisResult>) -> Vec<Widget> {
    let (warning, res) = settle(outcome);
    let mut widgets: Vec<Widget> = warning.into_iter().collect();

    widgets.push(Widget::metric(
        "Brand Safety Score",
        format_percent(res.brand_safety_score),
    ));
    widgets.push(Widget::label("Summary"));
    widgets.push(Widget::text(&res.summary));

    widgets.push(Widget::label("Flags"));
    if res.flags.is_empty() {
        widgets.push(Widget::notice(NoticeLevel::Success, "No issues detected."));
    } else {
        widgets.extend(res.flags.iter().map(|flag| Widget::Expander {
            title: flag_title(flag),
            body: vec![Widget::text(format!("Evidence: {}", flag.evidence))],
        }));
    }

    widgets.push(Widget::label("Detected Objects & Emotions"));
    widgets.push(Widget::Columns {
        columns: vec![
            vec![Widget::json(&res.objects)],
            vec![Widget::json(&res.emotions)],
        ],
    });
    widgets
}

pub async fn run(gateway: &Gateway) -> Vec<Widget> {
    render(gateway.invoke(request()).await.and_then(Response::into_analysis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GatewayConfig, error::ContextEqError, fixtures::FixtureStore};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn renders_fixture_analysis() {
        let widgets = run(&Gateway::new(GatewayConfig::instant())).await;
        assert_eq!(widgets[0], Widget::metric("Brand Safety Score", "84%"));
        assert_eq!(
            widgets[2],
            Widget::text(FixtureStore::builtin().analysis().summary)
        );
        let titles: Vec<_> = widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Expander { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            vec![
                "⚠️ mild_violence • 00:23–00:27 (severity: low)",
                "⚠️ sarcasm_audio • 00:54–00:59 (severity: low)",
            ]
        );
    }

    #[test]
    fn no_flags_is_a_success_state() {
        let clean = AnalysisResult {
            brand_safety_score: 1.0,
            ..AnalysisResult::default()
        };
        let widgets = render(Ok(clean));
        assert!(widgets.contains(&Widget::notice(NoticeLevel::Success, "No issues detected.")));
        assert_eq!(widgets[0], Widget::metric("Brand Safety Score", "100%"));
    }

    #[test]
    fn failure_renders_neutral_values() {
        let widgets = render(Err(ContextEqError::MissingApiKey {
            env_var: "CONTEXTEQ_API_KEY".into(),
        }));
        assert!(matches!(
            widgets[0],
            Widget::Notice {
                level: NoticeLevel::Warning,
                ..
            }
        ));
        assert_eq!(widgets[1], Widget::metric("Brand Safety Score", "0%"));
    }

    #[test]
    fn request_asks_for_all_tasks() {
        assert_eq!(
            request(),
            Request::analyze("vid_demo_001", &["safety", "summary", "objects", "emotions"])
        );
    }
}
