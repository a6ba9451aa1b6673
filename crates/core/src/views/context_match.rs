use crate::{
    gateway::{DEFAULT_QUERY, DEMO_VIDEO_ID, Gateway, Request, Response},
    types::SearchResult,
    views::{NoticeLevel, Widget, settle},
};

pub fn default_query() -> &'static str {
    DEFAULT_QUERY
}

pub fn request(query: &str) -> Request {
    Request::search(DEMO_VIDEO_ID, query)
}

pub fn render(query: &str, outcome: crate::Result<SearchResult>) -> Vec<Widget> {
    let (warning, res) = settle(outcome);
    let mut widgets: Vec<Widget> = warning.into_iter().collect();

    if res.matches.is_empty() {
        widgets.push(Widget::notice(
            NoticeLevel::Warning,
            "No scenes found for this query. Try another term.",
        ));
    } else {
        widgets.push(Widget::notice(
            NoticeLevel::Success,
            format!("Found {} scene(s) for '{}'.", res.matches.len(), query),
        ));
        widgets.push(Widget::json(&res.matches));
    }
    widgets
}

pub async fn run(gateway: &Gateway, query: &str) -> Vec<Widget> {
    let outcome = gateway
        .invoke(request(query))
        .await
        .and_then(Response::into_search);
    render(query, outcome)
}
