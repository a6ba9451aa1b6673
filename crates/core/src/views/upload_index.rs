use std::path::Path;

use crate::{
    gateway::DEMO_VIDEO_ID,
    types::IndexReceipt,
    views::{NoticeLevel, Widget},
};

pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["mp4", "mov", "mkv", "webm"];
pub const DEFAULT_MODEL: &str = "marengo-2.7";
pub const DEFAULT_LIBRARY: &str = "default-library";

#[derive(Debug, Clone, PartialEq)]
pub struct IndexForm {
    /// Name of the uploaded file. Contents are never read.
    pub file_name: Option<String>,
    pub model: String,
    pub library: String,
}

impl Default for IndexForm {
    fn default() -> Self {
        Self {
            file_name: None,
            model: DEFAULT_MODEL.to_string(),
            library: DEFAULT_LIBRARY.to_string(),
        }
    }
}

pub fn is_supported_video(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

pub fn receipt(form: &IndexForm) -> IndexReceipt {
    IndexReceipt {
        job_id: uuid::Uuid::new_v4(),
        video_id: DEMO_VIDEO_ID.to_string(),
        model: form.model.clone(),
        library: form.library.clone(),
        status: "indexed".to_string(),
    }
}

pub fn render(form: &IndexForm, receipt: &IndexReceipt) -> Vec<Widget> {
    let mut widgets = Vec::new();
    if let Some(name) = form.file_name.as_deref().filter(|n| !is_supported_video(n)) {
        widgets.push(Widget::notice(
            NoticeLevel::Warning,
            format!(
                "'{name}' is not a supported video type ({}).",
                SUPPORTED_EXTENSIONS.join(", ")
            ),
        ));
    }
    widgets.push(Widget::notice(NoticeLevel::Success, "Index job created."));
    widgets.push(Widget::json(receipt));
    widgets
}

/// Creates the (synthetic) index job. No gateway call is made.
pub fn submit(form: &IndexForm) -> Vec<Widget> {
    tracing::info!(model = %form.model, library = %form.library, "index job created");
    render(form, &receipt(form))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_supported_video("clip.MP4"));
        assert!(is_supported_video("dir/clip.webm"));
        assert!(!is_supported_video("clip.avi"));
        assert!(!is_supported_video("clip"));
    }

    #[test]
    fn submit_acknowledges_with_receipt() {
        let form = IndexForm {
            model: "pegasus-1.2".into(),
            ..IndexForm::default()
        };
        let widgets = submit(&form);
        assert_eq!(
            widgets[0],
            Widget::notice(NoticeLevel::Success, "Index job created.")
        );
        let Widget::Json { value } = &widgets[1] else {
            panic!("expected receipt json");
        };
        assert_eq!(value["video_id"], "vid_demo_001");
        assert_eq!(value["model"], "pegasus-1.2");
        assert_eq!(value["library"], "default-library");
        assert_eq!(value["status"], "indexed");
    }

    #[test]
    fn unsupported_upload_is_flagged_but_still_indexed() {
        let form = IndexForm {
            file_name: Some("notes.txt".into()),
            ..IndexForm::default()
        };
        let widgets = submit(&form);
        assert_eq!(widgets.len(), 3);
        assert!(matches!(
            widgets[0],
            Widget::Notice {
                level: NoticeLevel::Warning,
                ..
            }
        ));
    }
}
