use crate::state::UiControlState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// One user-visible status message, rendered by the host's status reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub severity: Severity,
}

impl StatusLine {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub control: UiControlState,
    pub status: Option<StatusLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoWidgetView {
    Loading,
    Player { video_id: String, label: String },
    Fallback { channel_url: String },
}

/// Snapshot of everything the host renders. `None` fields correspond to
/// absent mounts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageViewModel {
    pub loaded: bool,
    pub nav_open: Option<bool>,
    pub form: Option<FormView>,
    pub widget: Option<VideoWidgetView>,
}
