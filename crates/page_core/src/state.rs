use crate::view_model::{FormView, PageViewModel, StatusLine, VideoWidgetView};
use crate::Effect;

/// Label shown on the submit control while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";
/// Status text after a successful submission.
pub const SUCCESS_TEXT: &str = "Message sent successfully! Thank you for contacting me.";
/// Status text when the backend rejected the submission without a message.
pub const GENERIC_FAILURE_TEXT: &str = "Failed to send message. Please try again.";
/// Status text when the backend rate-limited without a retry message.
pub const GENERIC_RATE_LIMIT_TEXT: &str = "Too many messages. Please wait a moment and try again.";
/// Status text when the transport itself failed; names the fallback channel.
pub const NETWORK_ERROR_TEXT: &str =
    "An error occurred. Please try again or email me directly at angelsantiago3200@gmail.com";
/// Channel page linked by the video widget fallback block.
pub const CHANNEL_URL: &str = "https://youtube.com/@0dayblitz";
/// Accessible label for the embedded player when the feed entry has no title.
pub const GENERIC_VIDEO_LABEL: &str = "Latest Video";

/// Immutable capture of form field values at submit time.
///
/// Field order is preserved so multi-value fields keep their relative order;
/// duplicate names are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    fields: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// First value recorded for `name`, if any.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Normalized outcome of one backend submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    /// The backend refused because of rate limiting. The retry message is the
    /// server's wording (it may contain a wait duration); `None` when the
    /// provider omitted it.
    RateLimited { retry_message: Option<String> },
    /// The backend rejected the submission; `None` when no human-readable
    /// message could be extracted from the response.
    Failure { message: Option<String> },
    NetworkError,
}

/// First entry of the remote video feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub video_id: String,
    pub title: Option<String>,
}

/// Submit control presentation, restored to its pre-submit value on every
/// exit path of a submission cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiControlState {
    pub disabled: bool,
    pub label: String,
}

/// Contact form mount description supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMount {
    /// Label of the submit control as mounted (restored after each cycle).
    pub submit_label: String,
}

impl Default for FormMount {
    fn default() -> Self {
        Self {
            submit_label: "Send Message".to_string(),
        }
    }
}

/// Which page elements exist in the hosting document. An absent mount
/// silently disables the corresponding controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMounts {
    pub contact_form: Option<FormMount>,
    pub video_widget: bool,
    pub nav: bool,
}

impl Default for PageMounts {
    fn default() -> Self {
        Self {
            contact_form: Some(FormMount::default()),
            video_widget: true,
            nav: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum FormPhase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FormState {
    phase: FormPhase,
    control: UiControlState,
    original_label: String,
    status: Option<StatusLine>,
}

impl FormState {
    fn new(mount: FormMount) -> Self {
        Self {
            phase: FormPhase::Idle,
            control: UiControlState {
                disabled: false,
                label: mount.submit_label.clone(),
            },
            original_label: mount.submit_label,
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WidgetPhase {
    Loading,
    Player { video_id: String, label: String },
    Fallback { channel_url: String },
}

/// Full page interaction state. Pure data; all transitions go through
/// [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    form: Option<FormState>,
    widget: Option<WidgetPhase>,
    nav_open: Option<bool>,
    loaded: bool,
    feed_requested: bool,
}

impl PageState {
    pub fn new(mounts: PageMounts) -> Self {
        Self {
            form: mounts.contact_form.map(FormState::new),
            widget: mounts.video_widget.then_some(WidgetPhase::Loading),
            nav_open: mounts.nav.then_some(false),
            loaded: false,
            feed_requested: false,
        }
    }

    pub fn view(&self) -> PageViewModel {
        PageViewModel {
            loaded: self.loaded,
            nav_open: self.nav_open,
            form: self.form.as_ref().map(|form| FormView {
                control: form.control.clone(),
                status: form.status.clone(),
            }),
            widget: self.widget.as_ref().map(|widget| match widget {
                WidgetPhase::Loading => VideoWidgetView::Loading,
                WidgetPhase::Player { video_id, label } => VideoWidgetView::Player {
                    video_id: video_id.clone(),
                    label: label.clone(),
                },
                WidgetPhase::Fallback { channel_url } => VideoWidgetView::Fallback {
                    channel_url: channel_url.clone(),
                },
            }),
        }
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub(crate) fn toggle_nav(&mut self) {
        if let Some(open) = self.nav_open.as_mut() {
            *open = !*open;
        }
    }

    /// The feed is loaded at most once per page view.
    pub(crate) fn take_feed_request(&mut self) -> bool {
        if self.widget.is_some() && !self.feed_requested {
            self.feed_requested = true;
            true
        } else {
            false
        }
    }

    /// Moves the form into `Submitting` and disables the control. Returns
    /// false (no transition) when no form is mounted or a submission is
    /// already in flight.
    pub(crate) fn begin_submission(&mut self) -> bool {
        let Some(form) = self.form.as_mut() else {
            return false;
        };
        if form.phase == FormPhase::Submitting {
            return false;
        }
        form.phase = FormPhase::Submitting;
        form.original_label = form.control.label.clone();
        form.control = UiControlState {
            disabled: true,
            label: SENDING_LABEL.to_string(),
        };
        form.status = None;
        true
    }

    /// Applies a submission outcome. The control restore is unconditional
    /// and happens before any per-outcome handling.
    pub(crate) fn finish_submission(&mut self, result: SubmissionResult) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        if form.phase != FormPhase::Submitting {
            return Vec::new();
        }
        form.phase = FormPhase::Idle;
        form.control = UiControlState {
            disabled: false,
            label: form.original_label.clone(),
        };

        match result {
            SubmissionResult::Success => {
                form.status = Some(StatusLine::info(SUCCESS_TEXT));
                vec![Effect::ClearFormFields]
            }
            SubmissionResult::RateLimited { retry_message } => {
                let text = retry_message.unwrap_or_else(|| GENERIC_RATE_LIMIT_TEXT.to_string());
                form.status = Some(StatusLine::error(text));
                Vec::new()
            }
            SubmissionResult::Failure { message } => {
                let text = message.unwrap_or_else(|| GENERIC_FAILURE_TEXT.to_string());
                form.status = Some(StatusLine::error(text));
                Vec::new()
            }
            SubmissionResult::NetworkError => {
                form.status = Some(StatusLine::error(NETWORK_ERROR_TEXT));
                Vec::new()
            }
        }
    }

    pub(crate) fn apply_feed(&mut self, entry: Option<FeedEntry>) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        *widget = match entry {
            Some(entry) => WidgetPhase::Player {
                video_id: entry.video_id,
                label: entry
                    .title
                    .unwrap_or_else(|| GENERIC_VIDEO_LABEL.to_string()),
            },
            None => WidgetPhase::Fallback {
                channel_url: CHANNEL_URL.to_string(),
            },
        };
    }
}
