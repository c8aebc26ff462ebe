//! Page core: pure interaction state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    FeedEntry, FormMount, FormSnapshot, PageMounts, PageState, SubmissionResult, UiControlState,
    CHANNEL_URL, GENERIC_FAILURE_TEXT, GENERIC_RATE_LIMIT_TEXT, GENERIC_VIDEO_LABEL,
    NETWORK_ERROR_TEXT, SENDING_LABEL, SUCCESS_TEXT,
};
pub use update::update;
pub use view_model::{FormView, PageViewModel, Severity, StatusLine, VideoWidgetView};
