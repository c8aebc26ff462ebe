#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished mounting the page (load-event analog). Idempotent.
    PageLoaded,
    /// User submitted the contact form; carries the field values captured at
    /// submit time.
    SubmitRequested { snapshot: crate::FormSnapshot },
    /// The configured backend finished the in-flight submission.
    SubmissionFinished { result: crate::SubmissionResult },
    /// Feed load finished; `None` when the feed parsed but held no entry.
    FeedLoaded { entry: Option<crate::FeedEntry> },
    /// Feed load failed (network, envelope, or document parse).
    FeedFailed,
    /// User tapped the mobile nav icon.
    NavToggled,
    /// Fallback for placeholder wiring.
    NoOp,
}
