#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Hand the snapshot to the configured submission backend.
    SubmitForm { snapshot: crate::FormSnapshot },
    /// Fetch the latest feed entry. Emitted at most once per page view.
    LoadFeed,
    /// Reset every contact-form field to its default value.
    ClearFormFields,
}
