use crate::{Effect, Msg, PageState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PageState, msg: Msg) -> (PageState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded => {
            state.mark_loaded();
            if state.take_feed_request() {
                vec![Effect::LoadFeed]
            } else {
                Vec::new()
            }
        }
        Msg::SubmitRequested { snapshot } => {
            // The rendered `disabled` flag is the structural guard: a host
            // honoring the view cannot deliver a second submit mid-flight.
            // The phase check below is the state-machine restatement of the
            // same rule, not a debounce.
            if state.begin_submission() {
                vec![Effect::SubmitForm { snapshot }]
            } else {
                Vec::new()
            }
        }
        Msg::SubmissionFinished { result } => state.finish_submission(result),
        Msg::FeedLoaded { entry } => {
            state.apply_feed(entry);
            Vec::new()
        }
        Msg::FeedFailed => {
            state.apply_feed(None);
            Vec::new()
        }
        Msg::NavToggled => {
            state.toggle_nav();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
