use std::sync::Once;

use page_core::{
    update, Effect, FormSnapshot, Msg, PageMounts, PageState, Severity, SubmissionResult,
    GENERIC_FAILURE_TEXT, GENERIC_RATE_LIMIT_TEXT, NETWORK_ERROR_TEXT, SENDING_LABEL, SUCCESS_TEXT,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(page_logging::initialize_for_tests);
}

fn snapshot() -> FormSnapshot {
    FormSnapshot::new(vec![
        ("name".to_string(), "A".to_string()),
        ("email".to_string(), "a@x.com".to_string()),
        ("message".to_string(), "hi".to_string()),
    ])
}

fn submit(state: PageState) -> (PageState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitRequested {
            snapshot: snapshot(),
        },
    )
}

fn finish(state: PageState, result: SubmissionResult) -> (PageState, Vec<Effect>) {
    update(state, Msg::SubmissionFinished { result })
}

#[test]
fn submit_disables_control_and_emits_effect() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let original = state.view().form.unwrap().control.label;

    let (next, effects) = submit(state);
    let form = next.view().form.unwrap();

    assert!(form.control.disabled);
    assert_eq!(form.control.label, SENDING_LABEL);
    assert_ne!(form.control.label, original);
    assert_eq!(
        effects,
        vec![Effect::SubmitForm {
            snapshot: snapshot()
        }]
    );
}

#[test]
fn second_submit_while_submitting_is_dropped() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, effects) = submit(state);

    assert!(effects.is_empty());
    assert!(next.view().form.unwrap().control.disabled);
}

#[test]
fn success_restores_control_and_clears_fields() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let original = state.view().form.unwrap().control.label;
    let (state, _) = submit(state);

    let (next, effects) = finish(state, SubmissionResult::Success);
    let form = next.view().form.unwrap();

    assert!(!form.control.disabled);
    assert_eq!(form.control.label, original);
    assert_eq!(effects, vec![Effect::ClearFormFields]);
    let status = form.status.unwrap();
    assert_eq!(status.text, SUCCESS_TEXT);
    assert_eq!(status.severity, Severity::Info);
}

#[test]
fn rate_limited_shows_server_message_verbatim_and_keeps_fields() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, effects) = finish(
        state,
        SubmissionResult::RateLimited {
            retry_message: Some("Try again in 30s".to_string()),
        },
    );
    let form = next.view().form.unwrap();

    // No ClearFormFields: user input must survive for a quick resubmission.
    assert!(effects.is_empty());
    assert!(!form.control.disabled);
    let status = form.status.unwrap();
    assert_eq!(status.text, "Try again in 30s");
    assert_eq!(status.severity, Severity::Error);
}

#[test]
fn rate_limited_without_message_falls_back_to_generic() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, _) = finish(
        state,
        SubmissionResult::RateLimited {
            retry_message: None,
        },
    );

    let status = next.view().form.unwrap().status.unwrap();
    assert_eq!(status.text, GENERIC_RATE_LIMIT_TEXT);
}

#[test]
fn failure_prefers_backend_message() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, effects) = finish(
        state,
        SubmissionResult::Failure {
            message: Some("Form not found".to_string()),
        },
    );

    assert!(effects.is_empty());
    let status = next.view().form.unwrap().status.unwrap();
    assert_eq!(status.text, "Form not found");
}

#[test]
fn failure_without_message_uses_generic_text() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, _) = finish(state, SubmissionResult::Failure { message: None });

    let status = next.view().form.unwrap().status.unwrap();
    assert_eq!(status.text, GENERIC_FAILURE_TEXT);
}

#[test]
fn network_error_names_alternate_contact_channel() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);

    let (next, effects) = finish(state, SubmissionResult::NetworkError);

    assert!(effects.is_empty());
    let status = next.view().form.unwrap().status.unwrap();
    assert_eq!(status.text, NETWORK_ERROR_TEXT);
    assert!(status.text.contains("angelsantiago3200@gmail.com"));
}

#[test]
fn every_outcome_restores_control_to_original() {
    init_logging();
    let outcomes = vec![
        SubmissionResult::Success,
        SubmissionResult::RateLimited {
            retry_message: Some("wait".to_string()),
        },
        SubmissionResult::Failure {
            message: Some("no".to_string()),
        },
        SubmissionResult::NetworkError,
    ];

    for outcome in outcomes {
        let state = PageState::new(PageMounts::default());
        let original = state.view().form.unwrap().control.label;
        let (state, _) = submit(state);
        let (next, _) = finish(state, outcome.clone());

        let control = next.view().form.unwrap().control;
        assert!(!control.disabled, "control stayed disabled for {outcome:?}");
        assert_eq!(control.label, original, "label not restored for {outcome:?}");
    }
}

#[test]
fn form_is_resubmittable_after_a_completed_cycle() {
    init_logging();
    let state = PageState::new(PageMounts::default());
    let (state, _) = submit(state);
    let (state, _) = finish(state, SubmissionResult::NetworkError);

    let (next, effects) = submit(state);

    assert_eq!(effects.len(), 1);
    assert!(next.view().form.unwrap().control.disabled);
}

#[test]
fn unsolicited_completion_is_ignored() {
    init_logging();
    let state = PageState::new(PageMounts::default());

    let (next, effects) = finish(state.clone(), SubmissionResult::Success);

    assert!(effects.is_empty());
    assert_eq!(next, state);
}
