use page_core::{Effect, Msg};
use page_engine::{EngineEvent, EngineHandle, SubmitRequest};
use page_logging::page_info;

use super::app::FormFields;

/// Executes core effects against the engine and maps engine completions
/// back into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    endpoint: String,
    feed_url: String,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, endpoint: String, feed_url: String) -> Self {
        Self {
            engine,
            endpoint,
            feed_url,
        }
    }

    pub fn run(&self, effects: Vec<Effect>, fields: &mut FormFields) {
        for effect in effects {
            match effect {
                Effect::SubmitForm { snapshot } => {
                    page_info!("SubmitForm with {} fields", snapshot.fields().len());
                    self.engine.submit(SubmitRequest {
                        endpoint: self.endpoint.clone(),
                        fields: snapshot.fields().to_vec(),
                    });
                }
                Effect::LoadFeed => {
                    page_info!("LoadFeed {}", self.feed_url);
                    self.engine.load_feed(self.feed_url.clone());
                }
                Effect::ClearFormFields => {
                    fields.clear();
                }
            }
        }
    }

    /// Drains any pending engine completions into core messages.
    pub fn poll(&self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            msgs.push(map_event(event));
        }
        msgs
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmissionFinished { result } => Msg::SubmissionFinished {
            result: map_result(result),
        },
        EngineEvent::FeedLoaded { result } => match result {
            Ok(entry) => Msg::FeedLoaded {
                entry: entry.map(map_entry),
            },
            Err(_) => Msg::FeedFailed,
        },
    }
}

fn map_result(result: page_engine::SubmissionResult) -> page_core::SubmissionResult {
    match result {
        page_engine::SubmissionResult::Success => page_core::SubmissionResult::Success,
        page_engine::SubmissionResult::RateLimited { retry_message } => {
            page_core::SubmissionResult::RateLimited { retry_message }
        }
        page_engine::SubmissionResult::Failure { message } => {
            page_core::SubmissionResult::Failure { message }
        }
        page_engine::SubmissionResult::NetworkError => page_core::SubmissionResult::NetworkError,
    }
}

fn map_entry(entry: page_engine::FeedEntry) -> page_core::FeedEntry {
    page_core::FeedEntry {
        video_id: entry.video_id,
        title: entry.title,
    }
}
