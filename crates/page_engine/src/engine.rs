use std::sync::{mpsc, Arc};
use std::thread;

use page_logging::{page_info, page_warn};

use crate::{EngineEvent, FeedFetcher, SubmissionBackend, SubmissionResult, SubmitRequest};

enum EngineCommand {
    Submit { request: SubmitRequest },
    LoadFeed { feed_url: String },
}

/// Handle to the background IO runtime. Commands go in over a channel;
/// completions come back as [`EngineEvent`]s polled by the host.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn SubmissionBackend>, fetcher: Arc<dyn FeedFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let backend = backend.clone();
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(backend.as_ref(), fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: SubmitRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    pub fn load_feed(&self, feed_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::LoadFeed {
            feed_url: feed_url.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Guarantees that every submission produces exactly one completion event,
/// even if the backend future unwinds mid-flight. Without the event the
/// host would leave the submit control disabled forever.
struct CompletionGuard {
    event_tx: mpsc::Sender<EngineEvent>,
    armed: bool,
}

impl CompletionGuard {
    fn new(event_tx: mpsc::Sender<EngineEvent>) -> Self {
        Self {
            event_tx,
            armed: true,
        }
    }

    fn complete(mut self, result: SubmissionResult) {
        self.armed = false;
        let _ = self
            .event_tx
            .send(EngineEvent::SubmissionFinished { result });
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.event_tx.send(EngineEvent::SubmissionFinished {
                result: SubmissionResult::NetworkError,
            });
        }
    }
}

async fn handle_command(
    backend: &dyn SubmissionBackend,
    fetcher: &dyn FeedFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { request } => {
            page_info!(
                "submit via {} to {} ({} fields)",
                backend.name(),
                request.endpoint,
                request.fields.len()
            );
            let guard = CompletionGuard::new(event_tx);
            let result = backend.submit(&request).await;
            guard.complete(result);
        }
        EngineCommand::LoadFeed { feed_url } => {
            let result = fetcher.fetch_latest(&feed_url).await;
            if let Err(err) = &result {
                page_warn!("feed load failed: {}", err);
            }
            let _ = event_tx.send(EngineEvent::FeedLoaded { result });
        }
    }
}
