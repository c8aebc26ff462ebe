use std::sync::Arc;
use std::time::{Duration, Instant};

use page_engine::{
    make_backend, BackendKind, EngineEvent, EngineHandle, FeedSettings, ProxyFeedFetcher,
    SubmissionBackend, SubmissionResult, SubmitRequest,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within 5s");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

fn engine_for(server: &MockServer, kind: BackendKind) -> EngineHandle {
    EngineHandle::new(
        make_backend(kind),
        Arc::new(ProxyFeedFetcher::new(FeedSettings {
            proxy_base: format!("{}/get", server.uri()),
        })),
    )
}

#[tokio::test]
async fn submission_round_trip_reports_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/f/form"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let engine = engine_for(&server, BackendKind::DirectThirdParty);
    engine.submit(SubmitRequest {
        endpoint: format!("{}/f/form", server.uri()),
        fields: vec![("name".to_string(), "A".to_string())],
    });

    let event = wait_for_event(&engine).await;
    assert_eq!(
        event,
        EngineEvent::SubmissionFinished {
            result: SubmissionResult::Success,
        }
    );
}

#[tokio::test]
async fn feed_round_trip_reports_first_entry() {
    let server = MockServer::start().await;
    let xml = r#"<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015">
 <entry><yt:videoId>abc123</yt:videoId><title>Hello</title></entry>
</feed>"#;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "contents": xml })))
        .mount(&server)
        .await;

    let engine = engine_for(&server, BackendKind::DirectThirdParty);
    engine.load_feed("https://www.youtube.com/feeds/videos.xml?playlist_id=PLtest");

    let event = wait_for_event(&engine).await;
    match event {
        EngineEvent::FeedLoaded { result } => {
            let entry = result.expect("feed ok").expect("entry present");
            assert_eq!(entry.video_id, "abc123");
            assert_eq!(entry.title.as_deref(), Some("Hello"));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

/// A backend that panics mid-flight must still produce a completion, or the
/// host would leave the submit control disabled forever.
struct PanickingBackend;

#[async_trait::async_trait]
impl SubmissionBackend for PanickingBackend {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn submit(&self, _request: &SubmitRequest) -> SubmissionResult {
        panic!("backend blew up");
    }
}

#[tokio::test]
async fn panicking_backend_still_reports_a_completion() {
    let engine = EngineHandle::new(
        Arc::new(PanickingBackend),
        Arc::new(ProxyFeedFetcher::new(FeedSettings::default())),
    );
    engine.submit(SubmitRequest {
        endpoint: "http://127.0.0.1:9/".to_string(),
        fields: Vec::new(),
    });

    let event = wait_for_event(&engine).await;
    assert_eq!(
        event,
        EngineEvent::SubmissionFinished {
            result: SubmissionResult::NetworkError,
        }
    );
}
