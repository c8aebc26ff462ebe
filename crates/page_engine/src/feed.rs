use quick_xml::events::Event;
use quick_xml::Reader;
use serde_json::Value;
use url::Url;

use crate::{FeedEntry, FeedError, FeedFailureKind};

#[derive(Debug, Clone)]
pub struct FeedSettings {
    /// CORS relay endpoint; the feed URL travels percent-encoded in its
    /// `url` query parameter.
    pub proxy_base: String,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            proxy_base: "https://api.allorigins.win/get".to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Retrieves the feed and returns its first entry. `Ok(None)` means the
    /// document parsed but held no usable entry; that routes to the widget
    /// fallback, not to an error.
    async fn fetch_latest(&self, feed_url: &str) -> Result<Option<FeedEntry>, FeedError>;
}

/// Fetches the feed through a public relay because the feed origin does not
/// grant cross-origin access. The relay answers `{ "contents": <raw body> }`.
#[derive(Debug, Clone, Default)]
pub struct ProxyFeedFetcher {
    settings: FeedSettings,
}

impl ProxyFeedFetcher {
    pub fn new(settings: FeedSettings) -> Self {
        Self { settings }
    }

    fn proxy_url(&self, feed_url: &str) -> Result<Url, FeedError> {
        let mut url = Url::parse(&self.settings.proxy_base)
            .map_err(|err| FeedError::new(FeedFailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut().append_pair("url", feed_url);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl FeedFetcher for ProxyFeedFetcher {
    async fn fetch_latest(&self, feed_url: &str) -> Result<Option<FeedEntry>, FeedError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| FeedError::new(FeedFailureKind::Network, err.to_string()))?;

        let response = client
            .get(self.proxy_url(feed_url)?)
            .send()
            .await
            .map_err(|err| FeedError::new(FeedFailureKind::Network, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::new(
                FeedFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|err| FeedError::new(FeedFailureKind::Envelope, err.to_string()))?;
        let contents = envelope
            .get("contents")
            .and_then(Value::as_str)
            .ok_or_else(|| FeedError::new(FeedFailureKind::Envelope, "missing contents field"))?;

        first_entry(contents)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryField {
    None,
    VideoId,
    Title,
}

/// Extracts the first `entry` element's video id and title from a feed
/// document. Element names are matched by local name, so the namespaced
/// video id qualifies. `Ok(None)` when the document parses but has no entry,
/// or the first entry lacks a video id.
pub fn first_entry(xml: &str) -> Result<Option<FeedEntry>, FeedError> {
    let mut reader = Reader::from_reader(xml.as_bytes());

    let mut buf = Vec::new();
    let mut in_entry = false;
    let mut field = EntryField::None;
    let mut video_id: Option<String> = None;
    let mut title: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"entry" => in_entry = true,
                b"videoId" if in_entry => field = EntryField::VideoId,
                b"title" if in_entry => field = EntryField::Title,
                _ => field = EntryField::None,
            },
            Ok(Event::Text(ref t)) => {
                let text = t
                    .unescape()
                    .map_err(|err| {
                        FeedError::new(FeedFailureKind::Document, err.to_string())
                    })?;
                // Indentation between elements arrives as whitespace text.
                let text = text.trim();
                if !text.is_empty() {
                    match field {
                        EntryField::VideoId if video_id.is_none() => {
                            video_id = Some(text.to_string());
                        }
                        EntryField::Title if title.is_none() => {
                            title = Some(text.to_string());
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.local_name().as_ref() == b"entry" {
                    // Only the first entry matters.
                    break;
                }
                field = EntryField::None;
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                let pos = reader.buffer_position();
                return Err(FeedError::new(
                    FeedFailureKind::Document,
                    format!("parse error at byte {pos}: {err}"),
                ));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(video_id.map(|video_id| FeedEntry { video_id, title }))
}
