use std::fs;
use std::path::Path;

use page_engine::BackendKind;
use page_logging::page_warn;
use serde::{Deserialize, Serialize};

/// Which submission strategy the page is deployed with. Chosen here, at
/// setup time; the controller only ever sees the resulting trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendChoice {
    DirectThirdParty,
    RateLimitedEdge,
    GenericAction,
}

impl BackendChoice {
    pub fn kind(self) -> BackendKind {
        match self {
            BackendChoice::DirectThirdParty => BackendKind::DirectThirdParty,
            BackendChoice::RateLimitedEdge => BackendKind::RateLimitedEdge,
            BackendChoice::GenericAction => BackendKind::GenericAction,
        }
    }
}

/// How status lines are presented: an inline status row, an alert-style
/// line, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMode {
    Inline,
    Alert,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub proxy_base: String,
    pub playlist_id: String,
}

impl FeedConfig {
    pub fn feed_url(&self) -> String {
        format!(
            "https://www.youtube.com/feeds/videos.xml?playlist_id={}",
            self.playlist_id
        )
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            proxy_base: "https://api.allorigins.win/get".to_string(),
            playlist_id: "PLheZzTtyKsLiCX84HDIVyaCgcYO4GFWQ4".to_string(),
        }
    }
}

/// Which page elements exist in this deployment. Absent mounts silently
/// disable their controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountsConfig {
    pub contact_form: bool,
    pub submit_label: String,
    pub video_widget: bool,
    pub nav: bool,
}

impl Default for MountsConfig {
    fn default() -> Self {
        Self {
            contact_form: true,
            submit_label: "Send Message".to_string(),
            video_widget: true,
            nav: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub backend: BackendChoice,
    /// Submission endpoint; for `GenericAction` this is the form's own
    /// declared action URL.
    pub endpoint: String,
    pub feed: FeedConfig,
    pub mounts: MountsConfig,
    pub status_mode: StatusMode,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::DirectThirdParty,
            endpoint: "https://formspree.io/f/xqezqppq".to_string(),
            feed: FeedConfig::default(),
            mounts: MountsConfig::default(),
            status_mode: StatusMode::Both,
        }
    }
}

/// Loads the page configuration. A missing file is a normal deployment and
/// yields the defaults; a malformed file logs a warning and yields the
/// defaults, never a crash.
pub fn load(path: &Path) -> PageConfig {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return PageConfig::default();
        }
        Err(err) => {
            page_warn!("Failed to read config from {:?}: {}", path, err);
            return PageConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            page_warn!("Failed to parse config from {:?}: {}", path, err);
            PageConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("page.ron"));
        assert_eq!(config, PageConfig::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.ron");
        fs::write(&path, "(backend: Nonsense").unwrap();

        assert_eq!(load(&path), PageConfig::default());
    }

    #[test]
    fn round_trips_a_written_config() {
        let mut config = PageConfig::default();
        config.backend = BackendChoice::RateLimitedEdge;
        config.endpoint = "https://edge.example.com/api/contact".to_string();
        config.mounts.video_widget = false;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.ron");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "{}",
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new()).unwrap()
        )
        .unwrap();

        assert_eq!(load(&path), config);
    }

    #[test]
    fn feed_url_embeds_playlist_id() {
        let feed = FeedConfig {
            proxy_base: "https://relay.example.com/get".to_string(),
            playlist_id: "PLabc".to_string(),
        };
        assert_eq!(
            feed.feed_url(),
            "https://www.youtube.com/feeds/videos.xml?playlist_id=PLabc"
        );
    }
}
