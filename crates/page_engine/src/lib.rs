//! Page engine: network IO behind the interaction layer's effect boundary.
mod engine;
mod feed;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use feed::{first_entry, FeedFetcher, FeedSettings, ProxyFeedFetcher};
pub use submit::{
    make_backend, BackendKind, DirectThirdParty, GenericAction, RateLimitedEdge, SubmissionBackend,
};
pub use types::{
    EngineEvent, FeedEntry, FeedError, FeedFailureKind, SubmissionResult, SubmitRequest,
};
