//! Dashboard engine: page fetching, refresh timer and effect execution.
mod engine;
mod fetch;
mod scheduler;
mod types;
mod wire;

pub use engine::EngineHandle;
pub use fetch::{ApiEndpoint, FetchSettings, PageFetcher, ReqwestPageFetcher};
pub use scheduler::{RefreshHandle, RefreshScheduler, DEFAULT_REFRESH_INTERVAL};
pub use types::{ChannelEventSink, EngineEvent, EventSink, FailureKind, FetchError};
pub use wire::decode_page;
