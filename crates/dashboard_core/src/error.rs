use thiserror::Error;

/// Failure of a single page load, as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport or connection failure.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx HTTP response.
    #[error("API error: {0}")]
    ApiStatus(u16),
    /// Body could not be read as a page.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
