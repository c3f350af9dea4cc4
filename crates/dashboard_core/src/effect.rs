use crate::{Generation, MergeMode};

/// A page fetch the runtime must perform and report back as `Msg::PageLoaded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    /// `None` requests the first page.
    pub token: Option<String>,
    pub mode: MergeMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage(FetchRequest),
    StartRefreshTimer,
    CancelRefreshTimer,
}
