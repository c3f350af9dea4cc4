#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// View became visible: load the first page and start the refresh timer.
    Activated,
    /// User asked for a full reload.
    RefreshClicked,
    /// User asked for the next page.
    LoadMoreClicked,
    /// Replace the sort order outright.
    SortChanged(crate::SortSpec),
    /// User picked a column header.
    SortColumnClicked(crate::SortField),
    /// Recurring refresh timer fired.
    RefreshTimerFired,
    /// Runtime finished a fetch issued by `Effect::FetchPage`.
    PageLoaded {
        generation: crate::Generation,
        result: Result<crate::Page, crate::LoadError>,
    },
    /// View is going away.
    TornDown,
    /// Fallback for placeholder wiring.
    NoOp,
}
