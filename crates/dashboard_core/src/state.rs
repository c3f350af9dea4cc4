use crate::view_model::{CategoryTone, DashboardView, RecordRow};
use crate::{sorted, FetchRequest, LoadError, MergeMode, Record, SortSpec};

/// Tag attached to every issued fetch; only the latest one may mutate state.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Created but not yet shown; nothing has been fetched.
    #[default]
    Inactive,
    Active,
    /// View is gone. Every later message is ignored.
    TornDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub(crate) generation: Generation,
    pub(crate) mode: MergeMode,
}

/// Everything one dashboard view knows about its data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub(crate) records: Vec<Record>,
    pub(crate) sort: SortSpec,
    pub(crate) continuation_token: Option<String>,
    pub(crate) total_count: Option<u64>,
    pub(crate) last_error: Option<LoadError>,
    pub(crate) pending: Option<FetchTicket>,
    generation: Generation,
    lifecycle: Lifecycle,
    refresh_timer_running: bool,
    pub(crate) duplicates_dropped: u64,
    highlight_categories: Vec<String>,
    dirty: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Categories rendered with a positive tone.
    pub fn with_highlight_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            highlight_categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Accumulated records in merge order (not display order).
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Generation of the most recently issued fetch.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn refresh_timer_running(&self) -> bool {
        self.refresh_timer_running
    }

    pub fn duplicates_dropped(&self) -> u64 {
        self.duplicates_dropped
    }

    pub fn view(&self) -> DashboardView {
        let rows = sorted(&self.records, self.sort)
            .into_iter()
            .map(|record| RecordRow {
                entity_id: record.entity_id.clone(),
                category: record.category.clone(),
                tone: self.tone_for(&record.category),
                timestamp: record.timestamp,
                entry_id: record.entry_id.clone(),
            })
            .collect();

        DashboardView {
            rows,
            total_count: self.total_count,
            has_more: self.has_more(),
            is_loading: self.is_loading(),
            last_error: self.last_error.clone(),
            sort: self.sort,
            duplicates_dropped: self.duplicates_dropped,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn activate(&mut self) {
        self.lifecycle = Lifecycle::Active;
        self.refresh_timer_running = true;
        self.mark_dirty();
    }

    /// Moves to `TornDown`; returns whether a running refresh timer must be cancelled.
    pub(crate) fn tear_down(&mut self) -> bool {
        self.lifecycle = Lifecycle::TornDown;
        self.pending = None;
        std::mem::take(&mut self.refresh_timer_running)
    }

    pub(crate) fn set_sort(&mut self, spec: SortSpec) {
        if self.sort != spec {
            self.sort = spec;
            self.mark_dirty();
        }
    }

    /// Issues a new fetch ticket, superseding any outstanding one.
    pub(crate) fn begin_fetch(&mut self, mode: MergeMode, token: Option<String>) -> FetchRequest {
        self.generation += 1;
        self.pending = Some(FetchTicket {
            generation: self.generation,
            mode,
        });
        self.mark_dirty();
        FetchRequest {
            generation: self.generation,
            token,
            mode,
        }
    }

    /// Claims the outstanding ticket if `generation` matches it.
    pub(crate) fn resolve_pending(&mut self, generation: Generation) -> Option<MergeMode> {
        match self.pending {
            Some(ticket) if ticket.generation == generation => {
                self.pending = None;
                Some(ticket.mode)
            }
            _ => None,
        }
    }

    fn tone_for(&self, category: &str) -> CategoryTone {
        if self.highlight_categories.iter().any(|c| c == category) {
            CategoryTone::Positive
        } else {
            CategoryTone::Neutral
        }
    }
}
