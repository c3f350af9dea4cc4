use chrono::{DateTime, Utc};

use crate::{LoadError, SortSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTone {
    Positive,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    pub entity_id: String,
    pub category: String,
    pub tone: CategoryTone,
    pub timestamp: DateTime<Utc>,
    pub entry_id: String,
}

/// Read-only projection handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Rows in display order.
    pub rows: Vec<RecordRow>,
    pub total_count: Option<u64>,
    pub has_more: bool,
    pub is_loading: bool,
    pub last_error: Option<LoadError>,
    pub sort: SortSpec,
    pub duplicates_dropped: u64,
    pub dirty: bool,
}

impl DashboardView {
    /// Nothing to show and nothing on the way.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && !self.is_loading && self.last_error.is_none()
    }
}
