use chrono::{DateTime, Utc};

/// One event entry as delivered by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Subject the entry is about.
    pub entity_id: String,
    /// Classification label.
    pub category: String,
    pub timestamp: DateTime<Utc>,
    /// Unique key of the entry.
    pub entry_id: String,
}

impl Record {
    pub fn new(
        entity_id: impl Into<String>,
        category: impl Into<String>,
        timestamp: DateTime<Utc>,
        entry_id: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            category: category.into(),
            timestamp,
            entry_id: entry_id.into(),
        }
    }
}

/// One fetch result, records in server order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Page {
    pub records: Vec<Record>,
    /// Count of records the server claims for this page.
    pub declared_count: u64,
    /// Server estimate of the full set size; authoritative when present.
    pub total_count: Option<u64>,
    /// `None` means there are no further pages.
    pub continuation_token: Option<String>,
}

impl Page {
    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some()
    }
}
