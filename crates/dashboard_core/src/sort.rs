use std::cmp::Ordering;

use crate::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    EntityId,
    Category,
    Timestamp,
    EntryId,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::EntityId,
        SortField::Category,
        SortField::Timestamp,
        SortField::EntryId,
    ];

    /// Short machine name, as typed by the operator.
    pub fn name(self) -> &'static str {
        match self {
            SortField::EntityId => "entity",
            SortField::Category => "category",
            SortField::Timestamp => "time",
            SortField::EntryId => "entry",
        }
    }

    /// Accepts the short name or the wire field name, case-insensitively.
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "entity" | "entity_id" => Some(SortField::EntityId),
            "category" => Some(SortField::Category),
            "time" | "timestamp" => Some(SortField::Timestamp),
            "entry" | "entry_id" => Some(SortField::EntryId),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Timestamp,
            direction: SortDirection::Descending,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column-header semantics: reselecting the active field flips the
    /// direction, any other field starts ascending.
    pub fn toggled_for(self, field: SortField) -> Self {
        if self.field == field {
            Self::new(field, self.direction.reversed())
        } else {
            Self::new(field, SortDirection::Ascending)
        }
    }
}

/// Display order of `records` under `spec`.
///
/// The input is never reordered. Ties keep their relative order from
/// `records` in both directions.
pub fn sorted(records: &[Record], spec: SortSpec) -> Vec<&Record> {
    let mut view: Vec<&Record> = records.iter().collect();
    match spec.direction {
        SortDirection::Ascending => view.sort_by(|a, b| compare(a, b, spec.field)),
        SortDirection::Descending => view.sort_by(|a, b| compare(b, a, spec.field)),
    }
    view
}

fn compare(a: &Record, b: &Record, field: SortField) -> Ordering {
    match field {
        SortField::EntityId => a.entity_id.cmp(&b.entity_id),
        SortField::Category => a.category.cmp(&b.category),
        SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortField::EntryId => a.entry_id.cmp(&b.entry_id),
    }
}
