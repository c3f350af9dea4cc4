use chrono::{DateTime, Utc};
use dashboard_core::{Page, Record};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

/// Response body of one page request.
#[derive(Debug, Deserialize)]
struct WirePage {
    #[serde(alias = "readings")]
    data: Vec<WireRecord>,
    count: u64,
    #[serde(default)]
    total_count: Option<u64>,
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(alias = "cow_id")]
    entity_id: String,
    #[serde(alias = "response_type")]
    category: String,
    #[serde(alias = "timestamp")]
    time: DateTime<Utc>,
    entry_id: String,
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Record {
            entity_id: wire.entity_id,
            category: wire.category,
            timestamp: wire.time,
            entry_id: wire.entry_id,
        }
    }
}

/// Parse a JSON page body. An empty `next_token` counts as no token.
pub fn decode_page(bytes: &[u8]) -> Result<Page, FetchError> {
    let wire: WirePage = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::MalformedResponse, err.to_string()))?;

    Ok(Page {
        records: wire.data.into_iter().map(Record::from).collect(),
        declared_count: wire.count,
        total_count: wire.total_count,
        continuation_token: wire.next_token.filter(|token| !token.is_empty()),
    })
}
