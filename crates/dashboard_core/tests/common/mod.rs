#![allow(dead_code)]

use std::sync::Once;

use chrono::{TimeZone, Utc};
use dashboard_core::{update, Effect, FetchRequest, Msg, Page, Record, SessionState};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Record `e{n}` about `cow-{n % 3}`, `n` seconds after a fixed epoch.
pub fn record(n: u32) -> Record {
    let categories = ["optimistic", "pessimistic"];
    Record::new(
        format!("cow-{}", n % 3),
        categories[(n % 2) as usize],
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(n.into()),
        format!("e{n}"),
    )
}

pub fn page(ids: std::ops::RangeInclusive<u32>, token: Option<&str>, total: Option<u64>) -> Page {
    let records: Vec<Record> = ids.map(record).collect();
    Page {
        declared_count: records.len() as u64,
        records,
        total_count: total,
        continuation_token: token.map(str::to_string),
    }
}

pub fn entry_ids(state: &SessionState) -> Vec<String> {
    state.records().iter().map(|r| r.entry_id.clone()).collect()
}

pub fn expected_ids(ids: std::ops::RangeInclusive<u32>) -> Vec<String> {
    ids.map(|n| format!("e{n}")).collect()
}

/// The single fetch request among `effects`.
pub fn fetch_request(effects: &[Effect]) -> FetchRequest {
    let requests: Vec<&FetchRequest> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage(request) => Some(request),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 1, "expected exactly one fetch in {effects:?}");
    requests[0].clone()
}

/// Activated session whose first page has resolved with `first`.
pub fn loaded_session(first: Page) -> SessionState {
    let (state, effects) = update(SessionState::new(), Msg::Activated);
    let request = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: request.generation,
            result: Ok(first),
        },
    );
    state
}

/// Clicks load-more and resolves it with `next`.
pub fn load_more(state: SessionState, next: Page) -> SessionState {
    let (state, effects) = update(state, Msg::LoadMoreClicked);
    let request = fetch_request(&effects);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            generation: request.generation,
            result: Ok(next),
        },
    );
    state
}
