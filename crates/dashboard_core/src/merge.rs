use std::collections::HashSet;

use engine_logging::{engine_debug, engine_warn};

use crate::{LoadError, Page, Record, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Discard accumulated records; used for the initial load and every refresh.
    Replace,
    /// Concatenate after accumulated records; used for load-more.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Records added to the accumulated set.
    pub accepted: usize,
    /// Records skipped because their `entry_id` was already present.
    pub duplicates: usize,
}

/// Folds one fetch result into the session.
///
/// A failed fetch only records the error: accumulated records, the
/// continuation token and the total count stay as they were. Records whose
/// `entry_id` is already present are skipped, first occurrence wins.
pub fn apply_page(
    state: &mut SessionState,
    result: Result<Page, LoadError>,
    mode: MergeMode,
) -> MergeOutcome {
    state.pending = None;
    state.mark_dirty();

    let page = match result {
        Ok(page) => page,
        Err(err) => {
            engine_warn!("Page load failed ({:?}): {}", mode, err);
            state.last_error = Some(err);
            return MergeOutcome::default();
        }
    };

    let Page {
        records,
        declared_count,
        total_count,
        continuation_token,
    } = page;

    let outcome = match mode {
        MergeMode::Replace => {
            let mut seen = HashSet::with_capacity(records.len());
            state.records = Vec::with_capacity(records.len());
            let outcome = extend_unique(&mut state.records, &mut seen, records);
            state.total_count = Some(total_count.unwrap_or(declared_count));
            outcome
        }
        MergeMode::Append => {
            let mut seen: HashSet<String> = state
                .records
                .iter()
                .map(|record| record.entry_id.clone())
                .collect();
            let outcome = extend_unique(&mut state.records, &mut seen, records);
            state.total_count = Some(total_count.unwrap_or(state.records.len() as u64));
            outcome
        }
    };

    state.continuation_token = continuation_token;
    state.last_error = None;
    state.duplicates_dropped += outcome.duplicates as u64;

    if outcome.duplicates > 0 {
        engine_warn!(
            "Dropped {} duplicate entries while merging ({:?})",
            outcome.duplicates,
            mode
        );
    }
    engine_debug!(
        "Merged page mode={:?} accepted={} total_records={} total_count={:?} has_more={}",
        mode,
        outcome.accepted,
        state.records.len(),
        state.total_count,
        state.continuation_token.is_some()
    );
    outcome
}

fn extend_unique(
    target: &mut Vec<Record>,
    seen: &mut HashSet<String>,
    incoming: Vec<Record>,
) -> MergeOutcome {
    let mut outcome = MergeOutcome::default();
    for record in incoming {
        if seen.insert(record.entry_id.clone()) {
            target.push(record);
            outcome.accepted += 1;
        } else {
            outcome.duplicates += 1;
        }
    }
    outcome
}
