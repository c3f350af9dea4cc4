use engine_logging::{engine_debug, engine_info, engine_trace};

use crate::{apply_page, Effect, Lifecycle, MergeMode, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    if state.lifecycle() == Lifecycle::TornDown {
        engine_trace!("Ignoring {:?} after teardown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Activated => {
            if state.lifecycle() != Lifecycle::Inactive {
                return (state, Vec::new());
            }
            state.activate();
            let request = state.begin_fetch(MergeMode::Replace, None);
            engine_info!("Session activated, loading first page");
            vec![Effect::FetchPage(request), Effect::StartRefreshTimer]
        }
        Msg::RefreshClicked => {
            if state.lifecycle() != Lifecycle::Active {
                return (state, Vec::new());
            }
            // A manual refresh supersedes whatever is in flight.
            vec![Effect::FetchPage(
                state.begin_fetch(MergeMode::Replace, None),
            )]
        }
        Msg::RefreshTimerFired => {
            if state.lifecycle() != Lifecycle::Active {
                return (state, Vec::new());
            }
            if state.is_loading() {
                engine_debug!("Refresh tick skipped, fetch already in flight");
                return (state, Vec::new());
            }
            vec![Effect::FetchPage(
                state.begin_fetch(MergeMode::Replace, None),
            )]
        }
        Msg::LoadMoreClicked => {
            if state.lifecycle() != Lifecycle::Active || state.is_loading() {
                return (state, Vec::new());
            }
            let Some(token) = state.continuation_token.clone() else {
                return (state, Vec::new());
            };
            vec![Effect::FetchPage(
                state.begin_fetch(MergeMode::Append, Some(token)),
            )]
        }
        Msg::SortChanged(spec) => {
            state.set_sort(spec);
            Vec::new()
        }
        Msg::SortColumnClicked(field) => {
            let spec = state.sort().toggled_for(field);
            state.set_sort(spec);
            Vec::new()
        }
        Msg::PageLoaded { generation, result } => {
            match state.resolve_pending(generation) {
                Some(mode) => {
                    apply_page(&mut state, result, mode);
                }
                None => {
                    engine_debug!(
                        "Discarding stale page result generation={} current={}",
                        generation,
                        state.generation()
                    );
                }
            }
            Vec::new()
        }
        Msg::TornDown => {
            let timer_was_running = state.tear_down();
            engine_info!("Session torn down");
            if timer_was_running {
                vec![Effect::CancelRefreshTimer]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
