use std::io;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use dashboard_core::{Effect, LoadError, Msg};
use dashboard_engine::{EngineEvent, EngineHandle, EventSink, PageFetcher};
use engine_logging::{engine_debug, engine_info};

pub struct EffectRunner {
    engine: EngineHandle,
    refresh_interval: Duration,
}

impl EffectRunner {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        msg_tx: mpsc::Sender<Msg>,
        refresh_interval: Duration,
    ) -> io::Result<Self> {
        let engine = EngineHandle::new(fetcher, Arc::new(MsgSink { tx: msg_tx }))?;
        Ok(Self {
            engine,
            refresh_interval,
        })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage(request) => {
                    engine_debug!(
                        "FetchPage generation={} mode={:?} has_token={}",
                        request.generation,
                        request.mode,
                        request.token.is_some()
                    );
                    self.engine.fetch(request.generation, request.token);
                }
                Effect::StartRefreshTimer => {
                    engine_info!("Starting refresh timer every {:?}", self.refresh_interval);
                    self.engine.start_refresh(self.refresh_interval);
                }
                Effect::CancelRefreshTimer => {
                    engine_info!("Cancelling refresh timer");
                    self.engine.stop_refresh();
                }
            }
        }
    }
}

/// Posts engine results back onto the UI message queue.
struct MsgSink {
    tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(map_event(event));
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { generation, result } => Msg::PageLoaded {
            generation,
            result: result.map_err(LoadError::from),
        },
        EngineEvent::RefreshTick => Msg::RefreshTimerFired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::Page;

    #[test]
    fn refresh_tick_becomes_timer_message() {
        assert_eq!(map_event(EngineEvent::RefreshTick), Msg::RefreshTimerFired);
    }

    #[test]
    fn fetched_page_keeps_generation() {
        let msg = map_event(EngineEvent::PageFetched {
            generation: 4,
            result: Ok(Page::default()),
        });
        assert_eq!(
            msg,
            Msg::PageLoaded {
                generation: 4,
                result: Ok(Page::default())
            }
        );
    }
}
