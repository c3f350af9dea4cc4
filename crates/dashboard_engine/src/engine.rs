use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use dashboard_core::Generation;
use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::scheduler::{RefreshHandle, RefreshScheduler};
use crate::{EngineEvent, EventSink, PageFetcher};

enum EngineCommand {
    Fetch {
        generation: Generation,
        token: Option<String>,
    },
    StartRefresh {
        interval: Duration,
    },
    StopRefresh,
}

/// Runs fetches and the refresh timer on a background tokio runtime.
///
/// Results are delivered through the [`EventSink`]. Dropping the handle
/// stops the runtime thread and cancels the refresh timer.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("dashboard-engine".to_string())
            .spawn(move || {
                let mut refresh: Option<RefreshHandle> = None;
                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Fetch { generation, token } => {
                            let fetcher = fetcher.clone();
                            let sink = sink.clone();
                            runtime.spawn(async move {
                                let result = fetcher.fetch(token.as_deref()).await;
                                if let Err(err) = &result {
                                    engine_warn!("Fetch generation={} failed: {}", generation, err);
                                }
                                sink.emit(EngineEvent::PageFetched { generation, result });
                            });
                        }
                        EngineCommand::StartRefresh { interval } => {
                            if let Some(previous) = refresh.take() {
                                previous.cancel();
                            }
                            let _guard = runtime.enter();
                            let sink = sink.clone();
                            refresh = Some(
                                RefreshScheduler::new(interval)
                                    .start(move || sink.emit(EngineEvent::RefreshTick)),
                            );
                        }
                        EngineCommand::StopRefresh => {
                            if let Some(handle) = refresh.take() {
                                handle.cancel();
                            }
                        }
                    }
                }
                engine_debug!("Engine command channel closed, shutting down");
                drop(refresh);
            })?;

        engine_info!("Engine started");
        Ok(Self { cmd_tx })
    }

    pub fn fetch(&self, generation: Generation, token: Option<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch { generation, token });
    }

    pub fn start_refresh(&self, interval: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::StartRefresh { interval });
    }

    pub fn stop_refresh(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopRefresh);
    }
}
