use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use dashboard_core::Page;
use dashboard_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, FetchError, PageFetcher,
};
use pretty_assertions::assert_eq;

/// Answers every call with an empty page carrying the requested token back.
#[derive(Default)]
struct EchoFetcher {
    calls: Mutex<Vec<Option<String>>>,
    in_flight: AtomicUsize,
}

#[async_trait::async_trait]
impl PageFetcher for EchoFetcher {
    async fn fetch(&self, token: Option<&str>) -> Result<Page, FetchError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(token.map(str::to_string));
        Ok(Page {
            continuation_token: token.map(|t| format!("{t}+")),
            ..Page::default()
        })
    }
}

fn engine_with(fetcher: Arc<EchoFetcher>) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(fetcher, Arc::new(ChannelEventSink::new(tx))).expect("engine");
    (engine, rx)
}

#[test]
fn fetch_result_carries_generation() {
    let fetcher = Arc::new(EchoFetcher::default());
    let (engine, rx) = engine_with(fetcher.clone());

    engine.fetch(7, Some("T1".to_string()));
    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");

    assert_eq!(
        event,
        EngineEvent::PageFetched {
            generation: 7,
            result: Ok(Page {
                continuation_token: Some("T1+".to_string()),
                ..Page::default()
            }),
        }
    );
    assert_eq!(*fetcher.calls.lock().unwrap(), vec![Some("T1".to_string())]);
}

#[test]
fn refresh_timer_emits_ticks_until_stopped() {
    let fetcher = Arc::new(EchoFetcher::default());
    let (engine, rx) = engine_with(fetcher.clone());

    engine.start_refresh(Duration::from_millis(20));
    for _ in 0..2 {
        let event = rx.recv_timeout(Duration::from_secs(5)).expect("tick");
        assert_eq!(event, EngineEvent::RefreshTick);
    }

    engine.stop_refresh();
    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(fetcher.in_flight.load(Ordering::SeqCst), 0);
}

#[test]
fn dropping_engine_stops_timer() {
    let fetcher = Arc::new(EchoFetcher::default());
    let (engine, rx) = engine_with(fetcher);

    engine.start_refresh(Duration::from_millis(20));
    rx.recv_timeout(Duration::from_secs(5)).expect("tick");
    drop(engine);

    std::thread::sleep(Duration::from_millis(60));
    while rx.try_recv().is_ok() {}
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}
