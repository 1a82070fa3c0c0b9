use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockpaper_engine::{EngineEvent, EventSink, ProgressTicker, TickerSettings};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn increments(&self) -> Vec<f64> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::ProgressTick {
                    submission_id: 3,
                    increment,
                } => Some(*increment),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn fast_settings() -> TickerSettings {
    TickerSettings {
        interval: Duration::from_millis(10),
        max_step: 6.0,
    }
}

#[tokio::test]
async fn ticker_emits_bounded_increments() {
    let sink = Arc::new(TestSink::default());
    let ticker = ProgressTicker::start(3, fast_settings(), sink.clone());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(ticker.is_running());
    drop(ticker);

    let increments = sink.increments();
    assert!(!increments.is_empty());
    assert!(increments.iter().all(|step| (0.0..=6.0).contains(step)));
}

#[tokio::test]
async fn dropping_ticker_stops_emission() {
    let sink = Arc::new(TestSink::default());
    let ticker = ProgressTicker::start(3, fast_settings(), sink.clone());
    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(ticker);

    // Let the abort land before sampling.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let after_drop = sink.increments().len();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert_eq!(sink.increments().len(), after_drop);
}

#[tokio::test]
async fn first_tick_waits_one_interval() {
    let sink = Arc::new(TestSink::default());
    let settings = TickerSettings {
        interval: Duration::from_millis(200),
        max_step: 6.0,
    };
    let _ticker = ProgressTicker::start(3, settings, sink.clone());

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(sink.increments().is_empty());
}
