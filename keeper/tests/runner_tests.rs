use std::sync::Arc;
use std::time::Duration;

use common::time::ManualClock;
use keeper::runner::{Keeper, TickReport};
use oracle::MockAggregator;
use registry::{Address, InMemoryRegistry};
use tokio::sync::watch;
use tokio::test;
use trend::{TrendConfig, TrendEngine, TrendError, TrendLabel};

const INTERVAL: Duration = Duration::from_secs(60);

async fn setup() -> (Arc<TrendEngine>, Arc<MockAggregator>, ManualClock) {
    let clock = ManualClock::new(0);
    let feed = Arc::new(MockAggregator::with_updated_at(8, 120_000_000, 0));
    let engine = TrendEngine::new(
        TrendConfig::new(INTERVAL),
        feed.clone(),
        Arc::new(InMemoryRegistry::new(Address::from("operator"))),
        Arc::new(clock.clone()),
    )
    .await
    .expect("engine");

    (Arc::new(engine), feed, clock)
}

#[test]
async fn tick_is_idle_until_interval_elapses() {
    let (engine, _feed, clock) = setup().await;
    let keeper = Keeper::new(engine.clone(), Duration::from_millis(10));

    assert_eq!(keeper.tick().await, TickReport::Idle);
    clock.advance(INTERVAL - Duration::from_millis(1));
    assert_eq!(keeper.tick().await, TickReport::Idle);
    assert_eq!(engine.state().await.version, 0);
}

#[test]
async fn tick_evaluates_once_eligible() {
    let (engine, feed, clock) = setup().await;
    let keeper = Keeper::new(engine.clone(), Duration::from_millis(10));

    feed.update_answer(100_000_000).await;
    clock.advance(INTERVAL);

    let TickReport::Evaluated(out) = keeper.tick().await else {
        panic!("expected an evaluation");
    };
    assert!(out.changed);
    assert_eq!(out.new_trend, TrendLabel::Bear);

    // immediately after, the probe is false again
    assert_eq!(keeper.tick().await, TickReport::Idle);
}

#[test]
async fn tick_survives_price_outage_and_retries() {
    let (engine, feed, clock) = setup().await;
    let keeper = Keeper::new(engine.clone(), Duration::from_millis(10));

    clock.advance(INTERVAL);
    feed.set_unavailable(true);

    assert!(matches!(
        keeper.tick().await,
        TickReport::Failed(TrendError::PriceUnavailable(_))
    ));
    assert_eq!(engine.state().await.version, 0);

    feed.set_unavailable(false);
    assert!(matches!(keeper.tick().await, TickReport::Evaluated(_)));
    assert_eq!(engine.state().await.version, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_loop_evaluates_and_stops_on_shutdown() {
    let (engine, feed, clock) = setup().await;
    feed.update_answer(1).await;
    clock.advance(INTERVAL);

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(Keeper::new(engine.clone(), Duration::from_millis(5)).run(rx));

    let committed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if engine.state().await.version >= 1 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(committed.is_ok(), "keeper never evaluated");

    tx.send(true).expect("keeper still listening");
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("keeper did not stop")
        .expect("keeper task panicked");

    // the clock never moved again, so exactly one evaluation happened
    assert_eq!(engine.state().await.version, 1);
    assert_eq!(engine.current_trend().await, TrendLabel::Bear);
}

#[test]
async fn run_loop_stops_when_sender_dropped() {
    let (engine, _feed, _clock) = setup().await;
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(Keeper::new(engine, Duration::from_millis(5)).run(rx));

    drop(tx);
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("keeper did not stop")
        .expect("keeper task panicked");
}
