//! Queue runner integration tests.
//!
//! These tests run the runner on paused tokio time with a real audit
//! pipeline attached, the way the dashboard binary wires it.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_test::assert_ok;

use feedme_core::{
    create_audit_system, AuditFilter, AuditStore, BotStatus, MemoryAuditStore, MenuItem,
    OrderType, QueueConfig, QueueRunner,
};

#[tokio::test(start_paused = true)]
async fn test_runner_serves_orders_and_records_audit_trail() {
    let store = Arc::new(MemoryAuditStore::new());
    let (audit, writer) = create_audit_system(store.clone(), 64);
    let writer_handle = tokio::spawn(writer.run());

    let config = QueueConfig {
        initial_bots: 1,
        ..Default::default()
    };
    let runner = QueueRunner::new(config, Some(audit));
    runner.start().await;

    runner
        .add_order(OrderType::Normal, "John", vec![MenuItem::Burger])
        .await;
    runner
        .add_order(OrderType::Vip, "VIP", vec![MenuItem::FriedChicken])
        .await;

    // Order 1 was taken before the VIP arrived
    let snapshot = runner.snapshot().await;
    assert_eq!(snapshot.processing_ids(), vec![1]);
    assert_eq!(snapshot.pending_ids(), vec![2]);

    sleep(Duration::from_millis(20_500)).await;

    let snapshot = runner.snapshot().await;
    assert_eq!(snapshot.complete_ids(), vec![1, 2]);
    assert!(snapshot.is_drained());
    assert_eq!(snapshot.bots[0].status, BotStatus::Idle);

    runner.stop().await;
    drop(runner);
    writer_handle.await.unwrap();

    let completed = assert_ok!(store.count(&AuditFilter::new().with_event_type("order_completed")));
    assert_eq!(completed, 2);

    let bot_events = assert_ok!(store.query(&AuditFilter::new().with_bot_id(1)));
    let types: Vec<&str> = bot_events.iter().map(|r| r.event_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "bot_added",
            "order_assigned",
            "order_completed",
            "order_assigned",
            "order_completed",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_countdown_and_completion() {
    let runner = QueueRunner::new(QueueConfig::default(), None);
    let mut rx = runner.subscribe();
    runner.start().await;

    runner
        .add_order(OrderType::Vip, "VIP", vec![MenuItem::Fries])
        .await;
    runner.add_bot().await;

    // add_order, add_bot
    assert_eq!(rx.recv().await.unwrap().pending_ids(), vec![1]);
    let snapshot = rx.recv().await.unwrap();
    assert_eq!(snapshot.bots[0].remaining_time, Some(10));

    let mut seen = Vec::new();
    loop {
        let snapshot = rx.recv().await.unwrap();
        if snapshot.complete_ids() == vec![1] {
            break;
        }
        seen.push(snapshot.bots[0].remaining_time.unwrap());
    }
    assert_eq!(seen, vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);

    // Nothing left to count down, so no more snapshots
    sleep(Duration::from_secs(5)).await;
    assert!(rx.try_recv().is_err());

    runner.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_bot_removed_while_running_returns_order() {
    let config = QueueConfig {
        initial_bots: 2,
        ..Default::default()
    };
    let runner = QueueRunner::new(config, None);
    runner.start().await;

    runner
        .add_order(OrderType::Normal, "A", vec![MenuItem::Burger])
        .await;
    runner
        .add_order(OrderType::Normal, "B", vec![MenuItem::Fries])
        .await;
    runner
        .add_order(OrderType::Normal, "C", vec![MenuItem::FriedChicken])
        .await;

    sleep(Duration::from_millis(5_500)).await;
    let removed = runner.remove_bot().await.unwrap();
    assert_eq!(removed.id, 2);
    assert_eq!(removed.current_order_id, Some(2));

    // Returned normal order jumps ahead of order 3
    let status = runner.status().await;
    assert_eq!(status.pending_count, 2);
    assert_eq!(runner.snapshot().await.pending_ids(), vec![2, 3]);

    // Bot 1 finishes order 1 at t=10 and picks up order 2
    sleep(Duration::from_secs(5)).await;
    let snapshot = runner.snapshot().await;
    assert_eq!(snapshot.complete_ids(), vec![1]);
    assert_eq!(snapshot.processing_ids(), vec![2]);
    assert_eq!(snapshot.pending_ids(), vec![3]);

    runner.stop().await;
}
