mod common;

use std::sync::Arc;

use rust_decimal_macros::dec;
use tokio::sync::mpsc;

use gigboard_core::deliveries::{
    DeliveryApp, DeliveryRepository, DeliveryService, DeliveryServiceTrait, NewDelivery,
};
use gigboard_core::expenses::ExpenseRepository;
use gigboard_core::linkage::LinkageRepository;
use gigboard_core::realtime::{
    ConnectionRegistry, PushMessage, StatsNotifier, DELIVERY_STATS_CHANNEL, SHIFT_STATS_CHANNEL,
};
use gigboard_core::shifts::ShiftRepository;
use gigboard_core::statistics::StatisticsService;

const USER_A: &str = "user-a";
const USER_B: &str = "user-b";

#[test]
fn test_registry_routes_to_all_sessions_of_one_user() {
    let registry = ConnectionRegistry::new();
    let (tx1, mut rx1) = mpsc::unbounded_channel();
    let (tx2, mut rx2) = mpsc::unbounded_channel();
    let (tx_other, mut rx_other) = mpsc::unbounded_channel();
    registry.register(USER_A, "phone", tx1);
    registry.register(USER_A, "laptop", tx2);
    registry.register(USER_B, "phone", tx_other);

    let message = PushMessage::new(DELIVERY_STATS_CHANNEL, serde_json::json!({"avgPay": 5.0}));
    let delivered = registry.broadcast(USER_A, &message);

    assert_eq!(delivered, 2);
    assert_eq!(rx1.try_recv().unwrap().channel, DELIVERY_STATS_CHANNEL);
    assert_eq!(rx2.try_recv().unwrap().channel, DELIVERY_STATS_CHANNEL);
    assert!(rx_other.try_recv().is_err());
}

#[test]
fn test_registry_prunes_dead_sessions_on_broadcast() {
    let registry = ConnectionRegistry::new();
    let (tx_live, mut rx_live) = mpsc::unbounded_channel();
    let (tx_dead, rx_dead) = mpsc::unbounded_channel();
    registry.register(USER_A, "live", tx_live);
    registry.register(USER_A, "dead", tx_dead);
    drop(rx_dead);

    let message = PushMessage::new(DELIVERY_STATS_CHANNEL, serde_json::json!({}));
    assert_eq!(registry.broadcast(USER_A, &message), 1);
    assert!(rx_live.try_recv().is_ok());
    assert_eq!(registry.session_count(USER_A), 1);
}

#[test]
fn test_unregister_drops_empty_user_entry() {
    let registry = ConnectionRegistry::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    registry.register(USER_A, "phone", tx);
    assert_eq!(registry.session_count(USER_A), 1);

    registry.unregister(USER_A, "phone");
    assert_eq!(registry.session_count(USER_A), 0);

    let message = PushMessage::new(DELIVERY_STATS_CHANNEL, serde_json::json!({}));
    assert_eq!(registry.broadcast(USER_A, &message), 0);
}

#[test]
fn test_registry_survives_concurrent_register_and_broadcast() {
    let registry = Arc::new(ConnectionRegistry::new());
    let mut handles = Vec::new();

    for worker in 0..8 {
        let registry = registry.clone();
        handles.push(std::thread::spawn(move || {
            for round in 0..50 {
                let session = format!("session-{}-{}", worker, round);
                let (tx, mut rx) = mpsc::unbounded_channel();
                registry.register(USER_A, &session, tx);
                let message =
                    PushMessage::new(DELIVERY_STATS_CHANNEL, serde_json::json!({"round": round}));
                registry.broadcast(USER_A, &message);
                // Our own session registered before the broadcast, so it
                // must have received this round's message
                assert!(rx.try_recv().is_ok());
                registry.unregister(USER_A, &session);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.session_count(USER_A), 0);
}

#[tokio::test]
async fn test_mutation_pushes_recomputed_snapshot_to_sessions() {
    let pool = common::get_test_pool(common::get_test_db_path("push_after_mutation".to_string()));
    let registry = Arc::new(ConnectionRegistry::new());
    let statistics_service = Arc::new(StatisticsService::new(
        Arc::new(DeliveryRepository::new(pool.clone())),
        Arc::new(ShiftRepository::new(pool.clone())),
        Arc::new(ExpenseRepository::new(pool.clone())),
        Arc::new(LinkageRepository::new(pool.clone())),
    ));
    let notifier = Arc::new(StatsNotifier::new(registry.clone(), statistics_service));
    let delivery_service = DeliveryService::new(
        pool.clone(),
        Arc::new(DeliveryRepository::new(pool)),
        notifier,
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    registry.register(USER_A, "phone", tx);

    delivery_service
        .create_delivery(
            USER_A,
            NewDelivery {
                id: None,
                app: DeliveryApp::UberEats,
                delivery_time: chrono::Utc::now().naive_utc(),
                base_pay: dec!(4.00),
                tip_pay: dec!(2.00),
                mileage: dec!(2.0),
                restaurant: "Thai Spoon".to_string(),
                customer_neighborhood: "Downtown".to_string(),
                notes: None,
            },
        )
        .await
        .unwrap();

    // Delivery mutations invalidate both the delivery and shift snapshots
    let first = rx.try_recv().unwrap();
    assert_eq!(first.channel, DELIVERY_STATS_CHANNEL);
    assert_eq!(first.payload["avgPay"], serde_json::json!(6.0));
    assert_eq!(first.payload["donut"]["totalTipPay"], serde_json::json!(2.0));
    let second = rx.try_recv().unwrap();
    assert_eq!(second.channel, SHIFT_STATS_CHANNEL);

    // Nobody else hears about it
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    registry.register(USER_B, "phone", tx_b);
    assert!(rx_b.try_recv().is_err());
}
