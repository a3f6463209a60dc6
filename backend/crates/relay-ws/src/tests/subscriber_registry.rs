use crate::tests::{open_subscriber, registry, subscriber_in_state};
use crate::{ConnectionId, ConnectionLimits, ConnectionState, SubscriberRegistry, WsError};

#[tokio::test]
async fn given_new_subscriber_when_registered_then_count_increases() {
    let registry = registry();
    let (handle, _rx) = open_subscriber(4);

    let connection_id = registry.register(handle).await.unwrap();

    assert_eq!(registry.total_count().await, 1);
    assert!(registry.contains(connection_id).await);
}

#[tokio::test]
async fn given_registered_subscriber_when_unregistered_twice_then_second_is_noop() {
    let registry = registry();
    let (handle_a, _rx_a) = open_subscriber(4);
    let (handle_b, _rx_b) = open_subscriber(4);
    let a = registry.register(handle_a).await.unwrap();
    let b = registry.register(handle_b).await.unwrap();

    assert!(registry.unregister(a).await);
    assert!(!registry.unregister(a).await);

    assert_eq!(registry.total_count().await, 1);
    assert!(registry.contains(b).await);
}

#[tokio::test]
async fn given_unknown_id_when_unregistered_then_noop() {
    let registry = registry();

    assert!(!registry.unregister(ConnectionId::new()).await);
    assert_eq!(registry.total_count().await, 0);
}

#[tokio::test]
async fn given_snapshot_when_registry_changes_then_snapshot_unchanged() {
    let registry = registry();
    let (handle_a, _rx_a) = open_subscriber(4);
    let a = registry.register(handle_a).await.unwrap();

    let snapshot = registry.snapshot().await;

    let (handle_b, _rx_b) = open_subscriber(4);
    registry.register(handle_b).await.unwrap();
    registry.unregister(a).await;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].connection_id(), a);
    assert_eq!(registry.snapshot().await.len(), 1);
    assert_ne!(registry.snapshot().await[0].connection_id(), a);
}

#[tokio::test]
async fn given_limit_reached_when_register_then_limit_error() {
    let registry = SubscriberRegistry::new(ConnectionLimits { max_subscribers: 1 });
    let (handle_a, _rx_a) = open_subscriber(4);
    let (handle_b, _rx_b) = open_subscriber(4);
    registry.register(handle_a).await.unwrap();

    let result = registry.register(handle_b).await;

    assert!(matches!(
        result,
        Err(WsError::SubscriberLimitExceeded { current: 1, max: 1, .. })
    ));
}

#[tokio::test]
async fn given_connecting_and_open_subscribers_when_counted_then_open_count_excludes_connecting() {
    let registry = registry();
    let (open, _rx_open) = open_subscriber(4);
    let (connecting, _rx_connecting) = subscriber_in_state(4, ConnectionState::Connecting);
    registry.register(open).await.unwrap();
    registry.register(connecting).await.unwrap();

    assert_eq!(registry.total_count().await, 2);
    assert_eq!(registry.open_count().await, 1);
}

#[tokio::test]
async fn given_cloned_registry_when_registering_then_shared_state() {
    let registry = registry();
    let clone = registry.clone();
    let (handle, _rx) = open_subscriber(4);

    clone.register(handle).await.unwrap();

    assert_eq!(registry.total_count().await, 1);
}
