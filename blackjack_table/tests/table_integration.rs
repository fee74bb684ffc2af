//! Table actor integration tests.
//!
//! Tests participant registration, broadcast fan-out, disconnect cleanup and
//! action ordering through the public `TableHandle` API.

use blackjack_table::{
    Action, GameState,
    messages::ServerEvent,
    table::{TableActor, TableConfig, TableError, TableHandle},
};
use rand::{SeedableRng, rngs::StdRng};
use std::sync::Arc;
use tokio::sync::mpsc;

fn spawn_table(seed: u64) -> TableHandle {
    let (actor, handle) = TableActor::with_rng(TableConfig::default(), StdRng::seed_from_u64(seed));
    tokio::spawn(actor.run());
    handle
}

/// Connect and consume the greeting.
async fn join_room(handle: &TableHandle, connection_id: &str) -> mpsc::Receiver<ServerEvent> {
    let mut rx = handle.connect(connection_id.to_string()).await.unwrap();
    assert!(matches!(rx.recv().await, Some(ServerEvent::Connected { .. })));
    assert!(matches!(rx.recv().await, Some(ServerEvent::GameStateUpdate(_))));
    rx
}

async fn next_state(rx: &mut mpsc::Receiver<ServerEvent>) -> Arc<GameState> {
    match rx.recv().await {
        Some(ServerEvent::GameStateUpdate(state)) => state,
        other => panic!("expected state update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_end_to_end_two_player_start() {
    let handle = spawn_table(1);
    let mut alice = join_room(&handle, "p1").await;
    let mut bob = join_room(&handle, "p2").await;

    handle.act("p1".into(), Action::join("p1", "Alice")).await.unwrap();
    handle.act("p2".into(), Action::join("p2", "Bob")).await.unwrap();
    handle.act("p1".into(), Action::Start).await.unwrap();

    for rx in [&mut alice, &mut bob] {
        next_state(rx).await;
        next_state(rx).await;
        let state = next_state(rx).await;
        assert_eq!(state.players().len(), 2);
        assert!(state.players().iter().all(|p| p.hand.len() == 2));
        assert!(state.game_started());
        assert_eq!(state.current_turn(), Some("p2"));
    }
}

#[tokio::test]
async fn test_everyone_sees_the_same_snapshot() {
    let handle = spawn_table(2);
    let mut a = join_room(&handle, "a").await;
    let mut b = join_room(&handle, "b").await;
    let mut c = join_room(&handle, "c").await;

    handle.act("a".into(), Action::join("a", "Ann")).await.unwrap();

    let sa = next_state(&mut a).await;
    let sb = next_state(&mut b).await;
    let sc = next_state(&mut c).await;
    assert_eq!(sa, sb);
    assert_eq!(sb, sc);
}

#[tokio::test]
async fn test_turn_holder_disconnect_leaves_stale_turn() {
    let handle = spawn_table(3);
    let mut watcher = join_room(&handle, "w").await;

    for (id, name) in [("h", "House"), ("p1", "Ann"), ("p2", "Ben")] {
        handle.act(id.into(), Action::join(id, name)).await.unwrap();
        next_state(&mut watcher).await;
    }
    handle.act("h".into(), Action::Start).await.unwrap();
    assert_eq!(next_state(&mut watcher).await.current_turn(), Some("p1"));

    handle.disconnect("p1".into()).await.unwrap();
    let state = next_state(&mut watcher).await;
    assert!(state.player("p1").is_none());
    assert_eq!(state.current_turn(), Some("p1"));
    assert!(!state.game_ended());

    handle.act("w".into(), Action::Reset).await.unwrap();
    assert_eq!(*next_state(&mut watcher).await, GameState::new());
}

#[tokio::test]
async fn test_concurrent_joins_are_serialized() {
    let handle = spawn_table(4);

    let mut tasks = Vec::new();
    for i in 0..20 {
        let handle = handle.clone();
        tasks.push(tokio::spawn(async move {
            let id = format!("p{i}");
            handle.act(id.clone(), Action::join(&id, "P")).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let state = handle.state().await.unwrap();
    assert_eq!(state.players().len(), 20);
    assert_eq!(state.players().iter().filter(|p| p.is_house).count(), 1);
}

#[tokio::test]
async fn test_late_connection_gets_current_state() {
    let handle = spawn_table(5);
    handle.act("x".into(), Action::join("x", "Xena")).await.unwrap();

    let mut rx = handle.connect("late".to_string()).await.unwrap();
    rx.recv().await.unwrap();
    let state = next_state(&mut rx).await;
    assert_eq!(state.players().len(), 1);
}

#[tokio::test]
async fn test_handle_errors_after_shutdown() {
    let (actor, handle) = TableActor::new(TableConfig::default());
    drop(actor);

    assert_eq!(handle.state().await.unwrap_err(), TableError::Closed);
    assert_eq!(
        handle.act("a".into(), Action::Start).await.unwrap_err(),
        TableError::Closed
    );
}
