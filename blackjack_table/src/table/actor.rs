//! Table actor implementation with async message handling.

use super::{
    config::TableConfig,
    errors::TableError,
    messages::{ConnectionId, TableMessage, TableStats},
};
use crate::{
    game::{Action, GameState},
    net::messages::ServerEvent,
};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// Table actor handle for sending messages
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
    participant_buffer: usize,
}

impl TableHandle {
    /// Send a message to the table
    pub async fn send(&self, message: TableMessage) -> Result<(), TableError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TableError::Closed)
    }

    /// Register a participant and return the receiving end of its outbound
    /// event channel.
    pub async fn connect(
        &self,
        connection_id: ConnectionId,
    ) -> Result<mpsc::Receiver<ServerEvent>, TableError> {
        let (sender, receiver) = mpsc::channel(self.participant_buffer);
        self.send(TableMessage::Connect {
            connection_id,
            sender,
        })
        .await?;
        Ok(receiver)
    }

    pub async fn act(&self, connection_id: ConnectionId, action: Action) -> Result<(), TableError> {
        self.send(TableMessage::Action {
            connection_id,
            action,
        })
        .await
    }

    pub async fn disconnect(&self, connection_id: ConnectionId) -> Result<(), TableError> {
        self.send(TableMessage::Disconnect { connection_id }).await
    }

    /// Current game state snapshot
    pub async fn state(&self) -> Result<Arc<GameState>, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::GetState { response }).await?;
        rx.await.map_err(|_| TableError::NoResponse)
    }

    pub async fn stats(&self) -> Result<TableStats, TableError> {
        let (response, rx) = oneshot::channel();
        self.send(TableMessage::GetStats { response }).await?;
        rx.await.map_err(|_| TableError::NoResponse)
    }
}

/// Table actor owning the shared game
pub struct TableActor {
    /// The one authoritative game
    state: GameState,

    /// Message inbox
    inbox: mpsc::Receiver<TableMessage>,

    /// Shuffle source
    rng: StdRng,

    /// Connected participants and their outbound channels
    participants: HashMap<ConnectionId, mpsc::Sender<ServerEvent>>,
}

impl TableActor {
    /// Create a new table actor seeded from the OS.
    ///
    /// # Returns
    ///
    /// * `(TableActor, TableHandle)` - Actor and handle for sending messages
    pub fn new(config: TableConfig) -> (Self, TableHandle) {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a new table actor that shuffles with the given RNG
    pub fn with_rng(config: TableConfig, rng: StdRng) -> (Self, TableHandle) {
        let (sender, inbox) = mpsc::channel(config.inbox_capacity);

        let actor = Self {
            state: GameState::new(),
            inbox,
            rng,
            participants: HashMap::new(),
        };

        let handle = TableHandle {
            sender,
            participant_buffer: config.participant_buffer,
        };

        (actor, handle)
    }

    /// Run the table actor event loop until every handle is dropped
    pub async fn run(mut self) {
        log::info!("Table starting");

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
        }

        log::info!("Table closed");
    }

    /// Handle a table message
    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Connect {
                connection_id,
                sender,
            } => self.handle_connect(connection_id, sender),

            TableMessage::Action {
                connection_id,
                action,
            } => {
                let kind = action.to_string();
                let changed = self.state.apply(action, &mut self.rng);
                log::debug!(
                    "Connection {} sent {} (changed: {}, phase: {})",
                    connection_id,
                    kind,
                    changed,
                    self.state.phase()
                );
                self.broadcast();
            }

            TableMessage::Disconnect { connection_id } => {
                self.participants.remove(&connection_id);
                let removed = self.state.remove_players(&connection_id);
                log::info!(
                    "Connection {} left, removed {} player(s)",
                    connection_id,
                    removed
                );
                self.broadcast();
            }

            TableMessage::GetState { response } => {
                let _ = response.send(Arc::new(self.state.clone()));
            }

            TableMessage::GetStats { response } => {
                let _ = response.send(TableStats {
                    players: self.state.players().len(),
                    participants: self.participants.len(),
                    phase: self.state.phase().to_string(),
                });
            }
        }
    }

    /// Register a participant and greet it with its id and the current state.
    ///
    /// A greeting that doesn't fit the buffer is dropped like any other
    /// snapshot; only a closed channel keeps the participant out.
    fn handle_connect(&mut self, connection_id: ConnectionId, sender: mpsc::Sender<ServerEvent>) {
        let greeting = [
            ServerEvent::Connected {
                connection_id: connection_id.clone(),
            },
            ServerEvent::GameStateUpdate(Arc::new(self.state.clone())),
        ];
        for event in greeting {
            match sender.try_send(event) {
                Ok(_) => {}
                Err(mpsc::error::TrySendError::Full(event)) => {
                    log::warn!(
                        "Connection {} channel full, dropping {}",
                        connection_id,
                        event
                    );
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Connection {} gone before registration", connection_id);
                    return;
                }
            }
        }

        log::info!("Connection {} registered", connection_id);
        self.participants.insert(connection_id, sender);
    }

    /// Send the full state to every participant without waiting on any of them
    fn broadcast(&mut self) {
        let event = ServerEvent::GameStateUpdate(Arc::new(self.state.clone()));
        self.participants.retain(|connection_id, sender| {
            match sender.try_send(event.clone()) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Connection {} channel full, dropping update", connection_id);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Connection {} gone, removing", connection_id);
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_table() -> TableHandle {
        let (actor, handle) = TableActor::with_rng(TableConfig::default(), StdRng::seed_from_u64(3));
        tokio::spawn(actor.run());
        handle
    }

    async fn next_state(rx: &mut mpsc::Receiver<ServerEvent>) -> Arc<GameState> {
        match rx.recv().await {
            Some(ServerEvent::GameStateUpdate(state)) => state,
            other => panic!("expected state update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_greets_participant() {
        let handle = spawn_table();
        let mut rx = handle.connect("c1".to_string()).await.unwrap();

        match rx.recv().await {
            Some(ServerEvent::Connected { connection_id }) => assert_eq!(connection_id, "c1"),
            other => panic!("expected greeting, got {other:?}"),
        }
        assert_eq!(*next_state(&mut rx).await, GameState::new());
        assert_eq!(handle.stats().await.unwrap().participants, 1);
    }

    #[tokio::test]
    async fn test_action_broadcast_to_all() {
        let handle = spawn_table();
        let mut a = handle.connect("a".to_string()).await.unwrap();
        let mut b = handle.connect("b".to_string()).await.unwrap();
        for rx in [&mut a, &mut b] {
            rx.recv().await.unwrap();
            next_state(rx).await;
        }

        handle
            .act("a".to_string(), Action::join("a", "Alice"))
            .await
            .unwrap();

        for rx in [&mut a, &mut b] {
            let state = next_state(rx).await;
            assert_eq!(state.players().len(), 1);
            assert!(state.players()[0].is_house);
        }
    }

    #[tokio::test]
    async fn test_noop_action_still_broadcast() {
        let handle = spawn_table();
        let mut rx = handle.connect("a".to_string()).await.unwrap();
        rx.recv().await.unwrap();
        next_state(&mut rx).await;

        handle.act("a".to_string(), Action::Start).await.unwrap();
        assert_eq!(*next_state(&mut rx).await, GameState::new());
    }

    #[tokio::test]
    async fn test_disconnect_removes_matching_players() {
        let handle = spawn_table();
        let mut watcher = handle.connect("w".to_string()).await.unwrap();
        watcher.recv().await.unwrap();
        next_state(&mut watcher).await;

        handle
            .act("c1".to_string(), Action::join("c1", "Alice"))
            .await
            .unwrap();
        handle
            .act("c2".to_string(), Action::join("c2", "Bob"))
            .await
            .unwrap();
        next_state(&mut watcher).await;
        next_state(&mut watcher).await;

        handle.disconnect("c1".to_string()).await.unwrap();
        let state = next_state(&mut watcher).await;
        assert_eq!(state.players().len(), 1);
        assert_eq!(state.players()[0].id, "c2");
    }

    #[tokio::test]
    async fn test_dropped_receiver_is_unregistered() {
        let handle = spawn_table();
        let rx = handle.connect("a".to_string()).await.unwrap();
        drop(rx);

        handle.act("x".to_string(), Action::Reset).await.unwrap();
        assert_eq!(handle.stats().await.unwrap().participants, 0);
    }

    #[tokio::test]
    async fn test_full_channel_does_not_block_table() {
        let config = TableConfig {
            participant_buffer: 2,
            ..Default::default()
        };
        let (actor, handle) = TableActor::with_rng(config, StdRng::seed_from_u64(9));
        tokio::spawn(actor.run());

        // Never drained: the greeting fills the buffer.
        let _slow = handle.connect("slow".to_string()).await.unwrap();
        for i in 0..5 {
            let id = format!("p{i}");
            handle.act(id.clone(), Action::join(&id, "P")).await.unwrap();
        }

        let state = handle.state().await.unwrap();
        assert_eq!(state.players().len(), 5);
        assert_eq!(handle.stats().await.unwrap().participants, 1);
    }

    #[tokio::test]
    async fn test_single_slot_buffer_keeps_participant() {
        let config = TableConfig {
            participant_buffer: 1,
            ..Default::default()
        };
        let (actor, handle) = TableActor::with_rng(config, StdRng::seed_from_u64(5));
        tokio::spawn(actor.run());

        let mut rx = handle.connect("solo".to_string()).await.unwrap();
        assert!(matches!(rx.recv().await, Some(ServerEvent::Connected { .. })));
        assert_eq!(handle.stats().await.unwrap().participants, 1);

        handle
            .act("solo".to_string(), Action::join("solo", "Sam"))
            .await
            .unwrap();
        let state = next_state(&mut rx).await;
        assert_eq!(state.players().len(), 1);
        assert_eq!(handle.stats().await.unwrap().participants, 1);
    }
}
