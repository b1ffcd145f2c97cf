/**
 * Connection Registry
 *
 * Tracks the membership of currently-open relay connections. The WebSocket
 * handler registers a connection after a successful upgrade and deregisters
 * it when the socket closes or errors.
 *
 * Membership is anonymous: an entry is an opaque id plus the time the
 * connection was accepted. No identity or session state is attached; the
 * relay delivers every event to every member.
 */
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Opaque identifier for one registered connection
pub type ConnectionId = Uuid;

/// Metadata kept per connection
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    /// When the connection completed its handshake
    pub connected_at: DateTime<Utc>,
}

/// Live membership of open relay connections
///
/// Cloneable; clones share the underlying map. Only the WebSocket handler
/// mutates membership; everything else just reads counts for logging.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<Mutex<HashMap<ConnectionId, ConnectionInfo>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly upgraded connection, returning its id
    pub fn register(&self) -> ConnectionId {
        let id = Uuid::new_v4();
        let info = ConnectionInfo {
            connected_at: Utc::now(),
        };
        let count = {
            let mut connections = self.connections.lock().unwrap();
            connections.insert(id, info);
            connections.len()
        };
        tracing::info!("[Relay] Client connected ({} active)", count);
        id
    }

    /// Remove a connection on close or error
    ///
    /// Removing an id twice is harmless; the handler's send and receive
    /// halves may both observe the disconnect.
    pub fn deregister(&self, id: ConnectionId) {
        let mut connections = self.connections.lock().unwrap();
        if connections.remove(&id).is_some() {
            tracing::info!("[Relay] Client disconnected ({} active)", connections.len());
        }
    }

    /// Number of currently registered connections
    pub fn len(&self) -> usize {
        self.connections.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
