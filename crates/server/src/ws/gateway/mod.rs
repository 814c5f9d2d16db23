mod broadcast;

use std::collections::{HashMap, HashSet};
use tokio::sync::{mpsc, RwLock};

pub type ClientId = u64;

pub struct ConnectedClient {
    pub tx: mpsc::UnboundedSender<String>,
    pub rooms: HashSet<String>,
}

/// Process-wide subscriber set.
///
/// When both locks are needed, `rooms` is taken before `clients`.
pub struct GatewayState {
    next_id: RwLock<u64>,
    pub clients: RwLock<HashMap<ClientId, ConnectedClient>>,
    pub rooms: RwLock<HashMap<String, HashSet<ClientId>>>,
}

impl Default for GatewayState {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayState {
    pub fn new() -> Self {
        Self {
            next_id: RwLock::new(1),
            clients: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
        }
    }

    pub async fn next_client_id(&self) -> ClientId {
        let mut id = self.next_id.write().await;
        let current = *id;
        *id += 1;
        current
    }

    pub async fn register(&self, client_id: ClientId, tx: mpsc::UnboundedSender<String>) {
        let client = ConnectedClient {
            tx,
            rooms: HashSet::new(),
        };
        self.clients.write().await.insert(client_id, client);
    }

    /// Remove a client and every room subscription it held.
    pub async fn unregister(&self, client_id: ClientId) -> Option<ConnectedClient> {
        let client = self.clients.write().await.remove(&client_id)?;

        let mut rooms = self.rooms.write().await;
        for room in &client.rooms {
            if let Some(set) = rooms.get_mut(room) {
                set.remove(&client_id);
                if set.is_empty() {
                    rooms.remove(room);
                }
            }
        }

        Some(client)
    }

    /// Returns false when the client is not connected.
    pub async fn join_room(&self, client_id: ClientId, room: &str) -> bool {
        let mut rooms = self.rooms.write().await;
        let mut clients = self.clients.write().await;
        let Some(client) = clients.get_mut(&client_id) else {
            return false;
        };

        client.rooms.insert(room.to_string());
        rooms.entry(room.to_string()).or_default().insert(client_id);
        true
    }

    pub async fn leave_room(&self, client_id: ClientId, room: &str) {
        let mut rooms = self.rooms.write().await;
        if let Some(set) = rooms.get_mut(room) {
            set.remove(&client_id);
            if set.is_empty() {
                rooms.remove(room);
            }
        }

        if let Some(client) = self.clients.write().await.get_mut(&client_id) {
            client.rooms.remove(room);
        }
    }

    pub async fn connected_count(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn room_size(&self, room: &str) -> usize {
        self.rooms.read().await.get(room).map_or(0, HashSet::len)
    }
}
