use super::{ClientId, ConnectedClient, GatewayState};
use crate::ws::events::ServerEvent;

/// Delivery is at most once per currently connected subscriber: a frame that cannot be
/// queued (the socket task already exited) is dropped and logged, never retried.
impl GatewayState {
    pub async fn broadcast_all(&self, event: &ServerEvent, exclude: Option<ClientId>) -> usize {
        let Some(msg) = encode(event) else {
            return 0;
        };

        let clients = self.clients.read().await;
        let mut delivered = 0;
        for (&cid, client) in clients.iter() {
            if Some(cid) == exclude {
                continue;
            }
            if deliver(cid, client, event, &msg) {
                delivered += 1;
            }
        }
        delivered
    }

    pub async fn broadcast_room(
        &self,
        room: &str,
        event: &ServerEvent,
        exclude: Option<ClientId>,
    ) -> usize {
        let Some(msg) = encode(event) else {
            return 0;
        };

        let rooms = self.rooms.read().await;
        let clients = self.clients.read().await;
        let mut delivered = 0;

        if let Some(subscriber_ids) = rooms.get(room) {
            for &cid in subscriber_ids {
                if Some(cid) == exclude {
                    continue;
                }
                if let Some(client) = clients.get(&cid) {
                    if deliver(cid, client, event, &msg) {
                        delivered += 1;
                    }
                }
            }
        }
        delivered
    }

    pub async fn send_to(&self, client_id: ClientId, event: &ServerEvent) -> bool {
        let Some(msg) = encode(event) else {
            return false;
        };

        let clients = self.clients.read().await;
        match clients.get(&client_id) {
            Some(client) => deliver(client_id, client, event, &msg),
            None => false,
        }
    }
}

fn encode(event: &ServerEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!("Failed to encode {} event: {}", event.name(), e);
            None
        }
    }
}

fn deliver(cid: ClientId, client: &ConnectedClient, event: &ServerEvent, msg: &str) -> bool {
    match client.tx.send(msg.to_string()) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("Dropped {} for disconnected client {}", event.name(), cid);
            false
        }
    }
}
