//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - Room グループ（Room ID → 接続の集合）を管理
//! - RoomEvent を JSON にエンコードしてグループへブロードキャスト
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomEvent, RoomId},
    infrastructure::dto::websocket::ServerMessage,
};

#[derive(Default)]
struct Registry {
    /// Key: ConnectionId, Value: 送信チャンネル
    connections: HashMap<ConnectionId, PusherChannel>,
    /// Key: RoomId, Value: グループに参加している接続
    groups: HashMap<RoomId, HashSet<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    registry: Mutex<Registry>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// グループに参加している接続数（テスト・デバッグ用）
    pub async fn group_size(&self, room_id: &RoomId) -> usize {
        let registry = self.registry.lock().await;
        registry.groups.get(room_id).map_or(0, HashSet::len)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut registry = self.registry.lock().await;
        registry.connections.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.connections.remove(connection_id);
        registry.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn join_group(&self, connection_id: &ConnectionId, room_id: &RoomId) {
        let mut registry = self.registry.lock().await;
        if !registry.connections.contains_key(connection_id) {
            tracing::warn!(
                "Connection '{}' is not registered, cannot join group '{}'",
                connection_id,
                room_id
            );
            return;
        }
        registry
            .groups
            .entry(room_id.clone())
            .or_default()
            .insert(*connection_id);
        tracing::debug!("Connection '{}' joined group '{}'", connection_id, room_id);
    }

    async fn dissolve_group(&self, room_id: &RoomId) {
        let mut registry = self.registry.lock().await;
        registry.groups.remove(room_id);
        tracing::debug!("Group '{}' dissolved", room_id);
    }

    async fn broadcast(&self, event: &RoomEvent) -> Result<(), MessagePushError> {
        let content = serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::Encode(e.to_string()))?;

        let registry = self.registry.lock().await;
        let Some(members) = registry.groups.get(event.room_id()) else {
            tracing::debug!("Group '{}' has no connections, skipping", event.room_id());
            return Ok(());
        };

        for connection_id in members {
            match registry.connections.get(connection_id) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!(
                            "Failed to push message to connection '{}': {}",
                            connection_id,
                            e
                        );
                    }
                }
                None => tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    connection_id
                ),
            }
        }
        tracing::debug!(
            "Broadcasted to {} connection(s) in group '{}'",
            members.len(),
            event.room_id()
        );

        Ok(())
    }
}
