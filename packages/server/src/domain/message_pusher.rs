//! MessagePusher trait 定義
//!
//! 接続中のクライアントへのメッセージ配信を抽象化します。
//! Room ごとに「グループ」を持ち、ブロードキャストはグループ単位で行います。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomEvent, RoomId};

/// 接続ごとの送信チャンネル（エンコード済みのテキストフレーム）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除（所属する全てのグループからも外す）
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 接続を Room グループに参加させる
    async fn join_group(&self, connection_id: &ConnectionId, room_id: &RoomId);

    /// Room グループを解散する
    async fn dissolve_group(&self, room_id: &RoomId);

    /// イベントを該当 Room グループの全接続へブロードキャスト
    ///
    /// 一部の接続への送信失敗は許容する。
    async fn broadcast(&self, event: &RoomEvent) -> Result<(), MessagePushError>;
}
