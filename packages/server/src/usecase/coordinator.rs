//! Room Coordinator
//!
//! 全ての Room 状態の変更を 1 つの tokio タスク上で直列に処理する。
//! 受信メッセージ（コマンド）と猶予期間タイマーの満了はどちらも同じループで
//! 1 件ずつ最後まで処理されるため、ハンドラ同士が状態変更の途中で交差しない。
//!
//! ## 状態
//!
//! - `memberships`: 接続 ID → (Room ID → player_id)。接続ごとに参加した Room と
//!   その Room での player_id を持つ一時的な対応表で、接続が切れたら破棄される
//! - `pending_closures`: Room ID → 切断した admin と満了待ちのタイマー
//!
//! ## Room の状態遷移
//!
//! ```text
//! Active ──admin 切断──▶ AdminGracePeriod ──admin 再参加──▶ Active
//!                              │
//!                              └──30 秒経過・admin 不在──▶ Closed（Room 削除）
//! ```

use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
    time::Duration,
};

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{
    ConnectionId, JoinOutcome, MessagePusher, Player, PlayerId, PlayerName, PusherChannel, RoomId,
    RoomRepository,
};

use super::{
    CloseRoomUseCase, CreateRoomUseCase, DisconnectPlayerUseCase, GetPlayerListUseCase,
    JoinRoomUseCase, SetReadyStatusUseCase, StartGameUseCase,
    error::{CreateRoomError, JoinRoomError},
};

/// admin 切断から Room を閉じるまでの猶予期間
pub const ADMIN_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Coordinator へのコマンド
#[derive(Debug)]
enum Command {
    Connect {
        connection_id: ConnectionId,
        sender: PusherChannel,
    },
    CreateRoom {
        connection_id: ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), CreateRoomError>>,
    },
    JoinRoom {
        connection_id: ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), JoinRoomError>>,
    },
    SetReadyStatus {
        room_id: RoomId,
        player_id: PlayerId,
        ready: bool,
    },
    StartGame {
        connection_id: ConnectionId,
        room_id: RoomId,
    },
    GetPlayerList {
        room_id: RoomId,
        reply: oneshot::Sender<Vec<Player>>,
    },
    Disconnect {
        connection_id: ConnectionId,
    },
}

/// 猶予期間タイマーの満了通知
#[derive(Debug)]
struct ClosureDeadline {
    room_id: RoomId,
    ticket: u64,
}

/// 満了待ちの Room 終了
///
/// 切断した admin の player_id とタイマーを 1 つのエントリで持つため、
/// 両者は常に同時に登録・削除される。
#[derive(Debug)]
struct PendingClosure {
    admin_id: PlayerId,
    ticket: u64,
    timer: JoinHandle<()>,
}

/// Room のライフサイクルと準備状態を管理するコーディネーター
pub struct RoomCoordinator {
    create_room_usecase: CreateRoomUseCase,
    join_room_usecase: JoinRoomUseCase,
    set_ready_status_usecase: SetReadyStatusUseCase,
    start_game_usecase: StartGameUseCase,
    get_player_list_usecase: GetPlayerListUseCase,
    disconnect_player_usecase: DisconnectPlayerUseCase,
    close_room_usecase: CloseRoomUseCase,
    message_pusher: Arc<dyn MessagePusher>,
    memberships: HashMap<ConnectionId, HashMap<RoomId, PlayerId>>,
    pending_closures: HashMap<RoomId, PendingClosure>,
    next_ticket: u64,
    deadline_tx: mpsc::UnboundedSender<ClosureDeadline>,
    deadline_rx: mpsc::UnboundedReceiver<ClosureDeadline>,
}

impl RoomCoordinator {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        let (deadline_tx, deadline_rx) = mpsc::unbounded_channel();
        Self {
            create_room_usecase: CreateRoomUseCase::new(repository.clone(), message_pusher.clone()),
            join_room_usecase: JoinRoomUseCase::new(repository.clone(), message_pusher.clone()),
            set_ready_status_usecase: SetReadyStatusUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            start_game_usecase: StartGameUseCase::new(repository.clone(), message_pusher.clone()),
            get_player_list_usecase: GetPlayerListUseCase::new(repository.clone()),
            disconnect_player_usecase: DisconnectPlayerUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            ),
            close_room_usecase: CloseRoomUseCase::new(repository, message_pusher.clone()),
            message_pusher,
            memberships: HashMap::new(),
            pending_closures: HashMap::new(),
            next_ticket: 0,
            deadline_tx,
            deadline_rx,
        }
    }

    /// イベントループを起動し、操作用のハンドルを返す
    ///
    /// 全てのハンドルが drop されるとループは終了する。
    pub fn spawn(self) -> (CoordinatorHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(commands_rx));
        (
            CoordinatorHandle {
                commands: commands_tx,
            },
            task,
        )
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        tracing::debug!("Room coordinator started");
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command).await,
                    None => break,
                },
                // self が送信側を保持しているため None にはならない
                Some(deadline) = self.deadline_rx.recv() => {
                    self.on_closure_deadline(deadline).await;
                }
            }
        }

        for (_, pending) in self.pending_closures.drain() {
            pending.timer.abort();
        }
        tracing::debug!("Room coordinator stopped");
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Connect {
                connection_id,
                sender,
            } => self.connect(connection_id, sender).await,
            Command::CreateRoom {
                connection_id,
                room_id,
                player_name,
                player_id,
                reply,
            } => {
                let result = self
                    .create_room(&connection_id, room_id, player_name, player_id)
                    .await;
                let _ = reply.send(result);
            }
            Command::JoinRoom {
                connection_id,
                room_id,
                player_name,
                player_id,
                reply,
            } => {
                let result = self
                    .join_room(&connection_id, room_id, player_name, player_id)
                    .await;
                let _ = reply.send(result);
            }
            Command::SetReadyStatus {
                room_id,
                player_id,
                ready,
            } => self.set_ready_status(&room_id, &player_id, ready).await,
            Command::StartGame {
                connection_id,
                room_id,
            } => self.start_game(&connection_id, &room_id).await,
            Command::GetPlayerList { room_id, reply } => {
                let _ = reply.send(self.get_player_list(&room_id).await);
            }
            Command::Disconnect { connection_id } => self.handle_disconnect(&connection_id).await,
        }
    }

    /// 接続を送信先として登録する
    pub async fn connect(&mut self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_connection(connection_id, sender)
            .await;
    }

    pub async fn create_room(
        &mut self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<(), CreateRoomError> {
        self.create_room_usecase
            .execute(connection_id, room_id.clone(), player_name, player_id.clone())
            .await?;

        tracing::info!("Room '{}' created by '{}'", room_id, player_id);
        self.bind(*connection_id, room_id, player_id);
        Ok(())
    }

    pub async fn join_room(
        &mut self,
        connection_id: &ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<(), JoinRoomError> {
        let outcome = self
            .join_room_usecase
            .execute(connection_id, room_id.clone(), player_name, player_id.clone())
            .await?;

        match outcome {
            JoinOutcome::Joined => tracing::info!("Player '{}' joined '{}'", player_id, room_id),
            JoinOutcome::Rejoined => {
                tracing::info!("Player '{}' rejoined '{}'", player_id, room_id)
            }
        }

        if self.cancel_closure(&room_id, &player_id) {
            tracing::info!(
                "Admin '{}' is back in '{}', room closure cancelled",
                player_id,
                room_id
            );
        }
        self.bind(*connection_id, room_id, player_id);
        Ok(())
    }

    pub async fn set_ready_status(&mut self, room_id: &RoomId, player_id: &PlayerId, ready: bool) {
        match self
            .set_ready_status_usecase
            .execute(room_id, player_id, ready)
            .await
        {
            Ok(()) => tracing::info!(
                "Player '{}' in '{}' is now ready={}",
                player_id,
                room_id,
                ready
            ),
            Err(e) => tracing::debug!("Ignored setReadyStatus: {}", e),
        }
    }

    /// 呼び出し元の接続がこの Room に参加したときの player_id で admin 判定する
    pub async fn start_game(&mut self, connection_id: &ConnectionId, room_id: &RoomId) {
        let caller = self
            .memberships
            .get(connection_id)
            .and_then(|rooms| rooms.get(room_id));
        if let Err(e) = self.start_game_usecase.execute(room_id, caller).await {
            tracing::debug!("Ignored startGame from '{}': {}", connection_id, e);
        }
    }

    pub async fn get_player_list(&self, room_id: &RoomId) -> Vec<Player> {
        self.get_player_list_usecase.execute(room_id).await
    }

    /// 接続の切断を処理する
    ///
    /// 接続が参加していた Room ごとに判定する。同じ player_id の別の接続が
    /// その Room にまだ参加している場合（古い接続が後から切れた場合）は
    /// 何もしない。他の Room にだけ接続が残っていても、この Room では切断として扱う。
    pub async fn handle_disconnect(&mut self, connection_id: &ConnectionId) {
        let mut vacated: Vec<(RoomId, PlayerId)> = self
            .memberships
            .remove(connection_id)
            .unwrap_or_default()
            .into_iter()
            .collect();
        vacated.sort();

        for (room_id, player_id) in vacated {
            if self.is_present_in(&room_id, &player_id) {
                tracing::debug!(
                    "Player '{}' is still connected to '{}', keeping room state",
                    player_id,
                    room_id
                );
                continue;
            }

            let admin_rooms = self
                .disconnect_player_usecase
                .execute(&player_id, std::slice::from_ref(&room_id))
                .await;
            for room_id in admin_rooms {
                self.schedule_closure(room_id, player_id.clone());
            }
        }

        self.message_pusher
            .unregister_connection(connection_id)
            .await;
        tracing::debug!("Connection '{}' released", connection_id);
    }

    /// Room の admin が切断中（猶予期間中）であればその player_id を返す
    pub fn disconnected_admin(&self, room_id: &RoomId) -> Option<&PlayerId> {
        self.pending_closures
            .get(room_id)
            .map(|pending| &pending.admin_id)
    }

    fn bind(&mut self, connection_id: ConnectionId, room_id: RoomId, player_id: PlayerId) {
        self.memberships
            .entry(connection_id)
            .or_default()
            .insert(room_id, player_id);
    }

    /// `player_id` として `room_id` に参加している接続が残っているか
    fn is_present_in(&self, room_id: &RoomId, player_id: &PlayerId) -> bool {
        self.memberships
            .values()
            .any(|rooms| rooms.get(room_id) == Some(player_id))
    }

    fn schedule_closure(&mut self, room_id: RoomId, admin_id: PlayerId) {
        if self.pending_closures.contains_key(&room_id) {
            tracing::debug!("Closure of '{}' is already pending", room_id);
            return;
        }

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let deadline = ClosureDeadline {
            room_id: room_id.clone(),
            ticket,
        };
        let deadline_tx = self.deadline_tx.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(ADMIN_GRACE_PERIOD).await;
            let _ = deadline_tx.send(deadline);
        });

        tracing::info!(
            "Admin '{}' disconnected from '{}', closing in {}s unless they return",
            admin_id,
            room_id,
            ADMIN_GRACE_PERIOD.as_secs()
        );
        self.pending_closures.insert(
            room_id,
            PendingClosure {
                admin_id,
                ticket,
                timer,
            },
        );
    }

    /// `player_id` がこの Room の切断中 admin であれば終了予定を取り消す
    fn cancel_closure(&mut self, room_id: &RoomId, player_id: &PlayerId) -> bool {
        match self.pending_closures.entry(room_id.clone()) {
            Entry::Occupied(entry) if &entry.get().admin_id == player_id => {
                entry.remove().timer.abort();
                true
            }
            _ => false,
        }
    }

    /// 猶予期間の満了を処理する
    ///
    /// admin が再参加していれば `cancel_closure` で取り消し済みのため、
    /// チケットが一致する満了通知は admin が戻らなかったことを意味する。
    async fn on_closure_deadline(&mut self, deadline: ClosureDeadline) {
        let pending = match self.pending_closures.entry(deadline.room_id.clone()) {
            Entry::Occupied(entry) if entry.get().ticket == deadline.ticket => entry.remove(),
            _ => {
                tracing::debug!("Stale closure deadline for '{}' ignored", deadline.room_id);
                return;
            }
        };

        tracing::info!(
            "Admin '{}' did not return to '{}', closing room",
            pending.admin_id,
            deadline.room_id
        );
        if let Err(e) = self.close_room_usecase.execute(&deadline.room_id).await {
            tracing::warn!("Failed to close room '{}': {}", deadline.room_id, e);
        }
        for rooms in self.memberships.values_mut() {
            rooms.remove(&deadline.room_id);
        }
    }
}

/// RoomCoordinator を操作するためのハンドル
///
/// UI 層はこのハンドル経由でのみ Room 状態を変更する。
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl CoordinatorHandle {
    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::warn!("Room coordinator is not running, command dropped");
        }
    }

    pub fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.send(Command::Connect {
            connection_id,
            sender,
        });
    }

    pub async fn create_room(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<(), CreateRoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::CreateRoom {
            connection_id,
            room_id,
            player_name,
            player_id,
            reply,
        });
        rx.await
            .unwrap_or(Err(CreateRoomError::CoordinatorUnavailable))
    }

    pub async fn join_room(
        &self,
        connection_id: ConnectionId,
        room_id: RoomId,
        player_name: PlayerName,
        player_id: PlayerId,
    ) -> Result<(), JoinRoomError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::JoinRoom {
            connection_id,
            room_id,
            player_name,
            player_id,
            reply,
        });
        rx.await.unwrap_or(Err(JoinRoomError::CoordinatorUnavailable))
    }

    pub fn set_ready_status(&self, room_id: RoomId, player_id: PlayerId, ready: bool) {
        self.send(Command::SetReadyStatus {
            room_id,
            player_id,
            ready,
        });
    }

    pub fn start_game(&self, connection_id: ConnectionId, room_id: RoomId) {
        self.send(Command::StartGame {
            connection_id,
            room_id,
        });
    }

    /// Room が存在しない（または coordinator が停止している）場合は空リスト
    pub async fn get_player_list(&self, room_id: RoomId) -> Vec<Player> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::GetPlayerList { room_id, reply });
        rx.await.unwrap_or_default()
    }

    pub fn disconnect(&self, connection_id: ConnectionId) {
        self.send(Command::Disconnect { connection_id });
    }
}
