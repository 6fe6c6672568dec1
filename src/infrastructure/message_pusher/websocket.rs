//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続中の WebSocket の `UnboundedSender` を管理
//! - クライアントへのメッセージ送信（push_to, broadcast, publish）
//! - 接続登録とリプレイスナップショットの同一排他区間での実行
//!   （connect_client）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。ブロードキャストは登録中の全接続（送信者自身を含む）へ
//! 届き、閉じられた接続への送信失敗はログに残してスキップされます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, ConnectionId, MessagePushError, MessagePusher, PusherChannel, RelayRepository,
};

/// 接続集合のマップ型
pub type ClientMap = Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>;

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: ClientMap,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: ClientMap) -> Self {
        Self { clients }
    }
}

/// ロック取得済みの接続集合へエンベロープを配送する
fn fan_out(clients: &HashMap<ConnectionId, PusherChannel>, content: &str) {
    for (connection_id, sender) in clients.iter() {
        // 一部の接続への送信失敗は許容し、残りへの配送を続ける
        if let Err(e) = sender.send(content.to_string()) {
            tracing::warn!(
                "Failed to push message to connection '{}': {}",
                connection_id,
                e
            );
        } else {
            tracing::debug!("Broadcasted message to connection '{}'", connection_id);
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn connect_client(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        repository: &dyn RelayRepository,
    ) -> Vec<ChatMessage> {
        // 接続集合のロックを保持したままスナップショットを取る。publish も
        // 同じロックの内側で追記と配送を行うため、スナップショットに
        // 含まれるメッセージがこの接続のチャネルへ重ねて届くことはない。
        // ロック順は常に clients → state。
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id.clone(), sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        repository.history().await
    }

    async fn publish(
        &self,
        repository: &dyn RelayRepository,
        message: ChatMessage,
        envelope: &str,
    ) {
        // connect_client と同じ排他区間で追記と配送をまとめて行う。
        // 追記順と配送順もこのロックで一致する。
        let clients = self.clients.lock().await;
        repository.append_message(message).await;
        fan_out(&clients, envelope);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(MessagePushError::ConnectionNotFound(
                connection_id.to_string(),
            ))
        }
    }

    async fn broadcast(&self, content: &str) {
        let clients = self.clients.lock().await;
        fan_out(&clients, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WordList;
    use crate::infrastructure::repository::InMemoryRelayRepository;
    use tokio::sync::mpsc;

    fn create_test_pusher() -> (WebSocketMessagePusher, ClientMap) {
        let clients: ClientMap = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn create_test_repository() -> InMemoryRelayRepository {
        InMemoryRelayRepository::new(WordList::parse("bamboo\n").unwrap())
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::new();
        pusher.register_client(connection_id.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&connection_id, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_unknown_connection_is_an_error() {
        // テスト項目: 未登録の接続への送信はエラーを返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let connection_id = ConnectionId::new();

        // when (操作):
        let result = pusher.push_to(&connection_id, "Hello").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MessagePushError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_connection() {
        // テスト項目: ブロードキャストは登録中の全接続に届く
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(ConnectionId::new(), tx1).await;
        pusher.register_client(ConnectionId::new(), tx2).await;

        // when (操作):
        pusher.broadcast("Broadcast message").await;

        // then (期待する結果):
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_connections() {
        // テスト項目: 閉じられた接続があっても残りへの配送は続く
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel::<String>();
        pusher.register_client(ConnectionId::new(), tx1).await;
        pusher.register_client(ConnectionId::new(), tx2).await;
        drop(rx2); // 受信側を閉じる

        // when (操作):
        pusher.broadcast("Broadcast message").await;

        // then (期待する結果): 生きている接続には届く
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_connect_snapshot_and_live_delivery_do_not_overlap() {
        // テスト項目: 接続前に publish されたメッセージはスナップショット
        //             だけに、接続後のメッセージはチャネルだけに現れる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let repository = create_test_repository();
        pusher
            .publish(&repository, ChatMessage::new("alice", "before"), "before")
            .await;

        // when (操作): 接続してから 2 件目を publish
        let (tx, mut rx) = mpsc::unbounded_channel();
        let snapshot = pusher
            .connect_client(ConnectionId::new(), tx, &repository)
            .await;
        pusher
            .publish(&repository, ChatMessage::new("alice", "after"), "after")
            .await;

        // then (期待する結果):
        assert_eq!(snapshot, vec![ChatMessage::new("alice", "before")]);
        assert_eq!(rx.try_recv().ok(), Some("after".to_string()));
        assert_eq!(rx.try_recv().ok(), None);
    }

    #[tokio::test]
    async fn test_concurrent_connects_see_each_message_exactly_once() {
        // テスト項目: publish と connect_client が並行しても、各接続は
        //             どのメッセージも「スナップショットかライブの
        //             どちらか一方に 1 回だけ」受け取る
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let pusher = Arc::new(pusher);
        let repository = Arc::new(create_test_repository());

        // when (操作): 50 件の publish と 8 本の接続を同時に走らせる
        let mut publishers = Vec::new();
        for i in 0..50 {
            let pusher = pusher.clone();
            let repository = repository.clone();
            publishers.push(tokio::spawn(async move {
                let envelope = format!("m{i}");
                pusher
                    .publish(
                        repository.as_ref(),
                        ChatMessage::new("alice", envelope.clone()),
                        &envelope,
                    )
                    .await;
            }));
        }
        let mut connectors = Vec::new();
        for _ in 0..8 {
            let pusher = pusher.clone();
            let repository = repository.clone();
            connectors.push(tokio::spawn(async move {
                let (tx, rx) = mpsc::unbounded_channel();
                let snapshot = pusher
                    .connect_client(ConnectionId::new(), tx, repository.as_ref())
                    .await;
                (snapshot, rx)
            }));
        }
        for handle in publishers {
            handle.await.unwrap();
        }

        // then (期待する結果): リプレイ＋ライブの合計が全 50 件ちょうど
        for handle in connectors {
            let (snapshot, mut rx) = handle.await.unwrap();
            let mut seen: Vec<String> =
                snapshot.into_iter().map(|m| m.content).collect();
            while let Ok(envelope) = rx.try_recv() {
                seen.push(envelope);
            }
            seen.sort();
            // 重複があれば 50 を超え、欠落があれば 50 を下回る
            assert_eq!(seen.len(), 50);
            seen.dedup();
            assert_eq!(seen.len(), 50);
        }
    }

    #[tokio::test]
    async fn test_unregistered_connection_no_longer_receives() {
        // テスト項目: 登録解除した接続にはブロードキャストが届かない
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let connection_id = ConnectionId::new();
        pusher.register_client(connection_id.clone(), tx).await;
        pusher.unregister_client(&connection_id).await;

        // when (操作):
        pusher.broadcast("Broadcast message").await;

        // then (期待する結果): チャネルは空のまま閉じられている
        assert_eq!(rx.try_recv().ok(), None);
    }
}
