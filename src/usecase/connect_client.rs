//! UseCase: 接続受付処理
//!
//! 新しい接続を接続集合へ登録し、接続直後に送る履歴スナップショットを
//! 返します。登録とスナップショットは接続集合の同じ排他区間で行われる
//! ため、スナップショットに入ったメッセージがライブ配送でも重ねて届く
//! ことはありません。接続は匿名で受け付けられます（リクエスト単位の
//! トークン認証とは独立）。参加通知のブロードキャストは行いません。

use std::sync::Arc;

use crate::domain::{ChatMessage, ConnectionId, MessagePusher, PusherChannel, RelayRepository};

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（接続集合への配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続を登録し、リプレイ用の履歴スナップショットを返す
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Vec<ChatMessage> {
        let history = self
            .message_pusher
            .connect_client(connection_id.clone(), sender, self.repository.as_ref())
            .await;
        tracing::info!("Connection '{}' registered", connection_id);
        history
    }
}
