//! UseCase: 切断処理
//!
//! 接続を接続集合から取り除きます。退出通知のブロードキャストは
//! 行いません（設計上スコープ外）。レジストリとログには触れません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（接続集合への配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続を登録解除する
    pub async fn execute(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
        tracing::info!("Connection '{}' unregistered", connection_id);
    }
}
