//! Server state shared across connection handlers.

use std::sync::Arc;

use crate::domain::MessagePusher;
use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, FetchHistoryUseCase, LogInUseCase,
    SendMessageUseCase, SignUpUseCase,
};

/// Shared application state
///
/// Holds one use case per protocol operation plus the pusher used for
/// direct (sender-only) replies.
pub struct AppState {
    /// MessagePusher（接続単位の直接応答に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// サインアップのユースケース
    pub sign_up_usecase: Arc<SignUpUseCase>,
    /// ログインのユースケース
    pub log_in_usecase: Arc<LogInUseCase>,
    /// メッセージ送信のユースケース
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// 履歴取得のユースケース
    pub fetch_history_usecase: Arc<FetchHistoryUseCase>,
    /// 接続受付のユースケース
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// 切断のユースケース
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
}
