//! MessagePusher trait 定義
//!
//! 接続中のクライアントへの送信操作を抽象化します。WebSocket の生成は
//! UI 層が行い、ここでは生成済みの送信チャネルだけを扱います。

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{ChatMessage, MessagePushError, RelayRepository};

/// クライアントへの送信チャネル
///
/// シリアライズ済みの JSON エンベロープを 1 件ずつ送ります。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 接続 1 本を識別する不透明な ID
///
/// プロトコルはリクエスト単位で認証されるため、接続自体は匿名です。
/// この ID はファンアウトと切断処理のためだけに使われ、ワイヤ上には
/// 現れません。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を採番
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 接続集合（Connection Hub）へのインターフェース
///
/// `connect_client` と `publish` は接続集合の同じ排他区間の内側で
/// 実行されます。これにより、接続時のリプレイスナップショットと
/// ライブ配送が重なることはなく、各メッセージはどの接続にも
/// 「スナップショットかライブのどちらか一方に 1 回だけ」現れます。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録する
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録し、同じ排他区間でリプレイ用の履歴スナップショットを取る
    async fn connect_client(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
        repository: &dyn RelayRepository,
    ) -> Vec<ChatMessage>;

    /// メッセージをログへ追記し、同じ排他区間で全接続（送信者を含む）へ
    /// エンベロープを配送する
    ///
    /// 個々の接続への送信失敗はスキップされ、呼び出し元へは伝播しません。
    async fn publish(
        &self,
        repository: &dyn RelayRepository,
        message: ChatMessage,
        envelope: &str,
    );

    /// 接続を登録解除する
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続へエンベロープを送る
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 登録中の全接続（送信者を含む）へエンベロープを送る
    ///
    /// 個々の接続への送信失敗はスキップされ、呼び出し元へは伝播しません
    /// （at-most-once・ベストエフォート配送）。
    async fn broadcast(&self, content: &str);
}
