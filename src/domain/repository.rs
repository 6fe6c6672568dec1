//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, RepositoryError, Token, User};

/// リレー状態（ユーザーレジストリ＋メッセージログ）へのインターフェース
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しません。実装は `create_user` の「トークン空き確認 → 登録」を
/// 単一の排他区間で実行しなければなりません。
#[async_trait]
pub trait RelayRepository: Send + Sync {
    /// 未使用のトークンを発行してユーザーを登録する
    async fn create_user(&self, username: String) -> Result<User, RepositoryError>;

    /// トークンからユーザーを解決する（大文字小文字を無視）
    async fn find_user(&self, token: &Token) -> Option<User>;

    /// メッセージをログ末尾へ追記する
    async fn append_message(&self, message: ChatMessage);

    /// 全履歴を挿入順で取得する
    async fn history(&self) -> Vec<ChatMessage>;
}
