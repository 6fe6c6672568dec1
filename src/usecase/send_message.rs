//! UseCase: メッセージ送信処理
//!
//! トークンを送信者へ解決し、レジストリ上のユーザー名でメッセージを
//! ログへ追記します。ブロードキャストするエンベロープの `username` は
//! 常にこの解決結果であり、クライアントが申告した表示名が使われること
//! はありません（トークンを知らない限り他人の名前を騙れない）。
//!
//! 解決と配送は 2 段階に分かれます。`execute` はトークンを解決して
//! メッセージを組み立てるだけで状態を変更しません。追記とファンアウト
//! は `publish` が接続集合の排他区間の内側でまとめて行います（DTO の
//! 生成は UI 層の責務）。レジストリからユーザーが消えることはないため、
//! 解決と追記が別区間でも解決結果が無効になることはありません。

use std::sync::Arc;

use crate::domain::{ChatMessage, MessagePusher, RelayRepository, Token};

use super::error::SendMessageError;

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
    /// MessagePusher（接続集合への配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RelayRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// トークンを送信者へ解決し、追記するメッセージを組み立てる
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - レジストリ上のユーザー名入りのメッセージ。
    ///   まだ追記はされていない
    /// * `Err(SendMessageError)` - トークンが解決できない。状態は変更
    ///   されず、ブロードキャストも行われない
    pub async fn execute(
        &self,
        token_text: &str,
        content: String,
    ) -> Result<ChatMessage, SendMessageError> {
        let token = Token::new(token_text).map_err(|_| SendMessageError::UnknownToken)?;
        let user = self
            .repository
            .find_user(&token)
            .await
            .ok_or(SendMessageError::UnknownToken)?;

        Ok(ChatMessage::new(user.username, content))
    }

    /// メッセージをログへ追記し、シリアライズ済みエンベロープを全接続
    /// （送信者を含む）へ配送する
    pub async fn publish(&self, message: ChatMessage, json_message: &str) {
        self.message_pusher
            .publish(self.repository.as_ref(), message, json_message)
            .await;
    }
}
