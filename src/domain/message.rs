//! ChatMessage エンティティ

/// チャットメッセージ
///
/// メッセージログへ追記された後は変更も削除もされません。`username` は
/// 常にトークンを解決して得たレジストリ上のユーザー名であり、クライアント
/// が申告した表示名ではありません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// 送信者のユーザー名（レジストリ由来）
    pub username: String,
    /// メッセージ本文
    pub content: String,
}

impl ChatMessage {
    /// 新しい ChatMessage を作成
    pub fn new(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            content: content.into(),
        }
    }
}
