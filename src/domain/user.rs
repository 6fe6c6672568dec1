//! User エンティティ

use super::Token;

/// 登録済みユーザー
///
/// サインアップ時に作成され、プロセスの生存期間中、変更も削除もされません。
/// トークンはアクティブなユーザー間で一意ですが、ユーザー名の重複は許容
/// されます（重複排除はトークンのみ）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// セッショントークン（アクティブなユーザー間で一意）
    pub token: Token,
    /// 表示名（不変・重複可）
    pub username: String,
}

impl User {
    /// 新しい User を作成
    pub fn new(token: Token, username: impl Into<String>) -> Self {
        Self {
            token,
            username: username.into(),
        }
    }
}
