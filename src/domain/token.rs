//! Token 値オブジェクト

use std::fmt;

use super::DomainError;

/// サーバーが発行するセッショントークン
///
/// 単語リストから引いた人間可読の単語で、大文字に正規化して保持します。
/// 比較は正規化済みの文字列同士で行われるため、クライアントが小文字で
/// 送ってきたトークンも同じユーザーに解決されます（大文字小文字を無視）。
///
/// トークンは低エントロピーな利便性のための識別子であり、秘密情報では
/// ありません（bearer credential として扱うが、暗号学的な保証はない）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// 新しい Token を作成（前後の空白を除去し、大文字に正規化）
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let normalized = raw.into().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::EmptyToken);
        }
        Ok(Self(normalized))
    }

    /// 正規化済みのトークン文字列を取得
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
