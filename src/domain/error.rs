//! ドメイン層のエラー型定義

use thiserror::Error;

/// ドメインモデルの不変条件違反
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// トークンが空文字列
    #[error("token must not be empty")]
    EmptyToken,

    /// 単語リストの全ての単語が既に使用されている
    #[error("every word in the list is already claimed as a token")]
    TokenSpaceExhausted,
}

/// Repository 操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// 未使用のトークンが残っていない
    #[error("no unused token is available")]
    TokenSpaceExhausted,
}

/// MessagePusher 操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// 指定された接続が登録されていない
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    /// 送信チャネルへの書き込み失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// 単語リスト読み込みのエラー
#[derive(Debug, Error)]
pub enum WordListError {
    /// ファイル読み込み失敗
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),

    /// 単語リストが空（起動時の致命的な設定エラー）
    #[error("word list contains no words")]
    Empty,
}
