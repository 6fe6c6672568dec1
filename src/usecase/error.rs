//! UseCase 層のエラー型定義
//!
//! 認証失敗（トークンが解決できない）は呼び出し元の接続にだけ
//! `{success:false}` として返し、ブロードキャストもログ出力（致命扱い）
//! もしません。不正な形式のトークンは未知のトークンと同じ扱いです。

use thiserror::Error;

/// サインアップ失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignUpError {
    /// 未使用のトークンが残っていない
    #[error("no unused token is available")]
    TokenSpaceExhausted,
}

/// ログイン失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogInError {
    /// トークンがどのユーザーにも解決されない
    #[error("token does not resolve to a user")]
    UnknownToken,
}

/// メッセージ送信失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// トークンがどのユーザーにも解決されない
    #[error("token does not resolve to a user")]
    UnknownToken,
}

/// 履歴取得失敗
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchHistoryError {
    /// トークンがどのユーザーにも解決されない
    #[error("token does not resolve to a user")]
    UnknownToken,
}
