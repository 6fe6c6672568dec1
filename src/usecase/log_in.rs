//! UseCase: ログイン処理
//!
//! トークンを既存ユーザーへ解決する読み取り専用の操作です。
//! 状態は一切変更しません。

use std::sync::Arc;

use crate::domain::{RelayRepository, Token, User};

use super::error::LogInError;

/// ログインのユースケース
pub struct LogInUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
}

impl LogInUseCase {
    /// 新しい LogInUseCase を作成
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// ログインを実行
    ///
    /// # Arguments
    ///
    /// * `token_text` - クライアントが申告したトークン文字列（正規化前）
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - トークンが解決されたユーザー
    /// * `Err(LogInError)` - 不正な形式、または未知のトークン
    pub async fn execute(&self, token_text: &str) -> Result<User, LogInError> {
        let token = Token::new(token_text).map_err(|_| LogInError::UnknownToken)?;
        self.repository
            .find_user(&token)
            .await
            .ok_or(LogInError::UnknownToken)
    }
}
