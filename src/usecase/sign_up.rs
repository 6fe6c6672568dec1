//! UseCase: サインアップ処理
//!
//! 新しいトークンを発行してユーザーを登録します。トークンの一意性は
//! Repository 実装の排他区間で保証されます。

use std::sync::Arc;

use crate::domain::{RelayRepository, User};

use super::error::SignUpError;

/// サインアップのユースケース
pub struct SignUpUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
}

impl SignUpUseCase {
    /// 新しい SignUpUseCase を作成
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// サインアップを実行
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 発行されたトークンを含む登録済みユーザー
    /// * `Err(SignUpError)` - トークンを発行できなかった
    pub async fn execute(&self, username: String) -> Result<User, SignUpError> {
        let user = self
            .repository
            .create_user(username)
            .await
            .map_err(|_| SignUpError::TokenSpaceExhausted)?;

        tracing::info!(
            "User '{}' signed up with token '{}'",
            user.username,
            user.token
        );
        Ok(user)
    }
}
