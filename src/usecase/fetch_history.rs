//! UseCase: 履歴取得処理
//!
//! `update` リクエストに対する認証付きの全履歴取得と、接続直後の
//! リプレイに使う無認証のスナップショット取得を提供します。どちらも
//! 読み取り専用で、ページングも切り詰めもありません（履歴の無制限の
//! 成長は意図された制約）。

use std::sync::Arc;

use crate::domain::{ChatMessage, RelayRepository, Token};

use super::error::FetchHistoryError;

/// 履歴取得のユースケース
pub struct FetchHistoryUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RelayRepository>,
}

impl FetchHistoryUseCase {
    /// 新しい FetchHistoryUseCase を作成
    pub fn new(repository: Arc<dyn RelayRepository>) -> Self {
        Self { repository }
    }

    /// 認証付きで全履歴を取得（`update` リクエスト）
    pub async fn execute(&self, token_text: &str) -> Result<Vec<ChatMessage>, FetchHistoryError> {
        let token = Token::new(token_text).map_err(|_| FetchHistoryError::UnknownToken)?;
        if self.repository.find_user(&token).await.is_none() {
            return Err(FetchHistoryError::UnknownToken);
        }
        Ok(self.repository.history().await)
    }

    /// 無認証のスナップショット取得（接続直後のリプレイ用）
    pub async fn snapshot(&self) -> Vec<ChatMessage> {
        self.repository.history().await
    }
}
