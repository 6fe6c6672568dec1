//! InMemory RelayRepository 実装
//!
//! ドメイン層が定義する RelayRepository trait の具体的な実装。
//! `RelayState` 集約を単一の Mutex の内側に置き、トークン発行の
//! 「空き確認 → 登録」を含む全ての読み書きを 1 つの排他区間で
//! 実行します（接続ハンドラが並行に動いても一意性と追記順序が
//! 保たれる）。
//!
//! 永続化はありません。レジストリとログはプロセスの生存期間だけ
//! 保持され、再起動で失われます（意図された制約）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ChatMessage, RelayRepository, RelayState, RepositoryError, Token, User, WordList,
};

/// インメモリ RelayRepository 実装
pub struct InMemoryRelayRepository {
    /// リレー集約（レジストリ＋ログ）を守る単一のロック
    state: Arc<Mutex<RelayState>>,
    /// トークン生成用の固定辞書
    words: WordList,
}

impl InMemoryRelayRepository {
    /// 新しい InMemoryRelayRepository を作成
    pub fn new(words: WordList) -> Self {
        Self {
            state: Arc::new(Mutex::new(RelayState::new())),
            words,
        }
    }
}

#[async_trait]
impl RelayRepository for InMemoryRelayRepository {
    async fn create_user(&self, username: String) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().await;
        // ThreadRng は Send でないため、await を跨がない位置で生成する
        let mut rng = rand::rng();
        state
            .sign_up(username, &self.words, &mut rng)
            .map_err(|_| RepositoryError::TokenSpaceExhausted)
    }

    async fn find_user(&self, token: &Token) -> Option<User> {
        let state = self.state.lock().await;
        state.find_user(token).cloned()
    }

    async fn append_message(&self, message: ChatMessage) {
        let mut state = self.state.lock().await;
        state.append_message(message);
    }

    async fn history(&self) -> Vec<ChatMessage> {
        let state = self.state.lock().await;
        state.history().to_vec()
    }
}
