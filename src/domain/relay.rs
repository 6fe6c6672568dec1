//! リレーの集約ルート
//!
//! ユーザーレジストリ（トークン → ユーザー）とメッセージログを 1 つの
//! 集約として保持します。トークン発行の「空き確認 → 登録」は `&mut self`
//! を取る 1 回の呼び出しの中で完結するため、この集約を単一のロックの
//! 内側に置く限り、トークンの一意性と履歴の追記順序が保たれます。
//!
//! レジストリとログはどちらも単調増加で、削除や期限切れはありません。
//! 無制限の成長は意図された制約（既知のスケーラビリティ上限）です。

use std::collections::HashMap;

use rand::Rng;

use super::{ChatMessage, DomainError, Token, User, WordList};

/// ユーザーレジストリとメッセージログを束ねる集約
#[derive(Debug, Default)]
pub struct RelayState {
    /// 正規化済みトークン文字列 → ユーザー
    users: HashMap<String, User>,
    /// 追記専用のメッセージログ（挿入順 = 表示順）
    messages: Vec<ChatMessage>,
}

impl RelayState {
    /// 空の RelayState を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 未使用のトークンを 1 つ発行する
    ///
    /// 単語リストから一様ランダムに候補を引き、使用中でない単語が出る
    /// まで引き直します。全単語が使用中の場合は再サンプリングが停止
    /// しないため、先に `TokenSpaceExhausted` を返します。
    pub fn issue_token(
        &self,
        words: &WordList,
        rng: &mut impl Rng,
    ) -> Result<Token, DomainError> {
        if self.users.len() >= words.len() {
            return Err(DomainError::TokenSpaceExhausted);
        }
        loop {
            let candidate = Token::new(words.sample(rng))?;
            if !self.users.contains_key(candidate.as_str()) {
                return Ok(candidate);
            }
        }
    }

    /// 新しいユーザーを登録する（トークン発行＋登録）
    ///
    /// 発行と登録を 1 つの `&mut self` 呼び出しで行うことで、並行する
    /// サインアップ同士が同じトークンを引く競合を外側のロックに委ねる
    /// ことなく防ぎます。
    pub fn sign_up(
        &mut self,
        username: impl Into<String>,
        words: &WordList,
        rng: &mut impl Rng,
    ) -> Result<User, DomainError> {
        let token = self.issue_token(words, rng)?;
        let user = User::new(token.clone(), username);
        self.users.insert(token.as_str().to_string(), user.clone());
        Ok(user)
    }

    /// トークンからユーザーを解決（大文字小文字を無視）
    pub fn find_user(&self, token: &Token) -> Option<&User> {
        self.users.get(token.as_str())
    }

    /// トークンが登録済みかどうか
    pub fn user_exists(&self, token: &Token) -> bool {
        self.find_user(token).is_some()
    }

    /// 登録済みユーザー数
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// メッセージをログ末尾へ追記
    pub fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// 全履歴を挿入順で取得
    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }
}
