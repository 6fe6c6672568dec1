//! WebSocket エンベロープの DTO 定義
//!
//! 受信エンベロープは `type` フィールドをタグとする閉じた直和型として
//! パースします。認識できないタグや必須フィールドの欠落は serde の
//! パースエラーになり、ハンドラ側で黙って無視されます（返信なし）。
//!
//! 送信エンベロープは種類ごとの構造体で、ワイヤ上のフィールド名と
//! 並び順をそのまま写しています。失敗応答では省略されるフィールドを
//! `Option` + `skip_serializing_if` で表現します。

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Token};

/// クライアントから届くリクエストエンベロープ
///
/// `signup` に `token` フィールドを付けて送ってくるクライアントが
/// いても、そのフィールドは単に読み捨てられます（トークンは常に
/// サーバーが発行する）。
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientRequest {
    /// ユーザー登録（トークン発行）
    Signup { username: String },
    /// トークンによる再認証
    Login { token: String },
    /// メッセージ送信
    Message { token: String, content: String },
    /// 履歴の再取得
    Update { token: String },
}

/// 送信エンベロープの `type` タグ
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Signup,
    Login,
    Message,
    Update,
}

/// ワイヤ上のチャットメッセージ表現
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessageDto {
    pub username: String,
    pub content: String,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            username: message.username,
            content: message.content,
        }
    }
}

/// `signup` への応答
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignupReply {
    pub r#type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub success: bool,
}

impl SignupReply {
    pub fn success(token: &Token) -> Self {
        Self {
            r#type: MessageType::Signup,
            token: Some(token.as_str().to_string()),
            success: true,
        }
    }

    pub fn failure() -> Self {
        Self {
            r#type: MessageType::Signup,
            token: None,
            success: false,
        }
    }
}

/// `login` への応答
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginReply {
    pub r#type: MessageType,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl LoginReply {
    pub fn success(username: impl Into<String>) -> Self {
        Self {
            r#type: MessageType::Login,
            success: true,
            username: Some(username.into()),
        }
    }

    pub fn failure() -> Self {
        Self {
            r#type: MessageType::Login,
            success: false,
            username: None,
        }
    }
}

/// `update` への応答、および接続直後に送られる履歴リプレイ
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HistoryReply {
    pub r#type: MessageType,
    #[serde(
        rename = "messageHistory",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_history: Option<Vec<ChatMessageDto>>,
    pub success: bool,
}

impl HistoryReply {
    pub fn success(history: Vec<ChatMessage>) -> Self {
        Self {
            r#type: MessageType::Update,
            message_history: Some(history.into_iter().map(ChatMessageDto::from).collect()),
            success: true,
        }
    }

    pub fn failure() -> Self {
        Self {
            r#type: MessageType::Update,
            message_history: None,
            success: false,
        }
    }
}

/// 全接続へファンアウトされるメッセージエンベロープ
///
/// `username` はレジストリから解決したもので、トップレベルと
/// `content` 内の両方に現れます（ワイヤ形式の互換のため）。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BroadcastMessage {
    pub r#type: MessageType,
    pub content: ChatMessageDto,
    pub username: String,
}

impl BroadcastMessage {
    pub fn new(message: ChatMessage) -> Self {
        let username = message.username.clone();
        Self {
            r#type: MessageType::Message,
            content: message.into(),
            username,
        }
    }
}

/// 未認証の `message` リクエストに対する、送信者のみへの失敗応答
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageRejected {
    pub r#type: MessageType,
    pub success: bool,
}

impl MessageRejected {
    pub fn new() -> Self {
        Self {
            r#type: MessageType::Message,
            success: false,
        }
    }
}

impl Default for MessageRejected {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_request_parses_all_four_kinds() {
        // テスト項目: 4 種類のリクエストエンベロープがパースできる
        let signup: ClientRequest =
            serde_json::from_str(r#"{"type":"signup","username":"alice"}"#).unwrap();
        assert_eq!(
            signup,
            ClientRequest::Signup {
                username: "alice".to_string()
            }
        );

        let login: ClientRequest =
            serde_json::from_str(r#"{"type":"login","token":"BAMBOO"}"#).unwrap();
        assert_eq!(
            login,
            ClientRequest::Login {
                token: "BAMBOO".to_string()
            }
        );

        let message: ClientRequest =
            serde_json::from_str(r#"{"type":"message","token":"BAMBOO","content":"hi"}"#).unwrap();
        assert_eq!(
            message,
            ClientRequest::Message {
                token: "BAMBOO".to_string(),
                content: "hi".to_string()
            }
        );

        let update: ClientRequest =
            serde_json::from_str(r#"{"type":"update","token":"BAMBOO"}"#).unwrap();
        assert_eq!(
            update,
            ClientRequest::Update {
                token: "BAMBOO".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type_tag_is_a_parse_error() {
        // テスト項目: 未知の type タグはパースエラーになる
        let result = serde_json::from_str::<ClientRequest>(r#"{"type":"shutdown"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_required_field_is_a_parse_error() {
        // テスト項目: 必須フィールドの欠落はパースエラーになる
        let result = serde_json::from_str::<ClientRequest>(r#"{"type":"message","token":"A"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_extra_token_field_on_signup_is_ignored() {
        // テスト項目: signup に余分な token フィールドが付いていても読み捨てる
        let signup: ClientRequest =
            serde_json::from_str(r#"{"type":"signup","username":"alice","token":"BAMBOO"}"#)
                .unwrap();
        assert_eq!(
            signup,
            ClientRequest::Signup {
                username: "alice".to_string()
            }
        );
    }

    #[test]
    fn test_signup_reply_wire_shapes() {
        // テスト項目: signup 応答のワイヤ形式が仕様どおり
        let token = Token::new("bamboo").unwrap();
        assert_eq!(
            serde_json::to_string(&SignupReply::success(&token)).unwrap(),
            r#"{"type":"signup","token":"BAMBOO","success":true}"#
        );
        assert_eq!(
            serde_json::to_string(&SignupReply::failure()).unwrap(),
            r#"{"type":"signup","success":false}"#
        );
    }

    #[test]
    fn test_login_reply_wire_shapes() {
        // テスト項目: login 応答のワイヤ形式が仕様どおり
        assert_eq!(
            serde_json::to_string(&LoginReply::success("alice")).unwrap(),
            r#"{"type":"login","success":true,"username":"alice"}"#
        );
        assert_eq!(
            serde_json::to_string(&LoginReply::failure()).unwrap(),
            r#"{"type":"login","success":false}"#
        );
    }

    #[test]
    fn test_history_reply_wire_shapes() {
        // テスト項目: update 応答のワイヤ形式が仕様どおり
        let history = vec![ChatMessage::new("alice", "hi")];
        assert_eq!(
            serde_json::to_string(&HistoryReply::success(history)).unwrap(),
            r#"{"type":"update","messageHistory":[{"username":"alice","content":"hi"}],"success":true}"#
        );
        assert_eq!(
            serde_json::to_string(&HistoryReply::failure()).unwrap(),
            r#"{"type":"update","success":false}"#
        );
    }

    #[test]
    fn test_broadcast_message_wire_shape() {
        // テスト項目: ブロードキャストエンベロープのワイヤ形式が仕様どおり
        let envelope = BroadcastMessage::new(ChatMessage::new("alice", "hi"));
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"type":"message","content":{"username":"alice","content":"hi"},"username":"alice"}"#
        );
    }

    #[test]
    fn test_message_rejected_wire_shape() {
        // テスト項目: message 失敗応答のワイヤ形式が仕様どおり
        assert_eq!(
            serde_json::to_string(&MessageRejected::new()).unwrap(),
            r#"{"type":"message","success":false}"#
        );
    }
}
