//! Domain layer: value objects, the relay aggregate, and the interfaces the
//! rest of the application depends on.

mod error;
mod message;
mod pusher;
mod relay;
mod repository;
mod token;
mod user;
mod words;

pub use error::{DomainError, MessagePushError, RepositoryError, WordListError};
pub use message::ChatMessage;
pub use pusher::{ConnectionId, MessagePusher, PusherChannel};
pub use relay::RelayState;
pub use repository::RelayRepository;
pub use token::Token;
pub use user::User;
pub use words::WordList;
