//! UseCase layer: one use case per protocol operation.

mod connect_client;
mod disconnect_client;
mod error;
mod fetch_history;
mod log_in;
mod send_message;
mod sign_up;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{FetchHistoryError, LogInError, SendMessageError, SignUpError};
pub use fetch_history::FetchHistoryUseCase;
pub use log_in::LogInUseCase;
pub use send_message::SendMessageUseCase;
pub use sign_up::SignUpUseCase;
