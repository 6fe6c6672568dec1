//! Connection and request handlers.

mod dispatch;
mod http;
mod websocket;

pub use dispatch::handle_request;
pub use http::health_check;
pub use websocket::websocket_handler;
