//! UI layer: the axum WebSocket server.

pub mod handler;
mod server;
mod signal;
mod state;

pub use server::{Server, ServerConfig, TlsPaths};
pub use state::AppState;
