//! Data Transfer Objects (DTOs) for the relay protocol.
//!
//! Only one protocol exists: JSON text frames over WebSocket.

pub mod websocket;
