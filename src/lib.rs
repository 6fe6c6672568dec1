//! Token-authenticated WebSocket broadcast chat relay.
//!
//! Clients connect over a persistent WebSocket, sign up for a human-readable
//! word token, and exchange messages that are fanned out to every connection.
//! The full in-memory history is replayed to newly (re)connecting clients.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
