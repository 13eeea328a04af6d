//! Core domain types: money, players, and the session lifecycle.

pub mod money;
pub mod player;
pub mod session;
