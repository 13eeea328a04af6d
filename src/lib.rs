//! # potsplit
//!
//! Cash-game ledger and settlement for home poker nights.
//!
//! Tracks who bought in for how much over the course of a session, then
//! computes the short list of payments that squares everyone up by
//! matching the biggest losers against the biggest winners.
//!
//! ## Architecture
//!
//! - **core**: money rounding rules, players, the session lifecycle
//! - **settlement**: the greedy engine and the transfer list it produces
//! - **store**: JSON snapshots of a session on disk
//! - **simulation**: random balanced tables for demos and stress runs

pub mod core;
pub mod settlement;
pub mod simulation;
pub mod store;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::money::{parse_payout, round_to_cents, CENT};
    pub use crate::core::player::{Player, PlayerId};
    pub use crate::core::session::{Phase, Session, SessionError};
    pub use crate::settlement::engine::{ImbalanceError, SettlementEngine};
    pub use crate::settlement::transfer::{SettlementReport, Transfer};
    pub use crate::store::file_store::FileStore;
}
