//! Settlement: turning final balances into a short list of payments.

pub mod engine;
pub mod transfer;
