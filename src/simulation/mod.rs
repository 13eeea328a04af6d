//! Simulation utilities: random balanced tables.

pub mod generator;
