//! Parlay Explorer: rank sports bets, combine parlay odds, estimate payouts.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod odds;
pub mod parlay;
pub mod data;
pub mod dashboard;
