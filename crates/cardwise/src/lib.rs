//! Cardwise: a credit card reward valuation and multi-card strategy engine.
//!
//! The engine consumes a catalog snapshot and a declared spending profile
//! and computes (a) the best single cards and (b) the best 2–3 card
//! combinations with per-category assignment, netting annual fees, signup
//! bonuses, and self-reported benefit values.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod telemetry;
