//! Agronomic advisories: yield estimation, fertilizer planning, irrigation
//! scheduling, crop health monitoring and market price forecasting.
//!
//! [`engine::AdvisoryEngine`] is the entry point. Every operation is a pure
//! function of its request plus static reference data, except the price
//! forecast, which draws bounded noise from a seedable random source.

pub mod cli;
pub mod config;
pub mod datasources;
pub mod engine;
pub mod error;
pub mod logic;
pub mod models;
pub mod pricing;
pub mod reference;
