//! Temperature Chart - time-series chart and CSV export for temperature sensors
//!
//! This library exposes the core modules for testing and reuse.

pub mod backend;
pub mod chart;
pub mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
