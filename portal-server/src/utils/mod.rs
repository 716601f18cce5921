//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`validation`] - input length and format checks

pub mod logger;
pub mod validation;
