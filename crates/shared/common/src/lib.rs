//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling with stable error codes
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
