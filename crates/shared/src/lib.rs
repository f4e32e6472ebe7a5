//! Shared types, errors, and configuration for Piyasa.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and banker's rounding helpers
//! - Localized (Turkish-formatted) numeric input parsing and formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CalculatorConfig, ServerConfig, TaxRateConfig, TaxRatesConfig};
pub use error::{AppError, AppResult};
