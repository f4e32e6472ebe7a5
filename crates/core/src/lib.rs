//! Calculator engines for Piyasa.
//!
//! This crate contains pure calculation logic with ZERO web dependencies.
//! Every engine is a pure function over immutable tables that are built once
//! from configuration and passed in explicitly.
//!
//! # Modules
//!
//! - `loan` - Annuity payments, amortization schedules, KKDF/BSMV overlay
//! - `currency` - Fixed-rate conversion through a reference currency

pub mod currency;
pub mod loan;
