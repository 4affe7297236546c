//! Core business logic for Stratum.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts and balance arithmetic
//! - `costing` - FIFO cost layers and inventory valuation
//! - `ledger` - Double-entry bookkeeping logic
//! - `reference` - Provenance linkage back to originating business events
//! - `reports` - Derived financial and inventory reports

pub mod accounts;
pub mod costing;
pub mod ledger;
pub mod reference;
pub mod reports;
