//! Double-entry bookkeeping logic.
//!
//! Postings are validated and resolved here as pure business logic;
//! storage and orchestration live elsewhere. Every posted transaction
//! balances to the cent and is immutable once written, so corrections
//! happen through mirror-image reversals rather than edits.

pub mod entry;
pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use entry::{EntryType, LedgerEntry};
pub use error::LedgerError;
pub use service::{AccountInfo, LedgerService, Posting};
pub use types::{LineInput, PostingInput, PostingTotals, Transaction};
pub use validation::validate_lines;
