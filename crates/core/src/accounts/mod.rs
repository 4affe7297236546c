//! Chart of accounts domain logic.
//!
//! This module implements the account registry building blocks:
//! - Account types and the normal-balance rules that follow from them
//! - The account entity with scope ownership and soft-delete flags
//! - Balance arithmetic over debit/credit totals
//! - The catalog of lazily-created system accounts
//! - Error types for account operations

pub mod balance;
pub mod error;
pub mod system;
pub mod types;

pub use balance::{AccountBalance, NormalBalance};
pub use error::AccountError;
pub use system::SystemAccount;
pub use types::{Account, AccountType};
