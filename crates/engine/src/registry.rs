//! Account registry: chart of accounts management per scope.

use stratum_core::accounts::{
    Account, AccountBalance, AccountError, AccountType, SystemAccount,
};
use stratum_shared::types::{AccountId, PageRequest, PageResponse, ScopeId};
use tracing::instrument;

use crate::error::{EngineError, EngineResult};
use crate::store::ScopeState;
use crate::Engine;

/// Creates a system account on first use and returns its id on every
/// use after that. Runs inside a store transaction.
pub(crate) fn ensure_system_account(
    state: &mut ScopeState,
    scope: ScopeId,
    which: SystemAccount,
) -> EngineResult<AccountId> {
    if let Some(&id) = state.system_accounts.get(&which) {
        return Ok(id);
    }

    let account = Account::new(
        scope,
        which.name(),
        which.account_type(),
        Some(which.subtype().to_string()),
        true,
    )?;
    let id = account.id;
    state.accounts.insert(id, account);
    state.system_accounts.insert(which, id);
    tracing::debug!(%scope, account = which.name(), "created system account");
    Ok(id)
}

fn check_name_available(state: &ScopeState, name: &str) -> EngineResult<()> {
    let taken = state
        .accounts
        .values()
        .any(|a| a.is_active && a.name.eq_ignore_ascii_case(name));
    if taken {
        return Err(AccountError::DuplicateName(name.to_string()).into());
    }
    Ok(())
}

impl Engine {
    /// Creates a user-defined account.
    ///
    /// The name must not collide with any active account in the scope
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error for an empty name, a duplicate name, or a
    /// version mismatch.
    #[instrument(skip(self), fields(%scope))]
    pub fn create_account(
        &self,
        scope: ScopeId,
        name: &str,
        account_type: AccountType,
        subtype: Option<String>,
        expected_version: Option<u64>,
    ) -> EngineResult<Account> {
        self.store.transact(scope, expected_version, |state| {
            let account = Account::new(scope, name, account_type, subtype.clone(), false)?;
            check_name_available(state, &account.name)?;
            state.accounts.insert(account.id, account.clone());
            tracing::info!(%scope, account_id = %account.id, name = %account.name, "account created");
            Ok(account)
        })
    }

    /// Fetches an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the scope has no such
    /// account.
    pub fn get_account(&self, scope: ScopeId, account_id: AccountId) -> EngineResult<Account> {
        self.store.read(scope, |state| {
            state
                .accounts
                .get(&account_id)
                .cloned()
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()).into())
        })
    }

    /// Lists accounts in statement order (type, then name). Inactive
    /// accounts are included only when `include_inactive` is set.
    pub fn list_accounts(
        &self,
        scope: ScopeId,
        include_inactive: bool,
        page: &PageRequest,
    ) -> PageResponse<Account> {
        let page = self.normalize_page(page);
        self.store.read(scope, |state| {
            let mut accounts: Vec<Account> = state
                .accounts
                .values()
                .filter(|a| include_inactive || a.is_active)
                .cloned()
                .collect();
            accounts.sort_by(|a, b| {
                a.account_type
                    .ordering_rank()
                    .cmp(&b.account_type.ordering_rank())
                    .then_with(|| a.name.cmp(&b.name))
            });

            let total = accounts.len() as u64;
            let data: Vec<Account> = accounts
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect();
            PageResponse::new(data, page.page, page.per_page, total)
        })
    }

    /// Soft-deletes an account. No-op if already inactive.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist, is a system
    /// account, or on a version mismatch.
    #[instrument(skip(self), fields(%scope, %account_id))]
    pub fn deactivate_account(
        &self,
        scope: ScopeId,
        account_id: AccountId,
        expected_version: Option<u64>,
    ) -> EngineResult<Account> {
        self.store.transact(scope, expected_version, |state| {
            let account = state
                .accounts
                .get_mut(&account_id)
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;
            if account.is_system {
                return Err(AccountError::SystemAccountImmutable(account.name.clone()).into());
            }
            account.is_active = false;
            tracing::info!(%scope, %account_id, "account deactivated");
            Ok(account.clone())
        })
    }

    /// Restores a soft-deleted account. No-op if already active.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist, if its name now
    /// collides with another active account, or on a version mismatch.
    #[instrument(skip(self), fields(%scope, %account_id))]
    pub fn reactivate_account(
        &self,
        scope: ScopeId,
        account_id: AccountId,
        expected_version: Option<u64>,
    ) -> EngineResult<Account> {
        self.store.transact(scope, expected_version, |state| {
            let account = state
                .accounts
                .get(&account_id)
                .cloned()
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;
            if !account.is_active {
                check_name_available(state, &account.name)?;
            }
            let account = state
                .accounts
                .get_mut(&account_id)
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;
            account.is_active = true;
            tracing::info!(%scope, %account_id, "account reactivated");
            Ok(account.clone())
        })
    }

    /// Lists active accounts with their derived balances, in statement
    /// order. The backing data for account-level reporting screens.
    pub fn list_account_balances(
        &self,
        scope: ScopeId,
        page: &PageRequest,
    ) -> PageResponse<(Account, AccountBalance)> {
        let page = self.normalize_page(page);
        self.store.read(scope, |state| {
            let mut rows: Vec<(Account, AccountBalance)> = state
                .accounts
                .values()
                .filter(|a| a.is_active)
                .map(|account| {
                    let (debits, credits) = state.debit_credit_totals(account.id);
                    let balance = AccountBalance::from_totals(
                        account.id,
                        account.account_type,
                        debits,
                        credits,
                    );
                    (account.clone(), balance)
                })
                .collect();
            rows.sort_by(|(a, _), (b, _)| {
                a.account_type
                    .ordering_rank()
                    .cmp(&b.account_type.ordering_rank())
                    .then_with(|| a.name.cmp(&b.name))
            });

            let total = rows.len() as u64;
            let data: Vec<(Account, AccountBalance)> = rows
                .into_iter()
                .skip(page.offset())
                .take(page.limit())
                .collect();
            PageResponse::new(data, page.page, page.per_page, total)
        })
    }

    /// Derives an account's balance from its posted entries.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the scope has no such
    /// account.
    pub fn account_balance(
        &self,
        scope: ScopeId,
        account_id: AccountId,
    ) -> EngineResult<AccountBalance> {
        self.store.read(scope, |state| {
            let account = state
                .accounts
                .get(&account_id)
                .ok_or_else(|| AccountError::NotFound(account_id.to_string()))?;
            let (debits, credits) = state.debit_credit_totals(account_id);
            Ok(AccountBalance::from_totals(
                account_id,
                account.account_type,
                debits,
                credits,
            ))
        })
    }

    pub(crate) fn normalize_page(&self, page: &PageRequest) -> PageRequest {
        PageRequest {
            page: page.page.max(1),
            per_page: if page.per_page == 0 {
                self.config.query.default_page_size
            } else {
                page.per_page
            },
        }
    }
}
