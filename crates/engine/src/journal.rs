//! Transaction storage within store transactions, plus journal read
//! queries.

use stratum_core::ledger::{
    AccountInfo, LedgerEntry, LedgerError, Posting, Transaction,
};
use stratum_shared::types::{AccountId, PageRequest, PageResponse, ScopeId, TransactionId};

use crate::error::EngineResult;
use crate::store::ScopeState;
use crate::Engine;

/// Account lookup used when resolving postings against stored state.
pub(crate) fn account_info(
    state: &ScopeState,
    account_id: AccountId,
) -> Result<AccountInfo, LedgerError> {
    state
        .accounts
        .get(&account_id)
        .map(|account| AccountInfo {
            id: account.id,
            is_active: account.is_active,
        })
        .ok_or(LedgerError::AccountNotFound(account_id))
}

/// Writes a resolved posting: header plus lines, append-only.
pub(crate) fn post(state: &mut ScopeState, posting: Posting) -> EngineResult<TransactionId> {
    let id = posting.transaction.id;
    if state.transaction(id).is_some() {
        return Err(LedgerError::DuplicateTransaction(id).into());
    }
    state.transactions.push(posting.transaction);
    state.entries.extend(posting.entries);
    Ok(id)
}

impl Engine {
    /// Fetches a transaction and its lines.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::TransactionNotFound`] if the scope has no
    /// such transaction.
    pub fn get_transaction(
        &self,
        scope: ScopeId,
        transaction_id: TransactionId,
    ) -> EngineResult<(Transaction, Vec<LedgerEntry>)> {
        self.store.read(scope, |state| {
            let transaction = state
                .transaction(transaction_id)
                .cloned()
                .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
            Ok((transaction, state.entries_for(transaction_id)))
        })
    }

    /// Lists transactions newest first.
    pub fn list_transactions(
        &self,
        scope: ScopeId,
        page: &PageRequest,
    ) -> PageResponse<Transaction> {
        let page = self.normalize_page(page);
        self.store.read(scope, |state| {
            let total = state.transactions.len() as u64;
            let data: Vec<Transaction> = state
                .transactions
                .iter()
                .rev()
                .skip(page.offset())
                .take(page.limit())
                .cloned()
                .collect();
            PageResponse::new(data, page.page, page.per_page, total)
        })
    }

    /// Lists the entries posted to one account, newest first.
    pub fn list_entries(
        &self,
        scope: ScopeId,
        account_id: AccountId,
        page: &PageRequest,
    ) -> PageResponse<LedgerEntry> {
        let page = self.normalize_page(page);
        self.store.read(scope, |state| {
            let entries: Vec<&LedgerEntry> = state
                .entries
                .iter()
                .filter(|e| e.account_id == account_id)
                .collect();

            let total = entries.len() as u64;
            let data: Vec<LedgerEntry> = entries
                .into_iter()
                .rev()
                .skip(page.offset())
                .take(page.limit())
                .cloned()
                .collect();
            PageResponse::new(data, page.page, page.per_page, total)
        })
    }
}
