use std::sync::{PoisonError, RwLock};

use log::{error, warn};

use crate::accounts::Account;
use crate::assets::AvailableAsset;
use crate::errors::{Error, Result};
use crate::investments::Investment;
use crate::loans::{Loan, LoanApplication};
use crate::notifications::Notification;
use crate::transactions::Transaction;
use crate::users::User;

use super::table::Table;

/// Every in-memory collection of the application.
#[derive(Debug, Default)]
pub struct Ledger {
    pub users: Table<User>,
    pub accounts: Table<Account>,
    pub transactions: Table<Transaction>,
    pub assets: Table<AvailableAsset>,
    pub investments: Table<Investment>,
    pub loans: Table<Loan>,
    pub loan_applications: Table<LoanApplication>,
    pub notifications: Table<Notification>,
}

/// Process-wide owner of the [`Ledger`].
///
/// The store is created once by the application context and shared behind an
/// `Arc` with every repository. It is not persisted across restarts.
#[derive(Debug, Default)]
pub struct LedgerStore {
    inner: RwLock<Ledger>,
}

impl Ledger {
    fn begin(&mut self) {
        self.users.begin();
        self.accounts.begin();
        self.transactions.begin();
        self.assets.begin();
        self.investments.begin();
        self.loans.begin();
        self.loan_applications.begin();
        self.notifications.begin();
    }

    fn commit(&mut self) {
        self.users.commit();
        self.accounts.commit();
        self.transactions.commit();
        self.assets.commit();
        self.investments.commit();
        self.loans.commit();
        self.loan_applications.commit();
        self.notifications.commit();
    }

    fn rollback(&mut self) {
        self.users.rollback();
        self.accounts.rollback();
        self.transactions.rollback();
        self.assets.rollback();
        self.investments.rollback();
        self.loans.rollback();
        self.loan_applications.rollback();
        self.notifications.rollback();
    }
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a read-only closure against the current ledger.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Ledger) -> T,
    {
        self.recover_if_poisoned();
        let guard = self.inner.read().map_err(|e| {
            error!("Ledger lock poisoned on read: {}", e);
            Error::Unexpected("Ledger store is unavailable".to_string())
        })?;
        Ok(f(&guard))
    }

    /// Runs a mutation with all-or-nothing semantics.
    ///
    /// Every change the closure makes is journaled; if the closure returns
    /// `Err` the journal is replayed backwards before the lock is released.
    /// Writers are serialised by the lock, so compound read-modify-write
    /// sequences cannot lose updates.
    pub fn execute<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ledger) -> Result<T>,
    {
        self.recover_if_poisoned();
        let mut guard = self.inner.write().map_err(|e| {
            error!("Ledger lock poisoned on write: {}", e);
            Error::Unexpected("Ledger store is unavailable".to_string())
        })?;
        guard.begin();
        match f(&mut guard) {
            Ok(output) => {
                guard.commit();
                Ok(output)
            }
            Err(e) => {
                guard.rollback();
                Err(e)
            }
        }
    }

    /// A writer that panicked leaves its journal open; undo it and clear the
    /// poison flag.
    fn recover_if_poisoned(&self) {
        if !self.inner.is_poisoned() {
            return;
        }
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if self.inner.is_poisoned() {
            warn!("Rolling back a ledger write interrupted by a panic");
            guard.rollback();
            self.inner.clear_poison();
        }
    }
}
