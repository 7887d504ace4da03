//! In-memory ledger store.
//!
//! All entity collections live in a single [`Ledger`] guarded by one
//! `RwLock` inside [`LedgerStore`]. Repositories read through
//! [`LedgerStore::read`] and mutate through [`LedgerStore::execute`], which
//! journals each change and undoes the journal when the closure fails.

mod ledger_store;
mod table;

pub use ledger_store::{Ledger, LedgerStore};
pub use table::{Entity, Table};
