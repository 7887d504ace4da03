use std::collections::HashMap;

use crate::errors::{Error, Result};

/// A record that can be stored in a [`Table`].
pub trait Entity: Clone + Send + Sync {
    /// Human readable entity name used in `NotFound` errors.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

/// Inverse of one mutation, replayed newest first on rollback.
#[derive(Debug, Clone)]
enum Undo<T> {
    Inserted,
    Replaced { pos: usize, previous: T },
    Removed { pos: usize, row: T },
}

/// Keyed collection of one entity type. Iteration follows insertion order.
///
/// While a journal is open every mutation records its inverse, so a failed
/// write can be undone without copying the table.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: Vec<T>,
    index: HashMap<String, usize>,
    journal: Option<Vec<Undo<T>>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
            journal: None,
        }
    }
}

impl<T: Entity> Table<T> {
    /// Inserts a new row. Fails if a row with the same id already exists.
    pub fn insert(&mut self, row: T) -> Result<T> {
        if self.index.contains_key(row.id()) {
            return Err(Error::ConstraintViolation(format!(
                "{} with id {} already exists",
                T::NAME,
                row.id()
            )));
        }
        self.index.insert(row.id().to_string(), self.rows.len());
        self.rows.push(row.clone());
        self.record(Undo::Inserted);
        Ok(row)
    }

    /// Replaces an existing row. Fails with `NotFound` for unknown ids.
    pub fn replace(&mut self, row: T) -> Result<T> {
        let slot = self.require_mut(row.id())?;
        *slot = row.clone();
        Ok(row)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.rows[pos])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        let pos = *self.index.get(id)?;
        self.snapshot(pos);
        self.rows.get_mut(pos)
    }

    /// Like [`Table::get`] but maps a miss to `NotFound`.
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id).ok_or_else(|| Error::not_found(T::NAME, id))
    }

    /// Like [`Table::get_mut`] but maps a miss to `NotFound`.
    pub fn require_mut(&mut self, id: &str) -> Result<&mut T> {
        self.get_mut(id).ok_or_else(|| Error::not_found(T::NAME, id))
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        let pos = self.index.remove(id)?;
        let row = self.rows.remove(pos);
        self.reindex_from(pos);
        self.record(Undo::Removed {
            pos,
            row: row.clone(),
        });
        Some(row)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.iter()
    }

    /// Applies `update` to every row matching `predicate` and returns how
    /// many rows changed.
    pub fn update_where<P, U>(&mut self, predicate: P, mut update: U) -> usize
    where
        P: Fn(&T) -> bool,
        U: FnMut(&mut T),
    {
        let matching: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| predicate(row))
            .map(|(pos, _)| pos)
            .collect();
        for &pos in &matching {
            self.snapshot(pos);
            update(&mut self.rows[pos]);
        }
        matching.len()
    }

    /// Clones every row matching `predicate`, in insertion order.
    pub fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows.iter().filter(|row| predicate(row)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Starts recording undo entries. Any journal left open is discarded.
    pub(crate) fn begin(&mut self) {
        self.journal = Some(Vec::new());
    }

    /// Keeps every change since [`Table::begin`].
    pub(crate) fn commit(&mut self) {
        self.journal = None;
    }

    /// Reverts every change since [`Table::begin`].
    pub(crate) fn rollback(&mut self) {
        let Some(journal) = self.journal.take() else {
            return;
        };
        for undo in journal.into_iter().rev() {
            match undo {
                Undo::Inserted => {
                    if let Some(row) = self.rows.pop() {
                        self.index.remove(row.id());
                    }
                }
                Undo::Replaced { pos, previous } => {
                    self.rows[pos] = previous;
                }
                Undo::Removed { pos, row } => {
                    self.rows.insert(pos, row);
                    self.reindex_from(pos);
                }
            }
        }
    }

    fn record(&mut self, undo: Undo<T>) {
        if let Some(journal) = self.journal.as_mut() {
            journal.push(undo);
        }
    }

    fn snapshot(&mut self, pos: usize) {
        if self.journal.is_some() {
            let previous = self.rows[pos].clone();
            self.record(Undo::Replaced { pos, previous });
        }
    }

    fn reindex_from(&mut self, pos: usize) {
        for (i, row) in self.rows.iter().enumerate().skip(pos) {
            self.index.insert(row.id().to_string(), i);
        }
    }
}
