//! Linear undo/redo stack over song transactions
//!
//! Holds an ordered sequence of transactions and a cursor separating "done"
//! from "undone". Created per edit session; cleared whenever editing starts,
//! stops, or the playlist under edit changes identity. Never persisted.

use crate::transaction::SongTransaction;
use mixtape_core::types::Song;

/// Undo/redo command history for the playlist currently being edited.
///
/// Invariant: `0 <= cursor <= transactions.len()`. Entries below the cursor
/// are applied; entries at or above it are kept for redo.
#[derive(Debug, Default)]
pub struct TransactionStack {
    transactions: Vec<SongTransaction>,
    cursor: usize,
}

impl TransactionStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `transaction` against `songs` and push it at the cursor.
    ///
    /// Any transactions above the cursor are discarded: a fresh edit
    /// invalidates redo history.
    pub fn add_transaction(&mut self, transaction: SongTransaction, songs: &mut Vec<Song>) {
        transaction.apply(songs);
        self.transactions.truncate(self.cursor);
        self.transactions.push(transaction);
        self.cursor += 1;
    }

    /// Revert the most recent applied transaction.
    ///
    /// Safe no-op when there is nothing to undo; returns whether a
    /// transaction was reverted.
    pub fn undo(&mut self, songs: &mut Vec<Song>) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.transactions[self.cursor].revert(songs);
        true
    }

    /// Re-apply the most recently undone transaction.
    ///
    /// Safe no-op when there is nothing to redo; returns whether a
    /// transaction was applied.
    pub fn redo(&mut self, songs: &mut Vec<Song>) -> bool {
        if self.cursor == self.transactions.len() {
            return false;
        }
        self.transactions[self.cursor].apply(songs);
        self.cursor += 1;
        true
    }

    /// Whether `undo` would revert something
    pub fn has_transaction_to_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether `redo` would apply something
    pub fn has_transaction_to_redo(&self) -> bool {
        self.cursor < self.transactions.len()
    }

    /// Drop all history and reset the cursor.
    ///
    /// Does not revert anything already applied; the caller is responsible
    /// for having reloaded or replaced the playlist state it was tracking.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.cursor = 0;
    }

    /// Number of transactions held (applied and undone)
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the stack holds no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
