//! Playlist edit session
//!
//! Bridges user intent to transactions and owns the single in-memory
//! playlist being edited. Every push, undo, and redo flushes a snapshot
//! through the persistence queue.

use crate::error::{EditError, Result};
use crate::persist::{PersistQueue, PlaylistWriter};
use crate::stack::TransactionStack;
use crate::transaction::SongTransaction;
use mixtape_core::types::{Playlist, Song};
use std::sync::Arc;

/// An editing session over one playlist.
///
/// Undo history never crosses session boundaries: opening a session,
/// replacing the playlist under edit, and closing all clear the stack.
pub struct EditSession {
    playlist: Playlist,
    stack: TransactionStack,
    queue: PersistQueue,
}

impl EditSession {
    /// Open an edit session for `playlist`, persisting through `writer`.
    ///
    /// Spawns the persistence worker; requires a tokio runtime.
    pub fn open(playlist: Playlist, writer: Arc<dyn PlaylistWriter>) -> Self {
        Self {
            playlist,
            stack: TransactionStack::new(),
            queue: PersistQueue::start(writer),
        }
    }

    /// The playlist as currently edited
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The current song sequence
    pub fn songs(&self) -> &[Song] {
        &self.playlist.songs
    }

    /// Swap in a different playlist (navigation, reload reconciliation).
    ///
    /// Clears the undo history; the stack tracked the old list.
    pub fn replace_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
        self.stack.clear();
    }

    /// Append a placeholder song at the end of the list
    pub fn add_new_song(&mut self) {
        let transaction = SongTransaction::CreateSong {
            index: self.playlist.songs.len(),
            song: Song::placeholder(),
        };
        self.push(transaction);
    }

    /// Move the song at `start` to position `end` (drag-reorder gesture)
    pub fn move_song(&mut self, start: usize, end: usize) -> Result<()> {
        self.check_index(start)?;
        self.check_index(end)?;
        self.push(SongTransaction::MoveSong { start, end });
        Ok(())
    }

    /// Remove the song at `index` (delete confirmation)
    pub fn remove_song(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        let song = self.playlist.songs[index].clone();
        self.push(SongTransaction::RemoveSong { index, song });
        Ok(())
    }

    /// Overwrite the song at `index` with `new_song` (edit confirmation)
    pub fn update_song(&mut self, index: usize, new_song: Song) -> Result<()> {
        self.check_index(index)?;
        let old_song = self.playlist.songs[index].clone();
        self.push(SongTransaction::UpdateSong {
            index,
            old_song,
            new_song,
        });
        Ok(())
    }

    /// Undo the most recent edit; safe no-op with empty history
    pub fn undo(&mut self) {
        if self.stack.undo(&mut self.playlist.songs) {
            self.flush();
        }
    }

    /// Redo the most recently undone edit; safe no-op at the top
    pub fn redo(&mut self) {
        if self.stack.redo(&mut self.playlist.songs) {
            self.flush();
        }
    }

    /// Whether undo would revert an edit
    pub fn can_undo(&self) -> bool {
        self.stack.has_transaction_to_undo()
    }

    /// Whether redo would re-apply an edit
    pub fn can_redo(&self) -> bool {
        self.stack.has_transaction_to_redo()
    }

    /// Most recent persistence failure, if any.
    ///
    /// The in-memory state is not rolled back on failure; callers surface
    /// this to the user and may reload.
    pub fn last_persist_error(&self) -> Option<String> {
        self.queue.last_error()
    }

    /// Close the session: drop the history, drain pending persists, and
    /// hand back the playlist in its final in-memory state.
    pub async fn close(mut self) -> Playlist {
        self.stack.clear();
        self.queue.shutdown().await;
        self.playlist
    }

    fn push(&mut self, transaction: SongTransaction) {
        self.stack
            .add_transaction(transaction, &mut self.playlist.songs);
        self.flush();
    }

    fn flush(&mut self) {
        self.playlist.touch();
        self.queue.enqueue(self.playlist.clone());
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.playlist.songs.len();
        if index >= len {
            return Err(EditError::IndexOutOfBounds { index, len });
        }
        Ok(())
    }
}
