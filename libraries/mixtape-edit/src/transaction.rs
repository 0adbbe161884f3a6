//! The four reversible playlist edits
//!
//! Each variant captures exactly the state needed to apply and revert a
//! single edit against a song sequence. Applying, reverting, and applying
//! again reproduces the same sequence as a single apply.

use mixtape_core::types::Song;

/// A reversible single-step edit of a playlist's song sequence.
///
/// Variants are plain data; dispatch is a `match`. Transactions are created
/// by the edit session and owned by the transaction stack once pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SongTransaction {
    /// Insert `song` at `index`
    CreateSong { index: usize, song: Song },

    /// Remove the song at `index`; `song` is the payload captured before
    /// removal so the edit can be reverted
    RemoveSong { index: usize, song: Song },

    /// Rotate the song at `start` to position `end`
    MoveSong { start: usize, end: usize },

    /// Overwrite the song at `index`
    UpdateSong {
        index: usize,
        old_song: Song,
        new_song: Song,
    },
}

impl SongTransaction {
    /// Apply this edit to `songs`
    pub fn apply(&self, songs: &mut Vec<Song>) {
        match self {
            SongTransaction::CreateSong { index, song } => {
                insert_at(songs, *index, song.clone());
            }
            SongTransaction::RemoveSong { index, .. } => {
                remove_at(songs, *index);
            }
            SongTransaction::MoveSong { start, end } => {
                rotate(songs, *start, *end);
            }
            SongTransaction::UpdateSong {
                index, new_song, ..
            } => {
                overwrite_at(songs, *index, new_song);
            }
        }
    }

    /// Revert this edit on `songs`; the exact inverse of [`apply`]
    ///
    /// [`apply`]: SongTransaction::apply
    pub fn revert(&self, songs: &mut Vec<Song>) {
        match self {
            SongTransaction::CreateSong { index, .. } => {
                remove_at(songs, *index);
            }
            SongTransaction::RemoveSong { index, song } => {
                insert_at(songs, *index, song.clone());
            }
            SongTransaction::MoveSong { start, end } => {
                rotate(songs, *end, *start);
            }
            SongTransaction::UpdateSong {
                index, old_song, ..
            } => {
                overwrite_at(songs, *index, old_song);
            }
        }
    }
}

// Indices come from the edit session, which validates against the live
// sequence; clamp rather than panic if one is stale.
fn insert_at(songs: &mut Vec<Song>, index: usize, song: Song) {
    let index = index.min(songs.len());
    songs.insert(index, song);
}

fn remove_at(songs: &mut Vec<Song>, index: usize) {
    if index < songs.len() {
        songs.remove(index);
    }
}

fn overwrite_at(songs: &mut [Song], index: usize, song: &Song) {
    if let Some(slot) = songs.get_mut(index) {
        *slot = song.clone();
    }
}

/// Move the song at `start` to `end`, shifting the songs in between one
/// slot toward the vacated position. `start == end` is a no-op.
fn rotate(songs: &mut [Song], start: usize, end: usize) {
    let len = songs.len();
    if start >= len || end >= len || start == end {
        return;
    }
    if start < end {
        songs[start..=end].rotate_left(1);
    } else {
        songs[end..=start].rotate_right(1);
    }
}
