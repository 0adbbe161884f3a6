//! Property-based tests for the transaction stack
//!
//! Uses proptest to verify the undo/redo invariants across many random
//! edit sequences.

use mixtape_core::types::Song;
use mixtape_edit::{SongTransaction, TransactionStack};
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_song() -> impl Strategy<Value = Song> {
    (
        "[A-Za-z ]{1,20}", // title
        "[A-Za-z ]{1,15}", // artist
        "[a-zA-Z0-9_-]{11}", // video id
    )
        .prop_map(|(title, artist, video_id)| Song::new(title, artist, video_id))
}

fn arbitrary_songs() -> impl Strategy<Value = Vec<Song>> {
    prop::collection::vec(arbitrary_song(), 0..8)
}

/// Raw edit intents; indices are reduced modulo the live sequence length
/// when the intent is turned into a transaction, so every generated intent
/// is valid against the state it runs on.
#[derive(Debug, Clone)]
enum RawEdit {
    Create(usize, Song),
    Remove(usize),
    Move(usize, usize),
    Update(usize, Song),
}

fn arbitrary_edits() -> impl Strategy<Value = Vec<RawEdit>> {
    let edit = prop_oneof![
        (0usize..32, arbitrary_song()).prop_map(|(i, s)| RawEdit::Create(i, s)),
        (0usize..32).prop_map(RawEdit::Remove),
        (0usize..32, 0usize..32).prop_map(|(a, b)| RawEdit::Move(a, b)),
        (0usize..32, arbitrary_song()).prop_map(|(i, s)| RawEdit::Update(i, s)),
    ];
    prop::collection::vec(edit, 1..24)
}

/// Turn a raw intent into a transaction valid for `songs`, the way the edit
/// session would; returns None when the intent has no target (empty list).
fn materialize(edit: &RawEdit, songs: &[Song]) -> Option<SongTransaction> {
    match edit {
        RawEdit::Create(index, song) => Some(SongTransaction::CreateSong {
            index: index % (songs.len() + 1),
            song: song.clone(),
        }),
        RawEdit::Remove(index) => {
            if songs.is_empty() {
                return None;
            }
            let index = index % songs.len();
            Some(SongTransaction::RemoveSong {
                index,
                song: songs[index].clone(),
            })
        }
        RawEdit::Move(start, end) => {
            if songs.is_empty() {
                return None;
            }
            Some(SongTransaction::MoveSong {
                start: start % songs.len(),
                end: end % songs.len(),
            })
        }
        RawEdit::Update(index, song) => {
            if songs.is_empty() {
                return None;
            }
            let index = index % songs.len();
            Some(SongTransaction::UpdateSong {
                index,
                old_song: songs[index].clone(),
                new_song: song.clone(),
            })
        }
    }
}

// ===== Property Tests =====

proptest! {
    /// Property: undoing N pushed transactions restores the original
    /// sequence element-for-element.
    #[test]
    fn undo_all_restores_original_sequence(
        original in arbitrary_songs(),
        edits in arbitrary_edits()
    ) {
        let mut stack = TransactionStack::new();
        let mut songs = original.clone();
        let mut pushed = 0usize;

        for edit in &edits {
            if let Some(tx) = materialize(edit, &songs) {
                stack.add_transaction(tx, &mut songs);
                pushed += 1;
            }
        }

        for _ in 0..pushed {
            prop_assert!(stack.undo(&mut songs));
        }

        prop_assert_eq!(songs, original);
        prop_assert!(!stack.has_transaction_to_undo());
    }

    /// Property: undoing everything and redoing everything reproduces the
    /// fully edited sequence.
    #[test]
    fn undo_all_then_redo_all_reproduces_edits(
        original in arbitrary_songs(),
        edits in arbitrary_edits()
    ) {
        let mut stack = TransactionStack::new();
        let mut songs = original;

        for edit in &edits {
            if let Some(tx) = materialize(edit, &songs) {
                stack.add_transaction(tx, &mut songs);
            }
        }
        let edited = songs.clone();

        while stack.undo(&mut songs) {}
        while stack.redo(&mut songs) {}

        prop_assert_eq!(songs, edited);
        prop_assert!(!stack.has_transaction_to_redo());
    }

    /// Property: for every transaction kind, do/undo/do equals a single do.
    #[test]
    fn do_undo_do_equals_single_do(
        original in arbitrary_songs(),
        edit in arbitrary_edits().prop_map(|mut e| e.remove(0))
    ) {
        if let Some(tx) = materialize(&edit, &original) {
            let mut once = original.clone();
            tx.apply(&mut once);

            let mut cycled = original;
            tx.apply(&mut cycled);
            tx.revert(&mut cycled);
            tx.apply(&mut cycled);

            prop_assert_eq!(once, cycled);
        }
    }

    /// Property: a fresh push always leaves nothing to redo.
    #[test]
    fn push_clears_redo_tail(
        original in arbitrary_songs(),
        edits in arbitrary_edits(),
        undos in 0usize..8
    ) {
        let mut stack = TransactionStack::new();
        let mut songs = original;

        for edit in &edits {
            if let Some(tx) = materialize(edit, &songs) {
                stack.add_transaction(tx, &mut songs);
            }
        }

        for _ in 0..undos {
            stack.undo(&mut songs);
        }

        let song = Song::new("Fresh", "Push", "fresh_push0");
        stack.add_transaction(
            SongTransaction::CreateSong { index: 0, song },
            &mut songs,
        );

        prop_assert!(!stack.has_transaction_to_redo());
        prop_assert!(stack.has_transaction_to_undo());
    }
}
