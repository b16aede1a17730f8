//! # score_records
//!
//! Per-user, per-difficulty score records: best score plus full history,
//! persisted as a single JSON file.
//!
//! The store is deliberately forgiving at its boundary:
//!
//! * `register` is idempotent — registering an existing name is a no-op
//!   returning `false`, never an error.
//! * writes are fire-and-forget — a failed save is logged with `log::warn!`
//!   and swallowed, so game logic never branches on storage failures.
//! * only the explicit [`RecordsStore::open`] path reports errors, via
//!   [`RecordsError`].
//!
//! An [`in_memory`](RecordsStore::in_memory) store (no file) backs guest
//! play and tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Difficulty
// ════════════════════════════════════════════════════════════════════════════

/// Score bucket key.  Also used by the game as its difficulty selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Normal => "NORMAL",
            Difficulty::Hard => "HARD",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Records
// ════════════════════════════════════════════════════════════════════════════

/// One difficulty bucket for one user.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRecord {
    pub best_score: u32,
    pub history: Vec<u32>,
}

/// All of one user's buckets.  Buckets are created lazily on first score.
pub type UserRecord = BTreeMap<Difficulty, DifficultyRecord>;

// ════════════════════════════════════════════════════════════════════════════
// RecordsError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("failed to read records file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("records file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// RecordsStore
// ════════════════════════════════════════════════════════════════════════════

pub struct RecordsStore {
    /// `None` = in-memory only (guest play, tests).
    path: Option<PathBuf>,
    data: BTreeMap<String, UserRecord>,
}

impl RecordsStore {
    /// Open (or create) a JSON-backed store.
    ///
    /// A missing file is an empty store; a present-but-unreadable or
    /// malformed file is an error, so a corrupt records file is surfaced at
    /// startup instead of being silently overwritten.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RecordsError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| RecordsError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| RecordsError::Parse {
                path: path.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };
        Ok(RecordsStore {
            path: Some(path),
            data,
        })
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        RecordsStore {
            path: None,
            data: BTreeMap::new(),
        }
    }

    /// Create a user entry.  Returns `true` if newly created; registering an
    /// existing name is an idempotent no-op returning `false`.
    pub fn register(&mut self, username: &str) -> bool {
        if self.data.contains_key(username) {
            return false;
        }
        self.data.insert(username.to_string(), UserRecord::new());
        self.save();
        true
    }

    /// Record a finished game.  Creates the difficulty bucket lazily,
    /// appends to history, and raises the best score if improved.
    ///
    /// Unknown usernames are ignored (scores for deleted users can arrive
    /// from an in-flight session).
    pub fn add_score(&mut self, username: &str, score: u32, difficulty: Difficulty) {
        let Some(user) = self.data.get_mut(username) else {
            log::warn!("add_score for unknown user {username:?} dropped");
            return;
        };
        let bucket = user.entry(difficulty).or_default();
        bucket.history.push(score);
        if score > bucket.best_score {
            bucket.best_score = score;
        }
        self.save();
    }

    pub fn delete_user(&mut self, username: &str) {
        if self.data.remove(username).is_some() {
            self.save();
        }
    }

    /// All usernames in stable sorted order.  Uncapped — display limits
    /// belong to the UI.
    pub fn list_users(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }

    /// One user's bucket for one difficulty, if any scores exist there.
    pub fn record(&self, username: &str, difficulty: Difficulty) -> Option<&DifficultyRecord> {
        self.data.get(username)?.get(&difficulty)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.data.contains_key(username)
    }

    /// Fire-and-forget persistence: failures are logged, never returned.
    fn save(&self) {
        let Some(path) = &self.path else { return };
        let json = match serde_json::to_string_pretty(&self.data) {
            Ok(j) => j,
            Err(e) => {
                log::warn!("records serialize failed: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(path, json) {
            log::warn!("records write to {} failed: {e}", path.display());
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut store = RecordsStore::in_memory();
        assert!(store.register("alice"));
        assert!(!store.register("alice"));
        assert_eq!(store.list_users(), vec!["alice".to_string()]);
    }

    #[test]
    fn add_score_tracks_best_and_history() {
        let mut store = RecordsStore::in_memory();
        store.register("alice");
        store.add_score("alice", 37, Difficulty::Hard);
        store.add_score("alice", 12, Difficulty::Hard);
        let rec = store.record("alice", Difficulty::Hard).unwrap();
        assert_eq!(rec.best_score, 37);
        assert_eq!(rec.history, vec![37, 12]);
    }

    #[test]
    fn buckets_are_created_lazily_per_difficulty() {
        let mut store = RecordsStore::in_memory();
        store.register("bob");
        assert!(store.record("bob", Difficulty::Easy).is_none());
        store.add_score("bob", 5, Difficulty::Easy);
        assert_eq!(store.record("bob", Difficulty::Easy).unwrap().best_score, 5);
        assert!(store.record("bob", Difficulty::Normal).is_none());
    }

    #[test]
    fn add_score_for_unknown_user_is_dropped() {
        let mut store = RecordsStore::in_memory();
        store.add_score("ghost", 99, Difficulty::Normal);
        assert!(store.list_users().is_empty());
    }

    #[test]
    fn delete_user_removes_all_buckets() {
        let mut store = RecordsStore::in_memory();
        store.register("carol");
        store.add_score("carol", 10, Difficulty::Easy);
        store.delete_user("carol");
        assert!(!store.contains("carol"));
        assert!(store.record("carol", Difficulty::Easy).is_none());
    }

    #[test]
    fn list_users_is_sorted() {
        let mut store = RecordsStore::in_memory();
        store.register("mallory");
        store.register("alice");
        store.register("bob");
        assert_eq!(
            store.list_users(),
            vec!["alice".to_string(), "bob".to_string(), "mallory".to_string()]
        );
    }

    #[test]
    fn persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        {
            let mut store = RecordsStore::open(&path).unwrap();
            store.register("alice");
            store.add_score("alice", 37, Difficulty::Hard);
        }
        let store = RecordsStore::open(&path).unwrap();
        let rec = store.record("alice", Difficulty::Hard).unwrap();
        assert_eq!(rec.best_score, 37);
        assert_eq!(rec.history, vec![37]);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordsStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.list_users().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_wipe() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            RecordsStore::open(&path),
            Err(RecordsError::Parse { .. })
        ));
    }
}
