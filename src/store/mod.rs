//! File-backed record store.
//!
//! The whole store is a map of user id to [`UserRecord`], kept in
//! memory and rewritten to a single JSON file after every mutation.
//! Loading is forgiving: a missing, empty, or malformed file yields an
//! empty store and a log line, never a startup failure.

pub mod models;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info};

pub use models::{ClassEntry, DeadlineEntry, NoteEntry, UserRecord};

/// A single entry to append to one of a user's collections.
#[derive(Debug, Clone)]
pub enum Entry {
    Class(ClassEntry),
    Deadline(DeadlineEntry),
    Note(NoteEntry),
}

/// Shared handle to the in-memory store and its backing file.
///
/// Cheap to clone; all clones see the same data. Mutations hold the
/// lock across the file rewrite so concurrent readers never observe a
/// half-applied append.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<Mutex<HashMap<i64, UserRecord>>>,
    path: PathBuf,
}

impl RecordStore {
    /// Reads the backing file once. Any failure falls back to an empty
    /// store so the process always starts.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let users = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => {
                info!("Data file {} is empty", path.display());
                HashMap::new()
            }
            Ok(content) => match serde_json::from_str::<HashMap<i64, UserRecord>>(&content) {
                Ok(users) => {
                    info!("Loaded records for {} users from {}", users.len(), path.display());
                    users
                }
                Err(e) => {
                    error!(
                        "Malformed data file {}: {} - starting with an empty store",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No data file at {} yet", path.display());
                HashMap::new()
            }
            Err(e) => {
                error!(
                    "Failed to read data file {}: {} - starting with an empty store",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        };

        Self {
            inner: Arc::new(Mutex::new(users)),
            path,
        }
    }

    /// Returns the user's record, creating an empty one (and persisting
    /// it) on first contact. An existing record's name is never
    /// overwritten.
    pub fn get_or_create(&self, user_id: i64, display_name: &str) -> UserRecord {
        let mut users = self.lock();
        if let Some(record) = users.get(&user_id) {
            return record.clone();
        }
        let record = UserRecord::new(display_name);
        users.insert(user_id, record.clone());
        info!("Registered new user {} ({})", user_id, display_name);
        self.persist(&users);
        record
    }

    /// Appends one entry to the matching collection and rewrites the
    /// backing file. Returns the new length of that collection.
    ///
    /// Callers register users via [`Self::get_or_create`] first; an
    /// unknown id still gets a record so an append can never be lost.
    pub fn append(&self, user_id: i64, entry: Entry) -> usize {
        let mut users = self.lock();
        let record = users.entry(user_id).or_default();
        let len = match entry {
            Entry::Class(class) => {
                record.schedule.push(class);
                record.schedule.len()
            }
            Entry::Deadline(deadline) => {
                record.deadlines.push(deadline);
                record.deadlines.len()
            }
            Entry::Note(note) => {
                record.notes.push(note);
                record.notes.len()
            }
        };
        self.persist(&users);
        len
    }

    /// Snapshot of one user's record.
    pub fn user(&self, user_id: i64) -> Option<UserRecord> {
        self.lock().get(&user_id).cloned()
    }

    pub fn contains(&self, user_id: i64) -> bool {
        self.lock().contains_key(&user_id)
    }

    pub fn user_count(&self) -> usize {
        self.lock().len()
    }

    /// All known user ids, sorted for deterministic broadcast order.
    pub fn user_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.lock().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, UserRecord>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write-through rewrite of the whole file. A failure is logged and
    /// swallowed; in-memory state stays authoritative until the next
    /// successful write.
    fn persist(&self, users: &HashMap<i64, UserRecord>) {
        match serde_json::to_string_pretty(users) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    error!("Failed to write data file {}: {}", self.path.display(), e);
                } else {
                    debug!("Data saved ({} users)", users.len());
                }
            }
            Err(e) => error!("Failed to serialize store: {}", e),
        }
    }
}
