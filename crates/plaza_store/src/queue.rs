//! FIFO queues of pending actions.

use crate::error::{StoreError, StoreResult};
use fs2::FileExt;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::time::SystemTime;
use uuid::Uuid;

/// Identifier of a queued record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A queued item together with its queue bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<T> {
    /// Identifier assigned at enqueue time.
    pub id: RecordId,
    /// When the item was enqueued.
    pub created_at: SystemTime,
    /// The queued item.
    pub item: T,
}

struct Persistence {
    file: Mutex<File>,
}

/// A FIFO queue of locally-pending actions.
///
/// Items enter the queue when the user performs an offline-tolerant action
/// and leave it when the server confirms the action. The queue hands out
/// snapshots rather than draining itself: callers remove records explicitly
/// once the corresponding network call succeeded.
///
/// Queues are either purely in-memory ([`PendingQueue::in_memory`]) or
/// backed by a JSON-lines file ([`PendingQueue::open`]) so pending actions
/// survive a process restart. File-backed queues hold an exclusive advisory
/// lock for their lifetime; queues are expected to stay small, so every
/// mutation rewrites the file in full.
pub struct PendingQueue<T> {
    entries: RwLock<VecDeque<Record<T>>>,
    persistence: Option<Persistence>,
}

impl<T> PendingQueue<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Creates an empty in-memory queue.
    pub fn in_memory() -> Self {
        Self {
            entries: RwLock::new(VecDeque::new()),
            persistence: None,
        }
    }

    /// Opens a file-backed queue, creating the file if needed.
    ///
    /// Existing records in the file are loaded in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Locked`] if another queue holds the file, or
    /// an I/O or serialization error if the file cannot be read.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path.as_ref())?;

        file.try_lock_exclusive().map_err(|err| {
            if err.kind() == io::ErrorKind::WouldBlock {
                StoreError::Locked
            } else {
                StoreError::Io(err)
            }
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let mut entries = VecDeque::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            entries.push_back(serde_json::from_str::<Record<T>>(line)?);
        }

        Ok(Self {
            entries: RwLock::new(entries),
            persistence: Some(Persistence {
                file: Mutex::new(file),
            }),
        })
    }

    /// Appends an item and returns its assigned record id.
    pub fn append(&self, item: T) -> StoreResult<RecordId> {
        let record = Record {
            id: RecordId::new(),
            created_at: SystemTime::now(),
            item,
        };
        let id = record.id;

        let mut entries = self.entries.write();
        entries.push_back(record);
        if let Err(err) = self.persist(&entries) {
            entries.pop_back();
            return Err(err);
        }
        Ok(id)
    }

    /// Returns a snapshot of all pending records in FIFO order.
    pub fn pending(&self) -> StoreResult<Vec<Record<T>>> {
        Ok(self.entries.read().iter().cloned().collect())
    }

    /// Removes the record with the given id.
    ///
    /// Returns `false` if no such record exists (it may already have been
    /// removed by an earlier pass).
    pub fn remove(&self, id: RecordId) -> StoreResult<bool> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|record| record.id != id);
        let removed = entries.len() != before;
        if removed {
            self.persist(&entries)?;
        }
        Ok(removed)
    }

    /// Removes all records.
    pub fn clear(&self) -> StoreResult<()> {
        let mut entries = self.entries.write();
        entries.clear();
        self.persist(&entries)
    }

    /// Returns the number of pending records.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the queue has no pending records.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn persist(&self, entries: &VecDeque<Record<T>>) -> StoreResult<()> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };

        let mut out = String::new();
        for record in entries {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }

        let mut file = persistence.file.lock();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(out.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

impl<T> Default for PendingQueue<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::in_memory()
    }
}
