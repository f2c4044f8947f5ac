//! Concall Storage Layer
//!
//! Implements the `ProcessedStore` trait over a single JSON file holding the
//! subjects that have been completed.
//!
//! # Architecture
//!
//! - The whole set is loaded into memory when the store is opened
//! - Every new completion rewrites the whole file before `mark_done` returns
//! - Rewrites go through a temp file in the same directory followed by a
//!   rename, so a crash leaves either the old file or the new one
//!
//! The file is a plain JSON array of strings, in completion order:
//!
//! ```json
//! ["AcmeCorp","Globex Industries"]
//! ```
//!
//! # Examples
//!
//! ```
//! use concall_store::ProcessedSetStore;
//! use concall_domain::traits::ProcessedStore;
//!
//! let mut store = ProcessedSetStore::in_memory();
//! store.mark_done("AcmeCorp").unwrap();
//! assert!(store.contains("AcmeCorp"));
//! ```

#![warn(missing_docs)]

use concall_domain::traits::ProcessedStore;
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The processed file exists but is not a JSON array of strings
    #[error("Corrupt processed file {}: {reason}", .path.display())]
    Corrupt {
        /// File that failed to load
        path: PathBuf,
        /// Parse failure
        reason: String,
    },

    /// The rewritten file could not be moved into place
    #[error("Failed to persist processed file: {0}")]
    Persist(String),
}

/// Durable set of completed subject identifiers
///
/// # Concurrency
///
/// One writer per file. Two processes sharing a file would each rewrite it
/// from their own in-memory view.
#[derive(Debug)]
pub struct ProcessedSetStore {
    path: Option<PathBuf>,
    order: Vec<String>,
    index: HashSet<String>,
}

impl ProcessedSetStore {
    /// Open (or start) the set stored at `path`
    ///
    /// A missing or blank file is an empty set. Duplicate ids in the file are
    /// collapsed, keeping the first occurrence.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Corrupt` if it is not a JSON array of
    /// strings.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let ids: Vec<String> = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Vec::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
                path: path.clone(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let mut order = Vec::with_capacity(ids.len());
        let mut index = HashSet::with_capacity(ids.len());
        for id in ids {
            if index.insert(id.clone()) {
                order.push(id);
            }
        }

        info!("Loaded {} processed subjects from {}", order.len(), path.display());
        Ok(Self {
            path: Some(path),
            order,
            index,
        })
    }

    /// A store that lives only in memory (for tests and dry runs)
    pub fn in_memory() -> Self {
        Self {
            path: None,
            order: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Remove a subject so the next run processes it again
    ///
    /// Returns whether the subject was present. The file is rewritten only
    /// when something was removed.
    pub fn forget(&mut self, subject_id: &str) -> Result<bool, StoreError> {
        if !self.index.remove(subject_id) {
            return Ok(false);
        }
        let position = self.order.iter().position(|id| id == subject_id);
        let removed = position.map(|pos| (pos, self.order.remove(pos)));

        if let Err(e) = self.flush() {
            if let Some((pos, id)) = removed {
                self.order.insert(pos, id);
            }
            self.index.insert(subject_id.to_string());
            return Err(e);
        }

        debug!("Forgot processed subject '{}'", subject_id);
        Ok(true)
    }

    /// Processed subjects in completion order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of processed subjects
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no subject has been processed
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Rewrite the backing file from the in-memory set
    fn flush(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string(&self.order)
            .map_err(|e| StoreError::Persist(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)
            .map_err(|e| StoreError::Persist(e.error.to_string()))?;

        Ok(())
    }
}

impl ProcessedStore for ProcessedSetStore {
    type Error = StoreError;

    fn contains(&self, subject_id: &str) -> bool {
        self.index.contains(subject_id)
    }

    /// Append the subject and rewrite the file
    ///
    /// An already-present subject is a no-op without I/O. If the rewrite
    /// fails the subject is not kept in memory either.
    fn mark_done(&mut self, subject_id: &str) -> Result<(), StoreError> {
        if self.index.contains(subject_id) {
            return Ok(());
        }

        self.index.insert(subject_id.to_string());
        self.order.push(subject_id.to_string());

        if let Err(e) = self.flush() {
            self.order.pop();
            self.index.remove(subject_id);
            return Err(e);
        }

        debug!("Marked '{}' as processed ({} total)", subject_id, self.order.len());
        Ok(())
    }
}
