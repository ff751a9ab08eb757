//! Audit storage backends.
//!
//! Two implementations of [`AuditStore`]:
//! - [`FileStore`]: append-only JSON Lines files, one file per UTC day,
//!   with size-based rotation
//! - [`MemoryStore`]: mutex-guarded in-memory map for tests and
//!   short-lived pipelines
//!
//! All methods take `&self`; interior mutability keeps stores shareable
//! behind a `Box<dyn AuditStore>`.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::core::error::{ComplianceError, ComplianceResult};
use crate::frameworks::types::AuditEntry;
use crate::observability::logger::Logger;

/// Storage backend for audit entries.
///
/// Implementations must preserve write order within a backend and
/// treat `list_entries` bounds as inclusive on both ends.
pub trait AuditStore: Send + Sync {
    /// Persist an entry, returning its entry id.
    fn write(&self, entry: &AuditEntry) -> ComplianceResult<String>;

    /// Fetch an entry by id.
    fn read(&self, entry_id: &str) -> ComplianceResult<Option<AuditEntry>>;

    /// List entries whose timestamp satisfies `start <= ts <= end`.
    fn list_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ComplianceResult<Vec<AuditEntry>>;

    /// Remove an entry by id. Returns `true` when an entry was removed.
    fn delete(&self, entry_id: &str) -> ComplianceResult<bool>;

    /// Total number of stored entries.
    fn count(&self) -> ComplianceResult<usize>;
}

fn lock_or_storage_err<T>(mutex: &Mutex<T>) -> ComplianceResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| ComplianceError::storage("store lock poisoned"))
}

/// File-backed audit store.
///
/// Entries land in `audit_YYYYMMDD.jsonl` under the configured
/// directory, one JSON document per line. When a day file reaches the
/// rotation threshold it is renamed to `audit_YYYYMMDD_NNN.jsonl`
/// (first free counter) and a fresh day file starts.
pub struct FileStore {
    dir: PathBuf,
    rotation_size_bytes: u64,
    rotation_enabled: bool,
    // entry_id -> file path; stale after rotation, resolved by scan
    index: Mutex<HashMap<String, PathBuf>>,
}

impl FileStore {
    /// Default rotation threshold in megabytes.
    pub const DEFAULT_ROTATION_MB: u64 = 100;

    /// Open (creating if needed) a file store at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> ComplianceResult<Self> {
        Self::with_rotation(dir, Self::DEFAULT_ROTATION_MB, true)
    }

    /// Open a file store with an explicit rotation threshold.
    pub fn with_rotation(
        dir: impl Into<PathBuf>,
        rotation_size_mb: u64,
        rotation_enabled: bool,
    ) -> ComplianceResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            rotation_size_bytes: rotation_size_mb * 1024 * 1024,
            rotation_enabled,
            index: Mutex::new(HashMap::new()),
        })
    }

    fn day_file(&self, ts: DateTime<Utc>) -> PathBuf {
        self.dir.join(format!("audit_{}.jsonl", ts.format("%Y%m%d")))
    }

    /// All `audit_*.jsonl` files in the directory, sorted by name.
    fn audit_files(&self) -> ComplianceResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        for dirent in fs::read_dir(&self.dir)? {
            let path = dirent?.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if name.starts_with("audit_") && name.ends_with(".jsonl") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    fn rotate_if_needed(&self, path: &Path) -> ComplianceResult<()> {
        if !self.rotation_enabled || !path.exists() {
            return Ok(());
        }
        let size = fs::metadata(path)?.len();
        if size < self.rotation_size_bytes {
            return Ok(());
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ComplianceError::storage("audit file has no stem"))?
            .to_string();
        let mut counter = 1u32;
        loop {
            let rotated = self.dir.join(format!("{stem}_{counter:03}.jsonl"));
            if !rotated.exists() {
                fs::rename(path, &rotated)?;
                Logger::info(
                    "AUDIT_FILE_ROTATED",
                    &[
                        ("from", &path.display().to_string()),
                        ("to", &rotated.display().to_string()),
                    ],
                );
                return Ok(());
            }
            counter += 1;
        }
    }

    fn entries_in_file(path: &Path) -> ComplianceResult<Vec<AuditEntry>> {
        let contents = fs::read_to_string(path)?;
        let mut entries = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(line)?);
        }
        Ok(entries)
    }
}

impl AuditStore for FileStore {
    fn write(&self, entry: &AuditEntry) -> ComplianceResult<String> {
        let path = self.day_file(Utc::now());
        self.rotate_if_needed(&path)?;

        let line = serde_json::to_string(entry)?;
        let mut file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;

        lock_or_storage_err(&self.index)?.insert(entry.entry_id.clone(), path);
        Ok(entry.entry_id.clone())
    }

    fn read(&self, entry_id: &str) -> ComplianceResult<Option<AuditEntry>> {
        // Indexed path first; the index can be stale after rotation
        let indexed = lock_or_storage_err(&self.index)?.get(entry_id).cloned();
        if let Some(path) = indexed {
            if path.exists() {
                for entry in Self::entries_in_file(&path)? {
                    if entry.entry_id == entry_id {
                        return Ok(Some(entry));
                    }
                }
            }
        }

        for path in self.audit_files()? {
            for entry in Self::entries_in_file(&path)? {
                if entry.entry_id == entry_id {
                    lock_or_storage_err(&self.index)?
                        .insert(entry_id.to_string(), path.clone());
                    return Ok(Some(entry));
                }
            }
        }
        Ok(None)
    }

    fn list_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ComplianceResult<Vec<AuditEntry>> {
        let mut matches = Vec::new();
        for path in self.audit_files()? {
            for entry in Self::entries_in_file(&path)? {
                if entry.timestamp >= start && entry.timestamp <= end {
                    matches.push(entry);
                }
            }
        }
        Ok(matches)
    }

    fn delete(&self, entry_id: &str) -> ComplianceResult<bool> {
        for path in self.audit_files()? {
            let entries = Self::entries_in_file(&path)?;
            if !entries.iter().any(|e| e.entry_id == entry_id) {
                continue;
            }

            let mut rewritten = String::new();
            for entry in entries.iter().filter(|e| e.entry_id != entry_id) {
                rewritten.push_str(&serde_json::to_string(entry)?);
                rewritten.push('\n');
            }
            fs::write(&path, rewritten)?;
            lock_or_storage_err(&self.index)?.remove(entry_id);
            return Ok(true);
        }
        Ok(false)
    }

    fn count(&self) -> ComplianceResult<usize> {
        let mut total = 0;
        for path in self.audit_files()? {
            let contents = fs::read_to_string(&path)?;
            total += contents.lines().filter(|l| !l.trim().is_empty()).count();
        }
        Ok(total)
    }
}

#[derive(Default)]
struct MemoryInner {
    entries: HashMap<String, AuditEntry>,
    // insertion order for oldest-first eviction
    order: Vec<String>,
}

/// In-memory audit store with optional bounded capacity.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
    max_entries: Option<usize>,
}

impl MemoryStore {
    /// Unbounded in-memory store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
            max_entries: None,
        }
    }

    /// Bounded store which evicts the oldest entry once full.
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(MemoryInner::default()),
            max_entries: Some(max_entries),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditStore for MemoryStore {
    fn write(&self, entry: &AuditEntry) -> ComplianceResult<String> {
        let mut inner = lock_or_storage_err(&self.inner)?;

        let is_new = !inner.entries.contains_key(&entry.entry_id);
        if is_new {
            if let Some(max) = self.max_entries {
                while inner.order.len() >= max {
                    let oldest = inner.order.remove(0);
                    inner.entries.remove(&oldest);
                }
            }
            inner.order.push(entry.entry_id.clone());
        }
        inner.entries.insert(entry.entry_id.clone(), entry.clone());
        Ok(entry.entry_id.clone())
    }

    fn read(&self, entry_id: &str) -> ComplianceResult<Option<AuditEntry>> {
        let inner = lock_or_storage_err(&self.inner)?;
        Ok(inner.entries.get(entry_id).cloned())
    }

    fn list_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ComplianceResult<Vec<AuditEntry>> {
        let inner = lock_or_storage_err(&self.inner)?;
        let mut matches = Vec::new();
        for id in &inner.order {
            if let Some(entry) = inner.entries.get(id) {
                if entry.timestamp >= start && entry.timestamp <= end {
                    matches.push(entry.clone());
                }
            }
        }
        Ok(matches)
    }

    fn delete(&self, entry_id: &str) -> ComplianceResult<bool> {
        let mut inner = lock_or_storage_err(&self.inner)?;
        let removed = inner.entries.remove(entry_id).is_some();
        if removed {
            inner.order.retain(|id| id != entry_id);
        }
        Ok(removed)
    }

    fn count(&self) -> ComplianceResult<usize> {
        Ok(lock_or_storage_err(&self.inner)?.entries.len())
    }
}
