//! Audit and storage configuration.
//!
//! Configuration is validated eagerly: a config value object that
//! passed [`AuditConfig::validate`] or [`StorageConfig::open`] is safe
//! to hand to the rest of the toolkit.

use serde::{Deserialize, Serialize};

use crate::audit::storage::{AuditStore, FileStore, MemoryStore};
use crate::core::error::{ComplianceError, ComplianceResult};

fn default_retention_days() -> u32 {
    365
}

fn default_max_file_size_mb() -> u32 {
    100
}

fn default_rotation_enabled() -> bool {
    true
}

/// Audit trail policy: where entries go and how long they live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Destination directory or backend identifier. Must be non-empty.
    pub destination: String,

    /// Days entries are retained before cleanup. Range 1..=3650.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Rotation threshold per audit file in megabytes. Range 1..=1000.
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u32,

    /// Whether size-based rotation is active.
    #[serde(default = "default_rotation_enabled")]
    pub rotation_enabled: bool,

    /// Persist raw interaction content instead of hashes only.
    #[serde(default)]
    pub store_content: bool,
}

impl AuditConfig {
    /// Create a config with default retention and rotation settings.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            retention_days: default_retention_days(),
            max_file_size_mb: default_max_file_size_mb(),
            rotation_enabled: default_rotation_enabled(),
            store_content: false,
        }
    }

    /// Override the retention period.
    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    /// Override the rotation threshold.
    pub fn with_max_file_size_mb(mut self, mb: u32) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Enable or disable rotation.
    pub fn with_rotation_enabled(mut self, enabled: bool) -> Self {
        self.rotation_enabled = enabled;
        self
    }

    /// Enable raw content storage.
    pub fn with_store_content(mut self, store_content: bool) -> Self {
        self.store_content = store_content;
        self
    }

    /// Validate all fields against their allowed ranges.
    pub fn validate(&self) -> ComplianceResult<()> {
        if self.destination.trim().is_empty() {
            return Err(ComplianceError::validation_field(
                "destination must not be empty",
                "destination",
            ));
        }
        if !(1..=3650).contains(&self.retention_days) {
            return Err(ComplianceError::validation_field(
                "retention_days must be between 1 and 3650",
                "retention_days",
            ));
        }
        if !(1..=1000).contains(&self.max_file_size_mb) {
            return Err(ComplianceError::validation_field(
                "max_file_size_mb must be between 1 and 1000",
                "max_file_size_mb",
            ));
        }
        Ok(())
    }
}

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON Lines files on disk
    File,
    /// In-memory, non-persistent
    Memory,
}

/// Storage backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend to open.
    pub backend: StorageBackend,

    /// Directory for the file backend. Required when `backend` is file.
    #[serde(default)]
    pub path: Option<String>,

    /// Rotation threshold in megabytes for the file backend.
    #[serde(default = "default_max_file_size_mb")]
    pub rotation_size_mb: u32,

    /// Whether the file backend rotates at the threshold.
    #[serde(default = "default_rotation_enabled")]
    pub rotation_enabled: bool,

    /// Capacity bound for the memory backend.
    #[serde(default)]
    pub max_entries: Option<usize>,
}

impl StorageConfig {
    /// File-backed storage at `path`.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::File,
            path: Some(path.into()),
            rotation_size_mb: default_max_file_size_mb(),
            rotation_enabled: default_rotation_enabled(),
            max_entries: None,
        }
    }

    /// Unbounded in-memory storage.
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: None,
            rotation_size_mb: default_max_file_size_mb(),
            rotation_enabled: default_rotation_enabled(),
            max_entries: None,
        }
    }

    /// Validate the configuration without opening the backend.
    pub fn validate(&self) -> ComplianceResult<()> {
        if self.backend == StorageBackend::File {
            match &self.path {
                Some(p) if !p.trim().is_empty() => {}
                _ => {
                    return Err(ComplianceError::config(
                        "file backend requires a non-empty path",
                    ))
                }
            }
        }
        Ok(())
    }

    /// Open the configured backend.
    pub fn open(&self) -> ComplianceResult<Box<dyn AuditStore>> {
        self.validate()?;
        match self.backend {
            StorageBackend::File => {
                // validate() guarantees a non-empty path
                let path = self.path.clone().unwrap_or_default();
                let store = FileStore::with_rotation(
                    path,
                    u64::from(self.rotation_size_mb),
                    self.rotation_enabled,
                )?;
                Ok(Box::new(store))
            }
            StorageBackend::Memory => match self.max_entries {
                Some(max) => Ok(Box::new(MemoryStore::with_capacity(max))),
                None => Ok(Box::new(MemoryStore::new())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_audit_config_defaults_valid() {
        let config = AuditConfig::new("/var/log/audit");
        assert_eq!(config.retention_days, 365);
        assert_eq!(config.max_file_size_mb, 100);
        assert!(config.rotation_enabled);
        assert!(!config.store_content);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_audit_config_blank_destination_rejected() {
        let config = AuditConfig::new("   ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audit_config_retention_range() {
        assert!(AuditConfig::new("d").with_retention_days(0).validate().is_err());
        assert!(AuditConfig::new("d").with_retention_days(1).validate().is_ok());
        assert!(AuditConfig::new("d").with_retention_days(3650).validate().is_ok());
        assert!(AuditConfig::new("d").with_retention_days(3651).validate().is_err());
    }

    #[test]
    fn test_audit_config_file_size_range() {
        assert!(AuditConfig::new("d").with_max_file_size_mb(0).validate().is_err());
        assert!(AuditConfig::new("d").with_max_file_size_mb(1000).validate().is_ok());
        assert!(AuditConfig::new("d").with_max_file_size_mb(1001).validate().is_err());
    }

    #[test]
    fn test_storage_config_file_requires_path() {
        let mut config = StorageConfig::file("/tmp/audit");
        assert!(config.validate().is_ok());

        config.path = None;
        assert!(config.validate().is_err());
        assert!(config.open().is_err());
    }

    #[test]
    fn test_storage_config_opens_memory_backend() {
        let store = StorageConfig::memory().open().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_storage_config_opens_file_backend() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig::file(dir.path().display().to_string());
        let store = config.open().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_storage_config_serde_roundtrip() {
        let config = StorageConfig::file("/tmp/audit");
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"file\""));
        let back: StorageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
