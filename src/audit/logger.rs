//! High-level audit logging over a storage backend.
//!
//! The logger owns the privacy policy: interaction content is hashed
//! by default and only persisted verbatim when `store_content` is set.
//! Retention is enforced lazily through [`AuditLogger::cleanup_expired`].

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::audit::content::hash_content;
use crate::audit::storage::AuditStore;
use crate::core::error::ComplianceResult;
use crate::frameworks::types::AuditEntry;
use crate::observability::logger::Logger;

/// Records audit entries and applies the retention policy.
pub struct AuditLogger {
    store: Box<dyn AuditStore>,
    store_content: bool,
    retention_days: i64,
}

impl AuditLogger {
    /// Default retention period in days.
    pub const DEFAULT_RETENTION_DAYS: i64 = 365;

    /// Create a logger with hash-only content and one year retention.
    pub fn new(store: Box<dyn AuditStore>) -> Self {
        Self {
            store,
            store_content: false,
            retention_days: Self::DEFAULT_RETENTION_DAYS,
        }
    }

    /// Persist raw interaction content alongside its hash.
    pub fn with_store_content(mut self, store_content: bool) -> Self {
        self.store_content = store_content;
        self
    }

    /// Override the retention period.
    pub fn with_retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    /// Access the underlying store.
    pub fn store(&self) -> &dyn AuditStore {
        self.store.as_ref()
    }

    /// Write a pre-built entry.
    pub fn log(&self, entry: &AuditEntry) -> ComplianceResult<String> {
        let id = self.store.write(entry)?;
        Logger::info(
            "AUDIT_ENTRY_LOGGED",
            &[("entry_id", &id), ("event_type", &entry.event_type)],
        );
        Ok(id)
    }

    /// Record an AI interaction, hashing its input and output content.
    ///
    /// The returned entry carries `input_hash`/`output_hash` metadata;
    /// `input_content`/`output_content` are included only when the
    /// logger was built with `store_content`.
    pub fn log_interaction(
        &self,
        event_type: &str,
        actor: &str,
        action: &str,
        input_content: Option<&str>,
        output_content: Option<&str>,
    ) -> ComplianceResult<AuditEntry> {
        let mut entry = AuditEntry::new(
            Uuid::new_v4().to_string(),
            event_type,
            actor,
            action,
        );

        if let Some(input) = input_content {
            entry = entry.with_metadata("input_hash", hash_content(input));
            if self.store_content {
                entry = entry.with_metadata("input_content", input);
            }
        }
        if let Some(output) = output_content {
            entry = entry.with_metadata("output_hash", hash_content(output));
            if self.store_content {
                entry = entry.with_metadata("output_content", output);
            }
        }

        self.log(&entry)?;
        Ok(entry)
    }

    /// Fetch an entry by id.
    pub fn get_entry(&self, entry_id: &str) -> ComplianceResult<Option<AuditEntry>> {
        self.store.read(entry_id)
    }

    /// List entries in an inclusive time range.
    pub fn get_entries(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ComplianceResult<Vec<AuditEntry>> {
        self.store.list_entries(start, end)
    }

    /// Delete entries older than the retention period.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> ComplianceResult<usize> {
        let cutoff = Utc::now() - Duration::days(self.retention_days);
        let expired = self.store.list_entries(DateTime::UNIX_EPOCH, cutoff)?;

        let mut removed = 0;
        for entry in &expired {
            if self.store.delete(&entry.entry_id)? {
                removed += 1;
            }
        }
        if removed > 0 {
            Logger::info(
                "AUDIT_RETENTION_CLEANUP",
                &[
                    ("removed", &removed.to_string()),
                    ("retention_days", &self.retention_days.to_string()),
                ],
            );
        }
        Ok(removed)
    }
}
