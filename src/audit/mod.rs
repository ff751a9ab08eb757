//! Audit trail capture and storage.
//!
//! [`AuditLogger`] is the write path for AI interaction records. It
//! hashes content for privacy, delegates persistence to an
//! [`AuditStore`] backend, and enforces retention.

pub mod content;
pub mod logger;
pub mod storage;

pub use content::{generate_key, hash_content};
pub use logger::AuditLogger;
pub use storage::{AuditStore, FileStore, MemoryStore};
