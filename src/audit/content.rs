//! Content hashing and key generation for audit privacy.
//!
//! Raw interaction content is never persisted unless the logger is
//! explicitly configured to store it. Instead, a SHA-256 digest of the
//! content is recorded so that later evidence requests can verify a
//! transcript against the audit trail without the trail itself holding
//! the text.

use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Compute the SHA-256 digest of content as a lowercase hex string.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Generate a random 256-bit key, base64-encoded.
///
/// Suitable for external encryption of exported reports or archived
/// audit files. The toolkit itself never encrypts at rest.
pub fn generate_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_content_known_vector() {
        assert_eq!(
            hash_content("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_hash_content_deterministic() {
        assert_eq!(hash_content("audit"), hash_content("audit"));
        assert_ne!(hash_content("audit"), hash_content("Audit"));
    }

    #[test]
    fn test_hash_content_empty() {
        assert_eq!(
            hash_content(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_generate_key_length_and_uniqueness() {
        let key1 = generate_key();
        let key2 = generate_key();
        assert_ne!(key1, key2);

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&key1)
            .unwrap();
        assert_eq!(decoded.len(), 32);
    }
}
