//! Deterministic one-way aliasing of personal identifiers.
//!
//! Raw emails and child names never reach storage; every record keys on
//! these hex digests instead.

use sha2::{Digest, Sha256};

/// Static salt mixed into child-name aliases so the digest cannot be
/// reversed with a plain rainbow table while staying deterministic.
const ALIAS_SALT: &[u8] = b"ninna-child";

/// Return the deterministic hash for a guardian email.
///
/// Input is trimmed and lowercased before hashing so equivalent
/// addresses collapse to one identity.
///
/// # Examples
///
/// ```
/// use ninna_core::hash_email;
///
/// let a = hash_email("Parent@Example.com ");
/// let b = hash_email("parent@example.com");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 64);
/// ```
pub fn hash_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Return the salted hash for a child name alias.
///
/// # Examples
///
/// ```
/// use ninna_core::{hash_alias, hash_email};
///
/// // Salted, so the same input diverges from the email digest.
/// assert_ne!(hash_alias("sofia"), hash_email("sofia"));
/// ```
pub fn hash_alias(name: &str) -> String {
    let normalized = name.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(ALIAS_SALT);
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}
