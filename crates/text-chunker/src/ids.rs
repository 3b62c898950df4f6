use sha2::{Digest, Sha256};

/// Hex length of a derived identifier's hash portion
const ID_HASH_LEN: usize = 16;

/// Derive a stable identifier from content.
///
/// The id is a truncated SHA-256 of the trimmed content, prefixed with a
/// category tag (`"chunk"`, `"session"`). Identical content always yields
/// the identical id, so ids double as cache keys.
#[must_use]
pub fn deterministic_id(content: &str, prefix: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.trim().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    format!("{}-{}", prefix, &hash[..ID_HASH_LEN])
}
