//! Collision-resistant identifier token generation.
//!
//! Tokens are 16 lowercase hex characters derived from a blake3 hash
//! over the model key, a nanosecond clock sample, a process-local
//! counter, and the process id. Uniqueness is probabilistic; the
//! no-overwrite guard in persistence handles the duplicate-generation
//! race, and callers regenerate on a cache collision.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Token length in characters.
pub const TOKEN_LEN: usize = 16;

/// Process-local sequence so two generations in the same nanosecond
/// still differ.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate a fresh identifier token, seeded by the model key.
pub fn generate(seed: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let mut hasher = blake3::Hasher::new();
    hasher.update(seed.as_bytes());
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&SEQUENCE.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    hasher.update(&u64::from(std::process::id()).to_le_bytes());

    hex::encode(&hasher.finalize().as_bytes()[..TOKEN_LEN / 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate("blog/hello");
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_tokens_differ() {
        // Same seed, same instant: the sequence counter still separates them.
        let a = generate("blog/hello");
        let b = generate("blog/hello");
        assert_ne!(a, b);
    }
}
