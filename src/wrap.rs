//! Wrapping a content key under a per-recipient key-encryption key.
//!
//! Each wrapped key is an inner encrypt-then-MAC envelope of the content key, keyed by a KEK
//! that is unique per (ephemeral sender key, recipient) pair for a given seal. Because the KEK
//! is never reused, a fixed all-zero nonce is safe for the inner wrapping.

use zeroize::Zeroize;

use crate::envelope;
use crate::kdf::SHARED_KEY_LEN;

/// The fixed width of a wrapped content key: the key itself plus an HMAC-SHA-384 tag.
pub(crate) const WRAPPED_KEY_LEN: usize = SHARED_KEY_LEN + envelope::MAC_LEN;

const ZERO_NONCE: [u8; envelope::NONCE_LEN] = [0u8; envelope::NONCE_LEN];

/// Wraps `content_key` under `kek`.
pub(crate) fn wrap(
    kek: &[u8; SHARED_KEY_LEN],
    content_key: &[u8; SHARED_KEY_LEN],
) -> [u8; WRAPPED_KEY_LEN] {
    let sealed = envelope::seal(kek, &ZERO_NONCE, content_key);
    let mut out = [0u8; WRAPPED_KEY_LEN];
    out.copy_from_slice(&sealed);
    out
}

/// Unwraps a content key from `wrapped` under `kek`, returning `None` on any tag mismatch.
pub(crate) fn unwrap(
    kek: &[u8; SHARED_KEY_LEN],
    wrapped: &[u8; WRAPPED_KEY_LEN],
) -> Option<[u8; SHARED_KEY_LEN]> {
    let mut content_key = envelope::open(kek, &ZERO_NONCE, wrapped)?;
    let mut out = [0u8; SHARED_KEY_LEN];
    out.copy_from_slice(&content_key);
    content_key.zeroize();
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let kek = [3u8; SHARED_KEY_LEN];
        let content_key = [4u8; SHARED_KEY_LEN];

        let wrapped = wrap(&kek, &content_key);
        assert_eq!(Some(content_key), unwrap(&kek, &wrapped));
    }

    #[test]
    fn wrong_kek_fails() {
        let kek = [3u8; SHARED_KEY_LEN];
        let other_kek = [5u8; SHARED_KEY_LEN];
        let content_key = [4u8; SHARED_KEY_LEN];

        let wrapped = wrap(&kek, &content_key);
        assert_eq!(None, unwrap(&other_kek, &wrapped));
    }
}
