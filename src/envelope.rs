//! The symmetric envelope: AES-256-CTR encryption with HMAC-SHA-384 authentication, applied in
//! encrypt-then-MAC order.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes256;
use hmac::{Hmac, Mac};
use sha2::Sha384;
use subtle::ConstantTimeEq;

use crate::kdf::SHARED_KEY_LEN;

/// The length in bytes of a nonce, used as the AES-CTR initial counter block.
pub const NONCE_LEN: usize = 16;

/// The length in bytes of the HMAC-SHA-384 authentication tag.
pub const MAC_LEN: usize = 48;

type Aes256Ctr = ctr::Ctr128BE<Aes256>;
type HmacSha384 = Hmac<Sha384>;

/// Encrypts `plaintext` under `key` (the first 32 bytes are the AES-256 key) and `nonce`, then
/// appends an HMAC-SHA-384 tag computed over `key` (all 48 bytes), `nonce`, and the ciphertext.
///
/// Returns `ciphertext ‖ tag`.
pub(crate) fn seal(
    key: &[u8; SHARED_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Vec<u8> {
    let mut ciphertext = plaintext.to_vec();
    let mut cipher = Aes256Ctr::new(GenericArray::from_slice(&key[..32]), nonce.into());
    cipher.apply_keystream(&mut ciphertext);

    let tag = mac(key, nonce, &ciphertext);

    ciphertext.extend_from_slice(&tag);
    ciphertext
}

/// Verifies the HMAC-SHA-384 tag over `sealed` in constant time and, if it matches, decrypts the
/// remaining ciphertext under `key` and `nonce`.
///
/// Returns `None` on any tag mismatch or on input shorter than [`MAC_LEN`]; no plaintext is ever
/// produced from an unauthenticated ciphertext.
pub(crate) fn open(
    key: &[u8; SHARED_KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    sealed: &[u8],
) -> Option<Vec<u8>> {
    if sealed.len() < MAC_LEN {
        return None;
    }

    let (ciphertext, tag) = sealed.split_at(sealed.len() - MAC_LEN);
    let expected = mac(key, nonce, ciphertext);

    if bool::from(expected.ct_eq(tag)) {
        let mut plaintext = ciphertext.to_vec();
        let mut cipher = Aes256Ctr::new(GenericArray::from_slice(&key[..32]), nonce.into());
        cipher.apply_keystream(&mut plaintext);
        Some(plaintext)
    } else {
        None
    }
}

fn mac(key: &[u8; SHARED_KEY_LEN], nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> [u8; MAC_LEN] {
    let mut mac = HmacSha384::new_from_slice(key).expect("HMAC accepts a key of any length");
    mac.update(nonce);
    mac.update(ciphertext);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let key = [7u8; SHARED_KEY_LEN];
        let nonce = [9u8; NONCE_LEN];
        let plaintext = b"ok this is fun";

        let sealed = seal(&key, &nonce, plaintext);
        assert_eq!(plaintext.len() + MAC_LEN, sealed.len());
        assert_eq!(Some(plaintext.to_vec()), open(&key, &nonce, &sealed));
    }

    #[test]
    fn wrong_key_fails() {
        let key = [7u8; SHARED_KEY_LEN];
        let other_key = [8u8; SHARED_KEY_LEN];
        let nonce = [9u8; NONCE_LEN];
        let plaintext = b"ok this is fun";

        let sealed = seal(&key, &nonce, plaintext);
        assert_eq!(None, open(&other_key, &nonce, &sealed));
    }

    #[test]
    fn wrong_nonce_fails() {
        let key = [7u8; SHARED_KEY_LEN];
        let nonce = [9u8; NONCE_LEN];
        let other_nonce = [10u8; NONCE_LEN];
        let plaintext = b"ok this is fun";

        let sealed = seal(&key, &nonce, plaintext);
        assert_eq!(None, open(&key, &other_nonce, &sealed));
    }

    #[test]
    fn truncated_input_fails() {
        let key = [7u8; SHARED_KEY_LEN];
        let nonce = [9u8; NONCE_LEN];
        assert_eq!(None, open(&key, &nonce, &[0u8; MAC_LEN - 1]));
    }

    #[test]
    fn flip_every_bit() {
        let key = [7u8; SHARED_KEY_LEN];
        let nonce = [9u8; NONCE_LEN];
        let plaintext = b"ok this is fun, flip a bit in me";

        let sealed = seal(&key, &nonce, plaintext);
        for i in 0..sealed.len() {
            for j in 0u8..8 {
                let mut mutated = sealed.clone();
                mutated[i] ^= 1 << j;
                assert!(
                    open(&key, &nonce, &mutated).is_none(),
                    "bit flip at byte {}, bit {} produced a valid message",
                    i,
                    j
                );
            }
        }
    }
}
