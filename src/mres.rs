//! The shared (multi-recipient) box: one ciphertext body addressed to an entire recipient list.
//!
//! A single random content key is generated per seal and wrapped once per recipient under a
//! key-encryption key derived from a per-seal ephemeral key and that recipient's public key.
//! Opening tries every wrapped-key slot rather than stopping at the first match, so that timing
//! does not reveal a recipient's position in the list.

use std::convert::TryInto;

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable};
use zeroize::Zeroize;

use crate::envelope;
use crate::errors::{OpenError, SealError};
use crate::kdf::{self, SHARED_KEY_LEN};
use crate::keys::{PrivateKey, PublicKey, PUBLIC_KEY_LEN};
use crate::signing::{self, SIGNATURE_LEN};
use crate::wrap::{self, WRAPPED_KEY_LEN};

const RECIPIENT_COUNT_LEN: usize = 4;

/// Seals `plaintext` for every public key in `recipients`.
///
/// Any of the corresponding private keys can later open the result with [`open_shared`]; no
/// recipient can tell from the box alone who else it was addressed to, or which wrapped-key slot
/// is theirs.
pub fn seal_shared(
    mut rng: impl CryptoRngCore,
    recipients: &[PublicKey],
    plaintext: &[u8],
) -> Result<Vec<u8>, SealError> {
    let ephemeral = PrivateKey::random(&mut rng);

    let mut content_key = [0u8; SHARED_KEY_LEN];
    rng.try_fill_bytes(&mut content_key).map_err(|_| SealError::Rng)?;

    let mut nonce = [0u8; envelope::NONCE_LEN];
    rng.try_fill_bytes(&mut nonce).map_err(|_| SealError::Rng)?;

    let sealed = envelope::seal(&content_key, &nonce, plaintext);

    let mut out = Vec::with_capacity(
        PUBLIC_KEY_LEN
            + RECIPIENT_COUNT_LEN
            + recipients.len() * WRAPPED_KEY_LEN
            + envelope::NONCE_LEN
            + sealed.len(),
    );
    out.extend_from_slice(&ephemeral.public_key().to_bytes());
    out.extend_from_slice(&(recipients.len() as u32).to_be_bytes());
    for recipient in recipients {
        let mut kek = kdf::shared_key(&ephemeral, recipient);
        out.extend_from_slice(&wrap::wrap(&kek, &content_key));
        kek.zeroize();
    }
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);

    content_key.zeroize();
    Ok(out)
}

/// Opens a box sealed with [`seal_shared`], returning the plaintext iff `priv_key` is one of the
/// recipients' private keys and `sealed` was not altered.
pub fn open_shared(priv_key: &PrivateKey, sealed: &[u8]) -> Result<Vec<u8>, OpenError> {
    let (ephemeral_pub, count, wrapped_keys, nonce, body) = parse_header(sealed)?;
    let mut kek = kdf::shared_key(priv_key, &ephemeral_pub);

    let mut content_key = [0u8; SHARED_KEY_LEN];
    let mut found = Choice::from(0u8);

    for i in 0..count {
        let slot = &wrapped_keys[i * WRAPPED_KEY_LEN..(i + 1) * WRAPPED_KEY_LEN];
        let slot: [u8; WRAPPED_KEY_LEN] = slot.try_into().expect("split at fixed width");

        let (mut candidate, candidate_found) = match wrap::unwrap(&kek, &slot) {
            Some(ck) => (ck, Choice::from(1u8)),
            None => ([0u8; SHARED_KEY_LEN], Choice::from(0u8)),
        };

        let take = candidate_found & !found;
        content_key = conditional_select(&content_key, &candidate, take);
        found |= candidate_found;
        candidate.zeroize();
    }
    kek.zeroize();

    if !bool::from(found) {
        return Err(OpenError::InvalidCiphertext);
    }

    let plaintext = envelope::open(&content_key, &nonce, body).ok_or(OpenError::InvalidCiphertext);
    content_key.zeroize();
    plaintext
}

/// Signs `plaintext` under `sender_priv_key` and seals the signature and plaintext together for
/// every public key in `recipients`.
pub fn sign_and_seal_shared(
    mut rng: impl CryptoRngCore,
    sender_priv_key: &PrivateKey,
    recipients: &[PublicKey],
    plaintext: &[u8],
) -> Result<Vec<u8>, SealError> {
    let sig = signing::sign(&mut rng, sender_priv_key, plaintext);

    let mut payload = Vec::with_capacity(SIGNATURE_LEN + plaintext.len());
    payload.extend_from_slice(&sig);
    payload.extend_from_slice(plaintext);

    seal_shared(&mut rng, recipients, &payload)
}

/// Opens a box sealed with [`sign_and_seal_shared`], returning the plaintext iff it decrypts and
/// the embedded signature verifies under `sender_pub_key`.
pub fn open_shared_and_verify(
    priv_key: &PrivateKey,
    sender_pub_key: &PublicKey,
    sealed: &[u8],
) -> Result<Vec<u8>, OpenError> {
    let payload = open_shared(priv_key, sealed)?;
    if payload.len() < SIGNATURE_LEN {
        return Err(OpenError::InvalidCiphertext);
    }

    let (sig, message) = payload.split_at(SIGNATURE_LEN);
    let sig: [u8; SIGNATURE_LEN] = sig.try_into().expect("split at fixed width");

    if signing::verify(sender_pub_key, message, &sig) {
        Ok(message.to_vec())
    } else {
        Err(OpenError::InvalidCiphertext)
    }
}

type Header<'a> = (PublicKey, usize, &'a [u8], [u8; envelope::NONCE_LEN], &'a [u8]);

fn parse_header(sealed: &[u8]) -> Result<Header<'_>, OpenError> {
    if sealed.len() < PUBLIC_KEY_LEN + RECIPIENT_COUNT_LEN {
        return Err(OpenError::InvalidCiphertext);
    }

    let (ep, rest) = sealed.split_at(PUBLIC_KEY_LEN);
    let (count, rest) = rest.split_at(RECIPIENT_COUNT_LEN);

    let ephemeral_pub = PublicKey::from_bytes(ep).ok_or(OpenError::InvalidCiphertext)?;
    let count = u32::from_be_bytes(count.try_into().expect("split at fixed width")) as usize;

    let table_len = count.checked_mul(WRAPPED_KEY_LEN).ok_or(OpenError::InvalidCiphertext)?;
    let min_len = table_len.checked_add(envelope::NONCE_LEN).ok_or(OpenError::InvalidCiphertext)?;
    if rest.len() < min_len {
        return Err(OpenError::InvalidCiphertext);
    }

    let (wrapped_keys, rest) = rest.split_at(table_len);
    let (nonce, body) = rest.split_at(envelope::NONCE_LEN);
    let nonce: [u8; envelope::NONCE_LEN] = nonce.try_into().expect("split at fixed width");

    Ok((ephemeral_pub, count, wrapped_keys, nonce, body))
}

fn conditional_select(
    a: &[u8; SHARED_KEY_LEN],
    b: &[u8; SHARED_KEY_LEN],
    choice: Choice,
) -> [u8; SHARED_KEY_LEN] {
    let mut out = [0u8; SHARED_KEY_LEN];
    for i in 0..SHARED_KEY_LEN {
        out[i] = u8::conditional_select(&a[i], &b[i], choice);
    }
    out
}
