//! The single-recipient box: seal and open a message for exactly one recipient.
//!
//! A single-recipient box is a broadcast box addressed to a recipient list of one, with the
//! per-recipient count omitted from the wire format since it is always one. See [`crate::mres`]
//! for the shared construction this is built on top of.

use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::envelope;
use crate::errors::{OpenError, SealError};
use crate::kdf::{self, SHARED_KEY_LEN};
use crate::keys::{PrivateKey, PublicKey, PUBLIC_KEY_LEN};
use crate::signing::{self, SIGNATURE_LEN};
use crate::wrap::{self, WRAPPED_KEY_LEN};

/// The number of bytes added to a plaintext of any length by [`seal`].
pub const OVERHEAD: usize = PUBLIC_KEY_LEN + WRAPPED_KEY_LEN + envelope::NONCE_LEN + envelope::MAC_LEN;

/// Seals `plaintext` for `recipient` alone.
///
/// The sender is anonymous: a fresh ephemeral key pair is generated for this call and discarded
/// afterward, and the content key is wrapped exactly once, under a key-encryption key derived
/// from the ephemeral private key and `recipient`.
pub fn seal(
    mut rng: impl CryptoRngCore,
    recipient: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, SealError> {
    let ephemeral = PrivateKey::random(&mut rng);

    let mut content_key = [0u8; SHARED_KEY_LEN];
    rng.try_fill_bytes(&mut content_key).map_err(|_| SealError::Rng)?;

    let mut nonce = [0u8; envelope::NONCE_LEN];
    rng.try_fill_bytes(&mut nonce).map_err(|_| SealError::Rng)?;

    let mut kek = kdf::shared_key(&ephemeral, recipient);
    let wrapped = wrap::wrap(&kek, &content_key);
    let sealed = envelope::seal(&content_key, &nonce, plaintext);
    kek.zeroize();
    content_key.zeroize();

    let mut out = Vec::with_capacity(plaintext.len() + OVERHEAD);
    out.extend_from_slice(&ephemeral.public_key().to_bytes());
    out.extend_from_slice(&wrapped);
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&sealed);
    Ok(out)
}

/// Opens a box sealed with [`seal`], returning the original plaintext iff `recipient_priv_key`
/// is the recipient's private key and `sealed` was not altered.
///
/// Every possible cause of failure — a box addressed to someone else, a tampered ciphertext, or
/// a malformed header — is collapsed into the single [`OpenError`] returned.
pub fn open(recipient_priv_key: &PrivateKey, sealed: &[u8]) -> Result<Vec<u8>, OpenError> {
    if sealed.len() < OVERHEAD {
        return Err(OpenError::InvalidCiphertext);
    }

    let (ep, rest) = sealed.split_at(PUBLIC_KEY_LEN);
    let (wrapped, rest) = rest.split_at(WRAPPED_KEY_LEN);
    let (nonce, body) = rest.split_at(envelope::NONCE_LEN);

    let ephemeral_pub = PublicKey::from_bytes(ep).ok_or(OpenError::InvalidCiphertext)?;
    let wrapped: [u8; WRAPPED_KEY_LEN] = wrapped.try_into().expect("split at fixed width");
    let nonce: [u8; envelope::NONCE_LEN] = nonce.try_into().expect("split at fixed width");

    let mut kek = kdf::shared_key(recipient_priv_key, &ephemeral_pub);
    let unwrapped = wrap::unwrap(&kek, &wrapped);
    kek.zeroize();
    let mut content_key = unwrapped.ok_or(OpenError::InvalidCiphertext)?;

    let plaintext = envelope::open(&content_key, &nonce, body).ok_or(OpenError::InvalidCiphertext);
    content_key.zeroize();
    plaintext
}

/// Signs `plaintext` under `sender_priv_key` and seals the signature and plaintext together for
/// `recipient`.
pub fn sign_and_seal(
    mut rng: impl CryptoRngCore,
    sender_priv_key: &PrivateKey,
    recipient: &PublicKey,
    plaintext: &[u8],
) -> Result<Vec<u8>, SealError> {
    let sig = signing::sign(&mut rng, sender_priv_key, plaintext);

    let mut payload = Vec::with_capacity(SIGNATURE_LEN + plaintext.len());
    payload.extend_from_slice(&sig);
    payload.extend_from_slice(plaintext);

    seal(&mut rng, recipient, &payload)
}

/// Opens a box sealed with [`sign_and_seal`], returning the plaintext iff it decrypts and the
/// embedded signature verifies under `sender_pub_key`.
pub fn open_and_verify(
    recipient_priv_key: &PrivateKey,
    sender_pub_key: &PublicKey,
    sealed: &[u8],
) -> Result<Vec<u8>, OpenError> {
    let payload = open(recipient_priv_key, sealed)?;
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
