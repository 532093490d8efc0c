//! Key agreement: turning a private key and a peer's public key into a shared symmetric key.

use p521::ecdh::diffie_hellman;
use sha2::{Digest, Sha384};

use crate::keys::{PrivateKey, PublicKey};

/// The length in bytes of a derived shared key.
pub const SHARED_KEY_LEN: usize = 48;

/// Computes the shared key for a private key and a peer's public key.
///
/// This is `SHA-384(X)`, where `X` is the big-endian 66-byte X-coordinate of the ECDH shared
/// point `d·P`. Downstream, the first 32 bytes serve as an AES-256 key and the full 48 bytes
/// serve as an HMAC-SHA-384 key. Exposed publicly so callers can independently derive the same
/// key two key-holders would share, outside of a seal/open call.
pub fn shared_key(priv_key: &PrivateKey, pub_key: &PublicKey) -> [u8; SHARED_KEY_LEN] {
    let shared = diffie_hellman(&priv_key.0.to_nonzero_scalar(), pub_key.0.as_affine());

    let mut digest = Sha384::new();
    digest.update(shared.raw_secret_bytes());
    digest.finalize().into()
}
