//! ECDSA-P-521 signing and verification, applied over plaintext before it enters the envelope.

use p521::ecdsa::{Signature, SigningKey, VerifyingKey};
use rand_core::CryptoRngCore;
use signature::{RandomizedSigner, Verifier};

use crate::keys::{PrivateKey, PublicKey};

/// The length in bytes of a fixed-width ECDSA-P-521 signature: `r ‖ s`, 66 bytes each.
pub const SIGNATURE_LEN: usize = 132;

/// Signs `message` with `priv_key`, drawing the per-signature nonce from `rng`.
pub(crate) fn sign(
    mut rng: impl CryptoRngCore,
    priv_key: &PrivateKey,
    message: &[u8],
) -> [u8; SIGNATURE_LEN] {
    let signing_key = SigningKey::from(priv_key.0.to_nonzero_scalar());
    let sig: Signature = signing_key.sign_with_rng(&mut rng, message);

    let encoded = sig.to_bytes();
    let mut out = [0u8; SIGNATURE_LEN];
    out.copy_from_slice(encoded.as_slice());
    out
}

/// Verifies that `sig` is a valid ECDSA-P-521 signature over `message` by `pub_key`.
///
/// Rejects malformed signatures (wrong length, `r` or `s` out of range) the same way it rejects
/// a mismatched signature: by returning `false`.
pub(crate) fn verify(pub_key: &PublicKey, message: &[u8], sig: &[u8; SIGNATURE_LEN]) -> bool {
    let Ok(sig) = Signature::from_slice(sig) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_affine(*pub_key.0.as_affine()) else {
        return false;
    };

    verifying_key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;

    #[test]
    fn round_trip() {
        let mut rng = ChaChaRng::seed_from_u64(0xFEED_FACE);
        let priv_key = PrivateKey::random(&mut rng);
        let pub_key = priv_key.public_key();
        let message = b"a message worth signing";

        let sig = sign(&mut rng, &priv_key, message);
        assert!(verify(&pub_key, message, &sig));
    }

    #[test]
    fn wrong_key_fails() {
        let mut rng = ChaChaRng::seed_from_u64(0xFEED_FACE);
        let priv_key = PrivateKey::random(&mut rng);
        let other_pub_key = PrivateKey::random(&mut rng).public_key();
        let message = b"a message worth signing";

        let sig = sign(&mut rng, &priv_key, message);
        assert!(!verify(&other_pub_key, message, &sig));
    }

    #[test]
    fn tampered_message_fails() {
        let mut rng = ChaChaRng::seed_from_u64(0xFEED_FACE);
        let priv_key = PrivateKey::random(&mut rng);
        let pub_key = priv_key.public_key();

        let sig = sign(&mut rng, &priv_key, b"a message worth signing");
        assert!(!verify(&pub_key, b"a message worth forging", &sig));
    }

    #[test]
    fn tampered_signature_fails() {
        let mut rng = ChaChaRng::seed_from_u64(0xFEED_FACE);
        let priv_key = PrivateKey::random(&mut rng);
        let pub_key = priv_key.public_key();
        let message = b"a message worth signing";

        let mut sig = sign(&mut rng, &priv_key, message);
        sig[0] ^= 1;
        assert!(!verify(&pub_key, message, &sig));
    }
}
