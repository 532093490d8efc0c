//! P-521 key types and their SEC1 encodings.

use elliptic_curve::sec1::ToEncodedPoint;
use p521::{PublicKey as P521PublicKey, SecretKey as P521SecretKey};
use rand_core::CryptoRngCore;

/// The length in bytes of an encoded private key: a big-endian P-521 scalar.
pub const PRIVATE_KEY_LEN: usize = 66;

/// The length in bytes of an encoded public key: an uncompressed SEC1 point.
pub const PUBLIC_KEY_LEN: usize = 133;

/// A P-521 public key, including its canonical SEC1 encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey(pub(crate) P521PublicKey);

impl PublicKey {
    /// Decodes an uncompressed SEC1-encoded public key, rejecting points off the curve or at
    /// infinity.
    #[must_use]
    pub fn from_bytes(b: impl AsRef<[u8]>) -> Option<PublicKey> {
        P521PublicKey::from_sec1_bytes(b.as_ref()).ok().map(PublicKey)
    }

    /// Encodes the public key as an uncompressed SEC1 point: `0x04 ‖ X(66) ‖ Y(66)`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        let encoded = self.0.to_encoded_point(false);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(encoded.as_bytes());
        out
    }
}

/// A P-521 private key.
///
/// `PrivateKey` is the counterpart to a [`PublicKey`]; the public key is always recoverable from
/// the private one via [`PrivateKey::public_key`]. The underlying scalar zeroizes itself on drop.
#[derive(Clone)]
pub struct PrivateKey(pub(crate) P521SecretKey);

impl PrivateKey {
    /// Generates a new private key, drawing randomness from `rng`.
    #[must_use]
    pub fn random(mut rng: impl CryptoRngCore) -> PrivateKey {
        PrivateKey(P521SecretKey::random(&mut rng))
    }

    /// Decodes a 66-byte big-endian scalar as a private key, rejecting zero or out-of-range
    /// values.
    #[must_use]
    pub fn from_bytes(b: impl AsRef<[u8]>) -> Option<PrivateKey> {
        P521SecretKey::from_slice(b.as_ref()).ok().map(PrivateKey)
    }

    /// Encodes the private key as a 66-byte big-endian scalar.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LEN] {
        let mut out = [0u8; PRIVATE_KEY_LEN];
        out.copy_from_slice(self.0.to_bytes().as_slice());
        out
    }

    /// Derives the corresponding public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    use super::*;

    #[test]
    fn round_trip_public_key() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEAD_BEEF);
        let priv_key = PrivateKey::random(&mut rng);
        let pub_key = priv_key.public_key();

        let encoded = pub_key.to_bytes();
        assert_eq!(PUBLIC_KEY_LEN, encoded.len());
        assert_eq!(Some(pub_key), PublicKey::from_bytes(encoded));
    }

    #[test]
    fn round_trip_private_key() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEAD_BEEF);
        let priv_key = PrivateKey::random(&mut rng);

        let encoded = priv_key.to_bytes();
        assert_eq!(PRIVATE_KEY_LEN, encoded.len());
        assert_eq!(Some(priv_key), PrivateKey::from_bytes(encoded));
    }

    #[test]
    fn distinct_keys_are_unequal() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEAD_BEEF);
        let a = PrivateKey::random(&mut rng);
        let b = PrivateKey::random(&mut rng);
        assert_ne!(a, b);
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn rejects_garbage_public_key() {
        assert_eq!(None, PublicKey::from_bytes([0u8; PUBLIC_KEY_LEN]));
    }

    #[test]
    fn rejects_garbage_private_key() {
        assert_eq!(None, PrivateKey::from_bytes([0u8; PRIVATE_KEY_LEN]));
    }
}
