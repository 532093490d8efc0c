use thiserror::Error;

/// An error returned when sealing a message was unsuccessful.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum SealError {
    /// Sealing failed because the injected entropy source ran out of randomness.
    ///
    /// There is nothing else a caller can learn from a failed seal, by design.
    #[error("entropy source failed")]
    Rng,
}

/// An error returned when opening or verifying a box was unsuccessful.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum OpenError {
    /// Opening failed because the box did not authenticate.
    ///
    /// This single variant stands in for every possible cause: a box addressed to someone else,
    /// a tampered ciphertext, a malformed header, a bad signature, or a box shorter than the
    /// minimum overhead. Distinguishing between these would let an attacker use the error itself
    /// as an oracle, so every opening operation in this crate collapses them all into this one
    /// variant.
    #[error("invalid ciphertext")]
    InvalidCiphertext,
}
