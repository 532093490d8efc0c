#![warn(missing_docs)]

//! Stoutbox: asymmetric authenticated encryption over NIST P-521, in the spirit of NaCl's box.
//!
//! Every sealed message is readable only by its intended recipient(s): opening a box
//! authenticates the ciphertext as a whole, so a caller never gets back plaintext that was
//! tampered with, addressed to someone else, or forged. Messages can optionally carry a
//! signature from the sender, verified as part of opening.
//!
//! ```
//! use rand::rngs::OsRng;
//! use stoutbox::PrivateKey;
//!
//! // Alice and Bea each generate a key pair.
//! let alice = PrivateKey::random(OsRng);
//! let bea = PrivateKey::random(OsRng);
//!
//! // Alice signs and seals a message for Bea alone.
//! let sealed = stoutbox::sign_and_seal(OsRng, &alice, &bea.public_key(), b"this is a secret message")
//!     .expect("seal failed");
//!
//! // Bea opens it and verifies that it was Alice who signed it.
//! let plaintext = stoutbox::open_and_verify(&bea, &alice.public_key(), &sealed)
//!     .expect("open failed");
//! assert_eq!(b"this is a secret message".to_vec(), plaintext);
//! ```

pub use self::errors::{OpenError, SealError};
pub use self::kdf::shared_key;
pub use self::keys::{PrivateKey, PublicKey, PRIVATE_KEY_LEN, PUBLIC_KEY_LEN};
pub use self::mres::{open_shared, open_shared_and_verify, seal_shared, sign_and_seal_shared};
pub use self::signing::SIGNATURE_LEN;
pub use self::sres::{open, open_and_verify, seal, sign_and_seal, OVERHEAD};

mod envelope;
mod errors;
mod kdf;
mod keys;
mod mres;
mod signing;
mod sres;
mod wrap;
