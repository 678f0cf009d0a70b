pub mod ed25519;
pub mod error;
pub mod hash;

pub use ed25519::{sign_message, verify_signature};
pub use error::CryptoError;
pub use hash::{hash, Hasher, Sha256};
