use crate::error::CryptoError;
use jr_common::Hash32;
use sha2::Digest;

pub type Sha256 = sha2::Sha256;

/// Trait for different types of hasher
pub trait Hasher {
    fn hash(value: &[u8]) -> Result<Hash32, CryptoError>;
}

impl Hasher for Sha256 {
    fn hash(value: &[u8]) -> Result<Hash32, CryptoError> {
        let mut hasher = Self::new();
        hasher.update(value);
        let result = hasher.finalize();
        result
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::Sha256HashError)
    }
}

/// Generic hash function
pub fn hash<H: Hasher>(value: &[u8]) -> Result<Hash32, CryptoError> {
    H::hash(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_empty_input() {
        let digest = hash::<Sha256>(b"").unwrap();
        assert_eq!(
            hex::encode(digest),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_is_stable_for_fixed_input() {
        let first = hash::<Sha256>(b"work report").unwrap();
        let second = hash::<Sha256>(b"work report").unwrap();
        assert_eq!(first, second);
        assert_ne!(first, hash::<Sha256>(b"work report!").unwrap());
    }
}
