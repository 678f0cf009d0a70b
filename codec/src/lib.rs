//! Canonical byte encoding for hashing and signing.
//!
//! The canonical form is compact JSON over types that are deterministic by
//! construction: struct fields serialize in declaration order, every map is a
//! `BTreeMap` (sorted keys), integers are decimal, byte arrays render as
//! `0x`-prefixed lowercase hex strings, and no floating-point values exist in
//! the model. Two implementations agreeing on these rules produce
//! bit-identical encodings.

pub mod serde_utils;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("canonical encoding failed: {0}")]
    Encode(String),
    #[error("canonical decoding failed: {0}")]
    Decode(String),
}

/// Encodes a model value into its canonical byte sequence.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Parses a canonical byte sequence back into a model value.
pub fn from_canonical_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}
