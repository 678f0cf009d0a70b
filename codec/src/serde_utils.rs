//! Serde helpers rendering fixed-size byte arrays as `0x`-prefixed hex.
//!
//! Deserialization tolerates a missing `0x` prefix.

use serde::{de::Error, Deserialize, Deserializer, Serializer};

/// For fields of type `[u8; N]`: `#[serde(with = "jr_codec::serde_utils::hex_array")]`.
pub mod hex_array {
    use super::*;

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_fixed(&s).map_err(D::Error::custom)
    }
}

/// For fields of type `Option<[u8; N]>`.
pub mod hex_option {
    use super::*;

    pub fn serialize<S, const N: usize>(
        bytes: &Option<[u8; N]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(bytes) => serializer.serialize_some(&format!("0x{}", hex::encode(bytes))),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, const N: usize>(
        deserializer: D,
    ) -> Result<Option<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| super::decode_fixed(&s).map_err(D::Error::custom))
            .transpose()
    }
}

/// For fields of type `Vec<[u8; N]>`.
pub mod hex_seq {
    use super::*;

    pub fn serialize<S, const N: usize>(
        items: &[[u8; N]],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(items.iter().map(|bytes| format!("0x{}", hex::encode(bytes))))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<Vec<[u8; N]>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| super::decode_fixed(s).map_err(D::Error::custom))
            .collect()
    }
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], String> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| e.to_string())?;
    bytes
        .try_into()
        .map_err(|v: Vec<u8>| format!("expected {} bytes, got {}", N, v.len()))
}
