use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

// Type aliases
pub type Hash32 = [u8; 32];
pub type Ed25519PubKey = [u8; 32];
pub type Ed25519SecretKey = [u8; 32];
pub type Ed25519Signature = [u8; 64];
pub type CoreIndex = u16;
pub type SlotIndex = u32;
pub type EpochIndex = u32;
pub type Balance = u64;
pub type UnsignedGas = u64;
pub type ServiceId = String;

pub const HASH32_EMPTY: Hash32 = [0u8; 32];

/// SHA-256 over the canonical signable form of a work report.
///
/// Renders as a 64-character lowercase hex string; this is the key type of
/// every report bucket.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WorkDigest(pub Hash32);

impl WorkDigest {
    pub fn as_bytes(&self) -> &Hash32 {
        &self.0
    }
}

impl Display for WorkDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for WorkDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WorkDigest({})", hex::encode(self.0))
    }
}

impl FromStr for WorkDigest {
    type Err = HexIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(WorkDigest(parse_hex32(s)?))
    }
}

impl Serialize for WorkDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for WorkDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Guarantor identity: an Ed25519 public key rendered as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GuarantorId(pub Ed25519PubKey);

impl GuarantorId {
    pub fn as_bytes(&self) -> &Ed25519PubKey {
        &self.0
    }
}

impl Display for GuarantorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for GuarantorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GuarantorId({})", hex::encode(self.0))
    }
}

impl FromStr for GuarantorId {
    type Err = HexIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(GuarantorId(parse_hex32(s)?))
    }
}

impl Serialize for GuarantorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

impl<'de> Deserialize<'de> for GuarantorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Error parsing a 32-byte hex identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexIdError(pub String);

impl Display for HexIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "invalid 32-byte hex identifier: {}", self.0)
    }
}

impl std::error::Error for HexIdError {}

fn parse_hex32(s: &str) -> Result<Hash32, HexIdError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(stripped).map_err(|e| HexIdError(e.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| HexIdError(format!("expected 32 bytes, got {}", stripped.len() / 2)))
}
