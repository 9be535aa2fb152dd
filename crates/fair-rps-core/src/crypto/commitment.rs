//! Commitment key and HMAC tag for the commit-reveal scheme.
//!
//! tag = HMAC-SHA256(key, message)

use crate::error::GameError;
use hmac::{Hmac, Mac};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

type HmacSha256 = Hmac<Sha256>;

/// Key length in bytes (256 bits)
pub const KEY_LEN: usize = 32;

/// Tag length in bytes (SHA-256 output)
pub const TAG_LEN: usize = 32;

/// Secret HMAC key for one round
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentKey(#[serde(with = "hex32")] [u8; KEY_LEN]);

impl CommitmentKey {
    /// Draw a fresh key from a cryptographically secure source.
    ///
    /// A failing source is reported as [`GameError::Entropy`]; there is no
    /// fallback to a weaker generator.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        let mut bytes = [0u8; KEY_LEN];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| GameError::Entropy(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Hex encoding of the key, for the player to verify the tag
    pub fn reveal(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for CommitmentKey {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex32::decode(s).map(Self)
    }
}

// Never print key material through Debug.
impl fmt::Debug for CommitmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentKey(<sealed>)")
    }
}

/// HMAC-SHA256 tag over the committed message
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitmentTag(#[serde(with = "hex32")] [u8; TAG_LEN]);

impl CommitmentTag {
    /// Compute the tag for a key and message
    pub fn compute(key: &CommitmentKey, message: &[u8]) -> Self {
        let mut mac = Self::mac(key);
        mac.update(message);
        Self(mac.finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Check that `key` and `message` produce this tag (constant-time compare)
    pub fn verify(&self, key: &CommitmentKey, message: &[u8]) -> bool {
        let mut mac = Self::mac(key);
        mac.update(message);
        mac.verify_slice(&self.0).is_ok()
    }

    fn mac(key: &CommitmentKey) -> HmacSha256 {
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length")
    }
}

impl FromStr for CommitmentTag {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex32::decode(s).map(Self)
    }
}

impl fmt::Debug for CommitmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitmentTag({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for CommitmentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

mod hex32 {
    use crate::error::GameError;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn decode(s: &str) -> Result<[u8; 32], GameError> {
        let bytes = hex::decode(s.trim()).map_err(|e| GameError::MalformedHex(e.to_string()))?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map_err(|_| GameError::MalformedHex(format!("expected 32 bytes, got {}", bytes.len())))
    }

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        decode(&hex_str).map_err(serde::de::Error::custom)
    }
}
