//! Opaque caller identities
//!
//! An `Identity` is a 20-byte account reference. Nothing inside it is
//! interpreted; it is only ever compared for equality. The all-zero value is
//! the null identity and is never a valid policy holder.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Number of bytes in an identity
pub const IDENTITY_LEN: usize = 20;

/// Errors raised when parsing an identity from text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity must be {expected} hex digits, got {actual}")]
    InvalidLength {
        expected: usize,
        actual: usize,
    },

    #[error("Invalid hex digit in identity: {0}")]
    InvalidHex(String),
}

/// An opaque, unforgeable caller reference
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// The null identity
    pub const ZERO: Identity = Identity([0u8; IDENTITY_LEN]);

    /// Creates an identity from raw bytes
    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Generates a fresh random identity
    pub fn random() -> Self {
        let mut bytes = [0u8; IDENTITY_LEN];
        let high = Uuid::new_v4();
        let low = Uuid::new_v4();
        bytes[..16].copy_from_slice(high.as_bytes());
        bytes[16..].copy_from_slice(&low.as_bytes()[..IDENTITY_LEN - 16]);
        Self(bytes)
    }

    /// Returns the raw bytes
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Returns true for the null identity
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; IDENTITY_LEN]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if hex.len() != IDENTITY_LEN * 2 {
            return Err(IdentityError::InvalidLength {
                expected: IDENTITY_LEN * 2,
                actual: hex.len(),
            });
        }

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(IdentityError::InvalidHex(s.to_string()));
        }

        let mut bytes = [0u8; IDENTITY_LEN];
        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks(2)) {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| IdentityError::InvalidHex(s.to_string()))?;
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| IdentityError::InvalidHex(pair.to_string()))?;
        }

        Ok(Self(bytes))
    }
}

impl From<[u8; IDENTITY_LEN]> for Identity {
    fn from(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Identity::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("Invalid identity {}: {}", s, e)))
    }
}
