use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256, Sha512_256};
use std::fmt;
use thiserror::Error;

pub const HASH_SIZE: usize = 32;
pub const PUBLIC_KEY_SIZE: usize = 32;

pub type Hash = [u8; HASH_SIZE];

/// SHA-512/256 over the concatenation of `parts`. This is the ledger's native hash.
pub fn hash(parts: &[&[u8]]) -> Hash {
    let mut hasher = Sha512_256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; HASH_SIZE];
    output.copy_from_slice(hasher.finalize().as_slice());
    output
}

/// Plain SHA-256, used by the Tendermint consensus layer.
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut output = [0u8; HASH_SIZE];
    output.copy_from_slice(hasher.finalize().as_slice());
    output
}

#[derive(Debug, Error, PartialEq)]
pub enum PublicKeyError {
    #[error("malformed base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed public key: expected {PUBLIC_KEY_SIZE} bytes, got {0}")]
    Length(usize),
}

/// An Ed25519 consensus public key.
///
/// The text form is standard base64 of the 32 raw key bytes, which is how nodes print keys
/// in their genesis documents and status output.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, PublicKeyError> {
        let key: [u8; PUBLIC_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| PublicKeyError::Length(bytes.len()))?;
        Ok(PublicKey(key))
    }

    pub fn from_text(text: &str) -> Result<PublicKey, PublicKeyError> {
        let bytes = STANDARD.decode(text)?;
        PublicKey::from_bytes(&bytes)
    }

    pub fn to_text(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Canonical binary form: the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}
