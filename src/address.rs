//!
//! Address derivation.
//!
//! A consensus public key has two unrelated identities on the network:
//!
//! * the **Tendermint address**, used by the consensus layer to name validators in block
//!   headers and commits: the first 20 bytes of SHA-256 over the raw key.
//! * the **staking address**, used by the staking layer to name accounts: a version byte
//!   followed by the first 20 bytes of SHA-512/256 over `context || version || key`. It has
//!   a binary form (21 bytes, usually carried as base64) and a bech32 form under the
//!   `oasis` prefix. Both are encodings of the same value.
//!
//! Neither is derived from the other.
//!
use crate::crypto::{hash, sha256, PublicKey};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bech32::{FromBase32, ToBase32, Variant};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

pub const TENDERMINT_ADDRESS_SIZE: usize = 20;

pub const ADDRESS_VERSION_SIZE: usize = 1;
pub const ADDRESS_HASH_SIZE: usize = 20;
pub const ADDRESS_SIZE: usize = ADDRESS_VERSION_SIZE + ADDRESS_HASH_SIZE;

/// Human readable part of bech32 staking addresses.
pub const STAKING_ADDRESS_BECH32_HRP: &str = "oasis";

/// Context of version 0 staking account addresses.
pub const STAKING_ADDRESS_V0_CONTEXT: AddressContext = AddressContext {
    identifier: "oasis-core/address: staking",
    version: 0,
};

#[derive(Debug, Error, PartialEq)]
pub enum AddressError {
    #[error("malformed address: expected {ADDRESS_SIZE} bytes, got {0}")]
    Length(usize),
    #[error("malformed base64 address: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed bech32 address: {0}")]
    Bech32(#[from] bech32::Error),
    #[error("unexpected bech32 prefix {0:?}")]
    Prefix(String),
    #[error("address is not encoded with the original bech32 checksum")]
    Variant,
}

/// Domain separation for address hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressContext {
    pub identifier: &'static str,
    pub version: u8,
}

/// Consensus layer identity of a public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TendermintAddress([u8; TENDERMINT_ADDRESS_SIZE]);

impl TendermintAddress {
    pub fn from_public_key(public_key: &PublicKey) -> TendermintAddress {
        let digest = sha256(public_key.as_bytes());
        let mut address = [0u8; TENDERMINT_ADDRESS_SIZE];
        address.copy_from_slice(&digest[..TENDERMINT_ADDRESS_SIZE]);
        TendermintAddress(address)
    }

    pub fn as_bytes(&self) -> &[u8; TENDERMINT_ADDRESS_SIZE] {
        &self.0
    }
}

// Tendermint prints addresses as upper case hex.
impl fmt::Display for TendermintAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for TendermintAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TendermintAddress({})", self)
    }
}

impl Serialize for TendermintAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Staking layer identity: `version || truncated hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StakingAddress([u8; ADDRESS_SIZE]);

impl StakingAddress {
    /// Derive an address for `data` under `context`.
    pub fn new(context: &AddressContext, data: &[u8]) -> StakingAddress {
        let digest = hash(&[context.identifier.as_bytes(), &[context.version], data]);
        let mut address = [0u8; ADDRESS_SIZE];
        address[0] = context.version;
        address[ADDRESS_VERSION_SIZE..].copy_from_slice(&digest[..ADDRESS_HASH_SIZE]);
        StakingAddress(address)
    }

    /// Account address of an entity or node public key.
    pub fn from_public_key(public_key: &PublicKey) -> StakingAddress {
        StakingAddress::new(&STAKING_ADDRESS_V0_CONTEXT, public_key.as_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<StakingAddress, AddressError> {
        let address: [u8; ADDRESS_SIZE] = bytes
            .try_into()
            .map_err(|_| AddressError::Length(bytes.len()))?;
        Ok(StakingAddress(address))
    }

    pub fn from_base64(text: &str) -> Result<StakingAddress, AddressError> {
        let bytes = STANDARD.decode(text)?;
        StakingAddress::from_bytes(&bytes)
    }

    pub fn from_bech32(text: &str) -> Result<StakingAddress, AddressError> {
        let (hrp, data, variant) = bech32::decode(text)?;
        if hrp != STAKING_ADDRESS_BECH32_HRP {
            return Err(AddressError::Prefix(hrp));
        }
        if variant != Variant::Bech32 {
            return Err(AddressError::Variant);
        }
        let bytes = Vec::<u8>::from_base32(&data)?;
        StakingAddress::from_bytes(&bytes)
    }

    pub fn to_bech32(&self) -> Result<String, AddressError> {
        Ok(bech32::encode(
            STAKING_ADDRESS_BECH32_HRP,
            self.0.to_base32(),
            Variant::Bech32,
        )?)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn version(&self) -> u8 {
        self.0[0]
    }

    /// The truncated hash without the version byte.
    pub fn hash(&self) -> &[u8] {
        &self.0[ADDRESS_VERSION_SIZE..]
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }
}

impl fmt::Debug for StakingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StakingAddress({})", hex::encode(self.0))
    }
}

impl Serialize for StakingAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = self.to_bech32().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&encoded)
    }
}
