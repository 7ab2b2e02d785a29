use crate::address::StakingAddress;
use crate::crypto::PublicKey;
use crate::error::{
    GatewayError, INVALID_HEIGHT_MESSAGE, MISSING_ADDRESS_MESSAGE, MISSING_KEY_MESSAGE,
};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Wire value the node interprets as "the latest block".
pub const HEIGHT_LATEST: i64 = 0;

/// Block height requested by a client.
///
/// A malformed height never becomes a `Height`: [`Height::parse`] returns a validation error
/// instead, so an invalid value cannot reach a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Height {
    Latest,
    At(i64),
}

impl Height {
    /// Empty or absent input means latest, a non-negative integer is taken as is, anything
    /// else is rejected.
    pub fn parse(raw: Option<&str>) -> Result<Height, GatewayError> {
        match raw {
            None | Some("") => Ok(Height::Latest),
            Some(text) => match text.parse::<i64>() {
                Ok(height) if height >= 0 => Ok(Height::At(height)),
                _ => Err(GatewayError::validation(INVALID_HEIGHT_MESSAGE)),
            },
        }
    }

    pub fn to_wire(self) -> i64 {
        match self {
            Height::Latest => HEIGHT_LATEST,
            Height::At(height) => height,
        }
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Height::Latest => write!(f, "latest"),
            Height::At(height) => write!(f, "{}", height),
        }
    }
}

impl Serialize for Height {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_wire())
    }
}

pub fn parse_public_key(raw: Option<&str>) -> Result<PublicKey, GatewayError> {
    let text = match raw {
        None | Some("") => return Err(GatewayError::validation(MISSING_KEY_MESSAGE)),
        Some(text) => text,
    };
    PublicKey::from_text(text).map_err(|err| GatewayError::decode("Public Key", err))
}

/// Parses a base64 encoded binary staking address.
pub fn parse_address(raw: Option<&str>) -> Result<StakingAddress, GatewayError> {
    let text = match raw {
        None | Some("") => return Err(GatewayError::validation(MISSING_ADDRESS_MESSAGE)),
        Some(text) => text,
    };
    StakingAddress::from_base64(text).map_err(|err| GatewayError::decode("Address", err))
}

/// Query string of an incoming request.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(HashMap<String, String>);

impl QueryParams {
    pub fn new(params: HashMap<String, String>) -> Self {
        QueryParams(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn name(&self) -> &str {
        self.get("name").unwrap_or("")
    }

    pub fn height(&self) -> Result<Height, GatewayError> {
        Height::parse(self.get("height"))
    }

    pub fn public_key(&self) -> Result<PublicKey, GatewayError> {
        parse_public_key(self.get("consensus_public_key"))
    }

    pub fn address(&self) -> Result<StakingAddress, GatewayError> {
        parse_address(self.get("address"))
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(params: HashMap<String, String>) -> Self {
        QueryParams::new(params)
    }
}
