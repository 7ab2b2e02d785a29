use thiserror::Error;

/// Every failure a request can run into.
///
/// The `Display` output of each variant is the message returned in-band to HTTP clients, so
/// it must stay stable. The extra fields are only for logging.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The requested node name is not in the endpoint table.
    #[error("Node name requested doesn't exist")]
    NotFound { name: String },

    /// A request parameter was missing or malformed. Raised before any channel is opened.
    #[error("{message}")]
    Validation { message: &'static str },

    /// The channel to the node could not be opened.
    #[error("Failed to establish connection using socket: {socket}")]
    Connection { socket: String, reason: String },

    /// The node answered the RPC call with a failure.
    #[error("Failed to retrieve {what}!")]
    Backend { what: &'static str, reason: String },

    /// An embedded binary payload or an encoded key/address could not be decoded.
    #[error("Failed to Unmarshal {what}!")]
    Decode { what: &'static str, reason: String },
}

pub const INVALID_HEIGHT_MESSAGE: &str =
    "Unexpected value found, height needs to be string of int!";
pub const MISSING_KEY_MESSAGE: &str = "No Consensus Key Provided";
pub const MISSING_ADDRESS_MESSAGE: &str = "No Address Provided";

impl GatewayError {
    pub fn not_found(name: &str) -> Self {
        GatewayError::NotFound {
            name: name.to_string(),
        }
    }

    pub fn validation(message: &'static str) -> Self {
        GatewayError::Validation { message }
    }

    pub fn connection(socket: &str, reason: impl ToString) -> Self {
        GatewayError::Connection {
            socket: socket.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn backend(what: &'static str, reason: impl ToString) -> Self {
        GatewayError::Backend {
            what,
            reason: reason.to_string(),
        }
    }

    pub fn decode(what: &'static str, reason: impl ToString) -> Self {
        GatewayError::Decode {
            what,
            reason: reason.to_string(),
        }
    }

    /// Short machine-friendly name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "not_found",
            GatewayError::Validation { .. } => "validation",
            GatewayError::Connection { .. } => "connection",
            GatewayError::Backend { .. } => "backend",
            GatewayError::Decode { .. } => "decode",
        }
    }

    /// Underlying cause, if the variant carries one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            GatewayError::Connection { reason, .. }
            | GatewayError::Backend { reason, .. }
            | GatewayError::Decode { reason, .. } => Some(reason),
            GatewayError::NotFound { .. } | GatewayError::Validation { .. } => None,
        }
    }
}
