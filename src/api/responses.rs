use crate::error::GatewayError;
use serde::Serialize;
use serde_json::Value as JsonValue;

pub const PONG: &str = "pong";

#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub result: T,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&GatewayError> for ErrorResponse {
    fn from(err: &GatewayError) -> Self {
        ErrorResponse {
            error: err.to_string(),
        }
    }
}

/// Wrap a handler outcome in the response envelope. The HTTP status is always 200.
pub fn reply(result: &Result<JsonValue, GatewayError>) -> warp::reply::Json {
    match result {
        Ok(value) => warp::reply::json(&SuccessResponse { result: value }),
        Err(err) => warp::reply::json(&ErrorResponse::from(err)),
    }
}
