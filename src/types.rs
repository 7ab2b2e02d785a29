use crate::error::GatewayError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ciborium::value::Value;
use serde::Deserialize;
use serde_json::{json, Map, Number, Value as JsonValue};

/// A consensus block as returned by the node.
///
/// Only `height` and `meta` are interpreted; the rest is relayed untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Block {
    pub height: i64,
    pub hash: Value,
    pub time: Value,
    pub state_root: Value,
    pub meta: Value,
}

/// Tendermint specific block metadata carried in [`Block::meta`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockMeta {
    pub header: Value,
    pub last_commit: Value,
}

impl Block {
    /// Decode the embedded metadata.
    ///
    /// Older nodes carry it as a CBOR byte string, newer ones inline it as a CBOR map.
    pub fn decode_meta(&self) -> Result<BlockMeta, GatewayError> {
        let meta = match &self.meta {
            Value::Bytes(raw) => ciborium::de::from_reader::<BlockMeta, _>(raw.as_slice())
                .map_err(|err| GatewayError::decode("Block Metadata", err))?,
            Value::Map(_) => self
                .meta
                .deserialized::<BlockMeta>()
                .map_err(|err| GatewayError::decode("Block Metadata", err))?,
            _ => {
                return Err(GatewayError::decode(
                    "Block Metadata",
                    "block meta is neither a byte string nor a map",
                ))
            }
        };
        Ok(meta)
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "height": self.height,
            "hash": cbor_to_json(&self.hash),
            "time": cbor_to_json(&self.time),
            "state_root": cbor_to_json(&self.state_root),
            "meta": cbor_to_json(&self.meta),
        })
    }
}

/// Render a CBOR value as JSON for relaying to HTTP clients.
///
/// Byte strings become standard base64, integers outside the 64 bit range become decimal
/// strings, tags are dropped and non-text map keys are rendered as compact JSON text.
pub fn cbor_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Integer(integer) => {
            let integer = i128::from(*integer);
            if let Ok(small) = i64::try_from(integer) {
                JsonValue::Number(small.into())
            } else if let Ok(large) = u64::try_from(integer) {
                JsonValue::Number(large.into())
            } else {
                JsonValue::String(integer.to_string())
            }
        }
        Value::Bytes(bytes) => JsonValue::String(STANDARD.encode(bytes)),
        Value::Float(float) => Number::from_f64(*float)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Text(text) => JsonValue::String(text.clone()),
        Value::Bool(flag) => JsonValue::Bool(*flag),
        Value::Null => JsonValue::Null,
        Value::Tag(_, inner) => cbor_to_json(inner),
        Value::Array(items) => JsonValue::Array(items.iter().map(cbor_to_json).collect()),
        Value::Map(entries) => {
            let mut object = Map::with_capacity(entries.len());
            for (key, value) in entries {
                let key = match key {
                    Value::Text(text) => text.clone(),
                    other => cbor_to_json(other).to_string(),
                };
                object.insert(key, cbor_to_json(value));
            }
            JsonValue::Object(object)
        }
        // Value is non-exhaustive
        _ => JsonValue::Null,
    }
}
