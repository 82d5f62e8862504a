use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version string attached to envelopes the gateway originates.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request envelope.
///
/// The `id` is kept as raw JSON: callers use numbers, strings, or null, and
/// the gateway echoes back whatever it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// The request id, echoed in the response.
    #[serde(default)]
    pub id: Value,
    /// The method name.
    pub method: String,
    /// Positional parameters.
    #[serde(default)]
    pub params: Vec<Value>,
    /// The protocol version. Absent fields stay off the wire.
    #[serde(rename = "jsonrpc", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl JsonRpcRequest {
    /// Create a versioned request.
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
            version: Some(JSONRPC_VERSION.to_owned()),
        }
    }
}

/// A JSON-RPC response envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// The id of the request being answered.
    #[serde(default)]
    pub id: Value,
    /// The result payload, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// The error payload. A JSON `null` deserializes to `None`, so any
    /// `Some` here is a real error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    /// Free-form message some servers attach alongside `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    /// The protocol version.
    #[serde(rename = "jsonrpc", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl JsonRpcResponse {
    /// A successful response carrying `result` for the request `id`.
    pub fn result_for(id: Value, result: impl Into<Value>) -> Self {
        Self {
            id,
            result: Some(result.into()),
            version: Some(JSONRPC_VERSION.to_owned()),
            ..Default::default()
        }
    }

    /// An error response with a standard `{code, message}` error object.
    pub fn error_for(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            error: Some(serde_json::json!({ "code": code, "message": message.into() })),
            version: Some(JSONRPC_VERSION.to_owned()),
            ..Default::default()
        }
    }
}
