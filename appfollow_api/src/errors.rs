//! Error types for the API client.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API reported a failure, either through a gateway status (502/504)
    /// or through an `error` object embedded in a successful response.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Any other non-success status, with its reason phrase and a body snippet.
    #[error("Request failed with status {status} {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: String,
    },
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Network error")]
    Network(#[from] reqwest::Error),
    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The response carried an `error` object without a usable `msg` and `code`.
    #[error("Malformed error object in response: {0}")]
    MalformedApiError(String),
    /// Client configuration is missing or invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the API error if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// HTTP status associated with this error, if any.
    ///
    /// Gateway errors report their status through [`ApiError::code`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// A failure reported by the AppFollow API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub code: i64,
    pub submessage: Option<String>,
    pub subcode: Option<Value>,
    pub params: Option<Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code,
            submessage: None,
            subcode: None,
            params: None,
        }
    }

    pub fn bad_gateway() -> Self {
        Self::new("Bad Gateway", 502)
    }

    pub fn gateway_timeout() -> Self {
        Self::new("Gateway Timeout", 504)
    }

    /// Builds an error from the `error` object of a response body.
    ///
    /// `msg` and `code` are required; `code` may arrive as a number or as a
    /// numeric string.
    pub fn from_error_object(value: &Value) -> Result<Self, Error> {
        let raw = RawApiError::deserialize(value)
            .map_err(|e| Error::MalformedApiError(format!("{}: {}", e, value)))?;
        let code = match raw.code {
            RawCode::Number(n) => n,
            RawCode::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                Error::MalformedApiError(format!("non-numeric code {:?}: {}", s, value))
            })?,
        };
        Ok(Self {
            message: raw.msg,
            code,
            submessage: raw.submsg,
            subcode: raw.subcode.filter(|v| !v.is_null()),
            params: raw.params.filter(|v| !v.is_null()),
        })
    }
}

impl fmt::Display for ApiError {
    /// Renders as `msg(code)`, then `, submsg(subcode)` when a submessage is
    /// present, then `, params: <json>` when params are non-empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.message, self.code)?;
        if let Some(submessage) = self.submessage.as_deref().filter(|s| !s.is_empty()) {
            match &self.subcode {
                Some(Value::String(s)) => write!(f, ", {}({})", submessage, s)?,
                Some(v) => write!(f, ", {}({})", submessage, v)?,
                None => write!(f, ", {}", submessage)?,
            }
        }
        if let Some(params) = self.params.as_ref().filter(|p| is_truthy(p)) {
            write!(f, ", params: {}", params)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Deserialize)]
struct RawApiError {
    msg: String,
    code: RawCode,
    #[serde(default)]
    submsg: Option<String>,
    #[serde(default)]
    subcode: Option<Value>,
    #[serde(default)]
    params: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(i64),
    Text(String),
}

/// Whether a JSON value counts as "set": null, false, zero, and empty
/// strings, arrays and objects do not.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
