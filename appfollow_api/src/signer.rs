//! Request signing.
//!
//! Every request carries `cid` and `sign`. The signature is the lowercase hex
//! MD5 of `key1=value1key2=value2...{path}{secret}`, with parameters sorted by
//! key in byte order and no separators anywhere. The server recomputes it, so
//! the concatenation must match exactly.

use std::fmt;

use md5::{Digest, Md5};

use crate::params::Params;
use crate::Error;

/// API credentials. Immutable for the lifetime of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    /// Reads `APPFOLLOW_CID` and `APPFOLLOW_SECRET`.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self::new(
            required_env("APPFOLLOW_CID")?,
            required_env("APPFOLLOW_SECRET")?,
        ))
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Computes the signature for `path` over `params`.
    ///
    /// `params` must already contain `cid` and must not contain `sign`.
    pub fn sign(&self, path: &str, params: &Params) -> String {
        let mut hasher = Md5::new();
        for (key, value) in params.iter() {
            hasher.update(key.as_bytes());
            hasher.update(b"=");
            hasher.update(value.to_string().as_bytes());
        }
        hasher.update(path.as_bytes());
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .finish()
    }
}

/// Joins list values with `,`. No escaping is applied.
pub fn list_to_csv<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",")
}

fn required_env(key: &str) -> Result<String, Error> {
    match std::env::var(key) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(Error::Config(format!("{} is not set", key))),
    }
}
