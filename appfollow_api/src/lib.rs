//! Async client for the AppFollow review-management and analytics API.
//!
//! Every call is a GET authenticated with the account's client id (`cid`)
//! and an MD5 `sign` over the sorted parameters, path and secret.

mod client;
mod config;
mod endpoints;
mod errors;
mod params;
mod signer;
pub use self::client::Client;
pub use self::config::{ClientConfig, API_URL};
pub use self::errors::{ApiError, Error};
pub use self::params::{Options, ParamValue, Params};
pub use self::signer::{list_to_csv, Credentials};
