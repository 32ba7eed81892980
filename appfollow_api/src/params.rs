//! Request parameters: scalar/list values, the signed parameter map, and the
//! pass-through [`Options`] builder accepted by most endpoints.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::signer::list_to_csv;

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    /// Sent as a comma-separated string. Elements must not contain commas.
    List(Vec<String>),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(n) => write!(f, "{}", n),
            ParamValue::List(items) => f.write_str(&list_to_csv(items)),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Text(value.clone())
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Integer(value as i64)
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Text(value.format("%Y-%m-%d").to_string())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(value: [&str; N]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Parameters of a single request, kept sorted by key (byte order).
///
/// Iteration order is the order used for signing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders every parameter as a `(key, value)` string pair, in key order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl From<&Options> for Params {
    fn from(options: &Options) -> Self {
        Params(options.0.clone())
    }
}

/// Optional arguments forwarded verbatim to the API.
///
/// Any key is accepted, so parameters the API adds later can be passed with
/// [`Options::with`]. The helpers cover the keys most endpoints document:
///
/// - `from`, `to`, `date`: date range or single day (`YYYY-MM-DD`)
/// - `page`: result page, 1-indexed
/// - `country`, `lang`: store country code and review language
/// - `device`: `iphone`, `ipad`, `android`, ...
/// - `store`: `itunes`, `gplay`, ...
///
/// `from` is held under the key `from_` and renamed on dispatch, so options
/// built either way sign and send identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<String, ParamValue>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter. A later call for the same key wins.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with_from(self, from: NaiveDate) -> Self {
        self.with("from_", from)
    }

    pub fn with_to(self, to: NaiveDate) -> Self {
        self.with("to", to)
    }

    pub fn with_date(self, date: NaiveDate) -> Self {
        self.with("date", date)
    }

    pub fn with_page(self, page: u32) -> Self {
        self.with("page", page)
    }

    pub fn with_country(self, country: &str) -> Self {
        self.with("country", country)
    }

    pub fn with_lang(self, lang: &str) -> Self {
        self.with("lang", lang)
    }

    pub fn with_device(self, device: &str) -> Self {
        self.with("device", device)
    }

    pub fn with_store(self, store: &str) -> Self {
        self.with("store", store)
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
