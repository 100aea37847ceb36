//! Query-string codec: `key=value&...` text to an ordered mapping and back.
//!
//! Parsing drops any `#fragment`, looks only at the part of what is left after
//! the last `?` (all of it when there is none), and percent-decodes both keys
//! and values. Serialization percent-encodes keys and values and expands
//! sequence values into bracket-indexed keys (`tag[0]=a&tag[1]=b`). Arrays are
//! not rebuilt when parsing: `tag[0]` comes back as a literal key.

mod decode;
mod encode;
mod error;
mod mapping;
mod value;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::QstringConfig;
use crate::location::{LocationProvider, NoLocation};

pub use error::QueryError;
pub use mapping::{ParsedQuery, QueryMap, QueryMapping};
pub use value::{QueryValue, Scalar};

/// What to do with a key or value whose percent-encoding is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Return `QueryError::MalformedEncoding`.
    #[default]
    Fail,
    /// Keep the raw, undecoded text and log a warning.
    PassThrough,
}

/// Decoding options (the `[codec]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecOptions {
    #[serde(default)]
    pub malformed: MalformedPolicy,
    /// Decode a literal `+` as a space (HTML form convention).
    #[serde(default)]
    pub plus_as_space: bool,
}

/// A configured parser/serializer. The free functions in this module use the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryCodec {
    options: CodecOptions,
}

impl QueryCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn from_config(cfg: &QstringConfig) -> Self {
        Self::new(cfg.codec)
    }

    pub fn options(&self) -> CodecOptions {
        self.options
    }

    /// Parses `input`, or the provider's current location when `input` is absent or empty.
    ///
    /// A provider that has no location yields an empty mapping.
    pub fn parse<L>(&self, input: Option<&str>, location: &L) -> Result<ParsedQuery, QueryError>
    where
        L: LocationProvider + ?Sized,
    {
        match input.filter(|s| !s.is_empty()) {
            Some(s) => self.parse_str(s),
            None => {
                tracing::trace!("no query input given, asking location provider");
                match location.current_location() {
                    Some(href) => self.parse_str(&href),
                    None => Ok(QueryMap::new()),
                }
            }
        }
    }

    /// Parses an explicit string without consulting any location provider.
    pub fn parse_str(&self, input: &str) -> Result<ParsedQuery, QueryError> {
        let query = query_component(input);
        let mut out = QueryMap::new();
        if query.is_empty() {
            return Ok(out);
        }

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = self.decode(raw_key)?;
            let value = self.decode(raw_value)?;
            if let Some(old) = out.insert(key, value) {
                tracing::trace!(pair, overwritten = %old, "duplicate query key, last wins");
            }
        }

        tracing::debug!(keys = out.len(), "parsed query string");
        Ok(out)
    }

    fn decode(&self, raw: &str) -> Result<String, QueryError> {
        match decode::percent_decode(raw, self.options.plus_as_space) {
            Ok(s) => Ok(s),
            Err(e) => match self.options.malformed {
                MalformedPolicy::Fail => Err(e),
                MalformedPolicy::PassThrough => {
                    tracing::warn!("{e}; keeping raw text");
                    Ok(raw.to_string())
                }
            },
        }
    }

    /// Serializes a mapping; `None` and empty mappings produce `""`.
    pub fn stringify(&self, mapping: Option<&QueryMapping>) -> String {
        let Some(mapping) = mapping else {
            return String::new();
        };

        let mut pairs = Vec::with_capacity(mapping.len());
        for (key, value) in mapping.iter() {
            encode::push_pairs(&mut pairs, key, value);
        }
        tracing::debug!(pairs = pairs.len(), "stringified query mapping");
        pairs.join("&")
    }

    /// Like [`QueryCodec::stringify`], but prefixes a non-empty result with `?`.
    pub fn stringify_with_prefix(&self, mapping: Option<&QueryMapping>) -> String {
        with_prefix(self.stringify(mapping))
    }

    /// Serializes a JSON object. `null` counts as an absent mapping.
    pub fn stringify_json(&self, value: &Value) -> Result<String, QueryError> {
        if value.is_null() {
            return Ok(String::new());
        }
        let mapping = QueryMapping::from_json(value)?;
        Ok(self.stringify(Some(&mapping)))
    }

    /// Like [`QueryCodec::stringify_json`], but prefixes a non-empty result with `?`.
    pub fn stringify_json_with_prefix(&self, value: &Value) -> Result<String, QueryError> {
        self.stringify_json(value).map(with_prefix)
    }
}

fn with_prefix(qs: String) -> String {
    if qs.is_empty() {
        qs
    } else {
        format!("?{qs}")
    }
}

/// Drops any `#fragment`, then takes the substring after the last `?` (or all of it).
///
/// The fragment goes first since it may itself contain `?`.
fn query_component(input: &str) -> &str {
    let without_fragment = match input.split_once('#') {
        Some((head, _)) => head,
        None => input,
    };
    match without_fragment.rsplit_once('?') {
        Some((_, q)) => q,
        None => without_fragment,
    }
}

/// Parses with default options, falling back to `location` when `input` is absent or empty.
pub fn parse<L>(input: Option<&str>, location: &L) -> Result<ParsedQuery, QueryError>
where
    L: LocationProvider + ?Sized,
{
    QueryCodec::default().parse(input, location)
}

/// Parses an explicit string with default options.
pub fn parse_str(input: &str) -> Result<ParsedQuery, QueryError> {
    QueryCodec::default().parse(Some(input), &NoLocation)
}

/// Serializes with default options.
pub fn stringify(mapping: Option<&QueryMapping>) -> String {
    QueryCodec::default().stringify(mapping)
}

/// Serializes a JSON object with default options.
pub fn stringify_json(value: &Value) -> Result<String, QueryError> {
    QueryCodec::default().stringify_json(value)
}

/// Like [`stringify`], but prefixes a non-empty result with `?`.
pub fn stringify_with_prefix(mapping: Option<&QueryMapping>) -> String {
    QueryCodec::default().stringify_with_prefix(mapping)
}
