//! Query-string codec: parse URL search strings into ordered mappings and
//! serialize mappings back into query strings.

pub mod codec;
pub mod config;
pub mod location;
pub mod logging;

pub use codec::{
    parse, parse_str, stringify, stringify_json, stringify_with_prefix, CodecOptions,
    MalformedPolicy, ParsedQuery, QueryCodec, QueryError, QueryMap, QueryMapping, QueryValue,
    Scalar,
};
pub use location::{EnvLocation, FirstOf, LocationProvider, NoLocation, StaticLocation};
