//! `qstring parse` – print the key/value pairs of a query string.

use anyhow::Result;
use qstring_core::config::{OutputFormat, QstringConfig};
use qstring_core::{EnvLocation, FirstOf, LocationProvider, ParsedQuery, QueryCodec};
use std::borrow::Cow;

pub fn run_parse(cfg: &QstringConfig, input: Option<&str>, format: OutputFormat) -> Result<()> {
    let codec = QueryCodec::from_config(cfg);
    let from_env = EnvLocation::default();
    let from_config = || cfg.default_location.clone();
    let location = FirstOf(vec![&from_env as &dyn LocationProvider, &from_config]);

    let parsed = codec.parse(input, &location)?;
    print!("{}", render(&parsed, format)?);
    Ok(())
}

pub(crate) fn render(parsed: &ParsedQuery, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&parsed.to_json())?),
        OutputFormat::Lines => parsed
            .iter()
            .map(|(k, v)| format!("{}={}\n", escape_line_part(k), escape_line_part(v)))
            .collect(),
    };
    Ok(out)
}

/// Percent-escapes only what would make a `key=value` line ambiguous.
fn escape_line_part(s: &str) -> Cow<'_, str> {
    if !s.contains(['%', '=', '\n', '\r']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            '=' => out.push_str("%3D"),
            '\n' => out.push_str("%0A"),
            '\r' => out.push_str("%0D"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
