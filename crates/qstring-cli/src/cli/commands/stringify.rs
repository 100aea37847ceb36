//! `qstring stringify` – build a query string from a JSON object.

use anyhow::{Context, Result};
use qstring_core::config::QstringConfig;
use qstring_core::QueryCodec;

pub fn run_stringify(cfg: &QstringConfig, json: &str, prefix: bool) -> Result<()> {
    println!("{}", build(&QueryCodec::from_config(cfg), json, prefix)?);
    Ok(())
}

pub(crate) fn build(codec: &QueryCodec, json: &str, prefix: bool) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json).context("input is not valid JSON")?;
    let qs = if prefix {
        codec.stringify_json_with_prefix(&value)?
    } else {
        codec.stringify_json(&value)?
    };
    Ok(qs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_plain_and_prefixed() {
        let codec = QueryCodec::default();
        assert_eq!(build(&codec, r#"{"a":["x","y"]}"#, false).unwrap(), "a%5B0%5D=x&a%5B1%5D=y");
        assert_eq!(build(&codec, r#"{"q":"a b"}"#, true).unwrap(), "?q=a%20b");
        assert_eq!(build(&codec, "{}", true).unwrap(), "");
    }

    #[test]
    fn build_rejects_bad_input() {
        let codec = QueryCodec::default();
        assert!(build(&codec, "not json", false).is_err());
        assert!(build(&codec, r#"{"a":{"b":1}}"#, false).is_err());
    }
}
