//! Strict percent-decoding of query keys and values.

use super::error::QueryError;

/// Percent-decodes `input`, rejecting broken escapes instead of passing them through.
///
/// A `%` must be followed by two hex digits, and the decoded bytes must form
/// valid UTF-8. With `plus_as_space`, a literal `+` decodes to a space
/// (`%2B` still decodes to `+`).
pub(super) fn percent_decode(input: &str, plus_as_space: bool) -> Result<String, QueryError> {
    if !input.contains('%') && !(plus_as_space && input.contains('+')) {
        return Ok(input.to_string());
    }

    let mut out = Vec::with_capacity(input.len());
    let mut bytes = input.bytes().enumerate();
    while let Some((pos, b)) = bytes.next() {
        match b {
            b'%' => {
                let high = bytes.next().and_then(|(_, h)| hex_digit(h));
                let low = bytes.next().and_then(|(_, l)| hex_digit(l));
                match (high, low) {
                    (Some(h), Some(l)) => out.push(h << 4 | l),
                    _ => {
                        return Err(QueryError::malformed(
                            input,
                            format!("invalid escape at byte {pos}"),
                        ))
                    }
                }
            }
            b'+' if plus_as_space => out.push(b' '),
            _ => out.push(b),
        }
    }

    String::from_utf8(out).map_err(|e| {
        QueryError::malformed(
            input,
            format!("decoded bytes are not UTF-8 (at byte {})", e.utf8_error().valid_up_to()),
        )
    })
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
