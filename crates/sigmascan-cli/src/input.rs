//! Loose CSV input: capped reading, a format gate and lenient number parsing.

use std::{
    borrow::Cow,
    io::{self, BufRead, Read as _},
};

use tracing::{debug, warn};

/// Value substituted for tokens that do not parse as a finite number.
pub(crate) const PLACEHOLDER: f64 = 0.0;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub(crate) enum InputError {
    #[display("Input data is not in CSV format.")]
    NotCsv,
}

/// Reads whole lines until EOF or until the next line would bring the
/// consumed input (newlines included) to `max_bytes` or beyond.
///
/// At most `max_bytes` bytes are pulled from `reader`. Invalid UTF-8 is
/// replaced with U+FFFD so the affected fields fall back to [`PLACEHOLDER`].
pub(crate) fn read_capped<R>(reader: R, max_bytes: usize) -> io::Result<String>
where
    R: BufRead,
{
    let mut limited = reader.take(u64::try_from(max_bytes).unwrap_or(u64::MAX));
    let mut text = String::new();
    let mut consumed = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if limited.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        // a line cut short by the limit always lands here
        if consumed + line.len() + 1 >= max_bytes {
            debug!(consumed, max_bytes, "input cap reached, ignoring remaining lines");
            break;
        }
        consumed += line.len() + 1;
        let decoded = String::from_utf8_lossy(&line);
        if matches!(decoded, Cow::Owned(_)) {
            warn!(line = %decoded, "input line is not valid UTF-8, replacing invalid bytes");
        }
        text.push_str(&decoded);
        text.push('\n');
    }
    Ok(text)
}

/// Accepts text with more than one comma-separated field and an even
/// number of double quotes.
///
/// Single-column numeric input is rejected and any text with one comma is
/// accepted; callers can bypass the check.
pub(crate) fn looks_like_csv(text: &str) -> bool {
    let num_fields = text.split(',').count() - usize::from(text.ends_with(','));
    let num_quotes = text.matches('"').count();
    num_fields > 1 && num_quotes % 2 == 0
}

pub(crate) fn check_format(text: &str) -> Result<(), InputError> {
    if looks_like_csv(text) {
        Ok(())
    } else {
        Err(InputError::NotCsv)
    }
}

/// Splits each line into raw comma-separated fields.
///
/// A trailing empty field is dropped, so `"1,2,"` has two fields and an empty
/// line has none.
pub(crate) fn split_records(text: &str) -> Vec<Vec<&str>> {
    text.lines()
        .map(|line| {
            let mut fields = line.split(',').collect::<Vec<_>>();
            if fields.last().is_some_and(|field| field.is_empty()) {
                fields.pop();
            }
            fields
        })
        .collect()
}

/// Parses one field, falling back to [`PLACEHOLDER`] for malformed or
/// out-of-range tokens.
pub(crate) fn parse_token(token: &str) -> f64 {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_infinite() && !trimmed.to_ascii_lowercase().contains("inf") => {
            warn!(token = trimmed, "numeric token out of range, using {PLACEHOLDER}");
            PLACEHOLDER
        }
        Ok(value) => value,
        Err(err) => {
            warn!(token = trimmed, %err, "invalid numeric token, using {PLACEHOLDER}");
            PLACEHOLDER
        }
    }
}

pub(crate) fn parse_records(records: &[Vec<&str>]) -> Vec<Vec<f64>> {
    records
        .iter()
        .map(|record| record.iter().map(|field| parse_token(field)).collect())
        .collect()
}

/// Concatenates records in row-major order.
pub(crate) fn flatten(records: &[Vec<f64>]) -> Vec<f64> {
    records.iter().flatten().copied().collect()
}
