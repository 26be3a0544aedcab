use std::num::ParseIntError;

pub(crate) const KB: u64 = 1024;
pub(crate) const MB: u64 = KB << 10;
pub(crate) const GB: u64 = MB << 10;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("invalid byte count {input:?}")]
    Invalid { input: String, source: ParseIntError },
    #[error("invalid byte count {input:?}: must not be negative")]
    Negative { input: String },
    #[error("invalid byte count {input:?}: value out of range")]
    Overflow { input: String },
}

// parse_bytes converts strings like 4096, 10k, 512M or 1g into a number of bytes.
// suffix is a single character, anything else is left for the integer parser to reject.
pub(crate) fn parse_bytes(input: &str) -> Result<u64, ParseError> {
    let lowered = input.to_lowercase();
    let (digits, factor) = match lowered.as_bytes().last() {
        Some(b'k') => (&lowered[..lowered.len() - 1], KB),
        Some(b'm') => (&lowered[..lowered.len() - 1], MB),
        Some(b'g') => (&lowered[..lowered.len() - 1], GB),
        _ => (lowered.as_str(), 1),
    };
    let value = digits.parse::<i64>().map_err(|source| ParseError::Invalid {
        input: input.to_string(),
        source,
    })?;
    let value = u64::try_from(value).map_err(|_| ParseError::Negative {
        input: input.to_string(),
    })?;
    value.checked_mul(factor).ok_or_else(|| ParseError::Overflow {
        input: input.to_string(),
    })
}
