//! Localized numeric input.
//!
//! The calculator forms format numbers the Turkish way as the user types:
//! `.` groups thousands and `,` is the decimal mark (`1.234.567,89`).
//! Plain machine input (`1234567.89`) is accepted as well.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::money::round_money;

/// Errors raised while parsing localized numeric input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Input was empty or only whitespace.
    #[error("Empty numeric input")]
    Empty,

    /// Input contained a character that is not a digit, sign, or separator.
    #[error("Invalid character '{0}' in numeric input")]
    InvalidCharacter(char),

    /// More than one decimal mark.
    #[error("Multiple decimal marks in numeric input")]
    MultipleDecimalMarks,

    /// Thousands separators not placed every three digits.
    #[error("Misplaced thousands separator in numeric input")]
    MisplacedGrouping,

    /// Value does not fit in a decimal.
    #[error("Numeric input out of range")]
    OutOfRange,
}

/// Parses a number typed into a formatted input field.
///
/// A comma is always the decimal mark. Without a comma, dots are grouping
/// separators when there are several of them, or when a single dot is
/// followed by exactly three digits and preceded by a non-zero group
/// (`250.000`). Otherwise a single dot is a decimal point (`2.99`).
pub fn parse_localized(input: &str) -> Result<Decimal, NumericError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumericError::Empty);
    }

    let (negative, body) = match trimmed.as_bytes()[0] {
        b'-' => (true, &trimmed[1..]),
        b'+' => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if body.is_empty() {
        return Err(NumericError::Empty);
    }
    if let Some(c) = body
        .chars()
        .find(|c| !c.is_ascii_digit() && *c != '.' && *c != ',')
    {
        return Err(NumericError::InvalidCharacter(c));
    }

    let (integer, fraction) = split_decimal_mark(body)?;
    let digits = ungroup(integer)?;
    if digits.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(NumericError::Empty);
    }

    let mut canonical = String::with_capacity(body.len() + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if digits.is_empty() { "0" } else { &digits });
    if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    Decimal::from_str(&canonical).map_err(|_| NumericError::OutOfRange)
}

/// Splits the body into integer and fractional parts.
fn split_decimal_mark(body: &str) -> Result<(&str, Option<&str>), NumericError> {
    let commas = body.matches(',').count();
    if commas > 1 {
        return Err(NumericError::MultipleDecimalMarks);
    }
    if commas == 1 {
        let (integer, fraction) = body.split_once(',').unwrap_or((body, ""));
        if fraction.contains('.') {
            return Err(NumericError::MisplacedGrouping);
        }
        return Ok((integer, Some(fraction)));
    }

    let dots = body.matches('.').count();
    if dots == 1 {
        let (integer, fraction) = body.split_once('.').unwrap_or((body, ""));
        let grouped = fraction.len() == 3 && !integer.is_empty() && !integer.starts_with('0');
        if !grouped {
            return Ok((integer, Some(fraction)));
        }
    }
    Ok((body, None))
}

/// Removes thousands separators, checking they sit every three digits.
fn ungroup(integer: &str) -> Result<String, NumericError> {
    if !integer.contains('.') {
        return Ok(integer.to_string());
    }

    let mut groups = integer.split('.');
    let head = groups.next().unwrap_or_default();
    if head.is_empty() || head.len() > 3 || head.starts_with('0') {
        return Err(NumericError::MisplacedGrouping);
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return Err(NumericError::MisplacedGrouping);
        }
        digits.push_str(group);
    }
    Ok(digits)
}

/// Formats an amount the way the calculator forms display it.
///
/// Rounds with Banker's Rounding to `decimal_places`, groups thousands with
/// `.` and uses `,` as the decimal mark.
#[must_use]
pub fn format_localized(value: Decimal, decimal_places: u32) -> String {
    let rounded = round_money(value, decimal_places);
    let plain = format!("{:.*}", decimal_places as usize, rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut out = String::with_capacity(plain.len() + integer.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Numeric request field that accepts a JSON number or a localized string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalInput(pub Decimal);

impl DecimalInput {
    /// Returns the parsed value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for DecimalInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(Decimal),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => parse_localized(&text)
                .map(Self)
                .map_err(serde::de::Error::custom),
            Raw::Number(value) => Ok(Self(value)),
        }
    }
}
