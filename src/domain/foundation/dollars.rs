//! Dollar amount value object and its text codec.
//!
//! Amounts are whole dollars. Display strings use a compact `$500K` / `$2.5M`
//! form; user input accepts that form as well as plain and comma-grouped digits.
//! Parsing never fails: anything unrecognized reads as zero, and callers treat
//! zero as "no amount entered yet".

use serde::{Deserialize, Serialize};
use std::fmt;

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;

/// A non-negative whole-dollar amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DollarAmount(u64);

impl DollarAmount {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a number of dollars.
    pub fn new(dollars: u64) -> Self {
        Self(dollars)
    }

    /// Parses user input, returning zero for anything malformed.
    pub fn parse(input: &str) -> Self {
        Self(parse_dollars(input))
    }

    /// Returns the number of dollars.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for DollarAmount {
    fn from(dollars: u64) -> Self {
        Self(dollars)
    }
}

impl fmt::Display for DollarAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_dollars(self.0))
    }
}

/// Formats an amount as `$<n>K` below one million and `$<n>M` otherwise.
///
/// The quotient is rounded to one decimal place and a trailing `.0` is dropped.
/// Zero renders as plain `$0`.
pub fn format_dollars(n: u64) -> String {
    if n == 0 {
        return "$0".to_string();
    }
    let (divisor, suffix) = if n >= MILLION {
        (MILLION, 'M')
    } else {
        (THOUSAND, 'K')
    };
    let tenths = (u128::from(n) * 10 + u128::from(divisor) / 2) / u128::from(divisor);
    let whole = tenths / 10;
    let frac = tenths % 10;
    if frac == 0 {
        format!("${}{}", whole, suffix)
    } else {
        format!("${}.{}{}", whole, frac, suffix)
    }
}

/// Parses a dollar string entered by a user.
///
/// Accepted forms, each with an optional leading `$`:
/// - a number with a `K` or `M` suffix (`1.5M`), truncated to whole dollars
/// - comma-grouped digits (`1,500,000`)
/// - plain digits (`1500000`)
/// - the empty string
///
/// Every other input yields 0.
pub fn parse_dollars(input: &str) -> u64 {
    let s = input.strip_prefix('$').unwrap_or(input);
    let parsed = if let Some(number) = s.strip_suffix('K') {
        scaled(number, 3)
    } else if let Some(number) = s.strip_suffix('M') {
        scaled(number, 6)
    } else if s.contains(',') {
        grouped(s)
    } else if s.is_empty() {
        Some(0)
    } else {
        digits(s)
    };
    parsed.unwrap_or(0)
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Multiplies a decimal literal by `10^exponent`, truncating exactly.
fn scaled(number: &str, exponent: usize) -> Option<u64> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let whole = if whole.is_empty() { 0 } else { digits(whole)? };
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Digits past the exponent fall below one dollar and are truncated.
    let mut kept: String = frac.chars().take(exponent).collect();
    while kept.len() < exponent {
        kept.push('0');
    }
    let frac = kept.parse::<u64>().ok()?;

    whole.checked_mul(10u64.pow(exponent as u32))?.checked_add(frac)
}

fn grouped(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.split(',').collect();
    let first_ok = (1..=3).contains(&parts[0].len());
    let rest_ok = parts[1..].iter().all(|p| p.len() == 3);
    if !first_ok || !rest_ok {
        return None;
    }
    digits(&parts.concat())
}
