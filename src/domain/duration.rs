//! Duration domain type
//!
//! Provides a validated duration used for group intervals, alert `for`
//! periods and the datasource look-back window.

use crate::error::DurationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;

/// Longest fraction we keep; anything beyond is below nanosecond precision anyway
const MAX_FRACTION_DIGITS: usize = 18;

/// Duration written as a sequence of `<number><unit>` pairs, e.g. `30s`, `1h30m`, `1.5h`
///
/// Accepted units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
/// The bare string `0` is also accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HumanDuration(Duration);

impl HumanDuration {
    /// Zero-length duration
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Parse a duration string
    ///
    /// # Errors
    /// Returns `DurationError` if a number or unit is malformed or the result overflows
    pub fn parse(input: &str) -> Result<Self, DurationError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(DurationError::Empty);
        }
        if s == "0" {
            return Ok(Self::ZERO);
        }

        let invalid = || DurationError::Invalid(input.to_string());
        let mut total: u128 = 0;
        let mut rest = s;

        while !rest.is_empty() {
            let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let (int_part, after_int) = rest.split_at(int_len);

            let (frac_part, after_num) = match after_int.strip_prefix('.') {
                Some(tail) => {
                    let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                    tail.split_at(frac_len)
                }
                None => ("", after_int),
            };
            if int_part.is_empty() && frac_part.is_empty() {
                return Err(invalid());
            }

            let unit_len = after_num
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(after_num.len());
            let (unit, tail) = after_num.split_at(unit_len);
            if unit.is_empty() {
                return Err(DurationError::UnknownUnit {
                    unit: String::new(),
                    input: input.to_string(),
                });
            }
            let scale = unit_scale(unit).ok_or_else(|| DurationError::UnknownUnit {
                unit: unit.to_string(),
                input: input.to_string(),
            })?;

            let whole: u128 = if int_part.is_empty() {
                0
            } else {
                int_part
                    .parse()
                    .map_err(|_| DurationError::Overflow(input.to_string()))?
            };
            let mut value = whole
                .checked_mul(scale)
                .ok_or_else(|| DurationError::Overflow(input.to_string()))?;

            if !frac_part.is_empty() {
                let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS)];
                let numerator: u128 = digits.parse().map_err(|_| invalid())?;
                let denominator = 10u128.pow(digits.len() as u32);
                value += numerator * scale / denominator;
            }

            total = total
                .checked_add(value)
                .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
            rest = tail;
        }

        let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
        Ok(Self(Duration::from_nanos(nanos)))
    }

    /// Wrap a std duration
    pub const fn from_std(duration: Duration) -> Self {
        Self(duration)
    }

    /// Build from whole seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Get the underlying std duration
    #[inline]
    pub const fn as_std(&self) -> Duration {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

impl fmt::Display for HumanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();
        if nanos == 0 {
            return write!(f, "0s");
        }
        if nanos % NANOS_PER_SEC != 0 {
            return if nanos % NANOS_PER_MILLI == 0 {
                write!(f, "{}ms", nanos / NANOS_PER_MILLI)
            } else if nanos % NANOS_PER_MICRO == 0 {
                write!(f, "{}us", nanos / NANOS_PER_MICRO)
            } else {
                write!(f, "{}ns", nanos)
            };
        }

        let hours = nanos / NANOS_PER_HOUR;
        let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MIN;
        let seconds = (nanos % NANOS_PER_MIN) / NANOS_PER_SEC;
        if hours > 0 {
            write!(f, "{}h", hours)?;
        }
        if minutes > 0 {
            write!(f, "{}m", minutes)?;
        }
        if seconds > 0 {
            write!(f, "{}s", seconds)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for HumanDuration {
    type Err = DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HumanDuration {
    type Error = DurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HumanDuration> for String {
    fn from(duration: HumanDuration) -> Self {
        duration.to_string()
    }
}

impl From<HumanDuration> for Duration {
    fn from(duration: HumanDuration) -> Self {
        duration.0
    }
}
