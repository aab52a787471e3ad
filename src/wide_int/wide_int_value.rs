use super::WideIntError;
use std::fmt;

/// An exact signed 64-bit integer as it appears on the wire.
///
/// The wire format defines 64-bit fields as two's-complement quantities, and
/// callers routinely exchange them as decimal or hexadecimal strings. This
/// type guarantees lossless round-trips through both string forms and gives
/// access to the `(high, low)` 32-bit halves for codecs that serialize the
/// raw bit pattern.
///
/// Values are immutable once constructed. Equality and ordering follow the
/// signed 64-bit numeric order of the underlying bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WideInt(i64);

impl WideInt {
    pub const ZERO: WideInt = WideInt(0);
    pub const MIN: WideInt = WideInt(i64::MIN);
    pub const MAX: WideInt = WideInt(i64::MAX);

    /// Wraps a native signed 64-bit value.
    pub const fn from_native(value: i64) -> Self {
        WideInt(value)
    }

    /// Reassembles a value from its two's-complement 32-bit halves.
    pub const fn from_halves(high: u32, low: u32) -> Self {
        WideInt((((high as u64) << 32) | (low as u64)) as i64)
    }

    /// Upper 32 bits of the two's-complement representation.
    pub const fn high(&self) -> u32 {
        ((self.0 as u64) >> 32) as u32
    }

    /// Lower 32 bits of the two's-complement representation.
    pub const fn low(&self) -> u32 {
        self.0 as u64 as u32
    }

    /// The native signed 64-bit value.
    pub const fn to_native(&self) -> i64 {
        self.0
    }

    /// Parses a base-10 string, with an optional leading `-` or `+`.
    ///
    /// Digits accumulate through checked multiply/add steps, so a magnitude
    /// beyond the signed 64-bit range fails with
    /// [`WideIntError::OutOfRange`] exactly at the boundary (`i64::MIN`
    /// itself parses). Anything other than ASCII digits after the sign fails
    /// with [`WideIntError::InvalidDigit`].
    pub fn from_decimal_string(input: &str) -> Result<Self, WideIntError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WideIntError::Empty);
        }

        let (negative, digits) = if let Some(rest) = input.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = input.strip_prefix('+') {
            (false, rest)
        } else {
            (false, input)
        };
        if digits.is_empty() {
            return Err(WideIntError::Empty);
        }

        // Accumulate on the negative side so that i64::MIN, whose magnitude
        // has no positive counterpart, still parses.
        let mut acc: i64 = 0;
        for ch in digits.chars() {
            let digit = ch.to_digit(10).ok_or(WideIntError::InvalidDigit)? as i64;
            acc = acc
                .checked_mul(10)
                .and_then(|v| v.checked_sub(digit))
                .ok_or(WideIntError::OutOfRange)?;
        }

        if negative {
            Ok(WideInt(acc))
        } else {
            acc.checked_neg().map(WideInt).ok_or(WideIntError::OutOfRange)
        }
    }

    /// Parses a base-16 string, with an optional `0x`/`0X` prefix and an
    /// optional leading `-`.
    ///
    /// An unsigned input is taken as the raw two's-complement bit pattern,
    /// so all sixteen digits are usable (`0xffffffffffffffff` is `-1`). A
    /// negated input is treated as a magnitude and must fit the signed
    /// range.
    pub fn from_hex(input: &str) -> Result<Self, WideIntError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(WideIntError::Empty);
        }

        let (negative, rest) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let rest = rest
            .strip_prefix("0x")
            .or_else(|| rest.strip_prefix("0X"))
            .unwrap_or(rest);
        if rest.is_empty() {
            return Err(WideIntError::Empty);
        }
        if !rest.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(WideIntError::InvalidDigit);
        }

        let significant = rest.trim_start_matches('0');
        if significant.len() > 16 {
            return Err(WideIntError::OutOfRange);
        }

        let bits = u64::from_str_radix(rest, 16).map_err(|_| WideIntError::OutOfRange)?;
        if negative {
            if bits > (1u64 << 63) {
                return Err(WideIntError::OutOfRange);
            }
            Ok(WideInt((bits as i64).wrapping_neg()))
        } else {
            Ok(WideInt(bits as i64))
        }
    }

    /// Canonical base-10 representation: no leading zeros except for the
    /// literal `0`, leading `-` for negatives.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    /// Associated-function form of [`WideInt::to_decimal_string`].
    pub fn decimal_string(value: WideInt) -> String {
        value.to_decimal_string()
    }

    /// Lowercase hexadecimal form of the raw two's-complement bit pattern,
    /// with a `0x` prefix.
    pub fn to_hex_string(&self) -> String {
        format!("{:#x}", self.0 as u64)
    }
}

impl fmt::Display for WideInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WideInt {
    fn from(value: i64) -> Self {
        WideInt(value)
    }
}

impl From<WideInt> for i64 {
    fn from(value: WideInt) -> Self {
        value.0
    }
}
