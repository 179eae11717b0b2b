//! Exact decimal-string arithmetic.
//!
//! Prices and amounts cross the wire as decimal strings, and venues reject
//! requests whose notional values carry binary floating-point noise
//! (`0.1 + 0.2 != 0.30000000000000004`). [`Precise`] represents a decimal
//! string as an arbitrary-size integer plus a fractional-digit count and
//! performs `add`, `sub`, `mul`, `div`, `abs`, `neg`, `min`, `max` without
//! any rounding beyond the explicitly requested division scale.
//!
//! The string-level helpers ([`Precise::string_add`] and friends) are the
//! usual entry point: parse, operate, reduce trailing zeros, format.
//!
//! # Example
//!
//! ```rust
//! use uniex_core::precise::Precise;
//!
//! # fn main() -> uniex_core::Result<()> {
//! assert_eq!(Precise::string_add("0.1", "0.2")?, "0.3");
//! assert_eq!(Precise::string_mul("0.01", "50000")?, "500");
//! assert_eq!(Precise::string_div("1", "3")?, "0.333333333333333333");
//! assert!(Precise::string_div("1", "0").is_err());
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};

/// Arbitrary-precision decimal value: `integer × 10^(-decimals)`.
#[derive(Debug, Clone)]
pub struct Precise {
    integer: BigInt,
    decimals: u32,
}

impl Precise {
    /// Fractional digits produced by [`Precise::div`] unless the caller
    /// requests otherwise. Deep enough that realistic price/amount ratios
    /// never truncate to zero.
    pub const DEFAULT_DIV_SCALE: u32 = 18;

    /// Parse a decimal string, including scientific notation (`1e-8`,
    /// `2.5E+3`) and an optional leading sign.
    pub fn new(value: &str) -> Result<Self> {
        let v = value.trim();
        if v.is_empty() {
            return Err(Error::arithmetic("empty decimal string"));
        }

        let (mantissa, exponent) = match v.find(['e', 'E']) {
            Some(pos) => {
                let exp = v[pos + 1..]
                    .parse::<i32>()
                    .map_err(|_| Error::arithmetic(format!("invalid exponent in '{v}'")))?;
                (&v[..pos], exp)
            }
            None => (v, 0),
        };

        let (digits, frac_len) = match mantissa.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.contains('.') {
                    return Err(Error::arithmetic(format!("invalid decimal string '{value}'")));
                }
                (format!("{int_part}{frac_part}"), frac_part.len() as i32)
            }
            None => (mantissa.to_string(), 0),
        };

        let integer = BigInt::from_str(&digits)
            .map_err(|_| Error::arithmetic(format!("invalid decimal string '{value}'")))?;

        Ok(Self::from_parts(integer, frac_len - exponent))
    }

    /// Build from a raw integer and signed fractional-digit count. A negative
    /// count (from positive exponents) is folded into the integer.
    pub fn from_parts(integer: BigInt, decimals: i32) -> Self {
        if decimals < 0 {
            Self {
                integer: integer * pow10(decimals.unsigned_abs()),
                decimals: 0,
            }
        } else {
            Self {
                integer,
                decimals: decimals as u32,
            }
        }
    }

    /// True when the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.integer.is_zero()
    }

    /// True when the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.integer.is_negative()
    }

    /// Exact sum.
    pub fn add(&self, other: &Self) -> Self {
        let decimals = self.decimals.max(other.decimals);
        let a = &self.integer * pow10(decimals - self.decimals);
        let b = &other.integer * pow10(decimals - other.decimals);
        Self {
            integer: a + b,
            decimals,
        }
        .reduce()
    }

    /// Exact difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Exact product.
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            integer: &self.integer * &other.integer,
            decimals: self.decimals + other.decimals,
        }
        .reduce()
    }

    /// Quotient truncated to `scale` fractional digits.
    ///
    /// # Errors
    ///
    /// [`Error::Arithmetic`] when `other` is zero.
    pub fn div(&self, other: &Self, scale: u32) -> Result<Self> {
        if other.integer.is_zero() {
            return Err(Error::arithmetic("division by zero"));
        }
        // Scale the numerator so the truncating BigInt division lands on
        // exactly `scale` fractional digits.
        let distance = scale as i64 - i64::from(self.decimals) + i64::from(other.decimals);
        let numerator = match distance.cmp(&0) {
            Ordering::Equal => self.integer.clone(),
            Ordering::Greater => &self.integer * pow10(distance as u32),
            Ordering::Less => &self.integer / pow10(distance.unsigned_abs() as u32),
        };
        Ok(Self {
            integer: numerator / &other.integer,
            decimals: scale,
        }
        .reduce())
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self {
            integer: self.integer.abs(),
            decimals: self.decimals,
        }
    }

    /// Negation.
    pub fn neg(&self) -> Self {
        Self {
            integer: -&self.integer,
            decimals: self.decimals,
        }
    }

    /// The smaller of the two values.
    pub fn min(&self, other: &Self) -> Self {
        if self.cmp_value(other) == Ordering::Greater {
            other.clone()
        } else {
            self.clone()
        }
    }

    /// The larger of the two values.
    pub fn max(&self, other: &Self) -> Self {
        if self.cmp_value(other) == Ordering::Less {
            other.clone()
        } else {
            self.clone()
        }
    }

    /// Strip trailing fractional zeros (`"1.2300"` → `"1.23"`).
    pub fn reduce(mut self) -> Self {
        if self.integer.is_zero() {
            self.decimals = 0;
            return self;
        }
        let ten = BigInt::from(10);
        while self.decimals > 0 && (&self.integer % &ten).is_zero() {
            self.integer /= &ten;
            self.decimals -= 1;
        }
        self
    }

    fn cmp_value(&self, other: &Self) -> Ordering {
        let decimals = self.decimals.max(other.decimals);
        let a = &self.integer * pow10(decimals - self.decimals);
        let b = &other.integer * pow10(decimals - other.decimals);
        a.cmp(&b)
    }

    // ==================== String-level API ====================

    /// `a + b` on decimal strings.
    pub fn string_add(a: &str, b: &str) -> Result<String> {
        Ok(Self::new(a)?.add(&Self::new(b)?).to_string())
    }

    /// `a - b` on decimal strings.
    pub fn string_sub(a: &str, b: &str) -> Result<String> {
        Ok(Self::new(a)?.sub(&Self::new(b)?).to_string())
    }

    /// `a × b` on decimal strings.
    pub fn string_mul(a: &str, b: &str) -> Result<String> {
        Ok(Self::new(a)?.mul(&Self::new(b)?).to_string())
    }

    /// `a ÷ b` on decimal strings at the default scale.
    pub fn string_div(a: &str, b: &str) -> Result<String> {
        Self::string_div_scale(a, b, Self::DEFAULT_DIV_SCALE)
    }

    /// `a ÷ b` on decimal strings, truncated to `scale` fractional digits.
    pub fn string_div_scale(a: &str, b: &str, scale: u32) -> Result<String> {
        Ok(Self::new(a)?.div(&Self::new(b)?, scale)?.to_string())
    }

    /// `|a|` on a decimal string.
    pub fn string_abs(a: &str) -> Result<String> {
        Ok(Self::new(a)?.abs().reduce().to_string())
    }

    /// `-a` on a decimal string.
    pub fn string_neg(a: &str) -> Result<String> {
        Ok(Self::new(a)?.neg().reduce().to_string())
    }

    /// The smaller of two decimal strings, reformatted canonically.
    pub fn string_min(a: &str, b: &str) -> Result<String> {
        Ok(Self::min(&Self::new(a)?, &Self::new(b)?).reduce().to_string())
    }

    /// The larger of two decimal strings, reformatted canonically.
    pub fn string_max(a: &str, b: &str) -> Result<String> {
        Ok(Self::max(&Self::new(a)?, &Self::new(b)?).reduce().to_string())
    }

    /// Value equality of two decimal strings (`"1.0" == "1"`).
    pub fn string_eq(a: &str, b: &str) -> Result<bool> {
        Ok(Self::new(a)?.cmp_value(&Self::new(b)?) == Ordering::Equal)
    }
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10).pow(exp)
}

impl fmt::Display for Precise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.integer.is_negative() { "-" } else { "" };
        let digits = self.integer.abs().to_string();
        if self.decimals == 0 {
            return write!(f, "{sign}{digits}");
        }
        let decimals = self.decimals as usize;
        if digits.len() <= decimals {
            // Pure fraction: left-pad with zeros ("1", 8) -> "0.00000001".
            write!(f, "{sign}0.{digits:0>decimals$}")
        } else {
            let split = digits.len() - decimals;
            write!(f, "{sign}{}.{}", &digits[..split], &digits[split..])
        }
    }
}

impl PartialEq for Precise {
    fn eq(&self, other: &Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }
}

impl Eq for Precise {}

impl PartialOrd for Precise {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Precise {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_value(other)
    }
}

impl FromStr for Precise {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
