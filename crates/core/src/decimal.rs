use crate::error::{CoreError, CoreResult};
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Number of decimal places kept by [`Decimal::checked_div`].
pub const DIV_SCALE: u32 = 20;

/// Largest exponent magnitude accepted in `1e<exp>` notation.
pub const MAX_EXPONENT: u64 = 512;

/// Rounding applied when a decimal loses fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundingMode {
    /// Toward zero
    Down,
    /// Away from zero when the dropped part is at least one half
    HalfUp,
    /// To the even neighbour when the dropped part is exactly one half
    HalfEven,
    /// Away from zero whenever something is dropped
    Up,
}

/// Arbitrary-precision decimal number: `value * 10^-scale`.
///
/// Token amounts on chain are integers in micro units and routinely exceed
/// what an `f64` represents exactly, so every amount and rate goes through
/// this type.
#[derive(Clone, Debug)]
pub struct Decimal {
    value: BigInt,
    scale: u32,
}

fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

impl Decimal {
    /// Creates a new `Decimal` instance.
    ///
    /// # Arguments
    ///
    /// * `value` - The unscaled integer value.
    /// * `scale` - The number of decimal places of `value`.
    pub fn new(value: BigInt, scale: u32) -> Self {
        Self { value, scale }
    }

    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    pub fn one() -> Self {
        Self::new(BigInt::one(), 0)
    }

    /// The unscaled integer value.
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// The number of decimal places.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.value.is_negative()
    }

    pub fn abs(&self) -> Self {
        Self::new(self.value.abs(), self.scale)
    }

    /// Multiplies by `10^-exp` without touching the digits.
    pub fn shift_left(&self, exp: u32) -> Self {
        Self::new(self.value.clone(), self.scale + exp)
    }

    /// Multiplies by `10^exp`.
    pub fn shift_right(&self, exp: u32) -> Self {
        if self.scale >= exp {
            Self::new(self.value.clone(), self.scale - exp)
        } else {
            Self::new(&self.value * pow10(exp - self.scale), 0)
        }
    }

    /// Re-expresses the number with exactly `scale` decimal places.
    ///
    /// Returns an error when digits would be lost, as `change_decimals` does
    /// for fixed-point token amounts.
    pub fn with_scale(&self, scale: u32) -> CoreResult<Self> {
        match self.scale.cmp(&scale) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Less => Ok(Self::new(
                &self.value * pow10(scale - self.scale),
                scale,
            )),
            Ordering::Greater => {
                let (quotient, remainder) = self.value.div_rem(&pow10(self.scale - scale));
                if !remainder.is_zero() {
                    return Err(CoreError::PrecisionLoss(self.to_string(), scale));
                }
                Ok(Self::new(quotient, scale))
            }
        }
    }

    /// Drops trailing fractional zeros.
    pub fn normalized(&self) -> Self {
        if self.value.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u32);
        let mut value = self.value.clone();
        let mut scale = self.scale;
        while scale > 0 {
            let (quotient, remainder) = value.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            value = quotient;
            scale -= 1;
        }
        Self::new(value, scale)
    }

    /// Rounds to `dp` decimal places.
    pub fn round(&self, dp: u32, mode: RoundingMode) -> Self {
        if self.scale <= dp {
            return self.clone();
        }
        let divisor = pow10(self.scale - dp);
        let (quotient, remainder) = self.value.div_rem(&divisor);
        let quotient = Self::round_quotient(quotient, &remainder, &divisor, &self.value, mode);
        Self::new(quotient, dp)
    }

    fn round_quotient(
        quotient: BigInt,
        remainder: &BigInt,
        divisor: &BigInt,
        sign_source: &BigInt,
        mode: RoundingMode,
    ) -> BigInt {
        if remainder.is_zero() {
            return quotient;
        }
        let twice = remainder.abs() * 2u32;
        let divisor = divisor.abs();
        let away = match mode {
            RoundingMode::Down => false,
            RoundingMode::Up => true,
            RoundingMode::HalfUp => twice >= divisor,
            RoundingMode::HalfEven => match twice.cmp(&divisor) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => quotient.is_odd(),
            },
        };
        if !away {
            return quotient;
        }
        if sign_source.sign() == Sign::Minus {
            quotient - 1
        } else {
            quotient + 1
        }
    }

    /// Divides, keeping [`DIV_SCALE`] decimal places rounded half up.
    pub fn checked_div(&self, other: &Decimal) -> CoreResult<Decimal> {
        if other.is_zero() {
            return Err(CoreError::DivisionByZero);
        }
        // self / other = (a / b) * 10^(s2 - s1); bring it to DIV_SCALE places
        let exp = DIV_SCALE as i64 + other.scale as i64 - self.scale as i64;
        let (numerator, denominator) = if exp >= 0 {
            (self.value.abs() * pow10(exp as u32), other.value.abs())
        } else {
            (self.value.abs(), other.value.abs() * pow10((-exp) as u32))
        };
        let (quotient, remainder) = numerator.div_rem(&denominator);
        let quotient = Self::round_quotient(
            quotient,
            &remainder,
            &denominator,
            &BigInt::one(),
            RoundingMode::HalfUp,
        );
        let negative = self.is_negative() != other.is_negative();
        let value = if negative { -quotient } else { quotient };
        Ok(Self::new(value, DIV_SCALE))
    }

    /// Integer part after rounding toward zero.
    pub fn trunc(&self) -> BigInt {
        self.round(0, RoundingMode::Down).value
    }

    /// Fixed-point rendering with exactly `dp` decimal places.
    pub fn to_fixed(&self, dp: u32, mode: RoundingMode) -> String {
        let rounded = self.round(dp, mode);
        let fixed = Self::new(&rounded.value * pow10(dp - rounded.scale), dp);
        fixed.render()
    }

    fn render(&self) -> String {
        let digits = self.value.abs().to_string();
        let scale = self.scale as usize;
        let body = if scale == 0 {
            digits
        } else {
            let padded = format!("{:0>width$}", digits, width = scale + 1);
            let (int_part, frac_part) = padded.split_at(padded.len() - scale);
            format!("{}.{}", int_part, frac_part)
        };
        if self.value.is_negative() {
            format!("-{}", body)
        } else {
            body
        }
    }

    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (self.value.clone(), other.value.clone(), self.scale),
            Ordering::Less => (
                &self.value * pow10(other.scale - self.scale),
                other.value.clone(),
                other.scale,
            ),
            Ordering::Greater => (
                self.value.clone(),
                &other.value * pow10(self.scale - other.scale),
                self.scale,
            ),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized().render())
    }
}

impl FromStr for Decimal {
    type Err = CoreError;

    /// Parses plain (`-12.5`) and exponent (`1.5e-3`) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidDecimal(s.to_string());
        let trimmed = s.trim();

        let (mantissa, exponent) = match trimmed.find(['e', 'E']) {
            Some(index) => (
                &trimmed[..index],
                trimmed[index + 1..].parse::<i64>().map_err(|_| invalid())?,
            ),
            None => (trimmed, 0),
        };

        let (negative, unsigned) = match mantissa.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
        };

        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut value = BigInt::from_str(&format!("0{}{}", int_part, frac_part))
            .map_err(|_| invalid())?;
        if exponent.unsigned_abs() > MAX_EXPONENT {
            return Err(invalid());
        }
        let frac_len = i64::try_from(frac_part.len()).map_err(|_| invalid())?;
        let mut scale = frac_len.checked_sub(exponent).ok_or_else(invalid)?;
        if scale < 0 {
            let shift = scale.checked_neg().ok_or_else(invalid)?;
            value *= pow10(u32::try_from(shift).map_err(|_| invalid())?);
            scale = 0;
        }
        let scale = u32::try_from(scale).map_err(|_| invalid())?;
        if negative {
            value = -value;
        }
        Ok(Self::new(value, scale))
    }
}

impl From<u64> for Decimal {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl<'a> Add<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn add(self, rhs: &'a Decimal) -> Decimal {
        let (left, right, scale) = self.aligned(rhs);
        Decimal::new(left + right, scale)
    }
}

impl<'a> Sub<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &'a Decimal) -> Decimal {
        let (left, right, scale) = self.aligned(rhs);
        Decimal::new(left - right, scale)
    }
}

impl<'a> Mul<&'a Decimal> for &'a Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &'a Decimal) -> Decimal {
        Decimal::new(&self.value * &rhs.value, self.scale + rhs.scale)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.value, self.scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (left, right, _) = self.aligned(other);
        left.cmp(&right)
    }
}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let normalized = self.normalized();
        normalized.value.hash(state);
        normalized.scale.hash(state);
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Integer(u64),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Repr::Integer(value) => Ok(Decimal::from(value)),
        }
    }
}
