//! Micro-denominated notation
//!
//! Chain amounts are integers in micro units (`uusd`, `uluna`, ...). These
//! helpers convert between micro and display units and render amounts the
//! way receipts show them.

use crate::decimal::{Decimal, RoundingMode};
use std::fmt;

/// Decimal places between a micro unit and its display unit.
pub const MICRO_DECIMALS: u32 = 6;

/// Number of micro units in one display unit.
pub const MICRO: u64 = 1_000_000;

/// Decimal places shown for every token amount.
pub const TOKEN_DECIMAL_POINTS: u32 = 6;

/// Amounts at or above `10^MILLION_EXP` are shown in millions.
const MILLION_EXP: u32 = 6;

/// Tokens that appear in Anchor receipts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Ust,
    AUst,
    Luna,
    BLuna,
}

impl Token {
    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Token::Ust => "UST",
            Token::AUst => "aUST",
            Token::Luna => "Luna",
            Token::BLuna => "bLuna",
        }
    }

    /// Native denom, `None` for cw20 tokens
    pub fn native_denom(&self) -> Option<&'static str> {
        match self {
            Token::Ust => Some("uusd"),
            Token::Luna => Some("uluna"),
            Token::AUst | Token::BLuna => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Micro amount to display amount (`100000000` -> `100`).
pub fn demicrofy(amount: &Decimal) -> Decimal {
    amount.shift_left(MICRO_DECIMALS)
}

/// Display amount to micro amount (`1.5` -> `1500000`).
pub fn microfy(amount: &Decimal) -> Decimal {
    amount.shift_right(MICRO_DECIMALS)
}

/// Integer micro amount sent on chain; sub-micro digits are dropped.
pub fn micro_amount_string(amount: &Decimal) -> String {
    microfy(amount).to_fixed(0, RoundingMode::Down)
}

/// Normalizes user input to the six places a token amount carries.
pub fn format_token_input(amount: &Decimal) -> String {
    amount.to_fixed(MICRO_DECIMALS, RoundingMode::Down)
}

fn insert_delimiters(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Fixed decimal places, rounded down, with optional thousands delimiter.
pub fn format_decimal(n: &Decimal, decimal_points: u32, delimiter: bool) -> String {
    let fixed = n.to_fixed(decimal_points, RoundingMode::Down);
    if delimiter {
        insert_delimiters(&fixed)
    } else {
        fixed
    }
}

/// At most `decimal_points` places, rounded down, trailing zeros removed.
pub fn format_fluid_decimal_points(n: &Decimal, decimal_points: u32, delimiter: bool) -> String {
    let fluid = n
        .round(decimal_points, RoundingMode::Down)
        .normalized()
        .to_string();
    if delimiter {
        insert_delimiters(&fluid)
    } else {
        fluid
    }
}

pub fn format_ust(n: &Decimal) -> String {
    format_decimal(n, TOKEN_DECIMAL_POINTS, true)
}

pub fn format_aust(n: &Decimal) -> String {
    format_decimal(n, TOKEN_DECIMAL_POINTS, true)
}

pub fn format_luna(n: &Decimal) -> String {
    format_decimal(n, TOKEN_DECIMAL_POINTS, true)
}

pub fn format_basset(n: &Decimal) -> String {
    format_decimal(n, TOKEN_DECIMAL_POINTS, true)
}

fn with_postfix_units(n: &Decimal, format: fn(&Decimal) -> String) -> String {
    let million = Decimal::one().shift_right(MILLION_EXP);
    if n.abs() >= million {
        format!("{}M", format(&n.shift_left(MILLION_EXP)))
    } else {
        format(n)
    }
}

/// `format_ust`, switching to millions (`1.500000M`) for large amounts.
pub fn format_ust_with_postfix_units(n: &Decimal) -> String {
    with_postfix_units(n, format_ust)
}

pub fn format_aust_with_postfix_units(n: &Decimal) -> String {
    with_postfix_units(n, format_aust)
}

pub fn format_luna_with_postfix_units(n: &Decimal) -> String {
    with_postfix_units(n, format_luna)
}

pub fn format_basset_with_postfix_units(n: &Decimal) -> String {
    with_postfix_units(n, format_basset)
}

/// Display-unit formatter for a token, postfix units included.
pub fn format_token_with_postfix_units(token: Token, n: &Decimal) -> String {
    match token {
        Token::Ust => format_ust_with_postfix_units(n),
        Token::AUst => format_aust_with_postfix_units(n),
        Token::Luna => format_luna_with_postfix_units(n),
        Token::BLuna => format_basset_with_postfix_units(n),
    }
}
