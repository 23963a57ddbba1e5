//! Display currencies.
//!
//! Currency is purely a formatting concern: amounts are never converted,
//! only rendered with the locale conventions of the chosen currency.
//!
//! # Examples
//!
//! ```
//! use quote_core::Currency;
//!
//! assert_eq!(Currency::USD.format_money(1234.5), "$1,234.50");
//! assert_eq!(Currency::QAR.format_money(1234.5), "QAR 1,234.50");
//! assert_eq!(Currency::EUR.format_money(1234.5), "1.234,50 €");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CurrencyError;

/// Currencies a quotation can be displayed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// United States Dollar, en-US conventions
    #[default]
    USD,
    /// Qatari Riyal, en-QA conventions
    QAR,
    /// Euro, de-DE conventions
    EUR,
}

impl Currency {
    /// Returns the ISO 4217 three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::QAR => "QAR",
            Currency::EUR => "EUR",
        }
    }

    /// Formats an amount with two decimals in this currency's locale.
    pub fn format_money(&self, amount: f64) -> String {
        let (negative, int_part, frac_part) = split_fixed(amount, 2);
        let sign = if negative { "-" } else { "" };
        match self {
            Currency::USD => format!("{sign}${}.{frac_part}", group(&int_part, ',')),
            Currency::QAR => format!("{sign}QAR {}.{frac_part}", group(&int_part, ',')),
            Currency::EUR => format!("{sign}{},{frac_part} €", group(&int_part, '.')),
        }
    }
}

/// Formats a number with en-US thousands grouping and up to three decimals.
///
/// # Examples
///
/// ```
/// use quote_core::currency::format_number;
///
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(-0.5), "-0.5");
/// ```
pub fn format_number(value: f64) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, 3);
    let frac = frac_part.trim_end_matches('0');
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{}", group(&int_part, ','))
    } else {
        format!("{sign}{}.{frac}", group(&int_part, ','))
    }
}

/// Formats a percentage with one decimal and en-US grouping, e.g. `12.5%`.
///
/// Non-finite values render as `0.0%`.
pub fn format_percent(value: f64) -> String {
    let (negative, int_part, frac_part) = split_fixed(value, 1);
    let sign = if negative { "-" } else { "" };
    format!("{sign}{}.{frac_part}%", group(&int_part, ','))
}

/// Rounds to `decimals` places and splits into sign, integer and fraction digits.
fn split_fixed(value: f64, decimals: usize) -> (bool, String, String) {
    let value = if value.is_finite() { value } else { 0.0 };
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let is_zero = int_part.chars().chain(frac_part.chars()).all(|c| c == '0');
    (value < 0.0 && !is_zero, int_part.to_string(), frac_part.to_string())
}

fn group(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "QAR" => Ok(Currency::QAR),
            "EUR" => Ok(Currency::EUR),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_formatting() {
        assert_eq!(Currency::USD.format_money(0.0), "$0.00");
        assert_eq!(Currency::USD.format_money(999.999), "$1,000.00");
        assert_eq!(Currency::USD.format_money(1_234_567.891), "$1,234,567.89");
        assert_eq!(Currency::USD.format_money(-15000.0), "-$15,000.00");
    }

    #[test]
    fn test_qar_formatting() {
        assert_eq!(Currency::QAR.format_money(75000.0), "QAR 75,000.00");
    }

    #[test]
    fn test_eur_formatting() {
        assert_eq!(Currency::EUR.format_money(1_234_567.5), "1.234.567,50 €");
        assert_eq!(Currency::EUR.format_money(-2.0), "-2,00 €");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(Currency::USD.format_money(-0.001), "$0.00");
    }

    #[test]
    fn test_non_finite_renders_as_zero() {
        assert_eq!(Currency::USD.format_money(f64::NAN), "$0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(166.666666), "166.667");
        assert_eq!(format_number(1000.0), "1,000");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(20.0), "20.0%");
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(1500.0), "1,500.0%");
        assert_eq!(format_percent(f64::INFINITY), "0.0%");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!("qar".parse::<Currency>().unwrap(), Currency::QAR);
        assert_eq!(" EUR ".parse::<Currency>().unwrap(), Currency::EUR);
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
