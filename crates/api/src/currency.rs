// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Locale-aware currency formatting.
//!
//! Display only. Formatted strings never feed back into arithmetic; the
//! numeric price fields travel alongside them in every response.

use trip_quote_domain::Currency;

const fn symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::GBP => "\u{a3}",
        Currency::EUR => "\u{20ac}",
        Currency::USD => "$",
    }
}

/// Thousands and decimal separators per currency convention.
///
/// GBP and USD group with commas and use a point decimal; EUR groups with
/// points and uses a comma decimal.
const fn separators(currency: Currency) -> (char, char) {
    match currency {
        Currency::GBP | Currency::USD => (',', '.'),
        Currency::EUR => ('.', ','),
    }
}

fn group_thousands(whole: u64, separator: char) -> String {
    let digits: String = whole.to_string();
    let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped
}

/// Formats an amount for display in the given currency.
///
/// Rounds to two decimal places. Negative amounts carry a leading minus
/// before the symbol.
///
/// # Arguments
///
/// * `amount` - The amount in major units
/// * `currency` - The currency to format in
#[must_use]
pub fn format_price(amount: f64, currency: Currency) -> String {
    let (thousands, decimal): (char, char) = separators(currency);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents: u64 = (amount.abs() * 100.0).round() as u64;
    let whole: u64 = cents / 100;
    let fraction: u64 = cents % 100;

    let sign: &str = if amount < 0.0 { "-" } else { "" };
    format!(
        "{sign}{}{}{decimal}{fraction:02}",
        symbol(currency),
        group_thousands(whole, thousands)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_gbp_formatting() {
        assert_eq!(format_price(1234.56, Currency::GBP), "\u{a3}1,234.56");
        assert_eq!(format_price(900.0, Currency::GBP), "\u{a3}900.00");
    }

    #[test]
    fn test_eur_swaps_separators() {
        assert_eq!(format_price(1234.56, Currency::EUR), "\u{20ac}1.234,56");
        assert_eq!(format_price(0.5, Currency::EUR), "\u{20ac}0,50");
    }

    #[test]
    fn test_usd_formatting() {
        assert_eq!(format_price(1_000_000.0, Currency::USD), "$1,000,000.00");
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_price(-500.25, Currency::GBP), "-\u{a3}500.25");
    }

    #[test]
    fn test_rounding_to_two_places() {
        assert_eq!(format_price(99.999, Currency::USD), "$100.00");
        assert_eq!(format_price(0.004, Currency::GBP), "\u{a3}0.00");
    }
}
