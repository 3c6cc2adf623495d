//! Number formatting shared by the dashboard cards and the PDF report

use rust_decimal::prelude::*;

/// Current local time as `YYYY-MM-DD HH:MM`
pub fn now_local_minutes() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Insert `,` every three digits of an unsigned digit string
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_whole(whole: Decimal) -> String {
    if whole.is_zero() {
        return "0".to_string();
    }
    let digits = whole.abs().trunc().to_string();
    let grouped = group_digits(&digits);
    if whole.is_sign_negative() {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `1234567.5` → `1,234,568` (round half to even, no decimals)
pub fn format_thousands(value: Decimal) -> String {
    format_whole(value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
}

/// `1234567` → `1,234,567`
pub fn format_count(value: i64) -> String {
    format_whole(Decimal::from(value))
}

/// `PKR 1,234` with the fraction truncated
pub fn format_currency(label: &str, value: Decimal) -> String {
    format!("{} {}", label, format_whole(value.trunc()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(dec("0")), "0");
        assert_eq!(format_thousands(dec("999")), "999");
        assert_eq!(format_thousands(dec("1000")), "1,000");
        assert_eq!(format_thousands(dec("1234567.4")), "1,234,567");
        assert_eq!(format_thousands(dec("1234567.6")), "1,234,568");
        assert_eq!(format_thousands(dec("-45210.2")), "-45,210");
    }

    #[test]
    fn test_format_thousands_half_even() {
        assert_eq!(format_thousands(dec("2.5")), "2");
        assert_eq!(format_thousands(dec("3.5")), "4");
        assert_eq!(format_thousands(dec("-0.4")), "0");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(12), "12");
        assert_eq!(format_count(100000), "100,000");
    }

    #[test]
    fn test_format_currency_truncates() {
        assert_eq!(format_currency("PKR", dec("1234.99")), "PKR 1,234");
        assert_eq!(format_currency("PKR", dec("0.75")), "PKR 0");
        assert_eq!(format_currency("USD", dec("-1999.5")), "USD -1,999");
    }
}
