//! Number formatting for the report. Single locale: `,` groups thousands.

pub const CURRENCY: &str = "RUB";

/// Formats `value` with `decimals` fraction digits and grouped thousands.
pub fn amount(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn money(value: f64, decimals: usize) -> String {
    format!("{} {}", amount(value, decimals), CURRENCY)
}

/// Signed percentage with two decimals, e.g. `+12.34%`.
pub fn signed_percent(percent: f64) -> String {
    format!("{:+.2}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(amount(1_800_000.0, 0), "1,800,000");
        assert_eq!(amount(999.0, 0), "999");
        assert_eq!(amount(1_000.0, 0), "1,000");
        assert_eq!(amount(542_666.666_666, 2), "542,666.67");
    }

    #[test]
    fn keeps_sign_of_negative_amounts() {
        assert_eq!(amount(-1_250.0, 0), "-1,250");
        assert_eq!(amount(-0.001, 0), "0");
    }

    #[test]
    fn percent_always_carries_sign() {
        assert_eq!(signed_percent(34.246_575), "+34.25%");
        assert_eq!(signed_percent(-86.3), "-86.30%");
        assert_eq!(signed_percent(0.0), "+0.00%");
    }

    #[test]
    fn money_appends_currency() {
        assert_eq!(money(730_000.0, 0), "730,000 RUB");
    }
}
