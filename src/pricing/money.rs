//! Currency helpers shared by the pricing stages.
//!
//! Amounts stay unrounded through every stage; rounding happens only when a
//! value is displayed or exported.

/// Treats negative, NaN and infinite inputs as zero.
#[must_use]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Clamps a computed amount to a finite non-negative value, logging any anomaly.
#[must_use]
pub fn guard(label: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("{label} computed as {value}; clamped to zero");
        0.0
    }
}

/// `pct` percent of `amount`.
#[must_use]
pub fn percent_of(amount: f64, pct: f64) -> f64 {
    amount * pct / 100.0
}

/// Rounds to paise, half away from zero.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount as rupees with Indian digit grouping, e.g. `₹1,23,456.50`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let rounded = round_currency(value);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_zeroes_invalid_inputs() {
        assert_eq!(sanitize(12.5), 12.5);
        assert_eq!(sanitize(-1.0), 0.0);
        assert_eq!(sanitize(f64::NAN), 0.0);
        assert_eq!(sanitize(f64::INFINITY), 0.0);
    }

    #[test]
    fn guard_clamps_negative_totals() {
        assert_eq!(guard("total", 10.0), 10.0);
        assert_eq!(guard("total", -0.01), 0.0);
        assert_eq!(guard("total", f64::NAN), 0.0);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_currency(337.5), 337.5);
        assert_eq!(round_currency(10.125), 10.13);
        assert_eq!(round_currency(2.004), 2.0);
    }

    #[test]
    fn formats_with_indian_grouping() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(999.5), "₹999.50");
        assert_eq!(format_currency(20200.0), "₹20,200.00");
        assert_eq!(format_currency(123_456.789), "₹1,23,456.79");
        assert_eq!(format_currency(12_345_678.0), "₹1,23,45,678.00");
        assert_eq!(format_currency(-6490.0), "-₹6,490.00");
    }
}
