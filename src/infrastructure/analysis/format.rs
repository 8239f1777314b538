//! Human-readable formatting of rates and p-values

const NOT_APPLICABLE: &str = "N/A";

fn default_places(ratio: f64) -> usize {
    if ratio.abs() < 0.01 {
        2
    } else if ratio.abs() < 0.1 {
        1
    } else {
        0
    }
}

fn round(value: f64, places: usize) -> f64 {
    let factor = 10_f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Format a ratio as a percentage, e.g. `0.3` as `30%`.
///
/// Non-finite ratios (relative improvement over a zero baseline) are `N/A`.
/// Smaller ratios get more decimal places unless `places` is given.
pub fn percent(ratio: f64, places: Option<usize>) -> String {
    if !ratio.is_finite() {
        return NOT_APPLICABLE.to_string();
    }

    let places = places.unwrap_or_else(|| default_places(ratio));
    // adding zero turns -0 into 0
    let value = round(100.0 * ratio, places) + 0.0;
    format!("{value}%")
}

pub fn p_value(p_value: f64) -> String {
    if p_value < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{:.*}", default_places(p_value) + 2, p_value)
    }
}

/// Group digits in thousands, e.g. `1234567` as `1,234,567`
pub fn describe_number(number: u64) -> String {
    let digits = number.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}
