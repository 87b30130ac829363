/// Magnitudes at or above this switch to scientific notation.
const SCIENTIFIC_UPPER: f64 = 1e4;
/// Non-zero magnitudes below this switch to scientific notation.
const SCIENTIFIC_LOWER: f64 = 1e-3;

/// Formats a metric value with at most `decimals` fraction digits.
///
/// Trailing zeros are dropped. Very large and very small magnitudes use
/// scientific notation (`1.5e7`) so readouts keep a bounded width.
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }

    let magnitude = value.abs();
    if !(SCIENTIFIC_LOWER..SCIENTIFIC_UPPER).contains(&magnitude) {
        let formatted = format!("{value:.decimals$e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => formatted,
        };
    }

    trim_fraction(&format!("{value:.decimals$}")).to_owned()
}

fn trim_fraction(text: &str) -> &str {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.')
}
