//! Number and cell formatting shared by the renderers.

use serde_json::Value;

/// Shown in place of a null or missing cell.
pub const NULL_MARKER: &str = "-";

/// Shown when a statistic is absent or zero.
pub const NOT_AVAILABLE: &str = "N/A";

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

/// Magnitude from which JavaScript switches to exponential notation.
const EXPONENTIAL_ABOVE: f64 = 1e21;

/// Magnitude below which JavaScript switches to exponential notation.
const EXPONENTIAL_BELOW: f64 = 1e-6;

/// Fixed-point notation with `digits` decimals. Exact ties round away from
/// zero, so `0.125` gives `"0.13"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENTIAL_ABOVE {
        return number_text(value);
    }
    let exact = format!("{:.EXACT_DIGITS$}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part.bytes().collect();
    kept.extend(frac_part.bytes().take(digits));
    kept.resize(int_part.len() + digits, b'0');
    if frac_part.as_bytes().get(digits).is_some_and(|&d| d >= b'5') {
        round_up(&mut kept);
    }

    let point = kept.len() - digits;
    let mut text = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        text.push('-');
    }
    text.push_str(&String::from_utf8_lossy(&kept[..point]));
    if digits > 0 {
        text.push('.');
        text.push_str(&String::from_utf8_lossy(&kept[point..]));
    }
    text
}

/// Exponential notation with `digits` decimals and an explicitly signed
/// exponent, e.g. `3.00e-4` or `1.25e+2`. Exact ties round away from zero.
pub fn to_exponential(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return number_text(value);
    }
    let (significand, mut exponent) = significant_digits(value.abs());
    let mut kept: Vec<u8> = significand.iter().copied().take(digits + 1).collect();
    kept.resize(digits + 1, b'0');
    if significand.get(digits + 1).is_some_and(|&d| d >= b'5') && round_up(&mut kept) {
        kept.truncate(digits + 1);
        exponent += 1;
    }

    let mut text = String::new();
    if value < 0.0 {
        text.push('-');
    }
    text.push(char::from(kept[0]));
    if digits > 0 {
        text.push('.');
        text.push_str(&String::from_utf8_lossy(&kept[1..]));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    text.push_str(&format!("e{sign}{}", exponent.unsigned_abs()));
    text
}

/// Shortest text that reads back as `value`, in JavaScript's notation:
/// whole floats drop the fraction and very large or small magnitudes use
/// `1e+21` / `1e-7` style exponents.
pub fn number_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENTIAL_ABOVE || magnitude < EXPONENTIAL_BELOW {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => text,
        };
    }
    value.to_string()
}

/// Decimal digits of a positive finite value, leading zeros stripped, with
/// the power of ten of the first digit. Zero yields a single `0` digit.
fn significant_digits(magnitude: f64) -> (Vec<u8>, i32) {
    let exact = format!("{magnitude:.EXACT_DIGITS$}");
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();
    let Some(first) = all.iter().position(|&d| d != b'0') else {
        return (vec![b'0'], 0);
    };
    let mut digits = all[first..].to_vec();
    while digits.len() > 1 && digits.last() == Some(&b'0') {
        digits.pop();
    }
    let exponent = i32::try_from(int_part.len()).unwrap_or(i32::MAX)
        - 1
        - i32::try_from(first).unwrap_or(i32::MAX);
    (digits, exponent)
}

/// Add one unit in the last place of an ASCII digit string. Returns true
/// when the carry ran off the front and a leading `1` was inserted.
fn round_up(digits: &mut Vec<u8>) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    digits.insert(0, b'1');
    true
}

/// A statistic that renders "N/A" when absent or zero.
pub fn stat_or_na(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => render(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Text of a raw cell: strings as-is, numbers in their shortest form.
/// Whole floats print without a fraction, so `18.0` reads `18`.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_MARKER.to_string(),
        Some(Value::String(text)) if text.is_empty() => NULL_MARKER.to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) if number.is_f64() => {
            number.as_f64().map_or_else(|| number.to_string(), number_text)
        }
        Some(other) => other.to_string(),
    }
}

/// Text of a table cell; numbers are fixed to `digits` decimals.
pub fn numeric_cell_text(value: Option<&Value>, digits: usize) -> String {
    match value.and_then(Value::as_f64) {
        Some(number) => to_fixed(number, digits),
        None => cell_text(value),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn exponential_matches_expected_shape() {
        assert_eq!(to_exponential(0.0003, 2), "3.00e-4");
        assert_eq!(to_exponential(125.0, 2), "1.25e+2");
        assert_eq!(to_exponential(1.0, 2), "1.00e+0");
        assert_eq!(to_exponential(4.2e-12, 2), "4.20e-12");
    }

    #[test]
    fn fixed_rounds_to_digits() {
        assert_eq!(to_fixed(12.5, 2), "12.50");
        assert_eq!(to_fixed(0.123_456_789, 6), "0.123457");
        assert_eq!(to_fixed(3.0, 4), "3.0000");
        assert_eq!(to_fixed(-1.5, 1), "-1.5");
        assert_eq!(to_fixed(99.996, 2), "100.00");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(12.125, 2), "12.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_exponential(1.125, 2), "1.13e+0");
        assert_eq!(to_exponential(9.995, 2), "9.99e+0");
        assert_eq!(to_exponential(9.9951, 2), "1.00e+1");
    }

    #[test]
    fn near_ties_follow_the_binary_value() {
        // 1.005 is stored just below 1.005.
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.1, 20), "0.10000000000000000555");
    }

    #[test]
    fn number_text_matches_javascript_notation() {
        assert_eq!(number_text(18.0), "18");
        assert_eq!(number_text(-0.0), "0");
        assert_eq!(number_text(0.1), "0.1");
        assert_eq!(number_text(1e21), "1e+21");
        assert_eq!(number_text(1.5e-7), "1.5e-7");
        assert_eq!(number_text(123_456.789), "123456.789");
        assert_eq!(to_fixed(1e21, 2), "1e+21");
    }

    #[test]
    fn zero_and_missing_stats_are_na() {
        assert_eq!(stat_or_na(None, |v| to_fixed(v, 4)), "N/A");
        assert_eq!(stat_or_na(Some(0.0), |v| to_fixed(v, 4)), "N/A");
        assert_eq!(stat_or_na(Some(2.5), |v| to_fixed(v, 4)), "2.5000");
    }

    #[test]
    fn cells_render_nulls_explicitly() {
        assert_eq!(cell_text(None), "-");
        assert_eq!(cell_text(Some(&Value::Null)), "-");
        assert_eq!(cell_text(Some(&json!(""))), "-");
        assert_eq!(cell_text(Some(&json!(0))), "0");
        assert_eq!(cell_text(Some(&json!("abc"))), "abc");
        assert_eq!(cell_text(Some(&json!(true))), "true");
        assert_eq!(cell_text(Some(&json!(18.0))), "18");
        assert_eq!(cell_text(Some(&json!(2.75))), "2.75");
        assert_eq!(cell_text(Some(&json!(-7))), "-7");
    }

    #[test]
    fn numeric_cells_use_fixed_digits() {
        assert_eq!(numeric_cell_text(Some(&json!(0.5)), 4), "0.5000");
        assert_eq!(numeric_cell_text(Some(&json!(3)), 6), "3.000000");
        assert_eq!(numeric_cell_text(Some(&json!("Row 1")), 4), "Row 1");
        assert_eq!(numeric_cell_text(None, 4), "-");
    }
}
