//! Numeric reading and number formatting for scalar coercion.
//!
//! Both functions are pure: reading a string as a number never rewrites the
//! stored string.

/// A number produced by coercion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to a float.
    #[expect(
        clippy::cast_precision_loss,
        reason = "i64 → f64 is the documented numeric widening"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Narrow to an integer (truncating, saturating, NaN → 0).
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(n) => n,
            Number::Float(f) => float_to_int(f),
        }
    }

    /// Exactly zero (either sign). NaN is not zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

/// Outcome of reading the leading numeral of a string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumericPrefix {
    /// The value of the numeral, zero when none was found.
    pub number: Number,
    /// A numeral was present at the start (after leading whitespace).
    pub found: bool,
    /// Nothing but whitespace follows the numeral.
    pub complete: bool,
}

impl NumericPrefix {
    /// Whether reading this string as a number deserves a warning.
    pub fn is_lossy(&self) -> bool {
        !(self.found && self.complete)
    }
}

/// Read the longest valid leading numeral of `text`.
///
/// Accepts leading ASCII whitespace, an optional sign, digits with an
/// optional fractional part and exponent, or the words `Inf`, `Infinity`
/// and `NaN` in any case. Anything else reads as zero.
pub fn parse_numeric_prefix(text: &str) -> NumericPrefix {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let bytes = trimmed.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let negative = bytes.first() == Some(&b'-');

    if let Some((value, len)) = special_prefix(&trimmed[end..]) {
        let value = if negative { -value } else { value };
        return NumericPrefix {
            number: Number::Float(value),
            found: true,
            complete: is_blank(&trimmed[end + len..]),
        };
    }

    let int_digits = count_digits(bytes, end);
    end += int_digits;
    let mut is_float = false;

    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(bytes, end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
            is_float = true;
        }
    } else if int_digits == 0 {
        return NumericPrefix {
            number: Number::Int(0),
            found: false,
            complete: false,
        };
    }

    if !is_float && int_digits == 0 {
        // A lone "." or sign.
        return NumericPrefix {
            number: Number::Int(0),
            found: false,
            complete: false,
        };
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut cursor = end + 1;
        if matches!(bytes.get(cursor), Some(b'+' | b'-')) {
            cursor += 1;
        }
        let exp_digits = count_digits(bytes, cursor);
        if exp_digits > 0 {
            end = cursor + exp_digits;
            is_float = true;
        }
    }

    let numeral = &trimmed[..end];
    let number = if is_float {
        Number::Float(numeral.parse::<f64>().unwrap_or(0.0))
    } else {
        match numeral.parse::<i64>() {
            Ok(n) => Number::Int(n),
            // Too wide for i64: fall back to the float reading.
            Err(_) => Number::Float(numeral.parse::<f64>().unwrap_or(0.0)),
        }
    };

    NumericPrefix {
        number,
        found: true,
        complete: is_blank(&trimmed[end..]),
    }
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}

fn is_blank(rest: &str) -> bool {
    rest.chars().all(|c| c.is_ascii_whitespace())
}

fn special_prefix(rest: &str) -> Option<(f64, usize)> {
    let head = rest.get(..rest.len().min(8)).unwrap_or(rest);
    let lower = head.to_ascii_lowercase();
    if lower.starts_with("infinity") {
        Some((f64::INFINITY, 8))
    } else if lower.starts_with("inf") {
        Some((f64::INFINITY, 3))
    } else if lower.starts_with("nan") {
        Some((f64::NAN, 3))
    } else {
        None
    }
}

/// Truncate toward zero, saturating at the `i64` range; NaN becomes 0.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "bounds are checked before the cast"
)]
pub(crate) fn float_to_int(value: f64) -> i64 {
    if value.is_nan() {
        0
    } else if value >= i64::MAX as f64 {
        i64::MAX
    } else if value <= i64::MIN as f64 {
        i64::MIN
    } else {
        value.trunc() as i64
    }
}

/// Format a float the way `%.15g` does, with `Inf`/`NaN` spelled out.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Let the formatter round to 15 significant digits, then pick a layout
    // from the rounded exponent.
    let scientific = format!("{value:.14e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..15).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        );
    }

    let decimals = usize::try_from(14 - exponent).unwrap_or(0);
    let fixed = format!("{value:.decimals$}");
    trim_fraction(&fixed).to_string()
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests;
