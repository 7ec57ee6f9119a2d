//! Integer and floating-point helpers shared by the evaluator.

/// Smallest `f64` that no longer fits in an `i64` (`2^63`).
const I64_UPPER_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `i64` to `f64`, rounding to the nearest representable value.
///
/// The language promotes integers to floats whenever either operand of an
/// arithmetic operator is a float, accepting the rounding above `2^53`.
///
/// ## Example
/// ```
/// use ocr_erl::util::num::int_to_float;
///
/// assert_eq!(int_to_float(42), 42.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Returns the integer held by a float with no fractional part.
///
/// Returns `None` for non-finite values, values with a fractional part, and
/// values outside the `i64` range.
///
/// ## Example
/// ```
/// use ocr_erl::util::num::integral_to_i64;
///
/// assert_eq!(integral_to_i64(8.0), Some(8));
/// assert_eq!(integral_to_i64(2.5), None);
/// assert_eq!(integral_to_i64(1e30), None);
/// assert_eq!(integral_to_i64(f64::NAN), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn integral_to_i64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < -I64_UPPER_BOUND || value >= I64_UPPER_BOUND {
        return None;
    }
    Some(value as i64)
}

/// Integer division rounded towards negative infinity.
///
/// Returns `None` when `divisor` is zero or the quotient overflows
/// (`i64::MIN DIV -1`).
///
/// ## Example
/// ```
/// use ocr_erl::util::num::floor_div;
///
/// assert_eq!(floor_div(7, 2), Some(3));
/// assert_eq!(floor_div(-7, 2), Some(-4));
/// assert_eq!(floor_div(7, -2), Some(-4));
/// assert_eq!(floor_div(1, 0), None);
/// ```
#[must_use]
pub const fn floor_div(dividend: i64, divisor: i64) -> Option<i64> {
    let Some(quotient) = dividend.checked_div(divisor) else {
        return None;
    };
    if dividend % divisor != 0 && ((dividend < 0) != (divisor < 0)) {
        Some(quotient - 1)
    } else {
        Some(quotient)
    }
}

/// Remainder paired with [`floor_div`], so that
/// `a == b * floor_div(a, b) + floor_mod(a, b)` always holds.
///
/// The result takes the sign of the divisor. Returns `None` only when
/// `divisor` is zero.
///
/// ## Example
/// ```
/// use ocr_erl::util::num::floor_mod;
///
/// assert_eq!(floor_mod(7, 3), Some(1));
/// assert_eq!(floor_mod(-7, 3), Some(2));
/// assert_eq!(floor_mod(7, -3), Some(-2));
/// assert_eq!(floor_mod(i64::MIN, -1), Some(0));
/// ```
#[must_use]
pub const fn floor_mod(dividend: i64, divisor: i64) -> Option<i64> {
    if divisor == 0 {
        return None;
    }
    let remainder = dividend.wrapping_rem(divisor);
    if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
        Some(remainder + divisor)
    } else {
        Some(remainder)
    }
}

/// Floating-point counterpart of [`floor_mod`]: `a - b * floor(a / b)`.
#[must_use]
pub fn floor_mod_f64(dividend: f64, divisor: f64) -> f64 {
    divisor.mul_add(-(dividend / divisor).floor(), dividend)
}

/// Formats a float the way programs display it.
///
/// Whole numbers keep a trailing `.0` so they stay distinguishable from
/// integers. Very large and very small magnitudes switch to exponent form, and
/// non-finite values print as `Infinity`, `-Infinity` and `NaN`.
///
/// ## Example
/// ```
/// use ocr_erl::util::num::format_float;
///
/// assert_eq!(format_float(2.0), "2.0");
/// assert_eq!(format_float(-0.5), "-0.5");
/// assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_float(1.5e21), "1.5e+21");
/// assert_eq!(format_float(1e-7), "1e-7");
/// assert_eq!(format_float(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude > 0.0 && !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{value:e}");
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            },
            _ => text,
        };
    }

    let text = value.to_string();
    if text.contains('.') { text } else { format!("{text}.0") }
}

/// Converts a collection length into a language integer.
///
/// Lengths beyond `i64::MAX` cannot occur in practice; they saturate.
#[must_use]
pub fn length_to_i64(length: usize) -> i64 {
    i64::try_from(length).unwrap_or(i64::MAX)
}
