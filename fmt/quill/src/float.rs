//! Floating-point converter.
//!
//! Drives `%f`, `%e`, and `%g` output with plain double arithmetic and a
//! small power-of-ten table — no arbitrary-precision machinery. The value
//! is split into an integer part and a fraction scaled by
//! `10^precision`, rounded half-up with a carry into the integer part.
//!
//! Rounding is deliberately *not* banker's rounding: an exact `.5`
//! residue rounds the fraction up (or carries straight into the integer
//! part when the fraction is empty).

use quill_spec::Flags;

use crate::integer;
use crate::pad::Field;
use crate::session::Session;

/// Fraction scaling table. Precision never indexes past the end — it is
/// clamped to the last exponent.
const POWERS_OF_10: [f64; 19] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18,
];

const MAX_PRECISION: usize = POWERS_OF_10.len() - 1;

/// Fraction digits when the directive carries no precision.
const DEFAULT_PRECISION: usize = 6;

/// Nudge for the integer-part truncation, so representation dust like
/// `2.9999999999999996` still prints as `3`. The fraction is computed
/// from the unbiased magnitude.
const INT_BIAS: f64 = 5e-15;

/// Output style, selected by the directive letter.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    /// `%f` / `%F`
    Fixed,
    /// `%e` / `%E`
    #[cfg(feature = "engineering")]
    Scientific,
    /// `%g` / `%G`
    #[cfg(feature = "engineering")]
    Shortest,
}

/// Everything the digit emitter needs, resolved from style and value.
struct Plan {
    /// Magnitude to split; normalised into `[1, 10)` in exponent mode.
    magnitude: f64,
    /// Effective fraction precision, clamped to the table.
    precision: usize,
    /// Power-of-ten exponent (meaningful in exponent mode).
    exponent: i32,
    /// Append the `e±dd` section.
    exp_mode: bool,
    /// Trim trailing fraction zeros (`%g`).
    trim: bool,
}

/// Convert one double, padding phases included.
pub(crate) fn emit_double(
    session: &mut Session<'_>,
    field: &mut Field,
    style: Style,
    precision: Option<usize>,
    value: f64,
) {
    // The cap keeps the `%g` branch arithmetic in range; the table clamp
    // inside `plan` is the real precision limit.
    let precision = precision.unwrap_or(DEFAULT_PRECISION).min(1024);

    if value.is_nan() {
        // NaN carries no sign; silence the sign flags so the padding
        // emitter does not invent one.
        field.flags.remove(Flags::PLUS | Flags::SPACE);
        emit_text(session, field, b"nan");
        return;
    }
    if value.is_infinite() {
        field.negative = value < 0.0;
        emit_text(session, field, b"inf");
        return;
    }

    field.negative = value < 0.0;
    let magnitude = value.abs();

    #[cfg(not(feature = "engineering"))]
    if magnitude > POWERS_OF_10[MAX_PRECISION] {
        // No exponent output available, so the value has no spelling.
        emit_text(session, field, b"inf");
        return;
    }

    let plan = plan(style, magnitude, precision);
    emit_planned(session, field, &plan);
}

#[cfg(feature = "engineering")]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the %g exponent fits i64 by construction"
)]
fn plan(style: Style, magnitude: f64, precision: usize) -> Plan {
    let needs_exponent =
        !matches!(style, Style::Fixed) || magnitude > POWERS_OF_10[MAX_PRECISION];
    if !needs_exponent {
        return Plan {
            magnitude,
            precision: precision.min(MAX_PRECISION),
            exponent: 0,
            exp_mode: false,
            trim: false,
        };
    }

    // Normalise a copy into [1, 10), counting the exponent.
    let mut exponent: i32 = 0;
    let mut scaled = magnitude;
    if scaled > 0.0 {
        while scaled < 1.0 {
            scaled *= 10.0;
            exponent -= 1;
        }
        while scaled >= 10.0 {
            scaled /= 10.0;
            exponent += 1;
        }
    }

    match style {
        // %f beyond the table falls back to exponent form; %e always.
        Style::Fixed | Style::Scientific => Plan {
            magnitude: scaled,
            precision: precision.min(MAX_PRECISION),
            exponent,
            exp_mode: true,
            trim: false,
        },
        Style::Shortest => {
            let p = precision.max(1) as i64;
            let x = i64::from(exponent);
            if (-4..p).contains(&x) {
                // Fixed style against the unscaled magnitude.
                Plan {
                    magnitude,
                    precision: ((p - x - 1) as usize).min(MAX_PRECISION),
                    exponent,
                    exp_mode: false,
                    trim: true,
                }
            } else {
                Plan {
                    magnitude: scaled,
                    precision: ((p - 1) as usize).min(MAX_PRECISION),
                    exponent,
                    exp_mode: true,
                    trim: true,
                }
            }
        }
    }
}

#[cfg(not(feature = "engineering"))]
fn plan(_style: Style, magnitude: f64, precision: usize) -> Plan {
    Plan {
        magnitude,
        precision: precision.min(MAX_PRECISION),
        exponent: 0,
        exp_mode: false,
        trim: false,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "splitting doubles over the i64 range is the whole point here"
)]
#[allow(
    clippy::float_cmp,
    reason = "the half-way tie is defined on the exact residue"
)]
fn emit_planned(session: &mut Session<'_>, field: &mut Field, plan: &Plan) {
    let precision = plan.precision;

    // Integer/fraction split.
    let mut int_part = (plan.magnitude + INT_BIAS) as i64;
    let frac_scaled = (plan.magnitude - int_part as f64) * POWERS_OF_10[precision];
    let mut frac_int = frac_scaled as i64;
    let diff = frac_scaled - frac_int as f64;

    // Round half-up, carrying into the integer part on overflow.
    if diff > 0.5 {
        frac_int += 1;
        if frac_int as f64 >= POWERS_OF_10[precision] {
            frac_int = 0;
            int_part += 1;
        }
    } else if diff == 0.5 {
        if frac_int == 0 {
            int_part += 1;
        } else {
            frac_int += 1;
        }
    }

    // Useful fraction digits: %g drops trailing zeros.
    let frac_digits = if plan.trim {
        if frac_int == 0 {
            0
        } else {
            let mut digits = precision;
            let mut rest = frac_int;
            while rest % 10 == 0 {
                rest /= 10;
                digits -= 1;
            }
            digits
        }
    } else {
        precision
    };

    let int_digits = integer::digit_count(int_part as u64, 10);
    let mut content = int_digits;
    if frac_digits > 0 {
        content += 1 + frac_digits;
    }
    if plan.exp_mode {
        content += if plan.exponent.unsigned_abs() >= 100 { 5 } else { 4 };
    }

    field.pre(session, content);
    integer::emit_decimal(session, int_part as u64);
    if frac_digits > 0 {
        session.emit(b'.');
        // Position-wise emission covers the leading zeros inside the
        // fraction and the %g cut in one pass.
        for position in 0..frac_digits {
            let divisor = 10u64.pow((precision - 1 - position) as u32);
            let digit = (frac_int as u64 / divisor) % 10;
            session.emit(b'0' + digit as u8);
        }
    }
    if plan.exp_mode {
        session.emit(if field.upper { b'E' } else { b'e' });
        session.emit(if plan.exponent < 0 { b'-' } else { b'+' });
        let exp = plan.exponent.unsigned_abs();
        if exp >= 100 {
            session.emit(b'0' + (exp / 100 % 10) as u8);
        }
        session.emit(b'0' + (exp / 10 % 10) as u8);
        session.emit(b'0' + (exp % 10) as u8);
    }
    field.post(session, content);
}

/// `nan` / `inf`, padded like any other value.
fn emit_text(session: &mut Session<'_>, field: &mut Field, text: &[u8; 3]) {
    field.pre(session, text.len());
    for &byte in text {
        session.emit(if field.upper {
            byte.to_ascii_uppercase()
        } else {
            byte
        });
    }
    field.post(session, text.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn convert(flags: Flags, width: usize, style: Style, precision: Option<usize>, value: f64) -> String {
        let mut buf = [0u8; 96];
        let len = {
            let mut session = Session::buffered(&mut buf);
            let mut field = Field::new(flags, width);
            emit_double(&mut session, &mut field, style, precision, value);
            session.finish()
        };
        String::from_utf8_lossy(&buf[..len]).into_owned()
    }

    fn fixed(precision: Option<usize>, value: f64) -> String {
        convert(Flags::empty(), 0, Style::Fixed, precision, value)
    }

    #[test]
    fn fixed_defaults_to_six_digits() {
        assert_eq!(fixed(None, 32.687), "32.687000");
        assert_eq!(fixed(None, 0.0), "0.000000");
    }

    #[test]
    fn fixed_rounds_half_up() {
        assert_eq!(fixed(Some(4), 3.233_213_21), "3.2332");
        assert_eq!(fixed(Some(2), 12.345_6), "12.35");
        assert_eq!(fixed(Some(0), 2.5), "3");
        assert_eq!(fixed(Some(2), 0.005), "0.01");
    }

    #[test]
    fn fixed_carries_into_the_integer_part() {
        assert_eq!(fixed(Some(2), 9.999), "10.00");
        assert_eq!(fixed(Some(0), 0.6), "1");
    }

    #[test]
    fn representation_dust_is_absorbed() {
        // 2.9999999999999996 is the double just below 3.0.
        assert_eq!(fixed(Some(6), 2.999_999_999_999_999_6), "3.000000");
    }

    #[test]
    fn negative_values_carry_the_sign() {
        assert_eq!(fixed(Some(1), -2.5), "-2.5");
        assert_eq!(fixed(None, -0.0), "0.000000");
    }

    #[test]
    fn large_fixed_values_use_the_full_integer_range() {
        assert_eq!(fixed(Some(4), 323_243_432_432_432.432), "323243432432432.4375");
    }

    #[test]
    fn nan_and_infinity() {
        assert_eq!(fixed(None, f64::NAN), "nan");
        assert_eq!(fixed(None, f64::INFINITY), "inf");
        assert_eq!(fixed(None, f64::NEG_INFINITY), "-inf");
        assert_eq!(
            convert(Flags::PLUS, 0, Style::Fixed, None, f64::INFINITY),
            "+inf"
        );
        // The plus flag must not leak onto NaN.
        assert_eq!(convert(Flags::PLUS, 0, Style::Fixed, None, f64::NAN), "nan");
    }

    #[test]
    fn nan_and_infinity_honour_width() {
        assert_eq!(convert(Flags::empty(), 5, Style::Fixed, None, f64::NAN), "  nan");
        assert_eq!(
            convert(Flags::empty(), 6, Style::Fixed, None, f64::NEG_INFINITY),
            "  -inf"
        );
    }

    #[cfg(feature = "engineering")]
    mod engineering {
        use super::*;
        use pretty_assertions::assert_eq;

        fn scientific(precision: Option<usize>, value: f64) -> String {
            convert(Flags::empty(), 0, Style::Scientific, precision, value)
        }

        fn shortest(precision: Option<usize>, value: f64) -> String {
            convert(Flags::empty(), 0, Style::Shortest, precision, value)
        }

        #[test]
        fn scientific_normalises_both_directions() {
            assert_eq!(scientific(None, -123.456), "-1.234560e+02");
            assert_eq!(scientific(None, 0.000_001), "1.000000e-06");
            assert_eq!(scientific(None, 0.123_456), "1.234560e-01");
            assert_eq!(scientific(None, 0.000_000_001_234_56), "1.234560e-09");
        }

        #[test]
        fn scientific_precision_and_case() {
            assert_eq!(scientific(Some(4), 123.456), "1.2346e+02");
            assert_eq!(scientific(Some(0), 123.456), "1e+02");
            assert_eq!(scientific(Some(0), -0.123_456), "-1e-01");
            assert_eq!(
                convert(Flags::empty(), 0, Style::Scientific, Some(4), 123.456),
                "1.2346e+02"
            );
        }

        #[test]
        fn scientific_zero() {
            assert_eq!(scientific(None, 0.0), "0.000000e+00");
        }

        #[test]
        fn three_digit_exponents() {
            assert_eq!(scientific(Some(2), 1.25e200), "1.25e+200");
            assert_eq!(scientific(Some(2), 1.25e-200), "1.25e-200");
        }

        #[test]
        fn fixed_beyond_the_table_switches_to_exponent_form() {
            assert_eq!(fixed(Some(2), 1e19), "1.00e+19");
        }

        #[test]
        fn shortest_picks_fixed_in_range() {
            assert_eq!(shortest(None, 1.23342), "1.23342");
            assert_eq!(shortest(None, 12334.2), "12334.2");
            assert_eq!(shortest(Some(9), 432_432_423.342_321_321), "432432423");
            assert_eq!(shortest(Some(10), 432_432_423.342_321_321), "432432423.3");
        }

        #[test]
        fn shortest_picks_exponent_out_of_range() {
            assert_eq!(shortest(Some(2), 432_432_423.342_321_321), "4.3e+08");
            assert_eq!(shortest(Some(8), 0.000_000_123_342), "1.23342e-07");
        }

        #[test]
        fn shortest_precision_zero_means_one() {
            assert_eq!(shortest(Some(0), 432_432_423.342_321_321), "4e+08");
            assert_eq!(shortest(Some(1), 432_432_423.342_321_321), "4e+08");
        }

        #[test]
        fn shortest_keeps_small_values_fixed() {
            assert_eq!(shortest(Some(1), 0.000_123_456_7), "0.0001");
            assert_eq!(shortest(Some(4), 0.000_123_456_7), "0.0001235");
            assert_eq!(shortest(Some(7), 0.000_123_456_7), "0.0001234567");
        }

        #[test]
        fn shortest_of_zero_is_zero() {
            assert_eq!(shortest(None, 0.0), "0");
        }

        #[test]
        fn upper_case_marker() {
            let mut buf = [0u8; 32];
            let len = {
                let mut session = Session::buffered(&mut buf);
                let mut field = Field::new(Flags::empty(), 0);
                field.upper = true;
                emit_double(&mut session, &mut field, Style::Scientific, Some(4), -123.456);
                session.finish()
            };
            assert_eq!(&buf[..len], b"-1.2346E+02");
        }
    }
}
