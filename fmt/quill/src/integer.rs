//! Integer converter.
//!
//! One routine covers every width family: values widen into `u64` before
//! conversion (narrowing for `hh`/`h` happens in the interpreter), so the
//! digit logic is written once. Digits come out most significant first by
//! repeated division with a precomputed leading-digit divisor — no scratch
//! buffer.

use crate::pad::Field;
use crate::session::Session;

/// ASCII digit for one place value, `a-f`/`A-F` above 9.
#[inline]
pub(crate) fn digit_char(digit: u8, upper: bool) -> u8 {
    if digit < 10 {
        b'0' + digit
    } else if upper {
        b'A' + digit - 10
    } else {
        b'a' + digit - 10
    }
}

/// Number of digits of `value` in `base` (1 for zero).
pub(crate) fn digit_count(mut value: u64, base: u64) -> usize {
    let mut count = 1;
    while value >= base {
        value /= base;
        count += 1;
    }
    count
}

/// Emit the bare digits of `value`, most significant first.
#[allow(
    clippy::cast_possible_truncation,
    reason = "leading digit is always < base <= 16"
)]
pub(crate) fn emit_digits(session: &mut Session<'_>, value: u64, base: u64, upper: bool) {
    let digits = digit_count(value, base);
    let mut divisor = 1u64;
    for _ in 1..digits {
        divisor *= base;
    }
    let mut rest = value;
    while divisor > 0 {
        let digit = (rest / divisor) as u8;
        rest %= divisor;
        divisor /= base;
        session.emit(digit_char(digit, upper));
    }
}

/// Emit the bare decimal digits of `value` (float converter helper).
#[cfg(feature = "float")]
pub(crate) fn emit_decimal(session: &mut Session<'_>, value: u64) {
    emit_digits(session, value, 10, false);
}

/// Full unsigned conversion: padding phases around the digits.
pub(crate) fn emit_unsigned(session: &mut Session<'_>, field: &mut Field, value: u64) {
    if value == 0 {
        field.zero_value = true;
        field.pre(session, 1);
        session.emit(b'0');
        field.post(session, 1);
        return;
    }
    let base = u64::from(field.base);
    let digits = digit_count(value, base);
    field.pre(session, digits);
    emit_digits(session, value, base, field.upper);
    field.post(session, digits);
}

/// Signed conversion: negate in the unsigned domain (`i64::MIN` safe),
/// mark the sign, delegate.
pub(crate) fn emit_signed(session: &mut Session<'_>, field: &mut Field, value: i64) {
    if value < 0 {
        field.negative = true;
    }
    emit_unsigned(session, field, value.unsigned_abs());
}
