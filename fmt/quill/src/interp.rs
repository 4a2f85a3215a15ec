//! Directive interpreter.
//!
//! Scans the template left to right: bytes outside `%` go out verbatim,
//! each directive resets the working state, pulls its argument(s), and
//! dispatches to a converter. Unknown type letters are emitted as-is with
//! the `%` swallowed; a directive cut off by the end of the template
//! emits nothing.

use quill_spec::{parse_directive, Count, Directive, Flags, Kind, Length};

use crate::args::{Arg, ArgSource};
use crate::integer;
use crate::pad::Field;
use crate::session::Session;

#[cfg(feature = "float")]
use crate::float;

/// Run one session over the template. Returns the final length.
pub(crate) fn run(mut session: Session<'_>, template: &str, args: &[Arg<'_>]) -> usize {
    let bytes = template.as_bytes();
    let mut source = ArgSource::new(args);
    let mut at = 0;
    while at < bytes.len() {
        let byte = bytes[at];
        if byte != b'%' {
            session.emit(byte);
            at += 1;
            continue;
        }
        at += 1;
        let Some((directive, used)) = parse_directive(&bytes[at..]) else {
            break;
        };
        at += used;
        dispatch(&mut session, &mut source, directive);
    }
    session.finish()
}

/// Resolve a `*` width: negative values flip to left alignment.
fn resolve_width(source: &mut ArgSource<'_, '_>, count: Count, flags: &mut Flags) -> usize {
    match count {
        Count::None => 0,
        Count::Fixed(width) => width as usize,
        Count::Arg => match source.pull().and_then(Arg::as_signed) {
            Some(value) if value < 0 => {
                flags.insert(Flags::LEFT_ALIGN);
                usize::try_from(value.unsigned_abs()).unwrap_or(usize::MAX)
            }
            Some(value) => usize::try_from(value).unwrap_or(usize::MAX),
            None => 0,
        },
    }
}

/// Resolve a `*` precision: negative values clamp to zero.
fn resolve_precision(source: &mut ArgSource<'_, '_>, count: Count) -> Option<usize> {
    match count {
        Count::None => None,
        Count::Fixed(precision) => Some(precision as usize),
        Count::Arg => Some(match source.pull().and_then(Arg::as_signed) {
            Some(value) if value > 0 => usize::try_from(value).unwrap_or(usize::MAX),
            _ => 0,
        }),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "hh/h narrow the value to the requested width on purpose"
)]
fn narrow_signed(value: i64, length: Length) -> i64 {
    match length {
        Length::Char => i64::from(value as i8),
        Length::Short => i64::from(value as i16),
        _ => value,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "hh/h narrow the value to the requested width on purpose"
)]
fn narrow_unsigned(value: u64, length: Length) -> u64 {
    match length {
        Length::Char => u64::from(value as u8),
        Length::Short => u64::from(value as u16),
        _ => value,
    }
}

#[cfg(feature = "hex-array")]
fn hex_nibble(nibble: u8, upper: bool) -> u8 {
    integer::digit_char(nibble & 0xF, upper)
}

fn dispatch(session: &mut Session<'_>, source: &mut ArgSource<'_, '_>, directive: Directive) {
    let Directive {
        mut flags,
        length,
        kind,
        upper,
        ..
    } = directive;
    let width = resolve_width(source, directive.width, &mut flags);
    let precision = resolve_precision(source, directive.precision);

    let mut field = Field::new(flags, width);
    field.upper = upper;

    match kind {
        Kind::Percent => session.emit(b'%'),
        Kind::Verbatim(byte) => session.emit(byte),
        Kind::Char => {
            if let Some(byte) = source.pull().and_then(Arg::as_byte) {
                session.emit(byte);
            }
        }
        Kind::Decimal => {
            let Some(value) = source.pull().and_then(Arg::as_signed) else {
                return;
            };
            integer::emit_signed(session, &mut field, narrow_signed(value, length));
        }
        Kind::Unsigned | Kind::Octal | Kind::Hex | Kind::Binary => {
            let Some(value) = source.pull().and_then(Arg::as_unsigned) else {
                return;
            };
            field.base = kind.base().unwrap_or(10);
            integer::emit_unsigned(session, &mut field, narrow_unsigned(value, length));
        }
        Kind::Str => {
            let Some(text) = source.pull().and_then(Arg::as_str) else {
                return;
            };
            let bytes = text.as_bytes();
            let take = precision.map_or(bytes.len(), |cap| bytes.len().min(cap));
            field.pre(session, take);
            for &byte in &bytes[..take] {
                session.emit(byte);
            }
            field.post(session, take);
        }
        #[cfg(feature = "pointer")]
        Kind::Pointer => {
            let Some(value) = source.pull().and_then(Arg::as_ptr_value) else {
                return;
            };
            // Pointers print zero-filled to the full pointer width,
            // lower case, whatever the directive said.
            field.base = 16;
            field.upper = false;
            field.flags.insert(Flags::ZERO);
            field.width = core::mem::size_of::<usize>() * 2;
            integer::emit_unsigned(session, &mut field, value as u64);
        }
        #[cfg(not(feature = "pointer"))]
        Kind::Pointer => {
            let _ = source.pull();
        }
        #[cfg(feature = "hex-array")]
        Kind::HexBytes => {
            let Some(bytes) = source.pull().and_then(Arg::as_bytes) else {
                return;
            };
            // Width is the byte count; the slice length bounds it. The
            // space flag separates the pairs.
            let count = if width > 0 {
                width.min(bytes.len())
            } else {
                bytes.len()
            };
            let separated = flags.contains(Flags::SPACE);
            for (index, &byte) in bytes[..count].iter().enumerate() {
                if separated && index > 0 {
                    session.emit(b' ');
                }
                session.emit(hex_nibble(byte >> 4, upper));
                session.emit(hex_nibble(byte, upper));
            }
        }
        #[cfg(not(feature = "hex-array"))]
        Kind::HexBytes => {
            let _ = source.pull();
        }
        Kind::OutLen => {
            if let Some(target) = source.pull().and_then(Arg::as_out_len) {
                target.set(session.len());
            }
        }
        #[cfg(feature = "float")]
        Kind::Fixed => {
            let Some(value) = source.pull().and_then(Arg::as_double) else {
                return;
            };
            float::emit_double(session, &mut field, float::Style::Fixed, precision, value);
        }
        #[cfg(not(feature = "float"))]
        Kind::Fixed => {
            let _ = source.pull();
        }
        #[cfg(feature = "engineering")]
        Kind::Scientific => {
            let Some(value) = source.pull().and_then(Arg::as_double) else {
                return;
            };
            float::emit_double(
                session,
                &mut field,
                float::Style::Scientific,
                precision,
                value,
            );
        }
        #[cfg(not(feature = "engineering"))]
        Kind::Scientific => {
            let _ = source.pull();
        }
        #[cfg(feature = "engineering")]
        Kind::Shortest => {
            let Some(value) = source.pull().and_then(Arg::as_double) else {
                return;
            };
            float::emit_double(
                session,
                &mut field,
                float::Style::Shortest,
                precision,
                value,
            );
        }
        #[cfg(not(feature = "engineering"))]
        Kind::Shortest => {
            let _ = source.pull();
        }
    }
}
