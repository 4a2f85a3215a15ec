//! Byte-level directive parser.
//!
//! The parser sees the bytes *after* a `%` and consumes exactly one
//! directive: flags (any order, repeats allowed), width, precision,
//! length modifier, type letter. It never emits anything and never pulls
//! arguments — `*` counts come back as [`Count::Arg`] for the engine to
//! resolve.

use crate::directive::{Count, Directive, Kind, Length};
use crate::flags::Flags;

/// Minimal byte cursor over the directive tail. The parser only ever
/// moves forward.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    #[inline]
    fn bump(&mut self) {
        self.pos += 1;
    }

    /// Consume a run of decimal digits, saturating on overflow.
    fn eat_number(&mut self) -> u32 {
        let mut n: u32 = 0;
        while let Some(byte @ b'0'..=b'9') = self.peek() {
            n = n.saturating_mul(10).saturating_add(u32::from(byte - b'0'));
            self.bump();
        }
        n
    }
}

/// Parse one directive from the bytes following a `%`.
///
/// Returns the directive and the number of bytes consumed, or `None`
/// when the template ends before a type letter is reached (a truncated
/// directive produces no output).
pub fn parse_directive(input: &[u8]) -> Option<(Directive, usize)> {
    let mut cur = Cursor::new(input);

    // Flags: any order, repeats allowed.
    let mut flags = Flags::empty();
    while let Some(flag) = cur.peek().and_then(Flags::from_byte) {
        flags.insert(flag);
        cur.bump();
    }

    // Width: digits or `*`.
    let width = match cur.peek() {
        Some(b'*') => {
            cur.bump();
            Count::Arg
        }
        Some(b'0'..=b'9') => Count::Fixed(cur.eat_number()),
        _ => Count::None,
    };

    // Precision: `.` then digits or `*`. A bare `.` is an explicit zero.
    let precision = if cur.peek() == Some(b'.') {
        cur.bump();
        match cur.peek() {
            Some(b'*') => {
                cur.bump();
                Count::Arg
            }
            _ => Count::Fixed(cur.eat_number()),
        }
    } else {
        Count::None
    };

    // Length modifier.
    let length = match cur.peek() {
        Some(b'h') => {
            cur.bump();
            if cur.peek() == Some(b'h') {
                cur.bump();
                Length::Char
            } else {
                Length::Short
            }
        }
        Some(b'l') => {
            cur.bump();
            if cur.peek() == Some(b'l') {
                cur.bump();
                Length::LongLong
            } else {
                Length::Long
            }
        }
        Some(b'L') => {
            cur.bump();
            Length::LongDouble
        }
        Some(b'z') => {
            cur.bump();
            Length::Size
        }
        Some(b'j') => {
            cur.bump();
            Length::Max
        }
        Some(b't') => {
            cur.bump();
            Length::Ptrdiff
        }
        _ => Length::None,
    };

    // Type letter. End of template here means a truncated directive.
    let byte = cur.peek()?;
    cur.bump();

    let upper = matches!(byte, b'X' | b'B' | b'K' | b'F' | b'E' | b'G');
    let kind = match byte {
        b'c' => Kind::Char,
        b'd' | b'i' => Kind::Decimal,
        b'u' => Kind::Unsigned,
        b'o' => Kind::Octal,
        b'x' | b'X' => Kind::Hex,
        b'b' | b'B' => Kind::Binary,
        b's' => Kind::Str,
        b'p' => Kind::Pointer,
        b'f' | b'F' => Kind::Fixed,
        b'e' | b'E' => Kind::Scientific,
        b'g' | b'G' => Kind::Shortest,
        b'k' | b'K' => Kind::HexBytes,
        b'n' => Kind::OutLen,
        b'%' => Kind::Percent,
        other => Kind::Verbatim(other),
    };

    Some((
        Directive {
            flags,
            width,
            precision,
            length,
            kind,
            upper,
        },
        cur.pos,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests can panic")]

    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parsed(input: &[u8]) -> (Directive, usize) {
        parse_directive(input).unwrap()
    }

    #[test]
    fn bare_type() {
        let (dir, used) = parsed(b"d");
        assert_eq!(used, 1);
        assert_eq!(dir.kind, Kind::Decimal);
        assert_eq!(dir.flags, Flags::empty());
        assert_eq!(dir.width, Count::None);
        assert_eq!(dir.precision, Count::None);
        assert_eq!(dir.length, Length::None);
        assert!(!dir.upper);
    }

    #[test]
    fn trailing_bytes_are_not_consumed() {
        let (dir, used) = parsed(b"u rest");
        assert_eq!(dir.kind, Kind::Unsigned);
        assert_eq!(used, 1);
    }

    #[test]
    fn flags_in_any_order_with_repeats() {
        let (dir, used) = parsed(b"0-0+ '#x");
        assert_eq!(used, 8);
        assert_eq!(
            dir.flags,
            Flags::ZERO
                | Flags::LEFT_ALIGN
                | Flags::PLUS
                | Flags::SPACE
                | Flags::THOUSANDS
                | Flags::ALT
        );
        assert_eq!(dir.kind, Kind::Hex);
    }

    #[test]
    fn leading_zero_is_a_flag_not_width() {
        let (dir, _) = parsed(b"010d");
        assert!(dir.flags.contains(Flags::ZERO));
        assert_eq!(dir.width, Count::Fixed(10));
    }

    #[test]
    fn width_and_precision_literals() {
        let (dir, used) = parsed(b"12.7s");
        assert_eq!(used, 5);
        assert_eq!(dir.width, Count::Fixed(12));
        assert_eq!(dir.precision, Count::Fixed(7));
        assert_eq!(dir.kind, Kind::Str);
    }

    #[test]
    fn star_counts() {
        let (dir, used) = parsed(b"*.*s");
        assert_eq!(used, 4);
        assert_eq!(dir.width, Count::Arg);
        assert_eq!(dir.precision, Count::Arg);
    }

    #[test]
    fn bare_dot_is_explicit_zero_precision() {
        let (dir, _) = parsed(b".s");
        assert_eq!(dir.precision, Count::Fixed(0));

        let (dir, _) = parsed(b".0s");
        assert_eq!(dir.precision, Count::Fixed(0));
    }

    #[test]
    fn length_modifiers() {
        assert_eq!(parsed(b"hhd").0.length, Length::Char);
        assert_eq!(parsed(b"hd").0.length, Length::Short);
        assert_eq!(parsed(b"ld").0.length, Length::Long);
        assert_eq!(parsed(b"lld").0.length, Length::LongLong);
        assert_eq!(parsed(b"Lf").0.length, Length::LongDouble);
        assert_eq!(parsed(b"zu").0.length, Length::Size);
        assert_eq!(parsed(b"ju").0.length, Length::Max);
        assert_eq!(parsed(b"td").0.length, Length::Ptrdiff);
    }

    #[test]
    fn upper_case_variants() {
        for (input, kind) in [
            (&b"X"[..], Kind::Hex),
            (b"B", Kind::Binary),
            (b"K", Kind::HexBytes),
            (b"F", Kind::Fixed),
            (b"E", Kind::Scientific),
            (b"G", Kind::Shortest),
        ] {
            let (dir, _) = parsed(input);
            assert_eq!(dir.kind, kind);
            assert!(dir.upper, "upper flag for {input:?}");
        }
        assert!(!parsed(b"x").0.upper);
        assert!(!parsed(b"g").0.upper);
    }

    #[test]
    fn percent_escape() {
        let (dir, used) = parsed(b"%");
        assert_eq!(dir.kind, Kind::Percent);
        assert_eq!(used, 1);
    }

    #[test]
    fn unknown_letter_is_verbatim() {
        let (dir, used) = parsed(b"yunknown");
        assert_eq!(dir.kind, Kind::Verbatim(b'y'));
        assert_eq!(used, 1);
        // Hex floats were never implemented; they fall out the same way.
        assert_eq!(parsed(b"a").0.kind, Kind::Verbatim(b'a'));
        assert_eq!(parsed(b"A").0.kind, Kind::Verbatim(b'A'));
    }

    #[test]
    fn truncated_directive_is_none() {
        assert_eq!(parse_directive(b""), None);
        assert_eq!(parse_directive(b"-"), None);
        assert_eq!(parse_directive(b"08"), None);
        assert_eq!(parse_directive(b"08."), None);
        assert_eq!(parse_directive(b"08.3ll"), None);
    }

    #[test]
    fn width_overflow_saturates() {
        let (dir, _) = parsed(b"99999999999999999999d");
        assert_eq!(dir.width, Count::Fixed(u32::MAX));
    }

    proptest! {
        /// The parser never panics and never claims more bytes than it saw.
        #[test]
        fn never_panics_and_consumed_is_bounded(input in proptest::collection::vec(any::<u8>(), 0..64)) {
            if let Some((_, used)) = parse_directive(&input) {
                prop_assert!(used <= input.len());
                prop_assert!(used >= 1);
            }
        }

        /// Every parse consumes through the type letter: re-parsing the
        /// remainder never sees leftover directive bytes.
        #[test]
        fn consumed_ends_at_type_letter(
            // Width 0 would parse as the zero flag, so start at 1.
            width in 1u32..10_000,
            prec in 0u32..10_000,
        ) {
            let text = format!("{width}.{prec}lld");
            let (dir, used) = parse_directive(text.as_bytes()).unwrap();
            prop_assert_eq!(used, text.len());
            prop_assert_eq!(dir.width, Count::Fixed(width));
            prop_assert_eq!(dir.precision, Count::Fixed(prec));
        }
    }
}
