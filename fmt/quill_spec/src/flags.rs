//! Directive flag set.
//!
//! One bit per printf flag character. Repeats and arbitrary order are
//! accepted by the parser; the set only records presence.

use bitflags::bitflags;

bitflags! {
    /// Flags parsed from the `%` directive prefix.
    ///
    /// Interaction rules (enforced by the engine, not here):
    /// `PLUS` dominates `SPACE`; `LEFT_ALIGN` disables zero fill;
    /// `THOUSANDS` is parsed and ignored (no locale support).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// `-`: left-align the converted value inside its field.
        const LEFT_ALIGN = 1 << 0;
        /// `+`: always emit a sign for signed conversions.
        const PLUS = 1 << 1;
        /// ` `: reserve a sign position for non-negative values.
        const SPACE = 1 << 2;
        /// `0`: fill the field with zeros instead of spaces.
        const ZERO = 1 << 3;
        /// `'`: thousands grouping. Parsed, never applied.
        const THOUSANDS = 1 << 4;
        /// `#`: alternate form: `0` / `0x` / `0b` base prefixes.
        const ALT = 1 << 5;
    }
}

impl Flags {
    /// Map a flag character to its bit, if it is one.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'-' => Some(Self::LEFT_ALIGN),
            b'+' => Some(Self::PLUS),
            b' ' => Some(Self::SPACE),
            b'0' => Some(Self::ZERO),
            b'\'' => Some(Self::THOUSANDS),
            b'#' => Some(Self::ALT),
            _ => None,
        }
    }
}
