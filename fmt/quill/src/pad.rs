//! Padding emitter.
//!
//! Every converted value passes through two phases: `pre` emits the sign,
//! the alternate-form prefix, and any right-alignment fill before the
//! content; `post` emits left-alignment fill after it. `content` is the
//! number of content bytes the converter will produce — digits or string
//! bytes, sign excluded.
//!
//! Width bookkeeping: `pre` shrinks the width by the sign slot and the
//! alternate-form prefix, and `post` pads against that shrunken width, so
//! sign and prefix count toward the requested field width exactly once.

use quill_spec::Flags;

use crate::session::Session;

/// Per-value working record, reset for every directive.
pub(crate) struct Field {
    pub(crate) flags: Flags,
    pub(crate) width: usize,
    pub(crate) base: u8,
    pub(crate) upper: bool,
    /// The value carries a minus sign.
    pub(crate) negative: bool,
    /// The value is zero — suppresses the alternate-form prefix.
    pub(crate) zero_value: bool,
}

impl Field {
    pub(crate) fn new(flags: Flags, width: usize) -> Self {
        Self {
            flags,
            width,
            base: 10,
            upper: false,
            negative: false,
            zero_value: false,
        }
    }

    /// Sign, prefix, and right-alignment fill ahead of the content.
    pub(crate) fn pre(&mut self, session: &mut Session<'_>, content: usize) {
        let flags = self.flags;

        // One width slot is taken by the sign character.
        if self.width > 0
            && (self.negative || flags.contains(Flags::PLUS) || flags.contains(Flags::SPACE))
        {
            self.width -= 1;
        }

        // And by the alternate-form prefix, unless the value is zero.
        if flags.contains(Flags::ALT) && !self.zero_value {
            match self.base {
                8 => {
                    if self.width > 0 {
                        self.width -= 1;
                    }
                }
                2 | 16 => self.width = self.width.saturating_sub(2),
                _ => {}
            }
        }

        // Zero fill puts the sign before the padding.
        if flags.contains(Flags::ZERO) {
            if self.negative {
                session.emit(b'-');
            } else if flags.contains(Flags::PLUS) {
                session.emit(b'+');
            } else if flags.contains(Flags::SPACE) {
                session.emit(b' ');
            }
        }

        if flags.contains(Flags::ALT) && !self.zero_value {
            match self.base {
                8 => session.emit(b'0'),
                16 => {
                    session.emit(b'0');
                    session.emit(if self.upper { b'X' } else { b'x' });
                }
                2 => {
                    session.emit(b'0');
                    session.emit(if self.upper { b'B' } else { b'b' });
                }
                _ => {}
            }
        }

        // Right alignment: fill up to the (shrunken) width.
        if !flags.contains(Flags::LEFT_ALIGN) && self.width > content {
            let fill = if flags.contains(Flags::ZERO) { b'0' } else { b' ' };
            for _ in content..self.width {
                session.emit(fill);
            }
        }

        // Space fill puts the sign right before the content.
        if !flags.contains(Flags::ZERO) {
            if self.negative {
                session.emit(b'-');
            } else if flags.contains(Flags::PLUS) {
                session.emit(b'+');
            } else if flags.contains(Flags::SPACE) && content >= self.width {
                session.emit(b' ');
            }
        }
    }

    /// Left-alignment fill after the content.
    pub(crate) fn post(&self, session: &mut Session<'_>, content: usize) {
        if self.flags.contains(Flags::LEFT_ALIGN) && self.width > content {
            for _ in content..self.width {
                session.emit(b' ');
            }
        }
    }
}
