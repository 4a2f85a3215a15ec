//! Lightweight printf-style formatting engine.
//!
//! quill interprets classic `%` format templates against a slice of
//! typed [`Arg`] values and streams the result one byte at a time —
//! either through a caller-supplied [`Sink`] (printf mode) or into a
//! bounded byte buffer (snprintf mode). The hot path never allocates;
//! the engine suits logging shims, protocol text assembly, and other
//! places where `core::fmt` is the wrong shape.
//!
//! # Architecture
//!
//! - [`quill_spec`] parses directives (`%-08.3llx` and friends) into
//!   structured form — no emission, no argument access.
//! - This crate resolves `*` counts, runs the integer and float
//!   converters, wraps every value in the padding phases, and routes the
//!   bytes through the session's output target.
//!
//! # Usage
//!
//! ```
//! let mut buf = [0u8; 64];
//! let len = quill::snprintf(&mut buf, "%s has %d bytes", &quill::args!["quill", 5]);
//! assert_eq!(&buf[..len], b"quill has 5 bytes");
//!
//! // Direct mode prints through an installed sink.
//! let printer = quill::Printer::new();
//! printer.init(quill::sink::StringSink::new());
//! ```
//!
//! # Conversions
//!
//! `%c %d %i %u %o %x %X %b %B %s %p %f %F %e %E %g %G %k %K %n %%` —
//! binary (`%b`) and the byte-array hex dump (`%k`/`%K`) are extensions;
//! `%f`/`%e`/`%g`, `%p`, and `%k` sit behind the `float`/`engineering`,
//! `pointer`, and `hex-array` features (all default). Unknown type
//! letters are emitted verbatim, the `%` swallowed. Locale handling
//! (the `'` flag) is parsed and ignored.

mod args;
mod buffer;
#[cfg(feature = "float")]
mod float;
mod integer;
mod interp;
mod pad;
mod printer;
mod session;
pub mod sink;

pub use args::Arg;
pub use printer::{Printer, ProtectGuard};
pub use sink::Sink;

use printer::default_printer;

/// Capture argument values for a format call.
///
/// ```
/// let args = quill::args![28u32, "text", 3.5];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => {{
        let empty: [$crate::Arg<'static>; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::Arg::from($value)),+]
    };
}

/// Install (or replace) the default instance's sink.
pub fn init<S: Sink + Send + 'static>(sink: S) {
    default_printer().init(sink);
}

/// Direct print through the default instance. See [`Printer::printf`].
pub fn printf(template: &str, args: &[Arg<'_>]) -> usize {
    default_printer().printf(template, args)
}

/// Bounded-buffer print via the default instance. See
/// [`Printer::snprintf`].
pub fn snprintf(buf: &mut [u8], template: &str, args: &[Arg<'_>]) -> usize {
    default_printer().snprintf(buf, template, args)
}

/// Format into an owned string via the default instance. See
/// [`Printer::sprintf`].
pub fn sprintf(template: &str, args: &[Arg<'_>]) -> String {
    default_printer().sprintf(template, args)
}

/// Hold the default instance's direct-print lock across a block of
/// calls. See [`Printer::protect`].
pub fn protect() -> ProtectGuard<'static> {
    default_printer().protect()
}
