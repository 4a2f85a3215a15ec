//! Directive grammar for the quill formatting engine.
//!
//! This crate provides a standalone parser for printf-style format
//! directives with **zero `quill_*` dependencies**. It knows nothing about
//! sinks, sessions, or argument values — it only turns the bytes after a
//! `%` into a structured [`Directive`].
//!
//! # Architecture
//!
//! `quill_spec` is the "raw" half of quill's two-layer design:
//!
//! - **`quill_spec`** (this crate): Produces `(Directive, consumed)` pairs
//!   from raw bytes. No argument pulling, no emission, no padding.
//! - **`quill`**: Resolves `*` counts against the argument list, runs the
//!   converters, and routes every byte through a sink.
//!
//! # Grammar
//!
//! ```text
//! directive = '%' flags? width? ( '.' precision )? length? type
//! flags     = ( '-' | '+' | ' ' | '0' | "'" | '#' )*
//! width     = digits | '*'
//! precision = digits | '*'
//! length    = 'hh' | 'h' | 'll' | 'l' | 'L' | 'z' | 'j' | 't'
//! type      = one of  c d i b B o u x X s p f F e E g G n % k K
//! ```
//!
//! Any other type letter parses as [`Kind::Verbatim`]: the engine emits the
//! letter itself and the `%` is swallowed.
//!
//! # Usage
//!
//! ```
//! use quill_spec::{parse_directive, Count, Flags, Kind};
//!
//! let (dir, used) = parse_directive(b"-08.3llx rest").unwrap();
//! assert_eq!(used, 8); // "-08.3llx"
//! assert_eq!(dir.kind, Kind::Hex);
//! assert_eq!(dir.width, Count::Fixed(8));
//! assert_eq!(dir.precision, Count::Fixed(3));
//! assert!(dir.flags.contains(Flags::LEFT_ALIGN | Flags::ZERO));
//! ```

mod directive;
mod flags;
mod parse;

pub use directive::{Count, Directive, Kind, Length};
pub use flags::Flags;
pub use parse::parse_directive;
