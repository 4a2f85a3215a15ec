//! Printer instances and the direct-print lock.
//!
//! A [`Printer`] owns the sink used by direct-print calls. Direct prints
//! on one instance serialise on a reentrant mutex; buffer (snprintf)
//! calls never touch it — their state lives entirely on the caller's
//! stack. [`Printer::protect`] hands the same lock to the caller for a
//! whole block of calls, the reentrancy keeping the per-call lock free.

use std::cell::RefCell;
use std::sync::OnceLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::args::Arg;
use crate::interp;
use crate::session::Session;
use crate::sink::{Sink, StringSink};

type SinkSlot = RefCell<Option<Box<dyn Sink + Send>>>;

/// One formatting instance: an installed sink plus its print lock.
///
/// A fresh instance has no sink; direct prints return 0 until
/// [`Printer::init`] installs one. The process-wide default instance
/// behind the crate-level free functions works the same way.
///
/// A sink must not print through its own instance reentrantly — the
/// sink slot is exclusively borrowed for the duration of the call.
pub struct Printer {
    sink: ReentrantMutex<SinkSlot>,
}

impl Printer {
    /// New instance with no sink installed.
    pub fn new() -> Self {
        Self {
            sink: ReentrantMutex::new(RefCell::new(None)),
        }
    }

    /// Install (or replace) the direct-print sink.
    pub fn init<S: Sink + Send + 'static>(&self, sink: S) {
        let slot = self.sink.lock();
        *slot.borrow_mut() = Some(Box::new(sink));
    }

    /// Format directly through the installed sink.
    ///
    /// Returns the number of bytes the sink accepted, 0 when no sink is
    /// installed. Serialises against other direct prints on this
    /// instance.
    pub fn printf(&self, template: &str, args: &[Arg<'_>]) -> usize {
        let slot = self.sink.lock();
        let mut sink = slot.borrow_mut();
        let Some(sink) = sink.as_mut() else {
            return 0;
        };
        interp::run(Session::direct(sink.as_mut()), template, args)
    }

    /// Format into a bounded buffer, snprintf style.
    ///
    /// Always NUL-terminates when the buffer has any capacity. Returns
    /// the notional length — compare against the capacity to detect
    /// truncation. Needs no sink and takes no lock.
    pub fn snprintf(&self, buf: &mut [u8], template: &str, args: &[Arg<'_>]) -> usize {
        interp::run(Session::buffered(buf), template, args)
    }

    /// Format into an owned string.
    pub fn sprintf(&self, template: &str, args: &[Arg<'_>]) -> String {
        let mut sink = StringSink::new();
        interp::run(Session::direct(&mut sink), template, args);
        sink.into_string()
    }

    /// Hold the direct-print lock across a block of calls.
    ///
    /// While the guard lives, direct prints from other threads wait;
    /// prints from the holding thread proceed (the lock is reentrant).
    pub fn protect(&self) -> ProtectGuard<'_> {
        ProtectGuard {
            _guard: self.sink.lock(),
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for [`Printer::protect`].
pub struct ProtectGuard<'a> {
    _guard: ReentrantMutexGuard<'a, SinkSlot>,
}

/// The process-wide default instance.
pub(crate) fn default_printer() -> &'static Printer {
    static DEFAULT: OnceLock<Printer> = OnceLock::new();
    DEFAULT.get_or_init(Printer::new)
}
