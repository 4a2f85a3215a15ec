//! Per-call session state.
//!
//! A [`Session`] owns one top-level format call: the output target, the
//! running length, and the cancel latch. Direct sessions count bytes the
//! sink accepted and latch off on the first rejection; buffer sessions
//! count notionally and never cancel (truncation is the caller's signal).

use crate::buffer::BoundedWriter;
use crate::sink::Sink;

enum Out<'a> {
    Direct(&'a mut dyn Sink),
    Buffer(BoundedWriter<'a>),
}

pub(crate) struct Session<'a> {
    out: Out<'a>,
    len: usize,
    cancelled: bool,
}

impl<'a> Session<'a> {
    /// Session emitting through a sink (printf mode).
    pub(crate) fn direct(sink: &'a mut dyn Sink) -> Self {
        Self {
            out: Out::Direct(sink),
            len: 0,
            cancelled: false,
        }
    }

    /// Session packing into a bounded buffer (snprintf mode).
    pub(crate) fn buffered(buf: &'a mut [u8]) -> Self {
        Self {
            out: Out::Buffer(BoundedWriter::new(buf)),
            len: 0,
            cancelled: false,
        }
    }

    /// Emit one byte. After a sink rejection this is a no-op.
    pub(crate) fn emit(&mut self, byte: u8) {
        match &mut self.out {
            Out::Direct(sink) => {
                if self.cancelled {
                    return;
                }
                if sink.put(byte) {
                    self.len += 1;
                } else {
                    self.cancelled = true;
                }
            }
            Out::Buffer(writer) => {
                writer.push(byte);
                self.len += 1;
            }
        }
    }

    /// Running output length: accepted bytes (direct) or notional bytes
    /// (buffer). Exposed to `%n`.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Deliver the terminal NUL and return the final length. A cancelled
    /// session stays silent — the sink asked for no more bytes.
    pub(crate) fn finish(mut self) -> usize {
        match &mut self.out {
            Out::Direct(sink) => {
                if !self.cancelled {
                    sink.put(0);
                }
            }
            Out::Buffer(writer) => writer.terminate(),
        }
        self.len
    }
}
