//! Trace events and append-only trace sinks.
//!
//! The engine reports every scheduling decision through a [`TraceSink`].
//! Sinks must preserve call order and never drop events; emission is the
//! only externally observable side effect of a run besides the returned
//! summary.

use std::fmt;
use std::io::{self, BufWriter, Write};

use serde::{Deserialize, Serialize};

/// Scheduling event classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A process was (re)selected to run.
    Registered,
    /// A process finished its full burst.
    Completed,
    /// A process hit its I/O interval and was descheduled.
    Blocked,
}

/// One trace record: a process state snapshot at a scheduling event.
///
/// Events carry the process counters as observed at emission time, so a
/// trace can be replayed and diffed without access to the process table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    /// Simulated time of the event, in ticks.
    pub tick: u64,
    /// Index of the process in the table.
    pub process: u32,
    pub kind: EventKind,
    pub burst_total: u32,
    pub io_interval: u32,
    pub burst_done: u32,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            EventKind::Registered => "registered",
            EventKind::Completed => "completed",
            EventKind::Blocked => "I/O blocked",
        };
        write!(
            f,
            "Process: {} {}... ({} {} {} {})",
            self.process, verb, self.burst_total, self.io_interval, self.burst_done, self.tick
        )
    }
}

/// Append-only destination for trace records.
///
/// Implementations must append in call order and must not reorder or drop
/// records. The destination itself (file, buffer, stream) is owned by the
/// caller; the engine never opens or closes resources.
pub trait TraceSink {
    /// Append one event record.
    fn emit(&mut self, event: &TraceEvent) -> io::Result<()>;

    /// Append one out-of-band notice line (e.g. the timeout terminal line).
    fn notice(&mut self, message: &str) -> io::Result<()>;
}

/// Sink that formats events as text lines into any [`Write`] destination.
///
/// Output is buffered; call [`WriterSink::flush`] (or drop the sink after
/// the run) once the run has finished.
pub struct WriterSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap an already-open destination.
    pub fn new(out: W) -> Self {
        Self {
            out: BufWriter::new(out),
        }
    }

    /// Flush buffered lines to the underlying destination.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwrap the inner destination, flushing first.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn emit(&mut self, event: &TraceEvent) -> io::Result<()> {
        writeln!(self.out, "{event}")
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{message}")
    }
}

/// Test sink: captures events and notices in memory.
///
/// Use [`MemorySink::take`] to extract captured records after a run.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    events: Vec<TraceEvent>,
    notices: Vec<String>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured events so far, in emission order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Captured notices so far, in emission order.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Extract captured events, leaving the sink empty.
    pub fn take(&mut self) -> Vec<TraceEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TraceSink for MemorySink {
    fn emit(&mut self, event: &TraceEvent) -> io::Result<()> {
        self.events.push(*event);
        Ok(())
    }

    fn notice(&mut self, message: &str) -> io::Result<()> {
        self.notices.push(message.to_string());
        Ok(())
    }
}

/// Null sink: discards everything. Useful for smoke runs and benchmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn emit(&mut self, _event: &TraceEvent) -> io::Result<()> {
        Ok(())
    }

    fn notice(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }
}
