//! Deterministic scheduling-simulation core.
//!
//! Purpose:
//! - Simulate CPU scheduling disciplines over a fixed process set in
//!   discrete integer ticks, producing a time-ordered event trace and a
//!   final summary.
//! - Keep replay inputs small and deterministic by avoiding OS
//!   time/scheduling entirely: one `run` is a pure function of
//!   (process list, runtime bound, time slice, policy) plus sink effects.
//!
//! Invariants:
//! - `SimClock` is monotonic and advances only through explicit calls.
//! - Trace event ticks are non-decreasing; sinks append in call order.
//! - Process records are mutated only by the engine during a run.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod policy;
pub mod process;
pub mod trace;

pub use clock::SimClock;
pub use engine::{SimulationEngine, Summary, TIME_EXHAUSTED_NOTICE};
pub use errors::{EngineError, UnsupportedPolicyError};
pub use policy::{Fifo, PolicyClass, PolicyKind, RoundRobin, RunGrant, SchedulingPolicy};
pub use process::{ProcessRecord, ProcessSpec, ProcessTable};
pub use trace::{EventKind, MemorySink, NullSink, TraceEvent, TraceSink, WriterSink};
