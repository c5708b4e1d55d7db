//! Educational CPU-scheduling simulator with deterministic replay.
//!
//! ## Scope
//! This crate simulates scheduling disciplines over a fixed, pre-enumerated
//! set of processes. Time is discrete integer ticks, every process is
//! present from tick 0, and "execution" is bookkeeping rather than real
//! computation. Two policies are implemented: non-preemptive
//! first-come-first-served and preemptive round-robin.
//!
//! ## Key invariants
//! - A run is fully deterministic given (process list, runtime bound, time
//!   slice, policy): replaying the same inputs yields an identical event
//!   sequence and summary.
//! - Trace events are emitted in non-decreasing tick order and sinks never
//!   reorder or drop them.
//! - A process blocks the moment it has executed `io_interval` consecutive
//!   ticks since its last block; an interval of zero never blocks.
//! - Running out of simulated time is a normal terminal state (trace notice
//!   plus partial summary), not an error.
//!
//! ## Run flow
//! `ProcessSpec list -> ProcessTable -> SimulationEngine::run(policy, sink)
//! -> TraceEvent stream + Summary`
//!
//! ## Notable entry points
//! - [`SimulationEngine`] / [`ProcessTable`]: the tick loop and its arena.
//! - [`PolicyKind`] / [`SchedulingPolicy`]: policy dispatch and the two
//!   implementations, [`Fifo`] and [`RoundRobin`].
//! - [`TraceSink`] implementations: [`WriterSink`] (textual lines),
//!   [`MemorySink`] (tests/replay), [`NullSink`].

pub mod sim;

pub use sim::{
    EngineError, EventKind, Fifo, MemorySink, NullSink, PolicyClass, PolicyKind, ProcessRecord,
    ProcessSpec, ProcessTable, RoundRobin, RunGrant, SchedulingPolicy, SimClock, SimulationEngine,
    Summary, TraceEvent, TraceSink, UnsupportedPolicyError, WriterSink, TIME_EXHAUSTED_NOTICE,
};
