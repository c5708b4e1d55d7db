//! Tick-driven simulation engine.
//!
//! The engine owns the tick loop: it repeatedly asks the active policy for
//! the next process and run length, steps the granted run one tick at a
//! time, emits trace events, and mutates process records. Stepping in
//! single-tick increments is what lets I/O blocking truncate a run before
//! its grant (or the round-robin slice) is exhausted.
//!
//! Invariants:
//! - Event ticks are non-decreasing over one run.
//! - A run given (table, bound, policy) is fully deterministic: replaying
//!   the same inputs yields an identical event sequence and summary.
//! - The process table is exclusively borrowed for the duration of `run`.

use serde::{Deserialize, Serialize};

use crate::sim::clock::SimClock;
use crate::sim::errors::EngineError;
use crate::sim::policy::{PolicyClass, SchedulingPolicy};
use crate::sim::process::ProcessTable;
use crate::sim::trace::{EventKind, TraceEvent, TraceSink};

/// Terminal notice emitted when the runtime bound is exhausted (or no
/// eligible process exists) while processes are still incomplete.
pub const TIME_EXHAUSTED_NOTICE: &str = "Not enough time to complete all processes!";

/// Final result of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub policy_class: PolicyClass,
    pub policy_name: String,
    /// Ticks consumed, recorded on natural completion. On a timed-out run
    /// this keeps its last recorded value (zero if completion was never
    /// reached); the run is partial, not failed.
    pub total_elapsed: u64,
    /// Whether every process finished within the runtime bound.
    pub completed_all: bool,
}

/// Policy-agnostic simulation driver.
#[derive(Clone, Copy, Debug)]
pub struct SimulationEngine {
    runtime_bound: u64,
}

impl SimulationEngine {
    /// Create an engine with a tick ceiling.
    ///
    /// # Panics
    ///
    /// Panics if `runtime_bound` is zero.
    pub fn new(runtime_bound: u64) -> Self {
        assert!(runtime_bound > 0, "runtime bound must be positive");
        Self { runtime_bound }
    }

    /// Tick ceiling for runs driven by this engine.
    #[inline(always)]
    pub fn runtime_bound(&self) -> u64 {
        self.runtime_bound
    }

    /// Drive the policy over the process table until every process completes
    /// or the runtime bound is exhausted.
    ///
    /// Emits a `Registered` event whenever a process is (re)selected, a
    /// `Blocked` event the moment a process hits its I/O interval, and a
    /// `Completed` event the moment a process finishes its burst. Timeout is
    /// a normal terminal state: the terminal notice goes to the sink and the
    /// summary marks the run as partial.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Sink`] if the sink fails; the run aborts at
    /// that point.
    pub fn run(
        &self,
        table: &mut ProcessTable,
        policy: &mut dyn SchedulingPolicy,
        sink: &mut dyn TraceSink,
    ) -> Result<Summary, EngineError> {
        let mut clock = SimClock::new();
        let mut total_elapsed = 0u64;
        let mut just_blocked: Option<usize> = None;

        'select: while !table.all_complete() {
            if clock.exhausted(self.runtime_bound) {
                break;
            }

            // No eligible process is terminal, same as running out of time.
            let Some(grant) = policy.next_run(table, just_blocked.take()) else {
                break;
            };
            let idx = grant.process;
            debug_assert!(table.get(idx).runnable());

            sink.emit(&snapshot(table, idx, EventKind::Registered, &clock))?;

            let mut remaining = grant.ticks;
            while remaining > 0 {
                if clock.exhausted(self.runtime_bound) {
                    break 'select;
                }

                {
                    let rec = table.get_mut(idx);
                    rec.burst_done += 1;
                    if rec.io_interval > 0 {
                        rec.ticks_since_block += 1;
                    }
                }
                clock.tick();
                remaining -= 1;

                let rec = table.get(idx);
                if rec.complete() {
                    sink.emit(&snapshot(table, idx, EventKind::Completed, &clock))?;
                    continue 'select;
                }
                if rec.io_interval > 0 && rec.ticks_since_block == rec.io_interval {
                    sink.emit(&snapshot(table, idx, EventKind::Blocked, &clock))?;
                    let rec = table.get_mut(idx);
                    rec.block_count += 1;
                    rec.ticks_since_block = 0;
                    just_blocked = Some(idx);
                    continue 'select;
                }
            }
            // Grant exhausted without an event: round-robin slice expiry.
        }

        let completed_all = table.all_complete();
        if completed_all {
            total_elapsed = clock.now_ticks();
        } else {
            sink.notice(TIME_EXHAUSTED_NOTICE)?;
        }

        Ok(Summary {
            policy_class: policy.class(),
            policy_name: policy.name().to_string(),
            total_elapsed,
            completed_all,
        })
    }
}

fn snapshot(table: &ProcessTable, idx: usize, kind: EventKind, clock: &SimClock) -> TraceEvent {
    let rec = table.get(idx);
    TraceEvent {
        tick: clock.now_ticks(),
        process: idx as u32,
        kind,
        burst_total: rec.burst_total,
        io_interval: rec.io_interval,
        burst_done: rec.burst_done,
    }
}
