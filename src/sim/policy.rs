//! Scheduling policies: selection of the next process and its run length.
//!
//! Both policies sit behind the [`SchedulingPolicy`] trait so the engine
//! stays policy-agnostic: one call returns which process runs next and for
//! how many contiguous ticks it may run. The engine still steps the granted
//! run one tick at a time, so I/O blocking can truncate any grant.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::sim::errors::UnsupportedPolicyError;
use crate::sim::process::ProcessTable;

/// Preemption class of a policy, carried into the run summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyClass {
    Nonpreemptive,
    Preemptive,
}

impl PolicyClass {
    /// Human-readable label used in summary output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nonpreemptive => "Batch (Nonpreemptive)",
            Self::Preemptive => "Interactive (Preemptive)",
        }
    }
}

/// One scheduling decision: a process index and a contiguous run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunGrant {
    /// Index of the process to run.
    pub process: usize,
    /// Maximum contiguous ticks the process may execute before reselection.
    pub ticks: u64,
}

/// Decides which process runs next and for how long.
///
/// `just_blocked` carries the process that ended the previous run by
/// blocking, if any; it applies only to the immediately following selection.
/// Returning `None` means no eligible process exists, which the engine
/// treats the same as running out of simulated time.
pub trait SchedulingPolicy {
    fn class(&self) -> PolicyClass;

    fn name(&self) -> &'static str;

    fn next_run(&mut self, table: &ProcessTable, just_blocked: Option<usize>) -> Option<RunGrant>;
}

/// Non-preemptive first-come-first-served.
///
/// Runs the selected process until it completes or blocks, then reselects
/// the lowest-index runnable process. A process that just blocked is skipped
/// on that reselection unless it is the only runnable process left.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fifo;

impl Fifo {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulingPolicy for Fifo {
    fn class(&self) -> PolicyClass {
        PolicyClass::Nonpreemptive
    }

    fn name(&self) -> &'static str {
        "First-Come First-Served"
    }

    fn next_run(&mut self, table: &ProcessTable, just_blocked: Option<usize>) -> Option<RunGrant> {
        let idx = table.lowest_runnable(just_blocked)?;
        Some(RunGrant {
            process: idx,
            ticks: u64::from(table.get(idx).remaining()),
        })
    }
}

/// Preemptive round-robin with a fixed time slice.
///
/// Visits processes in circular index order. Complete processes are skipped
/// without consuming time; a runnable process is granted
/// `min(slice, remaining)` ticks and the cursor moves past it regardless of
/// how its run ends.
#[derive(Clone, Copy, Debug)]
pub struct RoundRobin {
    slice: u64,
    cursor: usize,
}

impl RoundRobin {
    /// Create a round-robin policy.
    ///
    /// # Panics
    ///
    /// Panics if `slice` is zero.
    pub fn new(slice: u64) -> Self {
        assert!(slice > 0, "round-robin time slice must be positive");
        Self { slice, cursor: 0 }
    }
}

impl SchedulingPolicy for RoundRobin {
    fn class(&self) -> PolicyClass {
        PolicyClass::Preemptive
    }

    fn name(&self) -> &'static str {
        "Round-Robin"
    }

    fn next_run(&mut self, table: &ProcessTable, _just_blocked: Option<usize>) -> Option<RunGrant> {
        let n = table.len();
        if n == 0 {
            return None;
        }

        for _ in 0..n {
            let idx = self.cursor;
            self.cursor = (self.cursor + 1) % n;
            let rec = table.get(idx);
            if rec.runnable() {
                return Some(RunGrant {
                    process: idx,
                    ticks: self.slice.min(u64::from(rec.remaining())),
                });
            }
        }

        None
    }
}

/// Identity of a supported policy, parsed from caller input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    Fifo,
    RoundRobin,
}

impl PolicyKind {
    /// Construct the policy. `time_slice` is used only by round-robin.
    ///
    /// # Panics
    ///
    /// Panics if `time_slice` is zero and the policy is round-robin.
    pub fn build(self, time_slice: u64) -> Box<dyn SchedulingPolicy> {
        match self {
            Self::Fifo => Box::new(Fifo::new()),
            Self::RoundRobin => Box::new(RoundRobin::new(time_slice)),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = UnsupportedPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fcfs" | "fifo" => Ok(Self::Fifo),
            "rr" | "round-robin" => Ok(Self::RoundRobin),
            other => Err(UnsupportedPolicyError::new(other)),
        }
    }
}
