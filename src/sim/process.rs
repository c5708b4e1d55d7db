//! Process descriptors and the engine-owned process arena.
//!
//! Processes are identified by their index in the table (0..N-1). That index
//! order is the table's total order: FIFO breaks ties by lowest index and
//! round-robin cycles in index order. The "current" and "previous" process
//! are always plain indices into the arena, never aliased references.

use serde::{Deserialize, Serialize};

/// Immutable input descriptor for one simulated process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Total CPU ticks required to finish. Must be positive.
    pub cpu_burst_total: u32,
    /// Consecutive executed ticks after which the process blocks for I/O.
    /// Zero means the process never blocks.
    pub io_interval: u32,
}

/// Mutable per-process simulation state.
///
/// Created once before the run, mutated only by the engine during the run,
/// frozen after completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Total CPU ticks required to finish (constant).
    pub burst_total: u32,
    /// CPU ticks executed so far. Invariant: `burst_done <= burst_total`.
    pub burst_done: u32,
    /// Blocking interval (constant). Zero means never blocks.
    pub io_interval: u32,
    /// Ticks executed since the last block (or since start). Invariant:
    /// `ticks_since_block <= io_interval` when `io_interval > 0`; reset to
    /// zero on every block.
    pub ticks_since_block: u32,
    /// Number of times this process has blocked.
    pub block_count: u32,
}

impl ProcessRecord {
    /// Build a fresh record from a spec.
    ///
    /// # Panics
    ///
    /// Panics if `cpu_burst_total` is zero.
    pub fn new(spec: ProcessSpec) -> Self {
        assert!(spec.cpu_burst_total > 0, "process burst must be positive");
        Self {
            burst_total: spec.cpu_burst_total,
            burst_done: 0,
            io_interval: spec.io_interval,
            ticks_since_block: 0,
            block_count: 0,
        }
    }

    /// Whether the process has finished its full burst.
    #[inline(always)]
    pub fn complete(&self) -> bool {
        self.burst_done == self.burst_total
    }

    /// Whether the process still has burst left to execute.
    #[inline(always)]
    pub fn runnable(&self) -> bool {
        !self.complete()
    }

    /// CPU ticks still required to finish.
    #[inline(always)]
    pub fn remaining(&self) -> u32 {
        self.burst_total - self.burst_done
    }
}

/// Engine-owned arena of process records, indexed by position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTable {
    records: Vec<ProcessRecord>,
}

impl ProcessTable {
    /// Build a table from input descriptors, preserving their order.
    pub fn from_specs(specs: &[ProcessSpec]) -> Self {
        Self {
            records: specs.iter().copied().map(ProcessRecord::new).collect(),
        }
    }

    /// Number of processes in the table.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no processes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Immutable access to a record by index.
    #[inline(always)]
    pub fn get(&self, idx: usize) -> &ProcessRecord {
        &self.records[idx]
    }

    /// Mutable access to a record by index.
    #[inline(always)]
    pub fn get_mut(&mut self, idx: usize) -> &mut ProcessRecord {
        &mut self.records[idx]
    }

    /// Whether every process in the table has completed.
    pub fn all_complete(&self) -> bool {
        self.records.iter().all(|p| p.complete())
    }

    /// Lowest-index runnable process, skipping `exclude` if another runnable
    /// process exists. Returns `None` only when nothing is runnable.
    pub fn lowest_runnable(&self, exclude: Option<usize>) -> Option<usize> {
        let preferred = self
            .records
            .iter()
            .enumerate()
            .find(|(idx, p)| p.runnable() && Some(*idx) != exclude)
            .map(|(idx, _)| idx);

        // The excluded process stays eligible as a last resort: a sole
        // runnable process keeps running after it blocks.
        preferred.or_else(|| exclude.filter(|&idx| self.records[idx].runnable()))
    }

    /// Iterate over the records in index order.
    pub fn iter(&self) -> impl Iterator<Item = &ProcessRecord> {
        self.records.iter()
    }
}
