//! Invariant checks over randomized process sets.
//!
//! Every check works from the observable outputs of a run (event snapshots,
//! summary, final table state); none of them re-implements the engine.

use proptest::prelude::*;

use schedsim_rs::{
    EventKind, Fifo, MemorySink, ProcessSpec, ProcessTable, RoundRobin, SimulationEngine,
    TraceEvent, TIME_EXHAUSTED_NOTICE,
};

/// Bound large enough to finish any generated process set.
const GENEROUS_BOUND: u64 = 10_000;

fn spec_strategy() -> impl Strategy<Value = Vec<ProcessSpec>> {
    proptest::collection::vec((1u32..=12, 0u32..=4), 1..6).prop_map(|raw| {
        raw.into_iter()
            .map(|(burst, io)| ProcessSpec {
                cpu_burst_total: burst,
                io_interval: io,
            })
            .collect()
    })
}

fn run_fifo(specs: &[ProcessSpec], bound: u64) -> (ProcessTable, MemorySink, schedsim_rs::Summary) {
    let mut table = ProcessTable::from_specs(specs);
    let mut sink = MemorySink::new();
    let summary = SimulationEngine::new(bound)
        .run(&mut table, &mut Fifo::new(), &mut sink)
        .unwrap();
    (table, sink, summary)
}

fn run_rr(
    specs: &[ProcessSpec],
    bound: u64,
    slice: u64,
) -> (ProcessTable, MemorySink, schedsim_rs::Summary) {
    let mut table = ProcessTable::from_specs(specs);
    let mut sink = MemorySink::new();
    let summary = SimulationEngine::new(bound)
        .run(&mut table, &mut RoundRobin::new(slice), &mut sink)
        .unwrap();
    (table, sink, summary)
}

/// Blocked snapshots of one process must be spaced exactly `io_interval`
/// executed ticks apart, starting `io_interval` ticks in.
fn check_block_spacing(events: &[TraceEvent], table: &ProcessTable) {
    for idx in 0..table.len() {
        let rec = table.get(idx);
        let blocked: Vec<&TraceEvent> = events
            .iter()
            .filter(|e| e.process == idx as u32 && e.kind == EventKind::Blocked)
            .collect();

        assert_eq!(
            blocked.len() as u32,
            rec.block_count,
            "block_count must match emitted Blocked events"
        );
        if rec.io_interval == 0 {
            assert!(blocked.is_empty(), "io_interval 0 must never block");
            continue;
        }

        let mut prev_done = 0u32;
        for ev in blocked {
            assert_eq!(
                ev.burst_done - prev_done,
                rec.io_interval,
                "blocks must fire every io_interval executed ticks"
            );
            prev_done = ev.burst_done;
        }
        assert!(rec.ticks_since_block <= rec.io_interval);
    }
}

/// Exactly one Completed event per process, carrying the full burst.
fn check_completions(events: &[TraceEvent], table: &ProcessTable) {
    for idx in 0..table.len() {
        let completed: Vec<&TraceEvent> = events
            .iter()
            .filter(|e| e.process == idx as u32 && e.kind == EventKind::Completed)
            .collect();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].burst_done, table.get(idx).burst_total);
    }
}

proptest! {
    #[test]
    fn fifo_finishes_everything_under_a_generous_bound(specs in spec_strategy()) {
        let (table, sink, summary) = run_fifo(&specs, GENEROUS_BOUND);
        let expected: u64 = specs.iter().map(|s| u64::from(s.cpu_burst_total)).sum();

        prop_assert!(summary.completed_all);
        prop_assert_eq!(summary.total_elapsed, expected);
        prop_assert!(summary.total_elapsed <= GENEROUS_BOUND);
        prop_assert!(table.all_complete());
        check_completions(sink.events(), &table);
        check_block_spacing(sink.events(), &table);
        prop_assert!(sink.notices().is_empty());
    }

    #[test]
    fn round_robin_finishes_everything_under_a_generous_bound(
        specs in spec_strategy(),
        slice in 1u64..=8,
    ) {
        let (table, sink, summary) = run_rr(&specs, GENEROUS_BOUND, slice);
        let expected: u64 = specs.iter().map(|s| u64::from(s.cpu_burst_total)).sum();

        prop_assert!(summary.completed_all);
        prop_assert_eq!(summary.total_elapsed, expected);
        check_completions(sink.events(), &table);
        check_block_spacing(sink.events(), &table);
    }

    /// Ticks are never idle: a timed-out run has executed exactly `bound`
    /// ticks across all processes.
    #[test]
    fn timeout_consumes_the_whole_bound(specs in spec_strategy(), slice in 1u64..=8) {
        let total: u64 = specs.iter().map(|s| u64::from(s.cpu_burst_total)).sum();
        prop_assume!(total > 1);
        let bound = total - 1;

        for (table, sink, summary) in [run_fifo(&specs, bound), run_rr(&specs, bound, slice)] {
            let executed: u64 = table.iter().map(|p| u64::from(p.burst_done)).sum();
            prop_assert_eq!(executed, bound);
            prop_assert!(!summary.completed_all);
            prop_assert_eq!(summary.total_elapsed, 0);
            prop_assert_eq!(sink.notices().len(), 1);
            prop_assert_eq!(&sink.notices()[0], TIME_EXHAUSTED_NOTICE);
        }
    }

    /// No uninterrupted round-robin run exceeds the time slice.
    #[test]
    fn round_robin_runs_never_exceed_the_slice(specs in spec_strategy(), slice in 1u64..=8) {
        let (_, sink, summary) = run_rr(&specs, GENEROUS_BOUND, slice);
        let events = sink.events();

        let registrations: Vec<(usize, u64)> = events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == EventKind::Registered)
            .map(|(pos, e)| (pos, e.tick))
            .collect();

        for (i, &(_, start)) in registrations.iter().enumerate() {
            let end = registrations
                .get(i + 1)
                .map(|&(_, t)| t)
                .unwrap_or(summary.total_elapsed);
            prop_assert!(end - start <= slice, "run of {} ticks exceeds slice {}", end - start, slice);
        }
    }

    /// Fair cycling: between two consecutive runs of the same process, every
    /// other process that had not yet completed is visited at least once.
    #[test]
    fn round_robin_cycles_fairly(specs in spec_strategy(), slice in 1u64..=8) {
        let (_, sink, _) = run_rr(&specs, GENEROUS_BOUND, slice);
        let events = sink.events();
        let n = specs.len() as u32;

        for p in 0..n {
            let reg_positions: Vec<usize> = events
                .iter()
                .enumerate()
                .filter(|(_, e)| e.process == p && e.kind == EventKind::Registered)
                .map(|(pos, _)| pos)
                .collect();

            for pair in reg_positions.windows(2) {
                let (lo, hi) = (pair[0], pair[1]);
                for q in (0..n).filter(|&q| q != p) {
                    let done_before = events[..lo]
                        .iter()
                        .any(|e| e.process == q && e.kind == EventKind::Completed);
                    if done_before {
                        continue;
                    }
                    let visited = events[lo..hi]
                        .iter()
                        .any(|e| e.process == q && e.kind == EventKind::Registered);
                    prop_assert!(visited, "process {} not visited between runs of {}", q, p);
                }
            }
        }
    }

    /// Without blocking, FIFO registers each process exactly once, in index
    /// order: a lower-index runnable process is never passed over.
    #[test]
    fn fifo_selects_lowest_index_first(bursts in proptest::collection::vec(1u32..=12, 1..6)) {
        let specs: Vec<ProcessSpec> = bursts
            .iter()
            .map(|&burst| ProcessSpec { cpu_burst_total: burst, io_interval: 0 })
            .collect();
        let (_, sink, _) = run_fifo(&specs, GENEROUS_BOUND);

        let registered: Vec<u32> = sink
            .events()
            .iter()
            .filter(|e| e.kind == EventKind::Registered)
            .map(|e| e.process)
            .collect();
        let expected: Vec<u32> = (0..specs.len() as u32).collect();
        prop_assert_eq!(registered, expected);
    }

    /// A lone blocking process blocks once per full interval it survives.
    #[test]
    fn lone_process_block_count_matches_intervals(burst in 1u32..=40, io in 1u32..=6) {
        let specs = [ProcessSpec { cpu_burst_total: burst, io_interval: io }];
        let (table, _, summary) = run_fifo(&specs, GENEROUS_BOUND);

        prop_assert!(summary.completed_all);
        prop_assert_eq!(table.get(0).block_count, (burst - 1) / io);
    }

    /// Replaying identical inputs yields identical event streams and
    /// summaries, byte for byte under serialization.
    #[test]
    fn replay_is_deterministic(specs in spec_strategy(), slice in 1u64..=8, bound in 1u64..=64) {
        let (_, sink_a, summary_a) = run_rr(&specs, bound, slice);
        let (_, sink_b, summary_b) = run_rr(&specs, bound, slice);

        let json_a = serde_json::to_string(sink_a.events()).unwrap();
        let json_b = serde_json::to_string(sink_b.events()).unwrap();
        prop_assert_eq!(json_a, json_b);
        prop_assert_eq!(summary_a, summary_b);
    }
}
