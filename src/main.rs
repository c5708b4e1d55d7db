//! Scheduling Simulator CLI
//!
//! Runs one scheduling discipline over a fixed process set and writes the
//! event trace to a file or stdout.
//!
//! # Output Format
//!
//! One line per event:
//! `Process: <index> <verb>... (<burst_total> <io_interval> <burst_done> <tick>)`
//! plus a terminal `Not enough time to complete all processes!` line when
//! the runtime bound is exhausted first.
//!
//! The run summary is written to stderr upon completion:
//! `policy=<name> class=<class> elapsed=<ticks> completed=<bool>`
//!
//! # Exit Codes
//!
//! - `0`: Success (including timed-out runs; timeout is not an error)
//! - `1`: Trace destination failure
//! - `2`: Invalid arguments or configuration error

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use schedsim_rs::{PolicyKind, ProcessSpec, ProcessTable, SimulationEngine, WriterSink};

fn print_usage(exe: &std::ffi::OsStr) {
    eprintln!(
        "usage: {} [OPTIONS] --proc=<burst>[:<io>] [--proc=...]

OPTIONS:
    --proc=<burst>[:<io>]   Add a process: CPU burst ticks, optional I/O
                            blocking interval (default 0 = never blocks)
    --policy=<fcfs|rr>      Scheduling policy (default: fcfs)
    --runtime=<N>           Runtime bound in ticks (default: 10000)
    --slice=<N>             Round-robin time slice in ticks (default: 50)
    --out=<path>            Trace destination file (default: stdout)
    --help, -h              Show this help message",
        exe.to_string_lossy()
    );
}

fn parse_proc(value: &str) -> Option<ProcessSpec> {
    let (burst, io) = match value.split_once(':') {
        Some((burst, io)) => (burst, io.parse().ok()?),
        None => (value, 0),
    };
    let burst: u32 = burst.parse().ok()?;
    if burst == 0 {
        return None;
    }
    Some(ProcessSpec {
        cpu_burst_total: burst,
        io_interval: io,
    })
}

fn main() -> ExitCode {
    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "schedsim".into());

    let mut specs: Vec<ProcessSpec> = Vec::new();
    let mut policy = PolicyKind::Fifo;
    let mut runtime: u64 = 10_000;
    let mut slice: u64 = 50;
    let mut out_path: Option<PathBuf> = None;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid (non-UTF-8) argument");
            return ExitCode::from(2);
        };

        if let Some(value) = flag.strip_prefix("--proc=") {
            match parse_proc(value) {
                Some(spec) => specs.push(spec),
                None => {
                    eprintln!("invalid --proc value: {value} (expected <burst>[:<io>], burst > 0)");
                    return ExitCode::from(2);
                }
            }
        } else if let Some(value) = flag.strip_prefix("--policy=") {
            policy = match value.parse() {
                Ok(kind) => kind,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::from(2);
                }
            };
        } else if let Some(value) = flag.strip_prefix("--runtime=") {
            match value.parse() {
                Ok(n) if n > 0 => runtime = n,
                _ => {
                    eprintln!("invalid --runtime value: {value}");
                    return ExitCode::from(2);
                }
            }
        } else if let Some(value) = flag.strip_prefix("--slice=") {
            match value.parse() {
                Ok(n) if n > 0 => slice = n,
                _ => {
                    eprintln!("invalid --slice value: {value}");
                    return ExitCode::from(2);
                }
            }
        } else if let Some(value) = flag.strip_prefix("--out=") {
            out_path = Some(PathBuf::from(value));
        } else if flag == "--help" || flag == "-h" {
            print_usage(&exe);
            return ExitCode::SUCCESS;
        } else {
            eprintln!("unknown argument: {flag}");
            print_usage(&exe);
            return ExitCode::from(2);
        }
    }

    if specs.is_empty() {
        eprintln!("no processes given (use --proc=<burst>[:<io>])");
        print_usage(&exe);
        return ExitCode::from(2);
    }

    // The trace destination is opened here, not by the engine; a failure to
    // open or write it aborts the run.
    let dest: Box<dyn Write> = match &out_path {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("cannot open trace destination {}: {err}", path.display());
                return ExitCode::from(1);
            }
        },
        None => Box::new(io::stdout()),
    };
    let mut sink = WriterSink::new(dest);

    let mut table = ProcessTable::from_specs(&specs);
    let mut policy = policy.build(slice);
    let engine = SimulationEngine::new(runtime);

    let summary = match engine.run(&mut table, policy.as_mut(), &mut sink) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("simulation aborted: {err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = sink.flush() {
        eprintln!("trace flush failed: {err}");
        return ExitCode::from(1);
    }

    eprintln!(
        "policy={} class={} elapsed={} completed={}",
        summary.policy_name,
        summary.policy_class.label(),
        summary.total_elapsed,
        summary.completed_all
    );
    ExitCode::SUCCESS
}
