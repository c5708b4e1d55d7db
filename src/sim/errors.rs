//! Error types for simulator setup and execution.
//!
//! Errors are stage-specific: policy selection fails before any tick is
//! simulated, sink failures abort a run in flight. Running out of simulated
//! time is NOT an error; it is a normal terminal state reported through the
//! trace and the summary.

use std::fmt;
use std::io;

/// A requested scheduling policy has no implementation.
///
/// Returned from policy construction/dispatch and checked by the caller
/// before any simulation executes; no partial summary exists for this case.
#[derive(Debug)]
#[non_exhaustive]
pub struct UnsupportedPolicyError {
    /// The policy name as requested by the caller.
    pub name: String,
}

impl UnsupportedPolicyError {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for UnsupportedPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported scheduling policy: {:?}", self.name)
    }
}

impl std::error::Error for UnsupportedPolicyError {}

/// Fatal failures inside a single engine run.
#[derive(Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// The trace destination failed mid-run. Events already handed to the
    /// sink may or may not have reached the destination.
    Sink(io::Error),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink(err) => write!(f, "trace sink unavailable: {err}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        Self::Sink(err)
    }
}
