// Domain service interface for assignment solvers
// Defines the contract that any solver strategy must follow

use super::models::{AssignmentSolution, ProblemInstance, SolverConfig};

/// Structural invalidity of a problem instance, surfaced to the caller
#[derive(Debug, thiserror::Error)]
pub enum MalformedInstanceError {
    #[error("input is empty")]
    EmptyInput,

    #[error("expected {expected} lines of input, found {found}")]
    TruncatedInput { expected: usize, found: usize },

    #[error("line {line}: expected at least {expected} integer fields, found {found}")]
    WrongFieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: '{token}' is not a valid integer")]
    InvalidInteger { line: usize, token: String },

    #[error("header declares a negative count: {0}")]
    NegativeCount(i64),

    #[error("{kind} id {id} is outside the declared range 1..={max}")]
    IdOutOfRange {
        kind: &'static str,
        id: i64,
        max: usize,
    },

    #[error("duplicate {kind} record for id {id}")]
    DuplicateRecord { kind: &'static str, id: u32 },

    #[error("{kind} {id} references country {country}, outside the declared range 1..={max}")]
    UnknownCountry {
        kind: &'static str,
        id: u32,
        country: i64,
        max: usize,
    },
}

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("malformed instance: {0}")]
    MalformedInstance(#[from] MalformedInstanceError),

    #[error("solver execution failed: {0}")]
    ExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Contract every solver strategy implements
///
/// Strategies are interchangeable behind this trait: the exact backends
/// return the true optimum (or `Infeasible`/`TimeLimit`), the greedy backend
/// returns a deterministic lower bound. Infeasibility is a valid outcome
/// carried in the solution status, never an `Err`.
pub trait AssignmentSolver: Send + Sync {
    /// Solve one instance. The instance is read-only; all bookkeeping state
    /// is private to the call.
    fn solve(&self, instance: &ProblemInstance, config: &SolverConfig) -> Result<AssignmentSolution>;

    /// Name of this solver strategy
    fn name(&self) -> &str;

    /// Whether the reported satisfied count is the true optimum
    fn is_exact(&self) -> bool;
}
