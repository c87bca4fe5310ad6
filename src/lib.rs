// Domain layer: Instance model, feasibility rules and the solver contract
pub mod domain;

// Application layer: Input mapping and solve orchestration
pub mod application;

// Solver adapters: Concrete implementations of AssignmentSolver
pub mod solver;

// Re-export commonly used types
pub use domain::{
    precheck, AssignmentSolution, AssignmentSolver, Child, Country, Factory,
    MalformedInstanceError, Precheck, ProblemInstance, SolveStatus, SolverConfig, SolverError,
    SolverStatistics, SolverStrategy,
};

pub use application::{parse_instance, report, AllocationService, INFEASIBLE_SENTINEL};

pub use solver::{CoinCbcSolver, GreedySolver, HighsSolver, SolverFactory};
