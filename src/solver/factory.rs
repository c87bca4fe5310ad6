use crate::domain::{
    models::SolverConfig, solver_service::AssignmentSolver, value_objects::SolverStrategy,
};
use crate::solver::{CoinCbcSolver, GreedySolver, HighsSolver};
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver based on the run configuration
    pub fn create_solver(config: &SolverConfig) -> Arc<dyn AssignmentSolver> {
        Self::create_from_strategy(config.strategy)
    }

    /// Create a solver for a specific strategy
    pub fn create_from_strategy(strategy: SolverStrategy) -> Arc<dyn AssignmentSolver> {
        match strategy {
            SolverStrategy::Auto => Arc::new(HighsSolver::new()),
            SolverStrategy::CoinCbc => Arc::new(CoinCbcSolver::new()),
            SolverStrategy::Highs => Arc::new(HighsSolver::new()),
            SolverStrategy::Greedy => Arc::new(GreedySolver::new()),
        }
    }

    /// Get the default solver (HiGHS)
    pub fn default_solver() -> Arc<dyn AssignmentSolver> {
        Arc::new(HighsSolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_resolves_to_an_exact_backend() {
        assert!(SolverFactory::create_from_strategy(SolverStrategy::Auto).is_exact());
    }

    #[test]
    fn greedy_is_not_exact() {
        assert!(!SolverFactory::create_from_strategy(SolverStrategy::Greedy).is_exact());
    }
}
