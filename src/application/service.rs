// Application service: pre-check, solve, report

use crate::domain::{
    feasibility::{precheck, Precheck},
    models::{AssignmentSolution, ProblemInstance, SolverConfig},
    solver_service::{AssignmentSolver, Result},
    value_objects::SolveStatus,
};
use crate::solver::SolverFactory;
use std::sync::Arc;
use tracing::info;

/// Externally visible value for global infeasibility and the no-factories case
pub const INFEASIBLE_SENTINEL: i64 = -1;

/// Orchestrates one solve: feasibility pre-check, then the configured
/// strategy, then reduction to the single output integer.
pub struct AllocationService {
    solver: Arc<dyn AssignmentSolver>,
}

impl AllocationService {
    pub fn new(solver: Arc<dyn AssignmentSolver>) -> Self {
        Self { solver }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(SolverFactory::create_solver(config))
    }

    /// Full solve outcome, pre-check included
    pub fn solve(
        &self,
        instance: &ProblemInstance,
        config: &SolverConfig,
    ) -> Result<AssignmentSolution> {
        match precheck(instance) {
            Precheck::NoFactories => Ok(AssignmentSolution::infeasible(
                "no factories exist; nothing can ever be produced",
            )),
            Precheck::NoChildren => Ok(AssignmentSolution::optimal(0, Vec::new())),
            Precheck::FloorUnreachable {
                country,
                eligible,
                min_delivery,
            } => Ok(AssignmentSolution::infeasible(format!(
                "country {} requires {} deliveries but only {} of its children have a valid factory",
                country, min_delivery, eligible
            ))),
            Precheck::Proceed => {
                let solution = self.solver.solve(instance, config)?;
                info!(
                    solver = self.solver.name(),
                    status = %solution.status,
                    satisfied = solution.satisfied,
                    "solve finished"
                );
                Ok(solution)
            }
        }
    }

    /// The single externally visible integer
    pub fn run(&self, instance: &ProblemInstance, config: &SolverConfig) -> Result<i64> {
        Ok(report(&self.solve(instance, config)?))
    }
}

/// Reduce a solution to the output contract: `-1` for infeasibility or a
/// timed-out exact solve, otherwise the non-negative satisfied count.
pub fn report(solution: &AssignmentSolution) -> i64 {
    match solution.status {
        SolveStatus::Optimal => i64::from(solution.satisfied),
        SolveStatus::Infeasible | SolveStatus::TimeLimit => INFEASIBLE_SENTINEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Child, Country, Factory};
    use crate::solver::GreedySolver;

    fn greedy_service() -> AllocationService {
        AllocationService::new(Arc::new(GreedySolver::new()))
    }

    fn run(instance: &ProblemInstance) -> i64 {
        greedy_service()
            .run(instance, &SolverConfig::default())
            .unwrap()
    }

    #[test]
    fn no_factories_reports_the_sentinel() {
        let instance = ProblemInstance::new(
            vec![],
            vec![Country::new(1, 10, 0)],
            vec![Child::new(1, 1, vec![])],
        )
        .unwrap();
        assert_eq!(run(&instance), -1);
    }

    #[test]
    fn no_children_reports_zero() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 10, 0)],
            vec![],
        )
        .unwrap();
        assert_eq!(run(&instance), 0);
    }

    #[test]
    fn unreachable_floor_short_circuits_the_solver() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 10, 3)],
            vec![Child::new(1, 1, vec![1]), Child::new(2, 1, vec![1])],
        )
        .unwrap();
        assert_eq!(run(&instance), -1);
    }

    #[test]
    fn children_without_options_yield_zero_when_no_floor_binds() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 0)],
            vec![Country::new(1, 10, 0)],
            vec![Child::new(1, 1, vec![1])],
        )
        .unwrap();
        assert_eq!(run(&instance), 0);
    }

    #[test]
    fn report_maps_each_status() {
        assert_eq!(report(&AssignmentSolution::optimal(4, Vec::new())), 4);
        assert_eq!(report(&AssignmentSolution::infeasible("floor missed")), -1);
        assert_eq!(
            report(&AssignmentSolution::new(SolveStatus::TimeLimit, "budget elapsed")),
            -1
        );
    }
}
