use crate::domain::{
    models::{AssignmentSolution, ProblemInstance, SolverConfig, SolverStatistics},
    solver_service::{AssignmentSolver, Result, SolverError},
    value_objects::SolveStatus,
};
use crate::solver::pairs::PairModel;
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;
use tracing::debug;

/// Exact strategy on COIN-OR CBC via `good_lp`
pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn sum_of(x: &[GoodLpVariable], indices: &[usize]) -> Expression {
    let mut expr: Expression = 0.into();
    for &i in indices {
        expr += x[i];
    }
    expr
}

impl AssignmentSolver for CoinCbcSolver {
    fn solve(
        &self,
        instance: &ProblemInstance,
        config: &SolverConfig,
    ) -> Result<AssignmentSolution> {
        let start_time = Instant::now();
        let model = PairModel::build(instance);

        if model.pairs.is_empty() {
            return Ok(model.empty_model_outcome());
        }

        // One binary decision per valid (child, factory) pair
        let mut vars = variables!();
        let x: Vec<GoodLpVariable> = model
            .pairs
            .iter()
            .map(|_| vars.add(variable().binary()))
            .collect();

        // Each satisfied pair counts one child
        let mut objective: Expression = 0.into();
        for &var in &x {
            objective += var;
        }

        let mut lp_model = vars.maximise(objective).using(coin_cbc::coin_cbc);
        lp_model.set_parameter("log", if config.verbose { "1" } else { "0" });
        if let Some(limit) = config.time_limit {
            lp_model.set_parameter("sec", &limit.to_string());
        }

        for (_, indices) in &model.by_child {
            lp_model = lp_model.with(sum_of(&x, indices).leq(1.0));
        }
        for (_, stock, indices) in &model.by_factory {
            lp_model = lp_model.with(sum_of(&x, indices).leq(f64::from(*stock)));
        }
        for (_, ceiling, indices) in &model.exports {
            lp_model = lp_model.with(sum_of(&x, indices).leq(f64::from(*ceiling)));
        }
        for (_, floor, indices) in &model.floors {
            lp_model = lp_model.with(sum_of(&x, indices).geq(f64::from(*floor)));
        }

        debug!(
            variables = x.len(),
            constraints = model.num_constraints(),
            "built CBC assignment model"
        );

        let solution_result = lp_model.solve();

        let statistics = SolverStatistics {
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: x.len() as u32,
            num_constraints: model.num_constraints(),
        };

        match solution_result {
            Ok(sol) => {
                // Round the objective to shed floating-point solver artifacts
                let objective_value: f64 = x.iter().map(|&var| sol.value(var)).sum();
                let satisfied = objective_value.round().max(0.0) as u32;

                let assignments = model
                    .pairs
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| sol.value(x[i]) > 0.5)
                    .map(|(_, &pair)| pair)
                    .collect();

                Ok(AssignmentSolution::optimal(satisfied, assignments)
                    .with_statistics(statistics))
            }
            Err(ResolutionError::Infeasible) => Ok(AssignmentSolution::infeasible(
                "no assignment satisfies every stock, export and delivery constraint",
            )
            .with_statistics(statistics)),
            Err(ResolutionError::Unbounded) => Err(SolverError::ExecutionFailed(
                "CBC reported an unbounded model".to_string(),
            )),
            Err(ResolutionError::Other(msg)) => {
                // CBC stopped without a certificate, typically the `sec` budget
                Ok(AssignmentSolution::new(
                    SolveStatus::TimeLimit,
                    format!("CBC stopped before proving optimality: {}", msg),
                )
                .with_statistics(statistics))
            }
            Err(e) => Err(SolverError::ExecutionFailed(format!("{:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }

    fn is_exact(&self) -> bool {
        true
    }
}
