// HiGHS Solver Adapter
// Translates the pair model to the HiGHS RowProblem API

use crate::domain::{
    models::{AssignmentSolution, ProblemInstance, SolverConfig, SolverStatistics},
    solver_service::{AssignmentSolver, Result, SolverError},
    value_objects::SolveStatus,
};
use crate::solver::pairs::PairModel;
use highs::{Col, HighsModelStatus, RowProblem, Sense};
use std::time::Instant;
use tracing::debug;

/// Exact strategy on HiGHS
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn row_terms(cols: &[Col], indices: &[usize]) -> Vec<(Col, f64)> {
    indices.iter().map(|&i| (cols[i], 1.0)).collect()
}

impl AssignmentSolver for HighsSolver {
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

        // Add variables first, then constraints (RowProblem order)
        let mut pb = RowProblem::default();
        let cols: Vec<Col> = model
            .pairs
            .iter()
            .map(|_| pb.add_integer_column(1.0, 0.0..=1.0))
            .collect();

        for (_, indices) in &model.by_child {
            pb.add_row(..=1.0, row_terms(&cols, indices));
        }
        for (_, stock, indices) in &model.by_factory {
            pb.add_row(..=f64::from(*stock), row_terms(&cols, indices));
        }
        for (_, ceiling, indices) in &model.exports {
            pb.add_row(..=f64::from(*ceiling), row_terms(&cols, indices));
        }
        for (_, floor, indices) in &model.floors {
            pb.add_row(f64::from(*floor).., row_terms(&cols, indices));
        }

        debug!(
            variables = cols.len(),
            constraints = model.num_constraints(),
            "built HiGHS assignment model"
        );

        let mut highs_model = pb.optimise(Sense::Maximise);
        highs_model.set_option("output_flag", config.verbose);
        if let Some(limit) = config.time_limit {
            highs_model.set_option("time_limit", limit);
        }

        let solved = highs_model.solve();

        let statistics = SolverStatistics {
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: cols.len() as u32,
            num_constraints: model.num_constraints(),
        };

        match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();

                let objective_value: f64 = values.iter().sum();
                let satisfied = objective_value.round().max(0.0) as u32;

                let assignments = model
                    .pairs
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| values[i] > 0.5)
                    .map(|(_, &pair)| pair)
                    .collect();

                Ok(AssignmentSolution::optimal(satisfied, assignments)
                    .with_statistics(statistics))
            }
            HighsModelStatus::Infeasible => Ok(AssignmentSolution::infeasible(
                "no assignment satisfies every stock, export and delivery constraint",
            )
            .with_statistics(statistics)),
            HighsModelStatus::ReachedTimeLimit => Ok(AssignmentSolution::new(
                SolveStatus::TimeLimit,
                "HiGHS stopped before proving optimality: time limit reached",
            )
            .with_statistics(statistics)),
            status => Err(SolverError::ExecutionFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }

    fn is_exact(&self) -> bool {
        true
    }
}
