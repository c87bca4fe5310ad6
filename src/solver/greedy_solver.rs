// Greedy heuristic strategy
//
// Deterministic lower bound on the exact optimum. Ordering rules:
// children ascending by valid-option count, ties by ascending child id;
// within a child, candidate factories ascending by contention (number of
// still-unassigned children listing the factory), ties by ascending factory
// id. No repair or backtracking: if any delivery floor is missed after the
// single pass, the whole result is infeasible.

use crate::domain::{
    models::{AssignmentSolution, ProblemInstance, SolverConfig, SolverStatistics},
    solver_service::{AssignmentSolver, Result},
    value_objects::{ChildId, FactoryId},
};
use std::time::Instant;
use tracing::debug;

pub struct GreedySolver;

impl GreedySolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssignmentSolver for GreedySolver {
    fn solve(
        &self,
        instance: &ProblemInstance,
        _config: &SolverConfig,
    ) -> Result<AssignmentSolution> {
        let start_time = Instant::now();
        let n = instance.num_factories();
        let m = instance.num_countries();

        // Scarce-option children first
        let mut order: Vec<usize> = (0..instance.num_children())
            .filter(|&i| !instance.options(i).is_empty())
            .collect();
        order.sort_by_key(|&i| (instance.options(i).len(), instance.children()[i].id));

        let mut contention = vec![0u32; n];
        for &i in &order {
            for &f in instance.options(i) {
                contention[(f - 1) as usize] += 1;
            }
        }

        // Private bookkeeping overlays; the instance stays untouched
        let mut remaining_stock: Vec<u32> = instance.factories().iter().map(|f| f.stock).collect();
        let mut exported = vec![0u32; m];
        let mut delivered = vec![0u32; m];
        let mut assignments: Vec<(ChildId, FactoryId)> = Vec::new();

        for &i in &order {
            let child = &instance.children()[i];

            let mut candidates: Vec<FactoryId> = instance.options(i).to_vec();
            candidates.sort_by_key(|&f| (contention[(f - 1) as usize], f));

            let mut chosen = None;
            for &f in &candidates {
                if remaining_stock[(f - 1) as usize] == 0 {
                    continue;
                }
                let exporter = instance.factory(f).country;
                if exported[(exporter - 1) as usize]
                    >= instance.country(exporter).max_export
                {
                    continue;
                }
                chosen = Some((f, exporter));
                break;
            }

            // This child no longer contends for anything, assigned or not
            for &f in instance.options(i) {
                contention[(f - 1) as usize] -= 1;
            }

            if let Some((f, exporter)) = chosen {
                remaining_stock[(f - 1) as usize] -= 1;
                exported[(exporter - 1) as usize] += 1;
                delivered[(child.country - 1) as usize] += 1;
                assignments.push((child.id, f));
            }
        }

        let statistics = SolverStatistics {
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            num_variables: instance.valid_pair_count() as u32,
            num_constraints: 0,
        };

        // A missed floor invalidates the whole pass
        for country in instance.countries() {
            let received = delivered[(country.id - 1) as usize];
            if received < country.min_delivery {
                debug!(
                    country = country.id,
                    received,
                    floor = country.min_delivery,
                    "greedy pass missed a delivery floor"
                );
                return Ok(AssignmentSolution::infeasible(format!(
                    "greedy pass delivered {} of the {} required in country {}",
                    received, country.min_delivery, country.id
                ))
                .with_statistics(statistics));
            }
        }

        let satisfied = assignments.len() as u32;
        Ok(AssignmentSolution::optimal(satisfied, assignments).with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "Greedy"
    }

    fn is_exact(&self) -> bool {
        false
    }
}
