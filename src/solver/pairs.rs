// Decision-variable layout shared by the exact backends

use crate::domain::models::{AssignmentSolution, ProblemInstance};
use crate::domain::value_objects::{ChildId, CountryId, FactoryId};

/// One binary decision per valid (child, factory) pair, plus the pair-index
/// lists each constraint family sums over. Built once per solve from the
/// instance's validated adjacency; backends translate it into their own
/// variable handles by pair index.
pub(crate) struct PairModel {
    /// Pair at index i corresponds to decision variable i
    pub pairs: Vec<(ChildId, FactoryId)>,
    /// Per child with at least one option: its pair indices (sum ≤ 1)
    pub by_child: Vec<(ChildId, Vec<usize>)>,
    /// Per referenced factory: stock bound and its pair indices (sum ≤ stock)
    pub by_factory: Vec<(FactoryId, u32, Vec<usize>)>,
    /// Per exporting country: ceiling and the pair indices of its factories
    /// (sum ≤ max_export)
    pub exports: Vec<(CountryId, u32, Vec<usize>)>,
    /// Per country with a positive delivery floor: the pair indices of its
    /// children (sum ≥ min_delivery). The index list may be empty; the
    /// floor still binds and an empty sum cannot reach it.
    pub floors: Vec<(CountryId, u32, Vec<usize>)>,
}

impl PairModel {
    pub fn build(instance: &ProblemInstance) -> Self {
        let n = instance.num_factories();
        let m = instance.num_countries();

        let mut pairs = Vec::with_capacity(instance.valid_pair_count());
        let mut by_child = Vec::new();
        let mut factory_indices: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut export_indices: Vec<Vec<usize>> = vec![Vec::new(); m];
        let mut delivery_indices: Vec<Vec<usize>> = vec![Vec::new(); m];

        for (child_index, child) in instance.children().iter().enumerate() {
            let options = instance.options(child_index);
            if options.is_empty() {
                continue;
            }
            let mut indices = Vec::with_capacity(options.len());
            for &f in options {
                let i = pairs.len();
                pairs.push((child.id, f));
                indices.push(i);
                factory_indices[(f - 1) as usize].push(i);
                let exporter = instance.factory(f).country;
                export_indices[(exporter - 1) as usize].push(i);
                delivery_indices[(child.country - 1) as usize].push(i);
            }
            by_child.push((child.id, indices));
        }

        let by_factory = instance
            .factories()
            .iter()
            .zip(factory_indices)
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(factory, indices)| (factory.id, factory.stock, indices))
            .collect();

        let exports = instance
            .countries()
            .iter()
            .zip(&mut export_indices)
            .filter(|(_, indices)| !indices.is_empty())
            .map(|(country, indices)| (country.id, country.max_export, std::mem::take(indices)))
            .collect();

        let floors = instance
            .countries()
            .iter()
            .zip(&mut delivery_indices)
            .filter(|(country, _)| country.min_delivery > 0)
            .map(|(country, indices)| (country.id, country.min_delivery, std::mem::take(indices)))
            .collect();

        Self {
            pairs,
            by_child,
            by_factory,
            exports,
            floors,
        }
    }

    pub fn num_constraints(&self) -> u32 {
        (self.by_child.len() + self.by_factory.len() + self.exports.len() + self.floors.len()) as u32
    }

    /// Outcome of a model with no decision variables: zero satisfied, unless
    /// some delivery floor demands what nothing can supply.
    pub fn empty_model_outcome(&self) -> AssignmentSolution {
        match self.floors.first() {
            Some((country, floor, _)) => AssignmentSolution::infeasible(format!(
                "country {} requires {} deliveries but no child can be served",
                country, floor
            )),
            None => AssignmentSolution::optimal(0, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Child, Country, Factory};
    use crate::domain::value_objects::SolveStatus;

    fn two_country_instance() -> ProblemInstance {
        ProblemInstance::new(
            vec![Factory::new(1, 1, 2), Factory::new(2, 2, 1)],
            vec![Country::new(1, 5, 1), Country::new(2, 3, 0)],
            vec![
                Child::new(1, 1, vec![1, 2]),
                Child::new(2, 2, vec![1]),
                Child::new(3, 2, vec![]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn build_groups_pairs_by_constraint_family() {
        let model = PairModel::build(&two_country_instance());
        assert_eq!(
            model.pairs,
            vec![(1, 1), (1, 2), (2, 1)]
        );
        // child 3 has no options and gets no row
        assert_eq!(model.by_child.len(), 2);
        assert_eq!(model.by_factory, vec![(1, 2, vec![0, 2]), (2, 1, vec![1])]);
        assert_eq!(model.exports, vec![(1, 5, vec![0, 2]), (2, 3, vec![1])]);
        // only country 1 has a floor; its children's pairs are 0 and 1
        assert_eq!(model.floors, vec![(1, 1, vec![0, 1])]);
        assert_eq!(model.num_constraints(), 7);
    }

    #[test]
    fn empty_model_is_zero_without_floors() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 0)],
            vec![Country::new(1, 5, 0)],
            vec![Child::new(1, 1, vec![1])],
        )
        .unwrap();
        let model = PairModel::build(&instance);
        assert!(model.pairs.is_empty());
        let outcome = model.empty_model_outcome();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.satisfied, 0);
    }

    #[test]
    fn empty_model_is_infeasible_under_a_floor() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 0)],
            vec![Country::new(1, 5, 1)],
            vec![Child::new(1, 1, vec![1])],
        )
        .unwrap();
        let model = PairModel::build(&instance);
        assert_eq!(
            model.empty_model_outcome().status,
            SolveStatus::Infeasible
        );
    }
}
