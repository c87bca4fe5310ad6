// Cheap necessary-condition check, run before any backend is invoked

use super::models::ProblemInstance;
use super::value_objects::CountryId;

/// Outcome of the pre-check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Precheck {
    /// No factory exists; nothing can ever be produced
    NoFactories,
    /// No child exists; the trivial optimum is zero
    NoChildren,
    /// A delivery floor exceeds the number of children that could possibly
    /// receive anything in that country
    FloorUnreachable {
        country: CountryId,
        eligible: u32,
        min_delivery: u32,
    },
    /// No obvious obstruction; hand the instance to a solver
    Proceed,
}

/// Necessary-condition screen: prunes hopeless instances without replacing
/// the solver's own feasibility determination.
///
/// A country's delivery floor can only be met by its own children, and only
/// by those that still have at least one valid factory option. If fewer such
/// children exist than the floor demands, no assignment can help.
pub fn precheck(instance: &ProblemInstance) -> Precheck {
    if instance.num_factories() == 0 {
        return Precheck::NoFactories;
    }
    if instance.num_children() == 0 {
        return Precheck::NoChildren;
    }

    let mut eligible = vec![0u32; instance.num_countries()];
    for (index, child) in instance.children().iter().enumerate() {
        if !instance.options(index).is_empty() {
            eligible[(child.country - 1) as usize] += 1;
        }
    }

    for country in instance.countries() {
        if country.min_delivery == 0 {
            continue;
        }
        let reachable = eligible[(country.id - 1) as usize];
        if reachable < country.min_delivery {
            return Precheck::FloorUnreachable {
                country: country.id,
                eligible: reachable,
                min_delivery: country.min_delivery,
            };
        }
    }

    Precheck::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Child, Country, Factory};

    #[test]
    fn no_factories_wins_over_everything() {
        let instance = ProblemInstance::new(
            vec![],
            vec![Country::new(1, 10, 5)],
            vec![Child::new(1, 1, vec![])],
        )
        .unwrap();
        assert_eq!(precheck(&instance), Precheck::NoFactories);
    }

    #[test]
    fn no_children_is_the_trivial_optimum() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 10, 0)],
            vec![],
        )
        .unwrap();
        assert_eq!(precheck(&instance), Precheck::NoChildren);
    }

    #[test]
    fn floor_above_eligible_children_is_unreachable() {
        // both children exist, but only one has any valid option
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 10, 2)],
            vec![Child::new(1, 1, vec![1]), Child::new(2, 1, vec![])],
        )
        .unwrap();
        assert_eq!(
            precheck(&instance),
            Precheck::FloorUnreachable {
                country: 1,
                eligible: 1,
                min_delivery: 2,
            }
        );
    }

    #[test]
    fn floor_binds_even_without_any_valid_exporter() {
        // country 2's children can only wish for factory 1, which sits in a
        // country that may not export; the floor still applies
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 0, 0), Country::new(2, 10, 1)],
            vec![Child::new(1, 2, vec![1])],
        )
        .unwrap();
        assert!(matches!(
            precheck(&instance),
            Precheck::FloorUnreachable { country: 2, .. }
        ));
    }

    #[test]
    fn satisfiable_floors_proceed() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 5)],
            vec![Country::new(1, 10, 2)],
            vec![Child::new(1, 1, vec![1]), Child::new(2, 1, vec![1])],
        )
        .unwrap();
        assert_eq!(precheck(&instance), Precheck::Proceed);
    }
}
