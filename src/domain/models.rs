use super::solver_service::MalformedInstanceError;
use super::value_objects::{ChildId, CountryId, FactoryId, SolveStatus, SolverStrategy};

/// Toy production site owned by one country
#[derive(Debug, Clone)]
pub struct Factory {
    pub id: FactoryId,
    pub country: CountryId,
    pub stock: u32,
}

impl Factory {
    pub fn new(id: FactoryId, country: CountryId, stock: u32) -> Self {
        Self { id, country, stock }
    }
}

/// Country with an export ceiling on its factories and a delivery floor for its children
///
/// The two capacities are independent axes: a country exports through its
/// factories and imports through its children, and the flows need not balance.
#[derive(Debug, Clone)]
pub struct Country {
    pub id: CountryId,
    pub max_export: u32,
    pub min_delivery: u32,
}

impl Country {
    pub fn new(id: CountryId, max_export: u32, min_delivery: u32) -> Self {
        Self {
            id,
            max_export,
            min_delivery,
        }
    }
}

/// Child wanting at most one toy from a personal list of acceptable factories
#[derive(Debug, Clone)]
pub struct Child {
    pub id: ChildId,
    pub country: CountryId,
    /// Raw wish list as declared; may repeat ids or name factories that
    /// cannot serve. Sanitized into [`ProblemInstance::options`].
    pub wishlist: Vec<FactoryId>,
}

impl Child {
    pub fn new(id: ChildId, country: CountryId, wishlist: Vec<FactoryId>) -> Self {
        Self {
            id,
            country,
            wishlist,
        }
    }
}

/// Configuration for a solve run
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub strategy: SolverStrategy,
    /// Wall-clock budget in seconds for the exact backends
    pub time_limit: Option<f64>,
    pub verbose: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: SolverStrategy::Auto,
            time_limit: None,
            verbose: false,
        }
    }
}

/// Validated, immutable snapshot of one problem instance
///
/// Construction is the only way in: ids are checked against the declared
/// ranges, duplicate records are rejected, and each child's wish list is
/// reduced to the factories that could actually serve it (existing, stocked,
/// owned by a country that may still export). Solvers never mutate this;
/// their bookkeeping lives in private overlays.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    factories: Vec<Factory>,
    countries: Vec<Country>,
    children: Vec<Child>,
    /// Per child (same order as `children`): deduplicated valid factory options
    options: Vec<Vec<FactoryId>>,
}

impl ProblemInstance {
    pub fn new(
        factories: Vec<Factory>,
        countries: Vec<Country>,
        children: Vec<Child>,
    ) -> Result<Self, MalformedInstanceError> {
        let n = factories.len();
        let m = countries.len();
        let t = children.len();

        let factories = place_by_id(factories, "factory", n, |f| f.id)?;
        for factory in &factories {
            check_country_ref("factory", factory.id, factory.country, m)?;
        }
        let countries = place_by_id(countries, "country", m, |c| c.id)?;
        let children = place_by_id(children, "child", t, |c| c.id)?;
        for child in &children {
            check_country_ref("child", child.id, child.country, m)?;
        }

        let options = children
            .iter()
            .map(|child| valid_options(child, &factories, &countries))
            .collect();

        Ok(Self {
            factories,
            countries,
            children,
            options,
        })
    }

    pub fn num_factories(&self) -> usize {
        self.factories.len()
    }

    pub fn num_countries(&self) -> usize {
        self.countries.len()
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn factories(&self) -> &[Factory] {
        &self.factories
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Factory by id; ids were validated at construction
    pub fn factory(&self, id: FactoryId) -> &Factory {
        &self.factories[(id - 1) as usize]
    }

    /// Country by id; ids were validated at construction
    pub fn country(&self, id: CountryId) -> &Country {
        &self.countries[(id - 1) as usize]
    }

    /// Valid, deduplicated factory options of the child at `child_index`
    pub fn options(&self, child_index: usize) -> &[FactoryId] {
        &self.options[child_index]
    }

    /// All valid (child, factory) pairs, one per future decision variable
    pub fn valid_pairs(&self) -> Vec<(ChildId, FactoryId)> {
        self.children
            .iter()
            .zip(&self.options)
            .flat_map(|(child, options)| options.iter().map(|&f| (child.id, f)))
            .collect()
    }

    pub fn valid_pair_count(&self) -> usize {
        self.options.iter().map(Vec::len).sum()
    }

    /// Upper bound on any feasible satisfied count:
    /// min(total stock, child count, total export capacity)
    pub fn satisfaction_upper_bound(&self) -> u64 {
        let total_stock: u64 = self.factories.iter().map(|f| u64::from(f.stock)).sum();
        let total_export: u64 = self.countries.iter().map(|c| u64::from(c.max_export)).sum();
        total_stock.min(total_export).min(self.children.len() as u64)
    }
}

fn place_by_id<T>(
    records: Vec<T>,
    kind: &'static str,
    declared: usize,
    id_of: impl Fn(&T) -> u32,
) -> Result<Vec<T>, MalformedInstanceError> {
    let mut slots: Vec<Option<T>> = (0..declared).map(|_| None).collect();
    for record in records {
        let id = id_of(&record);
        if id == 0 || id as usize > declared {
            return Err(MalformedInstanceError::IdOutOfRange {
                kind,
                id: i64::from(id),
                max: declared,
            });
        }
        let slot = &mut slots[(id - 1) as usize];
        if slot.is_some() {
            return Err(MalformedInstanceError::DuplicateRecord { kind, id });
        }
        *slot = Some(record);
    }
    // distinct in-range ids and exactly `declared` records: every slot is filled
    Ok(slots.into_iter().flatten().collect())
}

fn check_country_ref(
    kind: &'static str,
    id: u32,
    country: CountryId,
    num_countries: usize,
) -> Result<(), MalformedInstanceError> {
    if country == 0 || country as usize > num_countries {
        return Err(MalformedInstanceError::UnknownCountry {
            kind,
            id,
            country: i64::from(country),
            max: num_countries,
        });
    }
    Ok(())
}

/// Reduce a wish list to the factories that could actually serve the child:
/// the id must name an existing factory, the factory must hold stock, and its
/// owning country must be allowed to export at all. Duplicates collapse to
/// the first occurrence; unknown ids are dropped silently.
fn valid_options(child: &Child, factories: &[Factory], countries: &[Country]) -> Vec<FactoryId> {
    let mut seen = vec![false; factories.len()];
    let mut options = Vec::new();
    for &f in &child.wishlist {
        if f == 0 || f as usize > factories.len() {
            continue;
        }
        let idx = (f - 1) as usize;
        if seen[idx] {
            continue;
        }
        seen[idx] = true;
        let factory = &factories[idx];
        if factory.stock == 0 {
            continue;
        }
        if countries[(factory.country - 1) as usize].max_export == 0 {
            continue;
        }
        options.push(f);
    }
    options
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_constraints: u32,
}

/// Assignment produced by a solver: which child receives from which factory
///
/// The mapping is partial (unsatisfied children are absent) and is derived
/// data, discarded once the satisfied count has been reported.
#[derive(Debug, Clone)]
pub struct AssignmentSolution {
    pub status: SolveStatus,
    /// Number of satisfied children; zero unless `status` is `Optimal`
    pub satisfied: u32,
    pub assignments: Vec<(ChildId, FactoryId)>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl AssignmentSolution {
    pub fn new(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            satisfied: 0,
            assignments: Vec::new(),
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn optimal(satisfied: u32, assignments: Vec<(ChildId, FactoryId)>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            satisfied,
            assignments,
            message: "Optimal assignment found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn infeasible(message: impl Into<String>) -> Self {
        Self::new(SolveStatus::Infeasible, message)
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn is_feasible(&self) -> bool {
        self.status == SolveStatus::Optimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_country() -> Vec<Country> {
        vec![Country::new(1, 10, 0)]
    }

    #[test]
    fn construction_places_records_by_id() {
        let instance = ProblemInstance::new(
            vec![Factory::new(2, 1, 3), Factory::new(1, 1, 5)],
            one_country(),
            vec![Child::new(1, 1, vec![1, 2])],
        )
        .unwrap();
        assert_eq!(instance.factory(1).stock, 5);
        assert_eq!(instance.factory(2).stock, 3);
        assert_eq!(instance.options(0), &[1, 2]);
    }

    #[test]
    fn duplicate_record_is_rejected() {
        let err = ProblemInstance::new(
            vec![Factory::new(1, 1, 5), Factory::new(1, 1, 3)],
            one_country(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::DuplicateRecord { kind: "factory", id: 1 }
        ));
    }

    #[test]
    fn out_of_range_id_is_rejected() {
        let err = ProblemInstance::new(
            vec![Factory::new(3, 1, 5)],
            one_country(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::IdOutOfRange { kind: "factory", id: 3, max: 1 }
        ));
    }

    #[test]
    fn unknown_country_reference_is_rejected() {
        let err = ProblemInstance::new(
            vec![Factory::new(1, 2, 5)],
            one_country(),
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, MalformedInstanceError::UnknownCountry { .. }));
    }

    #[test]
    fn wishlist_is_sanitized() {
        // factory 2 has no stock, factory 3's country may not export,
        // factory 9 does not exist, factory 1 repeats
        let instance = ProblemInstance::new(
            vec![
                Factory::new(1, 1, 5),
                Factory::new(2, 1, 0),
                Factory::new(3, 2, 5),
            ],
            vec![Country::new(1, 10, 0), Country::new(2, 0, 0)],
            vec![Child::new(1, 1, vec![9, 2, 3, 1, 1])],
        )
        .unwrap();
        assert_eq!(instance.options(0), &[1]);
        assert_eq!(instance.valid_pair_count(), 1);
    }

    #[test]
    fn upper_bound_takes_the_tightest_axis() {
        let instance = ProblemInstance::new(
            vec![Factory::new(1, 1, 100)],
            vec![Country::new(1, 3, 0)],
            vec![
                Child::new(1, 1, vec![1]),
                Child::new(2, 1, vec![1]),
                Child::new(3, 1, vec![1]),
                Child::new(4, 1, vec![1]),
            ],
        )
        .unwrap();
        assert_eq!(instance.satisfaction_upper_bound(), 3);
    }
}
