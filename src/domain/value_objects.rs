// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

/// Identifier of a factory, in the declared range `1..=n`
pub type FactoryId = u32;
/// Identifier of a country, in the declared range `1..=m`
pub type CountryId = u32;
/// Identifier of a child, in the declared range `1..=t`
pub type ChildId = u32;

/// Outcome of a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A valid assignment was found; `satisfied` holds the child count
    Optimal,
    /// No assignment satisfies every stock, export and delivery-floor constraint
    Infeasible,
    /// Time budget elapsed before an optimality certificate was produced
    TimeLimit,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// Solver strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStrategy {
    /// Automatically select the default exact backend
    Auto,
    /// Exact optimum via COIN-OR CBC
    CoinCbc,
    /// Exact optimum via HiGHS
    Highs,
    /// Deterministic greedy heuristic; a lower bound, may over-report infeasibility
    Greedy,
}

impl fmt::Display for SolverStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStrategy::Auto => write!(f, "auto"),
            SolverStrategy::CoinCbc => write!(f, "cbc"),
            SolverStrategy::Highs => write!(f, "highs"),
            SolverStrategy::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for SolverStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverStrategy::Auto),
            "cbc" | "coin-cbc" | "coin_cbc" => Ok(SolverStrategy::CoinCbc),
            "highs" => Ok(SolverStrategy::Highs),
            "greedy" => Ok(SolverStrategy::Greedy),
            other => Err(format!(
                "unknown strategy '{}', expected auto, cbc, highs or greedy",
                other
            )),
        }
    }
}
