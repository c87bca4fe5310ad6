// Application module: input mapping and service orchestration

pub mod mappers;
pub mod service;

pub use mappers::parse_instance;
pub use service::{report, AllocationService, INFEASIBLE_SENTINEL};
