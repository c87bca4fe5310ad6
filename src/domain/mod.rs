// Domain module: Business logic and models

pub mod feasibility;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use feasibility::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
