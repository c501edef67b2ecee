pub mod goals_errors;
pub mod goals_model;
pub mod goals_service;
pub mod goals_traits;


pub use goals_errors::GoalError;
pub use goals_model::*;
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
