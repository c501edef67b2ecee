pub mod learning_errors;
pub mod learning_model;
pub mod learning_service;
pub mod learning_traits;


pub use learning_errors::LearningError;
pub use learning_model::*;
pub use learning_service::LearningService;
pub use learning_traits::{LearningRepositoryTrait, LearningServiceTrait};
