pub mod dashboard_constants;
pub mod dashboard_model;
pub mod dashboard_service;

#[cfg(test)]
mod dashboard_service_tests;

pub use dashboard_constants::*;
pub use dashboard_model::*;
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
