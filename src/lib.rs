pub mod bmr;
pub mod config;
pub mod data;
pub mod error;
pub mod issues;
pub mod reference;
pub mod report;
pub mod resolver;
pub mod selection;
pub mod series;
pub mod state;
pub mod ui;
pub mod weather;

pub use error::{DashboardError, Result};
