//! Reorder quantities for retail products from their recent sales.
//!
//! Sales histories are read leniently from a JSON store, averaged over a
//! history-aware window into a daily demand rate, and turned into a reorder
//! point and target stock from fixed lead-time and safety-day assumptions.

pub mod error;
pub mod io;
pub mod model;
pub mod planning;
pub mod strategy;

pub use crate::error::{AdvisorError, Result};
pub use crate::model::history::{SalesHistory, UpsertOutcome};
pub use crate::model::product::{Catalog, ProductName};
pub use crate::model::record::SaleRecord;
pub use crate::planning::config::EstimationParameters;
pub use crate::planning::engine::{ProductReport, ReorderPlanner};
