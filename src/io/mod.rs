pub mod reporting;
pub mod store;
pub mod synthetic;
