// src/planning/config.rs

/// Process-wide estimation constants. Not persisted, not per-product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationParameters {
    /// Days averaged by the demand estimator.
    pub window_days: u32,
    /// Days between placing a reorder and receiving stock.
    pub lead_time_days: u32,
    /// Buffer days of demand held against forecast error.
    pub safety_days: u32,
    /// Maximum age of sales records kept in the store.
    pub retention_days: u32,
}

impl Default for EstimationParameters {
    fn default() -> Self {
        Self {
            window_days: 30,
            lead_time_days: 3,
            safety_days: 3,
            retention_days: 90,
        }
    }
}
