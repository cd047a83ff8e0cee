// src/strategy/policy.rs

/// Stock levels derived from a daily demand rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recommendation {
    /// Inventory level at which a new order should be placed.
    pub reorder_point: u64,
    /// Target stock after replenishment.
    pub optimal_stock: u64,
}

/// Computes reorder point and optimal stock.
///
/// # Formula
/// Optimal Stock = ceil(Rate * LeadTime + Rate * SafetyDays)
///
/// There is no separate order-up-to level in this model, so the reorder point
/// equals the optimal stock. A rate of zero (no sales history) yields zero for
/// both, which is a valid recommendation.
pub fn compute_recommendation(daily_rate: f64, lead_time_days: u32, safety_days: u32) -> Recommendation {
    let demand_during_lead_time = daily_rate * f64::from(lead_time_days);
    let safety_stock = daily_rate * f64::from(safety_days);
    let target = (demand_during_lead_time + safety_stock).ceil();

    // Rates are never negative; NaN also lands on 0 here.
    let optimal_stock = if target > 0.0 { target as u64 } else { 0 };

    Recommendation {
        reorder_point: optimal_stock,
        optimal_stock,
    }
}
