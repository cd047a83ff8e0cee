// src/planning/engine.rs

use crate::model::history::SalesHistory;
use crate::model::product::Catalog;
use crate::planning::config::EstimationParameters;
use crate::strategy::estimator::estimate_daily_rate;
use crate::strategy::policy::compute_recommendation;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

// Serialize so the CSV writer can take it as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub product: String,
    pub as_of: NaiveDate,
    pub daily_rate: f64,
    pub reorder_point: u64,
    pub optimal_stock: u64,
    /// Every record in the history, inside the window or not.
    pub records_total: usize,
}

/// Runs the estimator and stock policy with one set of parameters.
#[derive(Debug, Clone, Default)]
pub struct ReorderPlanner {
    params: EstimationParameters,
}

impl ReorderPlanner {
    pub fn new(params: EstimationParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &EstimationParameters {
        &self.params
    }

    /// Recommendation for a single product.
    pub fn recommend(&self, product: &str, history: &SalesHistory, as_of: NaiveDate) -> ProductReport {
        let daily_rate = estimate_daily_rate(history, as_of, self.params.window_days);
        let recommendation = compute_recommendation(
            daily_rate,
            self.params.lead_time_days,
            self.params.safety_days,
        );
        debug!(
            "{}: rate {:.3}/day -> reorder at {}, stock up to {}",
            product, daily_rate, recommendation.reorder_point, recommendation.optimal_stock
        );

        ProductReport {
            product: product.to_string(),
            as_of,
            daily_rate,
            reorder_point: recommendation.reorder_point,
            optimal_stock: recommendation.optimal_stock,
            records_total: history.len(),
        }
    }

    /// Recommendations for every product, in name order.
    pub fn recommend_all(&self, catalog: &Catalog, as_of: NaiveDate) -> Vec<ProductReport> {
        catalog
            .iter()
            .map(|(name, history)| self.recommend(name.as_str(), history, as_of))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{parse_sale_date, SaleRecord};
    use chrono::Duration;

    fn date(raw: &str) -> NaiveDate {
        parse_sale_date(raw).unwrap()
    }

    #[test]
    fn thirty_days_of_five() {
        let mut catalog = Catalog::new();
        catalog.create_product("Beans").unwrap();
        let start = date("2024-01-01");
        for offset in 0..30 {
            catalog
                .record_sale("Beans", start + Duration::days(offset), 5)
                .unwrap();
        }

        let planner = ReorderPlanner::default();
        let report = planner.recommend("Beans", catalog.get("Beans").unwrap(), date("2024-01-30"));

        assert_eq!(report.daily_rate, 5.0);
        assert_eq!(report.optimal_stock, 30);
        assert_eq!(report.reorder_point, 30);
        assert_eq!(report.records_total, 30);
    }

    #[test]
    fn empty_product_reports_zero() {
        let mut catalog = Catalog::new();
        catalog.create_product("New").unwrap();

        let reports = ReorderPlanner::default().recommend_all(&catalog, date("2024-01-30"));

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].daily_rate, 0.0);
        assert_eq!(reports[0].reorder_point, 0);
        assert_eq!(reports[0].optimal_stock, 0);
    }

    #[test]
    fn custom_parameters_are_used() {
        let params = EstimationParameters {
            window_days: 7,
            lead_time_days: 2,
            safety_days: 1,
            retention_days: 90,
        };
        let history = SalesHistory::from_records([
            SaleRecord::new(date("2024-01-01"), 70),
            SaleRecord::new(date("2024-01-10"), 14),
        ]);

        let report = ReorderPlanner::new(params).recommend("Tea", &history, date("2024-01-10"));

        // Only the 2024-01-10 sale falls in [01-03, 01-10]; denominator 7.
        assert_eq!(report.daily_rate, 2.0);
        assert_eq!(report.optimal_stock, 6);
    }

    #[test]
    fn recommend_all_does_not_create_products() {
        let catalog = Catalog::new();
        let reports = ReorderPlanner::default().recommend_all(&catalog, date("2024-01-30"));
        assert!(reports.is_empty());
        assert!(catalog.is_empty());
    }
}
