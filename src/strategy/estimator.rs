// src/strategy/estimator.rs

use crate::model::history::SalesHistory;
use chrono::{Duration, NaiveDate};
use log::debug;

/// Estimates average units sold per day as of `as_of`.
///
/// Sums the sales dated in `[as_of - window_days, as_of]` and divides by the
/// number of days the product has been active, capped at `window_days`.
/// A product first sold five days ago is averaged over five days, not thirty.
///
/// Records outside the window are left out of the sum but still count when
/// finding the first sale date. An empty history yields `0.0`.
pub fn estimate_daily_rate(history: &SalesHistory, as_of: NaiveDate, window_days: u32) -> f64 {
    let Some(first_date) = history.earliest_date() else {
        return 0.0;
    };

    let window = i64::from(window_days);
    let window_start = as_of
        .checked_sub_signed(Duration::days(window))
        .unwrap_or(NaiveDate::MIN);

    let window_total: u64 = history
        .records()
        .iter()
        .filter(|record| record.date >= window_start && record.date <= as_of)
        .map(|record| u64::from(record.quantity))
        .sum();

    // Inclusive of the first day.
    let days_active = (as_of - first_date).num_days() + 1;
    let denominator = days_active.min(window).max(1);

    let rate = window_total as f64 / denominator as f64;
    debug!(
        "window total {} over {} day(s) (active {}), rate {:.3}",
        window_total, denominator, days_active, rate
    );
    rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{parse_sale_date, SaleRecord};

    fn date(raw: &str) -> NaiveDate {
        parse_sale_date(raw).unwrap()
    }

    #[test]
    fn empty_history_has_zero_rate() {
        let history = SalesHistory::new();
        assert_eq!(estimate_daily_rate(&history, date("2024-01-05"), 30), 0.0);
    }

    #[test]
    fn young_product_uses_days_active() {
        let history = SalesHistory::from_records([SaleRecord::new(date("2024-01-01"), 10)]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-05"), 30), 2.0);
    }

    #[test]
    fn mature_product_uses_full_window() {
        let start = date("2024-01-01");
        let history = SalesHistory::from_records(
            (0..30).map(|offset| SaleRecord::new(start + Duration::days(offset), 5)),
        );
        assert_eq!(estimate_daily_rate(&history, date("2024-01-30"), 30), 5.0);
    }

    #[test]
    fn old_sales_count_for_first_date_but_not_the_sum() {
        let history = SalesHistory::from_records([
            SaleRecord::new(date("2023-10-01"), 500),
            SaleRecord::new(date("2024-01-20"), 60),
        ]);
        // Window starts 2023-12-31; the October sale is outside it but makes
        // the product mature, so the denominator is the full 30 days.
        assert_eq!(estimate_daily_rate(&history, date("2024-01-30"), 30), 2.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let history = SalesHistory::from_records([
            SaleRecord::new(date("2023-12-31"), 15),
            SaleRecord::new(date("2023-12-30"), 1000),
            SaleRecord::new(date("2024-01-30"), 15),
        ]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-30"), 30), 1.0);
    }

    #[test]
    fn sales_after_as_of_are_ignored() {
        let history = SalesHistory::from_records([
            SaleRecord::new(date("2024-01-01"), 4),
            SaleRecord::new(date("2024-02-01"), 400),
        ]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-02"), 30), 2.0);
    }

    #[test]
    fn only_future_sales_clamp_denominator_to_one() {
        let history = SalesHistory::from_records([SaleRecord::new(date("2024-03-01"), 9)]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-01"), 30), 0.0);
    }

    #[test]
    fn same_day_sale_counts_as_one_day() {
        let history = SalesHistory::from_records([SaleRecord::new(date("2024-01-05"), 7)]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-05"), 30), 7.0);
    }

    #[test]
    fn zero_window_still_divides_by_one() {
        let history = SalesHistory::from_records([
            SaleRecord::new(date("2024-01-01"), 3),
            SaleRecord::new(date("2024-01-05"), 6),
        ]);
        assert_eq!(estimate_daily_rate(&history, date("2024-01-05"), 0), 6.0);
    }
}
