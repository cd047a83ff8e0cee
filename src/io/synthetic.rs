// src/io/synthetic.rs

use crate::error::{AdvisorError, Result};
use crate::model::record::SaleRecord;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// `days` consecutive dates from `start`, or `InvalidInput` when the last one
/// would fall past the calendar chrono can represent.
fn consecutive_days(start: NaiveDate, days: u32) -> Result<impl Iterator<Item = NaiveDate>> {
    let span = Duration::days(i64::from(days.saturating_sub(1)));
    if start.checked_add_signed(span).is_none() {
        return Err(AdvisorError::InvalidInput(format!(
            "{} day(s) from {} runs past the last supported date",
            days, start
        )));
    }
    Ok(start.iter_days().take(days as usize))
}

/// First day of a `days`-long run that ends on `end`.
pub fn start_of_run(end: NaiveDate, days: u32) -> Result<NaiveDate> {
    end.checked_sub_signed(Duration::days(i64::from(days.saturating_sub(1))))
        .ok_or_else(|| {
            AdvisorError::InvalidInput(format!(
                "{} day(s) before {} runs past the first supported date",
                days, end
            ))
        })
}

/// Generates one sale per day with the exact same quantity.
/// Useful for checking that the estimator recovers a known rate.
pub fn generate_constant_sales(start: NaiveDate, days: u32, quantity: u32) -> Result<Vec<SaleRecord>> {
    Ok(consecutive_days(start, days)?
        .map(|date| SaleRecord::new(date, quantity))
        .collect())
}

/// Generates daily sales drawn from a Normal (Bell Curve) distribution.
///
/// # Arguments
/// * `start` - Date of the first generated sale.
/// * `days` - Number of consecutive days.
/// * `mean` - The average units sold per day (e.g., 10.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
/// * `seed` - Same seed, same sales.
pub fn generate_normal_sales(
    start: NaiveDate,
    days: u32,
    mean: f64,
    std_dev: f64,
    seed: u64,
) -> Result<Vec<SaleRecord>> {
    let normal = Normal::new(mean, std_dev).map_err(|e| {
        AdvisorError::InvalidInput(format!("bad demand distribution: {}", e))
    })?;
    let dates = consecutive_days(start, days)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let sales = dates
        .map(|date| {
            let val: f64 = normal.sample(&mut rng);
            // Round, then clamp negatives to 0 (sales cannot be negative).
            let quantity = val.round().clamp(0.0, f64::from(u32::MAX)) as u32;
            SaleRecord::new(date, quantity)
        })
        .collect();

    Ok(sales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::SalesHistory;
    use crate::model::record::parse_sale_date;
    use crate::strategy::estimator::estimate_daily_rate;

    #[test]
    fn constant_sales_recover_their_rate() {
        let start = parse_sale_date("2024-01-01").unwrap();
        let sales = generate_constant_sales(start, 45, 6).unwrap();
        assert_eq!(sales.len(), 45);

        let history = SalesHistory::from_records(sales);
        let as_of = parse_sale_date("2024-02-14").unwrap();
        // 31 days in [01-15, 02-14] over a 30-day denominator.
        assert_eq!(estimate_daily_rate(&history, as_of, 30), 6.2);
    }

    #[test]
    fn normal_sales_are_reproducible() {
        let start = parse_sale_date("2024-01-01").unwrap();
        let a = generate_normal_sales(start, 60, 10.0, 3.0, 7).unwrap();
        let b = generate_normal_sales(start, 60, 10.0, 3.0, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);
        assert_eq!(a[59].date, parse_sale_date("2024-02-29").unwrap());
    }

    #[test]
    fn heavy_negative_tail_is_clamped() {
        let start = parse_sale_date("2024-01-01").unwrap();
        let sales = generate_normal_sales(start, 200, 0.0, 5.0, 1).unwrap();
        assert!(sales.iter().any(|s| s.quantity == 0));
    }

    #[test]
    fn runs_past_the_calendar_are_rejected() {
        let start = parse_sale_date("2024-01-01").unwrap();
        assert!(matches!(
            generate_constant_sales(start, 100_000_000, 1),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_normal_sales(start, u32::MAX, 10.0, 3.0, 1),
            Err(AdvisorError::InvalidInput(_))
        ));
        assert!(matches!(
            start_of_run(start, u32::MAX),
            Err(AdvisorError::InvalidInput(_))
        ));
    }

    #[test]
    fn run_ending_on_a_date_starts_days_minus_one_earlier() {
        let end = parse_sale_date("2024-03-01").unwrap();
        assert_eq!(start_of_run(end, 1).unwrap(), end);
        assert_eq!(start_of_run(end, 0).unwrap(), end);
        assert_eq!(
            start_of_run(end, 60).unwrap(),
            parse_sale_date("2024-01-02").unwrap()
        );
        assert!(generate_constant_sales(end, 0, 3).unwrap().is_empty());
    }

    #[test]
    fn invalid_std_dev_is_rejected() {
        let start = parse_sale_date("2024-01-01").unwrap();
        let result = generate_normal_sales(start, 10, 5.0, -1.0, 1);
        assert!(matches!(result, Err(AdvisorError::InvalidInput(_))));
    }
}
