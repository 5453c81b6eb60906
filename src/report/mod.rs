//! Reporting utilities: headline KPIs, comparison series, and formatted output.

use crate::domain::{Kpis, SalesRecord};
use crate::error::DashboardError;

pub mod format;
pub mod series;

pub use format::*;
pub use series::*;

/// Extract the headline KPIs from the last record of a selection.
///
/// The selection is expected in chronological order (as returned by
/// `Dataset::filter_by_year`), so the last record is the latest month.
/// An empty selection is an error rather than a zero-valued KPI set.
pub fn summarize(records: &[&SalesRecord]) -> Result<Kpis, DashboardError> {
    let last = records
        .last()
        .ok_or(DashboardError::EmptyInput { year: None })?;

    Ok(Kpis {
        year: last.year,
        month: last.month,
        last_units_sold: last.units_sold,
        last_gvv: last.gvv_millions,
        last_price_b: last.price_per_sqm_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::domain::Month;

    #[test]
    fn summarize_2025() {
        let ds = Dataset::builtin();
        let kpis = summarize(&ds.filter_by_year(2025)).unwrap();
        assert_eq!(kpis.last_units_sold, 130);
        assert_eq!(kpis.last_gvv, 80.6);
        assert_eq!(kpis.last_price_b, 10800.0);
        assert_eq!(kpis.month, Month::Jul);
    }

    #[test]
    fn summarize_2024() {
        let ds = Dataset::builtin();
        let kpis = summarize(&ds.filter_by_year(2024)).unwrap();
        assert_eq!(kpis.last_units_sold, 100);
        assert_eq!(kpis.last_gvv, 53.0);
        assert_eq!(kpis.last_price_b, 8950.0);
    }

    #[test]
    fn summarize_empty_is_an_error() {
        let err = summarize(&[]).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyInput { year: None }));
    }
}
