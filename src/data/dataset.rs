//! The dashboard's sales dataset.
//!
//! The dataset is a small, fixed table of monthly observations. It is built once
//! by the composition root and then only read: filtering hands out borrowed rows
//! and never touches the underlying records.

use std::collections::BTreeMap;

use crate::domain::{Month, SalesRecord};
use crate::error::DashboardError;

/// Monthly columns of one year of builtin data, `Jan..Jul`.
struct YearColumns {
    year: i32,
    launched: [u32; 7],
    sold: [u32; 7],
    gvv: [f64; 7],
    price_a: [f64; 7],
    price_b: [f64; 7],
}

const BUILTIN: [YearColumns; 2] = [
    YearColumns {
        year: 2024,
        launched: [110, 95, 125, 130, 140, 120, 115],
        sold: [90, 85, 115, 120, 130, 105, 100],
        gvv: [45.0, 43.0, 58.0, 62.0, 71.0, 55.0, 53.0],
        price_a: [6800.0, 6950.0, 7050.0, 7150.0, 7250.0, 7300.0, 7400.0],
        price_b: [8200.0, 8350.0, 8500.0, 8600.0, 8750.0, 8850.0, 8950.0],
    },
    YearColumns {
        year: 2025,
        launched: [135, 115, 150, 160, 175, 155, 140],
        sold: [110, 105, 140, 155, 170, 145, 130],
        gvv: [60.5, 58.8, 81.2, 93.0, 110.5, 89.9, 80.6],
        price_a: [7900.0, 8050.0, 8200.0, 8350.0, 8500.0, 8600.0, 8750.0],
        price_b: [9800.0, 9950.0, 10150.0, 10300.0, 10500.0, 10650.0, 10800.0],
    },
];

/// Immutable table of monthly sales records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    /// Build the builtin Joinville market dataset (2024 and 2025, Jan..Jul).
    ///
    /// The data are literals that satisfy every dataset invariant, so this
    /// cannot fail; the tests check it through `from_records`.
    pub fn builtin() -> Self {
        let mut records = Vec::with_capacity(BUILTIN.len() * Month::ALL.len());
        for cols in &BUILTIN {
            for (i, month) in Month::ALL.into_iter().enumerate() {
                records.push(SalesRecord {
                    month,
                    year: cols.year,
                    units_launched: cols.launched[i],
                    units_sold: cols.sold[i],
                    gvv_millions: cols.gvv[i],
                    price_per_sqm_a: cols.price_a[i],
                    price_per_sqm_b: cols.price_b[i],
                });
            }
        }
        tracing::debug!(rows = records.len(), "built builtin dataset");
        Self { records }
    }

    /// Build a dataset from arbitrary records, enforcing the dataset invariants:
    ///
    /// - every year has exactly one record per month, in chronological order
    /// - all numeric fields are finite and non-negative
    /// - the month sequence is identical across years
    pub fn from_records(records: Vec<SalesRecord>) -> Result<Self, DashboardError> {
        validate(&records)?;
        Ok(Self { records })
    }

    /// All records, in insertion order.
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }

    /// Records of `year`, in their original relative order.
    ///
    /// An unknown year yields an empty view; deciding whether that is an error
    /// is left to the consumer.
    pub fn filter_by_year(&self, year: i32) -> Vec<&SalesRecord> {
        self.records.iter().filter(|r| r.year == year).collect()
    }
}

fn validate(records: &[SalesRecord]) -> Result<(), DashboardError> {
    let mut by_year: BTreeMap<i32, Vec<Month>> = BTreeMap::new();

    for r in records {
        let numeric = [r.gvv_millions, r.price_per_sqm_a, r.price_per_sqm_b];
        if numeric.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(invalid(format!(
                "{} {} has a negative or non-finite value",
                r.month, r.year
            )));
        }
        by_year.entry(r.year).or_default().push(r.month);
    }

    for (year, months) in &by_year {
        if months.as_slice() != Month::ALL.as_slice() {
            let labels: Vec<&str> = months.iter().map(|m| m.label()).collect();
            return Err(invalid(format!(
                "year {year} must list Jan..Jul exactly once in order, got [{}]",
                labels.join(", ")
            )));
        }
    }

    Ok(())
}

fn invalid(reason: String) -> DashboardError {
    DashboardError::InvalidDataset { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: Month) -> SalesRecord {
        SalesRecord {
            month,
            year,
            units_launched: 10,
            units_sold: 5,
            gvv_millions: 1.5,
            price_per_sqm_a: 100.0,
            price_per_sqm_b: 200.0,
        }
    }

    fn full_year(year: i32) -> Vec<SalesRecord> {
        Month::ALL.into_iter().map(|m| record(year, m)).collect()
    }

    #[test]
    fn builtin_satisfies_invariants() {
        let ds = Dataset::builtin();
        assert_eq!(ds.records().len(), 14);
        assert!(Dataset::from_records(ds.records().to_vec()).is_ok());
        assert_eq!(ds.years(), vec![2024, 2025]);
        assert_eq!(ds.latest_year(), Some(2025));
    }

    #[test]
    fn builtin_is_idempotent() {
        assert_eq!(Dataset::builtin(), Dataset::builtin());
    }

    #[test]
    fn filter_returns_seven_chronological_rows_per_year() {
        let ds = Dataset::builtin();
        for year in ds.years() {
            let rows = ds.filter_by_year(year);
            assert_eq!(rows.len(), 7);
            assert!(rows.iter().all(|r| r.year == year));
            let months: Vec<Month> = rows.iter().map(|r| r.month).collect();
            assert_eq!(months, Month::ALL.to_vec());
        }
    }

    #[test]
    fn filter_unknown_year_is_empty() {
        let ds = Dataset::builtin();
        assert!(ds.filter_by_year(2023).is_empty());
        assert!(!ds.contains_year(2023));
    }

    #[test]
    fn filter_does_not_touch_source() {
        let ds = Dataset::builtin();
        let before = ds.clone();
        let _ = ds.filter_by_year(2024);
        assert_eq!(ds, before);
    }

    #[test]
    fn rejects_incomplete_year() {
        let mut records = full_year(2024);
        records.pop();
        let err = Dataset::from_records(records).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidDataset { .. }));
    }

    #[test]
    fn rejects_out_of_order_months() {
        let mut records = full_year(2024);
        records.swap(0, 1);
        assert!(Dataset::from_records(records).is_err());
    }

    #[test]
    fn rejects_negative_values() {
        let mut records = full_year(2024);
        records[3].price_per_sqm_b = -1.0;
        let err = Dataset::from_records(records).unwrap_err();
        assert!(err.to_string().contains("Abr 2024"));
    }

    #[test]
    fn rejects_duplicate_month_in_one_year() {
        let mut records = full_year(2024);
        records.extend(full_year(2025));
        records[9] = record(2025, Month::Jan);
        assert!(Dataset::from_records(records).is_err());
    }
}
