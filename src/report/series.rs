//! Paired month-aligned series for the comparison charts.
//!
//! Both charts compare two years month by month, so the series are only
//! meaningful when both years cover the same months in the same order.

use crate::data::Dataset;
use crate::domain::{Location, Month, SalesRecord};
use crate::error::DashboardError;

/// Two month-aligned series of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Paired<T> {
    pub prior: Vec<T>,
    pub current: Vec<T>,
}

impl<T: Copy> Paired<T> {
    fn from_rows(
        prior: &[&SalesRecord],
        current: &[&SalesRecord],
        field: impl Fn(&SalesRecord) -> T,
    ) -> Self {
        Self {
            prior: prior.iter().map(|r| field(*r)).collect(),
            current: current.iter().map(|r| field(*r)).collect(),
        }
    }
}

/// Chart-ready comparison of two years of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyComparison {
    pub prior_year: i32,
    pub current_year: i32,
    /// Shared x-axis, chronological.
    pub months: Vec<Month>,
    pub units_sold: Paired<u32>,
    /// Price per m² in Joinville.
    pub price_a: Paired<f64>,
    /// Price per m² in Saguaçu.
    pub price_b: Paired<f64>,
}

impl MonthlyComparison {
    /// Build the comparison of `prior_year` against `current_year`.
    pub fn build(dataset: &Dataset, prior_year: i32, current_year: i32) -> Result<Self, DashboardError> {
        let prior = dataset.filter_by_year(prior_year);
        if prior.is_empty() {
            return Err(DashboardError::EmptyInput { year: Some(prior_year) });
        }
        let current = dataset.filter_by_year(current_year);
        if current.is_empty() {
            return Err(DashboardError::EmptyInput { year: Some(current_year) });
        }

        let months: Vec<Month> = current.iter().map(|r| r.month).collect();
        if !prior.iter().map(|r| r.month).eq(months.iter().copied()) {
            return Err(DashboardError::MismatchedMonths {
                prior: prior_year,
                current: current_year,
            });
        }

        Ok(Self {
            prior_year,
            current_year,
            months,
            units_sold: Paired::from_rows(&prior, &current, |r| r.units_sold),
            price_a: Paired::from_rows(&prior, &current, |r| r.price_per_sqm(Location::Joinville)),
            price_b: Paired::from_rows(&prior, &current, |r| r.price_per_sqm(Location::Saguacu)),
        })
    }

    /// Compare the latest year against the year before it in the dataset.
    ///
    /// Returns `None` when the dataset covers fewer than two years.
    pub fn latest_pair(dataset: &Dataset) -> Option<Result<Self, DashboardError>> {
        let years = dataset.years();
        let [.., prior, current] = years.as_slice() else {
            return None;
        };
        Some(Self::build(dataset, *prior, *current))
    }

    /// Price series for one location.
    pub fn price(&self, location: Location) -> &Paired<f64> {
        match location {
            Location::Joinville => &self.price_a,
            Location::Saguacu => &self.price_b,
        }
    }

    /// Smallest and largest price across all four price series.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut values = Location::ALL
            .into_iter()
            .map(|loc| self.price(loc))
            .flat_map(|p| p.prior.iter().chain(&p.current))
            .copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Largest monthly units-sold value across both years.
    pub fn max_units_sold(&self) -> u32 {
        self.units_sold
            .prior
            .iter()
            .chain(&self.units_sold.current)
            .copied()
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_pair_matches_builtin_series() {
        let ds = Dataset::builtin();
        let cmp = MonthlyComparison::latest_pair(&ds).unwrap().unwrap();
        assert_eq!(cmp.prior_year, 2024);
        assert_eq!(cmp.current_year, 2025);
        assert_eq!(cmp.months, Month::ALL.to_vec());
        assert_eq!(cmp.units_sold.prior, vec![90, 85, 115, 120, 130, 105, 100]);
        assert_eq!(cmp.units_sold.current, vec![110, 105, 140, 155, 170, 145, 130]);
        assert_eq!(cmp.price(Location::Saguacu).current.last(), Some(&10800.0));
        assert_eq!(cmp.price_a.prior.first(), Some(&6800.0));
        assert_eq!(cmp.max_units_sold(), 170);
        assert_eq!(cmp.price_range(), Some((6800.0, 10800.0)));
    }

    #[test]
    fn missing_year_is_reported() {
        let ds = Dataset::builtin();
        let err = MonthlyComparison::build(&ds, 2023, 2024).unwrap_err();
        assert!(matches!(err, DashboardError::EmptyInput { year: Some(2023) }));
    }

    #[test]
    fn single_year_dataset_has_no_pair() {
        let ds = Dataset::builtin();
        let only_2024: Vec<SalesRecord> = ds
            .filter_by_year(2024)
            .into_iter()
            .cloned()
            .collect();
        let ds = Dataset::from_records(only_2024).unwrap();
        assert!(MonthlyComparison::latest_pair(&ds).is_none());
    }
}
