//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in memory as the immutable dashboard dataset
//! - exported to CSV (with the dashboard's column labels) and JSON
//! - reloaded later to verify an export

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Month of a monthly observation.
///
/// The dashboard covers the first seven months of each year. Declaration order
/// is chronological order, so the derived `Ord` sorts months correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Jan")]
    Jan,
    #[serde(rename = "Fev")]
    Fev,
    #[serde(rename = "Mar")]
    Mar,
    #[serde(rename = "Abr")]
    Abr,
    #[serde(rename = "Mai")]
    Mai,
    #[serde(rename = "Jun")]
    Jun,
    #[serde(rename = "Jul")]
    Jul,
}

impl Month {
    /// All months in chronological order.
    pub const ALL: [Month; 7] = [
        Month::Jan,
        Month::Fev,
        Month::Mar,
        Month::Abr,
        Month::Mai,
        Month::Jun,
        Month::Jul,
    ];

    /// Short label used on chart axes, tables and CSV exports.
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Fev => "Fev",
            Month::Mar => "Mar",
            Month::Abr => "Abr",
            Month::Mai => "Mai",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The two neighbourhoods tracked by the price-per-m² series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Location A: Joinville (city-wide average).
    Joinville,
    /// Location B: the Saguaçu neighbourhood.
    Saguacu,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Joinville, Location::Saguacu];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Location::Joinville => "Joinville",
            Location::Saguacu => "Saguaçu",
        }
    }
}

/// One (year, month) observation of the sales dataset.
///
/// Field renames match the column labels of the dashboard's table so that a
/// CSV export reads the same as the on-screen table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Mês")]
    pub month: Month,
    #[serde(rename = "Ano")]
    pub year: i32,
    #[serde(rename = "N° de Imóveis Lançados")]
    pub units_launched: u32,
    #[serde(rename = "N° de Unidades Vendidas")]
    pub units_sold: u32,
    /// Gross sales value (VGV) in millions of BRL.
    #[serde(rename = "VGV (R$ Milhões)")]
    pub gvv_millions: f64,
    /// Price per m² in Joinville.
    #[serde(rename = "Preço m² Joinville")]
    pub price_per_sqm_a: f64,
    /// Price per m² in Saguaçu.
    #[serde(rename = "Preço m² Saguaçu")]
    pub price_per_sqm_b: f64,
}

impl SalesRecord {
    /// Column labels, in serialization order.
    pub const HEADERS: [&'static str; 7] = [
        "Mês",
        "Ano",
        "N° de Imóveis Lançados",
        "N° de Unidades Vendidas",
        "VGV (R$ Milhões)",
        "Preço m² Joinville",
        "Preço m² Saguaçu",
    ];

    /// Price per m² for the given location.
    pub fn price_per_sqm(&self, location: Location) -> f64 {
        match location {
            Location::Joinville => self.price_per_sqm_a,
            Location::Saguacu => self.price_per_sqm_b,
        }
    }
}

/// Headline metrics: values of the last month of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    pub year: i32,
    pub month: Month,
    pub last_units_sold: u32,
    pub last_gvv: f64,
    pub last_price_b: f64,
}

/// Dashboard configuration as understood by the front-ends.
///
/// This is derived from CLI flags (plus `.env` / environment defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Year initially selected.
    pub year: i32,
    /// Directory where CSV downloads are written.
    pub export_dir: PathBuf,
    pub verbose: bool,
}

impl DashboardConfig {
    /// Year preselected when nothing else is configured (first option of the selector).
    pub const DEFAULT_YEAR: i32 = 2025;
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            year: Self::DEFAULT_YEAR,
            export_dir: PathBuf::from("."),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_sort_chronologically() {
        let mut months = vec![Month::Jul, Month::Jan, Month::Abr, Month::Fev];
        months.sort();
        assert_eq!(months, vec![Month::Jan, Month::Fev, Month::Abr, Month::Jul]);
        assert_eq!(Month::ALL.first(), Some(&Month::Jan));
        assert_eq!(Month::ALL.last(), Some(&Month::Jul));
    }

    #[test]
    fn price_lookup_by_location() {
        let r = SalesRecord {
            month: Month::Jan,
            year: 2024,
            units_launched: 1,
            units_sold: 1,
            gvv_millions: 1.0,
            price_per_sqm_a: 10.0,
            price_per_sqm_b: 20.0,
        };
        assert_eq!(r.price_per_sqm(Location::Joinville), 10.0);
        assert_eq!(r.price_per_sqm(Location::Saguacu), 20.0);
    }
}
