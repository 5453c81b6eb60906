//! Shared "selection" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! filter by year -> KPIs -> comparison series -> CSV
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Every output is computed independently, so a failing KPI lookup never hides
//! the table, the charts or the download.

use std::path::{Path, PathBuf};

use crate::data::Dataset;
use crate::domain::{Kpis, SalesRecord};
use crate::error::DashboardError;
use crate::io::export::{export_file_name, to_csv, write_csv};
use crate::report::{MonthlyComparison, summarize};

/// All computed outputs for one selected year.
#[derive(Debug)]
pub struct DashboardView<'a> {
    pub year: i32,
    /// Table rows (borrowed from the dataset).
    pub records: Vec<&'a SalesRecord>,
    pub kpis: Result<Kpis, DashboardError>,
    /// `None` when the dataset has fewer than two years to compare.
    pub comparison: Option<Result<MonthlyComparison, DashboardError>>,
}

impl<'a> DashboardView<'a> {
    /// Recompute the dashboard for `year`. Call this on every selection change.
    pub fn for_year(dataset: &'a Dataset, year: i32) -> Self {
        let records = dataset.filter_by_year(year);
        let kpis = summarize(&records).map_err(|err| match err {
            DashboardError::EmptyInput { year: None } => DashboardError::EmptyInput { year: Some(year) },
            other => other,
        });
        if let Err(err) = &kpis {
            tracing::warn!(year, error = %err, "KPI computation failed");
        }

        let comparison = MonthlyComparison::latest_pair(dataset);
        tracing::debug!(year, rows = records.len(), "computed dashboard view");

        Self {
            year,
            records,
            kpis,
            comparison,
        }
    }

    /// CSV bytes of the selected year.
    pub fn csv(&self) -> Result<Vec<u8>, DashboardError> {
        to_csv(&self.records)
    }

    /// Download file name of the selected year.
    pub fn file_name(&self) -> String {
        export_file_name(self.year)
    }

    /// Write the CSV download into `dir` and return the file path.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, DashboardError> {
        let path = dir.join(self.file_name());
        write_csv(&path, &self.records)?;
        Ok(path)
    }
}
