use thiserror::Error;

/// Errors raised by the dashboard core (dataset, metrics, export).
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{}", empty_input_message(.year))]
    EmptyInput { year: Option<i32> },

    #[error("Month sequences differ between {prior} and {current}; series cannot be paired.")]
    MismatchedMonths { prior: i32, current: i32 },

    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Process exit code used when this error aborts the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            DashboardError::EmptyInput { .. }
            | DashboardError::MismatchedMonths { .. }
            | DashboardError::InvalidDataset { .. } => 2,
            DashboardError::Csv(_) | DashboardError::Io(_) => 4,
        }
    }
}

fn empty_input_message(year: &Option<i32>) -> String {
    match year {
        Some(year) => format!("No records for year {year}."),
        None => "No records to summarize.".to_string(),
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_errors_map_to_exit_codes() {
        let err: AppError = DashboardError::EmptyInput { year: Some(2030) }.into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "No records for year 2030.");
        assert_eq!(
            DashboardError::EmptyInput { year: None }.to_string(),
            "No records to summarize."
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = DashboardError::from(io).into();
        assert_eq!(err.exit_code(), 4);
    }
}
