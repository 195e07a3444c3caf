//! Report generation port.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::WeekenderError;
use std::path::Path;

/// Port for writing backtest output.
pub trait ReportPort {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), WeekenderError>;

    /// Default implementation: writes each result to its own path.
    fn write_all(
        &self,
        results: &[(&BacktestResult, &Path)],
    ) -> Result<(), WeekenderError> {
        for (result, path) in results {
            self.write(result, path)?;
        }
        Ok(())
    }
}
