//! Plain-text summary report implementing ReportPort.

use std::fs;
use std::path::Path;

use crate::adapters::tables;
use crate::domain::backtest::BacktestResult;
use crate::domain::error::WeekenderError;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, result: &BacktestResult) -> String {
        let mut output = String::new();
        output.push_str("Weekend backtest\n================\n\n");
        output.push_str(&tables::render_run_summary(&result.config, result.data_range));
        output.push('\n');
        output.push_str(&tables::render_metrics_table(&result.metrics));
        output.push_str("\nGlossary\n--------\n");
        output.push_str(&tables::render_glossary());
        output
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &Path) -> Result<(), WeekenderError> {
        fs::write(output_path, self.render(result)).map_err(|e| WeekenderError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }
}
