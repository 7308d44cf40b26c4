//! Result output port for writing per-image reports.

use crate::domain::EmojifyReport;

/// Port for outputting reports.
pub trait ResultOutput: Send + Sync {
    /// Writes a single report.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, report: &EmojifyReport) -> anyhow::Result<()>;

    /// Writes a whole batch of reports at once.
    ///
    /// Defaults to writing each report in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_all(&self, reports: &[EmojifyReport]) -> anyhow::Result<()> {
        reports.iter().try_for_each(|report| self.write(report))
    }

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
