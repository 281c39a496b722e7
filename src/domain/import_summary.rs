//! Outcome of one bulk client import.

use serde::Serialize;

/// Number of row errors shown to a person before the list is cut short.
pub const ERROR_PREVIEW_LIMIT: usize = 5;

/// A rejected spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based row number in the `Client Information` sheet.
    pub row: u32,
    pub message: String,
}

impl RowError {
    pub fn new(row: u32, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

/// Counters and per-row errors accumulated over an import.
///
/// `total` counts every non-blank primary row. Rows without a client name are
/// `skipped`: they are part of `total` but count neither as successful nor
/// failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn record_success(&mut self) {
        self.successful += 1;
    }

    pub fn record_failure(&mut self, error: RowError) {
        self.failed += 1;
        self.errors.push(error);
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Human-readable headline for the response body.
    pub fn message(&self) -> String {
        format!(
            "Import completed: {} successful, {} failed",
            self.successful, self.failed
        )
    }

    /// The first `limit` errors as `Row N: message` lines, followed by
    /// `...and N more errors` when some were left out.
    pub fn error_preview(&self, limit: usize) -> Vec<String> {
        let mut lines: Vec<String> = self
            .errors
            .iter()
            .take(limit)
            .map(|e| format!("Row {}: {}", e.row, e.message))
            .collect();

        let hidden = self.errors.len().saturating_sub(limit);
        if hidden > 0 {
            let noun = if hidden == 1 { "error" } else { "errors" };
            lines.push(format!("...and {hidden} more {noun}"));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with_errors(n: u32) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for i in 0..n {
            summary.record_failure(RowError::new(i + 2, "Domain Name is required"));
        }
        summary
    }

    #[test]
    fn test_counters() {
        let mut summary = ImportSummary {
            total: 3,
            ..Default::default()
        };
        summary.record_success();
        summary.record_failure(RowError::new(3, "Domain Name is required"));
        summary.record_skip();

        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, vec![RowError::new(3, "Domain Name is required")]);
        assert_eq!(summary.message(), "Import completed: 1 successful, 1 failed");
    }

    #[test]
    fn test_preview_without_truncation() {
        let lines = summary_with_errors(5).error_preview(ERROR_PREVIEW_LIMIT);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Row 2: Domain Name is required");
        assert!(!lines.iter().any(|l| l.starts_with("...and")));
    }

    #[test]
    fn test_preview_truncates_after_five() {
        let lines = summary_with_errors(8).error_preview(ERROR_PREVIEW_LIMIT);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "Row 6: Domain Name is required");
        assert_eq!(lines[5], "...and 3 more errors");
    }

    #[test]
    fn test_preview_single_hidden_error() {
        let lines = summary_with_errors(6).error_preview(ERROR_PREVIEW_LIMIT);
        assert_eq!(lines.last().unwrap(), "...and 1 more error");
    }

    #[test]
    fn test_preview_empty() {
        assert!(ImportSummary::default().error_preview(5).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut summary = ImportSummary {
            total: 1,
            ..Default::default()
        };
        summary.record_failure(RowError::new(2, "Domain Name is required"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["errors"][0]["row"], 2);
        assert_eq!(json["errors"][0]["message"], "Domain Name is required");
    }
}
