//! # Admin CSV Export
//!
//! Pure shaping of one period's submissions into the month-export CSV:
//! header row, one row per submission, UTF-8, comma-separated. Fetching
//! the rows is the repository's job
//! ([`SubmissionRepository::list_for_period`]); this module never touches
//! the network.
//!
//! [`SubmissionRepository::list_for_period`]: crate::submissions::SubmissionRepository::list_for_period

use porta_core::{PeriodCode, Submission};

/// Export column order. The five regional columns and the recomputed
/// total follow the key and status columns.
pub const EXPORT_COLUMNS: [&str; 9] = [
    "organisation",
    "period_code",
    "status",
    "dist_nsw",
    "dist_qld",
    "dist_sant",
    "dist_victas",
    "dist_wa",
    "dist_total",
];

/// Download filename for one period's export.
pub fn export_filename(period: &PeriodCode) -> String {
    format!("porta-{period}.csv")
}

/// Render submissions as CSV with a header row and trailing newline.
///
/// Rows appear in the order given (the repository already orders by
/// organisation). Totals come from [`porta_core::DistributionRecord::total`],
/// never from storage. Empty input yields the header alone.
pub fn export_period_csv(rows: &[Submission]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(EXPORT_COLUMNS.join(","));

    for submission in rows {
        let record = &submission.record;
        let fields = [
            csv_escape(submission.organisation.as_str()),
            submission.period_code.to_string(),
            submission.status.to_string(),
            record.nsw.to_string(),
            record.qld.to_string(),
            record.sant.to_string(),
            record.victas.to_string(),
            record.wa.to_string(),
            record.total().to_string(),
        ];
        lines.push(fields.join(","));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

/// Quote a field when it contains a comma, quote, or line break;
/// interior quotes are doubled.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
