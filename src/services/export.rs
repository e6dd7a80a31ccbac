// SPDX-License-Identifier: MIT

//! CSV export of raw activity records.
//!
//! The format is a compatibility surface consumed by spreadsheet
//! imports: fixed header, date and subject quoted, numbers and
//! category bare, values taken verbatim from the stored record (no
//! normalization).

use crate::models::{ActivityRecord, Category};

const CSV_HEADER: &str = "Date,Subject,Minutes,Score/Count,Category";

/// Render records as CSV, one row per record, newest-to-oldest in the
/// order given.
pub fn to_csv(records: &[ActivityRecord]) -> String {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&format!(
            "\"{}\",\"{}\",{},{},{}\n",
            record.date,
            record.subject.as_deref().unwrap_or(""),
            record.minutes.unwrap_or(0.0),
            record.accuracy.unwrap_or(0.0),
            Category::export_label(record.category),
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, subject: &str, minutes: f64, accuracy: f64) -> ActivityRecord {
        ActivityRecord {
            id: 1,
            user_id: "u1".to_string(),
            date: date.to_string(),
            subject: Some(subject.to_string()),
            minutes: Some(minutes),
            accuracy: Some(accuracy),
            category: Some(Category::Task),
        }
    }

    #[test]
    fn test_exact_output_single_task_record() {
        let records = vec![record("2024-01-01T10:00:00Z", "Math", 30.0, 5.0)];
        assert_eq!(
            to_csv(&records),
            "Date,Subject,Minutes,Score/Count,Category\n\"2024-01-01T10:00:00Z\",\"Math\",30,5,task\n"
        );
    }

    #[test]
    fn test_header_only_for_empty_input() {
        assert_eq!(to_csv(&[]), "Date,Subject,Minutes,Score/Count,Category\n");
    }

    #[test]
    fn test_integral_floats_print_without_decimal_point() {
        let rows = to_csv(&[record("2024-01-01T10:00:00Z", "Math", 30.0, 12.5)]);
        assert!(rows.contains(",30,12.5,"));
    }

    #[test]
    fn test_missing_category_exports_as_flashcard() {
        let mut rec = record("2024-01-01T10:00:00Z", "Math", 30.0, 5.0);
        rec.category = None;
        assert!(to_csv(&[rec]).ends_with(",flashcard\n"));
    }

    #[test]
    fn test_missing_subject_exports_empty_quoted() {
        let mut rec = record("2024-01-01T10:00:00Z", "Math", 30.0, 5.0);
        rec.subject = None;
        assert!(to_csv(&[rec]).contains(",\"\","));
    }

    #[test]
    fn test_date_kept_verbatim_even_if_unparsable() {
        let rec = record("not-a-date", "Math", 1.0, 1.0);
        assert!(to_csv(&[rec]).contains("\"not-a-date\""));
    }
}
