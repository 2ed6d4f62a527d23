/*!
 * Utility functions for pathcheck
 */

use chrono::NaiveDate;

use crate::config::ReportFormat;

/// Timestamp layout used in report markers and the summary
pub const TIMESTAMP_FORMAT: &str = "%A, %d. %B %Y %I:%M%p";

/// Dated report file name, e.g. `20261019_illegal_paths.txt`
pub fn report_file_name(date: NaiveDate, format: ReportFormat) -> String {
    let extension = match format {
        ReportFormat::Text => "txt",
        ReportFormat::Json => "jsonl",
    };
    format!("{}_illegal_paths.{}", date.format("%Y%m%d"), extension)
}

/// Render characters as a quoted list, e.g. `['@', '#']`
pub fn format_char_list(chars: &[char]) -> String {
    let quoted: Vec<String> = chars.iter().map(|c| format!("{:?}", c)).collect();
    format!("[{}]", quoted.join(", "))
}

/// Format a number with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
