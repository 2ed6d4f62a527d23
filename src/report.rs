/*!
 * Console reporting for pathcheck
 *
 * Renders the end-of-run totals as tables using the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{ScanOutcome, Totals};
use crate::utils::format_number;

/// Everything the console report shows about one run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Report file path
    pub report_file: String,
    /// Time taken by the walk
    pub duration: Duration,
    /// Walk results
    pub outcome: ScanOutcome,
    /// Whether whitespace was checked
    pub whitespace_checked: bool,
}

/// Report generator for check results
#[derive(Debug, Default)]
pub struct Reporter;

impl Reporter {
    /// Create a new reporter
    pub fn new() -> Self {
        Self
    }

    /// Generate the report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        let summary_table = self.create_summary_table(report);
        let title = if report.outcome.is_success() {
            "✅  CHECK COMPLETE"
        } else {
            "⚠️  CHECK INCOMPLETE"
        };

        let totals = &report.outcome.totals;
        if totals.illegal_chars.is_empty() {
            return format!("{}\n{}", title, summary_table);
        }

        format!(
            "🔣  ILLEGAL CHARACTERS\n{}\n\n{}\n{}",
            self.create_chars_table(totals),
            title,
            summary_table
        )
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("\n{}", self.generate_report(report));
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let totals = &report.outcome.totals;
        let mut rows = vec![
            SummaryRow {
                key: "📄 Report File".to_string(),
                value: report.report_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "📂 Directories".to_string(),
                value: format_number(totals.dir_count),
            },
            SummaryRow {
                key: "📄 Files".to_string(),
                value: format_number(totals.file_count),
            },
            SummaryRow {
                key: "🙈 Skipped Hidden/System".to_string(),
                value: format_number(totals.skipped_count),
            },
            SummaryRow {
                key: "🚫 Illegal Directory Names".to_string(),
                value: format_number(totals.illegal_dirnames),
            },
            SummaryRow {
                key: "🚫 Illegal File Names".to_string(),
                value: format_number(totals.illegal_filenames),
            },
            SummaryRow {
                key: "🔣 Illegal Characters".to_string(),
                value: format_number(totals.illegal_char_count()),
            },
            SummaryRow {
                key: "📏 Paths Over Limit".to_string(),
                value: format_number(totals.over_length_count),
            },
        ];

        if report.whitespace_checked {
            rows.push(SummaryRow {
                key: "␣ Whitespace".to_string(),
                value: format_number(totals.whitespace_count),
            });
        }

        if !report.outcome.is_success() {
            rows.push(SummaryRow {
                key: "❌ Traversal Errors".to_string(),
                value: format_number(report.outcome.failures.len()),
            });
        }

        style(Table::new(rows))
    }

    fn create_chars_table(&self, totals: &Totals) -> String {
        #[derive(Tabled)]
        struct CharRow {
            #[tabled(rename = "Character")]
            character: char,

            #[tabled(rename = "Count")]
            count: String,
        }

        let rows: Vec<CharRow> = totals
            .char_frequencies()
            .into_iter()
            .map(|(character, count)| CharRow {
                character,
                count: format_number(count),
            })
            .collect();

        style(Table::new(rows))
    }
}

fn style(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}
