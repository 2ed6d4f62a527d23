/*!
 * End-of-run summary rendering
 */

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::matcher::MAX_PATH_LENGTH;
use crate::types::Totals;
use crate::utils::TIMESTAMP_FORMAT;

const RULE: &str = "================================================================";

/// Render the totals of a finished walk as report lines.
///
/// Pure: the completion time is passed in and nothing is written.
/// Per-character lines only list characters that were actually seen.
pub fn summarize(totals: &Totals, config: &Config, completed_at: DateTime<Local>) -> Vec<String> {
    let mut lines = vec![
        "========================== SUMMARY =============================".to_string(),
        format!("Check completed on: {}", completed_at.format(TIMESTAMP_FORMAT)),
        format!("Path checked: {}", config.root.display()),
        format!("Output directory: {}", config.destination.display()),
        format!("Recursive check: {}", config.recursive),
    ];

    if config.whitespace {
        lines.push(format!(
            "Whitespace check: true ({} scope)",
            config.whitespace_scope
        ));
    } else {
        lines.push("Whitespace check: false".to_string());
    }
    lines.push(format!("Characters checked: {}", config.illegal_chars));
    lines.push(format!("Length check scope: {}", config.length_scope));
    lines.push(String::new());

    lines.push(format!("{} sub-directories in path.", totals.dir_count));
    lines.push(format!("{} files in path.", totals.file_count));
    lines.push(format!(
        "{} hidden/system entries skipped.",
        totals.skipped_count
    ));
    lines.push(format!(
        "{} directory names with illegal characters.",
        totals.illegal_dirnames
    ));
    lines.push(format!(
        "{} filenames with illegal characters.",
        totals.illegal_filenames
    ));
    lines.push(format!(
        "{} paths that exceed the {} character Windows limit.",
        totals.over_length_count, MAX_PATH_LENGTH
    ));
    if config.whitespace {
        lines.push(format!(
            "{} illegal whitespace occurrences found.",
            totals.whitespace_count
        ));
    }

    lines.push(format!(
        "{} illegal characters in total:",
        totals.illegal_char_count()
    ));
    for (c, count) in totals.char_frequencies() {
        lines.push(format!("    {} [{}]", c, count));
    }

    lines.push(RULE.to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap()
    }

    fn sample_totals() -> Totals {
        Totals {
            dir_count: 2,
            file_count: 5,
            skipped_count: 1,
            illegal_chars: vec!['@', '#', '@'],
            illegal_dirnames: 1,
            illegal_filenames: 1,
            whitespace_count: 4,
            over_length_count: 0,
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut config = Config::new("/data");
        config.whitespace = true;
        let lines = summarize(&sample_totals(), &config, fixed_time());

        assert!(lines.contains(&"Check completed on: Monday, 19. October 2026 02:05PM".to_string()));
        assert!(lines.contains(&"Path checked: /data".to_string()));
        assert!(lines.contains(&"2 sub-directories in path.".to_string()));
        assert!(lines.contains(&"5 files in path.".to_string()));
        assert!(lines.contains(&"1 hidden/system entries skipped.".to_string()));
        assert!(lines.contains(&"1 directory names with illegal characters.".to_string()));
        assert!(lines.contains(&"1 filenames with illegal characters.".to_string()));
        assert!(lines.contains(&"0 paths that exceed the 255 character Windows limit.".to_string()));
        assert!(lines.contains(&"4 illegal whitespace occurrences found.".to_string()));
        assert!(lines.contains(&"3 illegal characters in total:".to_string()));
    }

    #[test]
    fn test_one_line_per_observed_char() {
        let lines = summarize(&sample_totals(), &Config::new("/data"), fixed_time());
        let char_lines: Vec<&String> = lines.iter().filter(|l| l.starts_with("    ")).collect();

        assert_eq!(char_lines.len(), 2);
        assert!(char_lines.iter().any(|l| l.as_str() == "    @ [2]"));
        assert!(char_lines.iter().any(|l| l.as_str() == "    # [1]"));
    }

    #[test]
    fn test_whitespace_count_omitted_when_disabled() {
        let lines = summarize(&sample_totals(), &Config::new("/data"), fixed_time());
        assert!(lines.contains(&"Whitespace check: false".to_string()));
        assert!(!lines.iter().any(|l| l.contains("whitespace occurrences")));
    }

    #[test]
    fn test_same_input_same_lines() {
        let config = Config::new("/data");
        let first = summarize(&sample_totals(), &config, fixed_time());
        let second = summarize(&sample_totals(), &config, fixed_time());
        assert_eq!(first, second);
    }
}
