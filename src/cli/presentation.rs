//! CLI presentation: text and json formatters for the merge summary.

use crate::cli::parse::OutputFormat;
use crate::error::MergeError;
use crate::report::{MergeReport, Outcome};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_report(
    report: &MergeReport,
    format: OutputFormat,
    color: bool,
) -> Result<String, MergeError> {
    match format {
        OutputFormat::Json => format_report_json(report),
        OutputFormat::Text => Ok(format_report_text(report, color)),
    }
}

pub fn format_report_json(report: &MergeReport) -> Result<String, MergeError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| MergeError::ConfigError(format!("Failed to serialize report: {}", e)))
}

pub fn format_report_text(report: &MergeReport, color: bool) -> String {
    let mut out = String::new();

    let heading = if report.dry_run {
        format!(
            "Dry run: {} into {}",
            report.clean_dir.display(),
            report.keep_dir.display()
        )
    } else {
        format!(
            "Merged {} into {}",
            report.clean_dir.display(),
            report.keep_dir.display()
        )
    };
    if color {
        out.push_str(&heading.bold().to_string());
    } else {
        out.push_str(&heading);
    }
    out.push('\n');

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Files", "Count"]);
    table.add_row(vec!["Indexed in keep".to_string(), report.indexed.to_string()]);
    table.add_row(vec!["Seen in clean".to_string(), report.total.to_string()]);
    table.add_row(vec!["Deleted".to_string(), report.deleted.to_string()]);
    table.add_row(vec![
        "Moved".to_string(),
        format!("{} ({} renamed)", report.moved, report.renamed),
    ]);
    if report.skipped > 0 {
        table.add_row(vec!["Skipped".to_string(), report.skipped.to_string()]);
    }
    out.push_str(&table.to_string());

    let renames: Vec<String> = report
        .outcomes
        .iter()
        .filter_map(|entry| match &entry.outcome {
            Outcome::Moved {
                destination,
                renamed: true,
            } => Some(format!(
                "  {} -> {}",
                entry.source.display(),
                destination.display()
            )),
            _ => None,
        })
        .collect();
    if !renames.is_empty() {
        out.push_str(&format!("\n\nRenamed on collision ({}):", renames.len()));
        for line in renames {
            out.push('\n');
            out.push_str(&line);
        }
    }

    if !report.keep_duplicates.is_empty() {
        out.push_str(&format!(
            "\n\nDuplicates already in keep ({}):",
            report.keep_duplicates.len()
        ));
        for dup in &report.keep_duplicates {
            out.push_str(&format!(
                "\n  {} = {}",
                dup.duplicate.display(),
                dup.canonical.display()
            ));
        }
    }

    if !report.is_consistent() {
        let warning = "WARNING: counts do not match";
        out.push_str("\n\n");
        if color {
            out.push_str(&warning.red().bold().to_string());
        } else {
            out.push_str(warning);
        }
    }

    out
}
