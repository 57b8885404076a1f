//! Shared output formatting for lint results.

use anyhow::Result;
use jsdoc_lint_core::{LintResult, Severity, ViolationDiagnostic};
use std::fmt::Write;
use std::path::Path;

use crate::OutputFormat;

/// Prints lint results in the specified format.
///
/// `root` is where the relative paths in `result` start; `pretty` reads the
/// sources from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    print!("{}", render(result, format, root)?);
    Ok(())
}

/// Renders lint results without printing them.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(result: &LintResult, format: OutputFormat, root: &Path) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result, root),
    })
}

/// One-line totals.
#[must_use]
pub fn summary(result: &LintResult) -> String {
    let (errors, warnings, infos) = result.count_by_severity();
    format!(
        "Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
        result.files_checked
    )
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        let _ = writeln!(
            out,
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        );
        let _ = writeln!(out, "  {}: {}", severity_indicator, violation.message);
        if let Some(suggestion) = &violation.suggestion {
            let fixable = if suggestion.replacement.is_some() {
                " (fixable with --fix)"
            } else {
                ""
            };
            let _ = writeln!(out, "  = help: {}{fixable}", suggestion.message);
        }
        out.push('\n');
    }

    let (errors, warnings, _) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };
    let _ = writeln!(out, "{summary_color}{}\x1b[0m", summary(result));
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(|v| format!("{v}\n"))
        .collect()
}

fn render_pretty(result: &LintResult, root: &Path) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        let file = &violation.location.file;
        let report = miette::Report::new(ViolationDiagnostic::from(violation));
        match std::fs::read_to_string(root.join(file)) {
            Ok(source) => {
                let named = miette::NamedSource::new(file.to_string_lossy(), source);
                let _ = writeln!(out, "{:?}", report.with_source_code(named));
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for snippet: {}", file.display(), e);
                let _ = writeln!(out, "{violation}");
            }
        }
    }
    let _ = writeln!(out, "{}", summary(result));
    out
}
