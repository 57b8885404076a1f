//! Check command implementation.

use anyhow::{Context, Result};
use jsdoc_lint_core::{Analyzer, Config, RuleBox};
use jsdoc_lint_js::JavaScriptParser;
use jsdoc_lint_rules::configured_rules;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of `jsdoc-lint check`.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to run.
    pub rules: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Write the suggested insertions back to disk.
    pub fix: bool,
}

/// Runs the check command.
///
/// Returns `true` when error-level violations remain.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or analysis fails.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let config = source.load()?;
    let analyzer = build_analyzer(path, options, config)?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let mut result = analyzer.analyze().context("Analysis failed")?;

    if options.fix && result.fixable_count() > 0 {
        let report = analyzer.write_fixes(&result).context("Failed to apply fixes")?;
        tracing::info!(
            "Inserted {} block(s) in {} file(s), {} skipped",
            report.applied,
            report.files_fixed,
            report.skipped
        );
        result = analyzer.analyze().context("Analysis failed after fixing")?;
    }

    super::output::print(&result, options.format, analyzer.root())?;

    Ok(result.has_errors())
}

/// Builds the analyzer for `path`, which may be a directory or a single file.
///
/// # Errors
///
/// Returns an error if an exclude pattern is not a valid glob.
pub fn build_analyzer(path: &Path, options: &CheckOptions, mut config: Config) -> Result<Analyzer> {
    let rules = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(configured_rules(&config), &names)
        }
        None => configured_rules(&config),
    };

    let (root, single_file) = split_target(path);
    let mut builder = Analyzer::builder()
        .root(root)
        .parser(JavaScriptParser::new())
        .excludes(options.exclude.iter().cloned());
    if let Some(name) = single_file {
        config.analyzer.include.clear();
        builder = builder.include(name);
    }
    for rule in rules {
        builder = builder.rule_box(rule);
    }

    builder.config(config).build().context("Failed to build analyzer")
}

/// Directory to walk, plus the file name when `path` names a single file.
fn split_target(path: &Path) -> (PathBuf, Option<String>) {
    if path.is_file() {
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let parent = if parent.as_os_str().is_empty() {
                PathBuf::from(".")
            } else {
                parent.to_path_buf()
            };
            return (parent, Some(name.to_string_lossy().into_owned()));
        }
    }
    (path.to_path_buf(), None)
}

fn filter_rules(rules: Vec<RuleBox>, names: &[&str]) -> Vec<RuleBox> {
    for name in names {
        if !rules.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }
    rules
        .into_iter()
        .filter(|r| names.iter().any(|n| r.name() == *n || r.code() == *n))
        .collect()
}
