//! Core analyzer for orchestrating lint execution.

use crate::config::Config;
use crate::context::{extension_of, FileContext};
use crate::fix::{apply_fixes, FixError};
use crate::rule::{ParseError, ParserBox, Rule, RuleBox, SourceParser};
use crate::types::{LintResult, Replacement, Violation};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying parser error.
        source: ParseError,
    },

    /// No registered parser handles the file.
    #[error("No parser registered for {path}")]
    UnsupportedFile {
        /// Path to the file.
        path: PathBuf,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Directory walk error.
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A fix could not be applied.
    #[error("Failed to fix {path}: {source}")]
    Fix {
        /// File being fixed.
        path: PathBuf,
        /// Underlying fix error.
        source: FixError,
    },
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Registers a source parser.
    #[must_use]
    pub fn parser<P: SourceParser + 'static>(mut self, parser: P) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be resolved or a
    /// glob pattern is invalid.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let config = self.config.unwrap_or_default();

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        if exclude_patterns.is_empty() {
            exclude_patterns.extend(["**/node_modules/**".to_string(), "**/dist/**".to_string()]);
        }

        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let exclude = compile_patterns(&exclude_patterns)?;
        let include = compile_patterns(&include_patterns)?;

        Ok(Analyzer {
            root,
            rules: self.rules,
            parsers: self.parsers,
            exclude_patterns,
            exclude,
            include,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<glob::Pattern>, AnalyzerError> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(AnalyzerError::from))
        .collect()
}

/// Summary of a fix pass over analyzed files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixReport {
    /// Number of files rewritten.
    pub files_fixed: usize,
    /// Number of edits applied.
    pub applied: usize,
    /// Number of edits skipped because they overlapped.
    pub skipped: usize,
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    parsers: Vec<ParserBox>,
    exclude_patterns: Vec<String>,
    exclude: Vec<glob::Pattern>,
    include: Vec<glob::Pattern>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery or reading fails, or if a file fails
    /// to parse and `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, source }) => {
                    warn!("Failed to parse {}: {}", path.display(), source);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, source });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes source text as if it were the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser handles `path` or parsing fails.
    pub fn analyze_source(&self, path: &Path, content: &str) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let parser = self
            .parser_for(path)
            .ok_or_else(|| AnalyzerError::UnsupportedFile {
                path: path.to_path_buf(),
            })?;
        let tree = parser.parse(content).map_err(|source| AnalyzerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let ctx = FileContext::new(path, content, &self.root);
        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &tree);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies every automatic fix in `result` and rewrites the affected files.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or written, or a fix is
    /// out of range for the current file contents.
    pub fn write_fixes(&self, result: &LintResult) -> Result<FixReport, AnalyzerError> {
        let mut by_file: BTreeMap<&Path, Vec<&Replacement>> = BTreeMap::new();
        for fix in result.violations.iter().filter_map(Violation::fix) {
            by_file.entry(fix.location.file.as_path()).or_default().push(fix);
        }

        let mut report = FixReport::default();
        for (file, fixes) in by_file {
            let path = if file.is_absolute() {
                file.to_path_buf()
            } else {
                self.root.join(file)
            };
            let content = std::fs::read_to_string(&path)?;
            let outcome = apply_fixes(&content, fixes).map_err(|source| AnalyzerError::Fix {
                path: path.clone(),
                source,
            })?;
            if outcome.applied > 0 {
                std::fs::write(&path, &outcome.content)?;
                report.files_fixed += 1;
            }
            report.applied += outcome.applied;
            report.skipped += outcome.skipped;
            debug!(
                "Fixed {}: {} applied, {} skipped",
                path.display(),
                outcome.applied,
                outcome.skipped
            );
        }

        Ok(report)
    }

    fn parser_for(&self, path: &Path) -> Option<&ParserBox> {
        let ext = extension_of(path);
        self.parsers
            .iter()
            .find(|p| p.extensions().contains(&ext.as_str()))
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Discovers all source files some registered parser handles.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .git_exclude(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || self.parser_for(path).is_none() {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            if !self.is_included(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return true;
        }

        // Also check as substring for patterns like "**/node_modules/**"
        self.exclude_patterns.iter().any(|pattern| {
            let normalized_pattern = pattern.replace("**", "");
            !normalized_pattern.is_empty()
                && normalized_pattern != "/"
                && path_str.contains(&normalized_pattern)
        })
    }

    fn is_included(&self, path: &Path) -> bool {
        if self.include.is_empty() {
            return true;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.to_string_lossy();
        self.include.iter().any(|p| p.matches(&relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Span, SyntaxTree, SyntaxTreeBuilder};
    use crate::types::{Location, Severity, Suggestion};

    struct LineParser;

    impl SourceParser for LineParser {
        fn language_id(&self) -> &'static str {
            "lines"
        }
        fn extensions(&self) -> &'static [&'static str] {
            &[".txt"]
        }
        fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
            let mut b = SyntaxTreeBuilder::new("lines", source);
            b.push_node(None, "program", None, true, Span::default());
            Ok(b.finish())
        }
    }

    /// Flags files whose first line is not `ok`, with an insertion fix.
    struct FirstLineOk;

    impl Rule for FirstLineOk {
        fn name(&self) -> &'static str {
            "first-line-ok"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
            if tree.source().starts_with("ok") {
                return Vec::new();
            }
            let location = Location::new(ctx.relative_path.clone(), 1, 1);
            let fix = Replacement::new(location.clone(), "ok\n");
            vec![Violation::new(self.code(), self.name(), Severity::Error, location, "not ok")
                .with_suggestion(Suggestion::with_fix("prepend ok", fix))]
        }
    }

    #[test]
    fn test_builder() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/node_modules/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.root().exists());
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root(".")
            .exclude("**/node_modules/**")
            .exclude("**/dist/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/foo/node_modules/x/index.js")));
        assert!(analyzer.should_exclude(Path::new("/foo/dist/bundle.js")));
        assert!(!analyzer.should_exclude(Path::new("/foo/src/index.js")));
    }

    #[test]
    fn invalid_glob_fails_build() {
        assert!(matches!(
            Analyzer::builder().root(".").exclude("[").build(),
            Err(AnalyzerError::Glob(_))
        ));
    }

    #[test]
    fn analyzes_and_fixes_directory() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "bad\n").unwrap();
        std::fs::write(tmp.path().join("b.txt"), "ok\n").unwrap();
        std::fs::write(tmp.path().join("c.md"), "bad\n").unwrap();

        let analyzer = Analyzer::builder()
            .root(tmp.path())
            .parser(LineParser)
            .rule(FirstLineOk)
            .build()
            .unwrap();

        let result = analyzer.analyze().unwrap();
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].location.file, PathBuf::from("a.txt"));

        let report = analyzer.write_fixes(&result).unwrap();
        assert_eq!(report.files_fixed, 1);
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("a.txt")).unwrap(),
            "ok\nbad\n"
        );
        assert!(analyzer.analyze().unwrap().violations.is_empty());
    }

    #[test]
    fn disabled_rule_and_severity_override() {
        let analyzer = Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .rule(FirstLineOk)
            .config(Config::parse("[rules.first-line-ok]\nseverity = \"info\"\n").unwrap())
            .build()
            .unwrap();
        let v = analyzer.analyze_source(Path::new("x.txt"), "nope").unwrap();
        assert_eq!(v[0].severity, Severity::Info);

        let disabled = Analyzer::builder()
            .root(".")
            .parser(LineParser)
            .rule(FirstLineOk)
            .config(Config::parse("[rules.first-line-ok]\nenabled = false\n").unwrap())
            .build()
            .unwrap();
        assert!(disabled
            .analyze_source(Path::new("x.txt"), "nope")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let analyzer = Analyzer::builder().root(".").parser(LineParser).build().unwrap();
        assert!(matches!(
            analyzer.analyze_source(Path::new("x.js"), ""),
            Err(AnalyzerError::UnsupportedFile { .. })
        ));
    }
}
