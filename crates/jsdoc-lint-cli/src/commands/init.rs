//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_NAME: &str = "jsdoc-lint.toml";

const DEFAULT_CONFIG: &str = r#"# jsdoc-lint configuration

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
    "**/*.min.js",
]

# Respect .gitignore files
respect_gitignore = true

# How far a /** */ block may sit above the declaration it documents,
# counted in line breaks.
[settings]
min_lines = 0
max_lines = 1

[rules.require-jsdoc]
enabled = true
# severity = "error"
exempt_empty_constructors = true
exempt_empty_functions = false
# min_line_count = 3
# public_only = { esm = true, cjs = true, window = false, ancestors_only = false }
# contexts = ["ExportDefaultDeclaration", { context = "VariableDeclaration", inline_comment_block = true }]
# check_getters = "no-setter"
# check_setters = "no-getter"

[rules.require-jsdoc.require]
FunctionDeclaration = true
FunctionExpression = false
ArrowFunctionExpression = false
ClassDeclaration = false
ClassExpression = false
MethodDefinition = false
"#;

/// Runs the init command, writing the config into `dir`.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or the write
/// fails.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = write_config(dir, force)?;

    println!("Created {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_NAME} to choose which declarations need JSDoc");
    println!("  2. Run: jsdoc-lint check");
    println!("  3. Run: jsdoc-lint check --fix to insert empty blocks");

    Ok(())
}

fn write_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_NAME);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}
