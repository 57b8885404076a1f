//! List rules command implementation.

use jsdoc_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nDeclaration kinds checked by require-jsdoc ([rules.require-jsdoc.require]):");
    println!("  FunctionDeclaration (default), FunctionExpression, ArrowFunctionExpression,");
    println!("  ClassDeclaration, ClassExpression, MethodDefinition");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  jsdoc-lint check --rules require-jsdoc");
    println!("  jsdoc-lint check --rules JD001 --fix");
}
