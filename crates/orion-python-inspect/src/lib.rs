//! Static validation of Python's legacy `%`-style string formatting.
//!
//! The inspection walks a module for `<string literal> % <expr>` expressions,
//! parses the literal into a conversion spec, and reconciles it against the
//! right-hand operand's statically known shape and types. Anything the
//! analysis cannot know for sure stays silent: false negatives are preferred
//! over false positives.

mod config;
mod literal;
mod matcher;

pub use config::InspectionConfig;
pub use literal::{parse_format_literal, ExpectedKind, FormatIssue, FormatSpec, ParsedFormat};
pub use matcher::{match_arguments, MatchIssue};

use orion_core::Diagnostic;
use orion_python_hir::{BinaryOp, ExprId, ExprKind, Module};
use orion_python_resolve::{HirTypeOracle, TypeOracle};

/// Run the inspection over a module with the default HIR-backed type oracle.
#[must_use]
pub fn string_format_diagnostics(module: &Module, config: &InspectionConfig) -> Vec<Diagnostic> {
    let oracle = HirTypeOracle::new(config.follow_depth);
    string_format_diagnostics_with(module, &oracle, config)
}

/// Run the inspection with a caller-provided type oracle.
#[must_use]
pub fn string_format_diagnostics_with<O: TypeOracle + ?Sized>(
    module: &Module,
    oracle: &O,
    config: &InspectionConfig,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (_, expr) in module.exprs() {
        let ExprKind::Binary {
            op: BinaryOp::Mod,
            lhs,
            rhs,
        } = &expr.kind
        else {
            continue;
        };
        let ExprKind::StringLiteral(text) = module.kind(*lhs) else {
            continue;
        };
        check_format_expression(module, oracle, config, *lhs, *rhs, text, &mut diagnostics);
    }
    diagnostics
}

fn check_format_expression<O: TypeOracle + ?Sized>(
    module: &Module,
    oracle: &O,
    config: &InspectionConfig,
    lhs: ExprId,
    rhs: ExprId,
    text: &str,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut parsed = parse_format_literal(text);
    if !config.check_wildcard_width {
        parsed
            .issues
            .retain(|issue| !matches!(issue, FormatIssue::StarWithMapping));
    }
    tracing::trace!(
        expected = parsed.expected_arguments,
        mapping = parsed.uses_mapping(),
        issues = parsed.issues.len(),
        "parsed format literal"
    );

    // A malformed literal is reported on the literal itself and suppresses
    // argument checking for this expression.
    if !parsed.issues.is_empty() {
        let range = module.range(lhs);
        diagnostics.extend(
            parsed
                .issues
                .iter()
                .map(|issue| Diagnostic::warning(format_issue_code(issue), issue.to_string(), range)),
        );
        return;
    }

    for (expr, issue) in match_arguments(module, oracle, &parsed, config.follow_depth, rhs) {
        // Synthetic expressions fall back to the right-hand operand's range.
        let range = module.range(expr).or_else(|| module.range(rhs));
        diagnostics.push(Diagnostic::warning(
            match_issue_code(&issue),
            issue.to_string(),
            range,
        ));
    }
}

fn format_issue_code(issue: &FormatIssue) -> &'static str {
    match issue {
        FormatIssue::TooFewMappingKeys => "format.too-few-mapping-keys",
        FormatIssue::NoSpecifierCharacter => "format.no-specifier",
        FormatIssue::StarWithMapping => "format.star-with-mapping",
    }
}

fn match_issue_code(issue: &MatchIssue) -> &'static str {
    match issue {
        MatchIssue::RequiresMapping => "format.requires-mapping",
        MatchIssue::MappingNotRequired => "format.mapping-unused",
        MatchIssue::UnsatisfiedKey(_) => "format.unsatisfied-key",
        MatchIssue::UnexpectedType(_) => "format.unexpected-type",
        MatchIssue::TooManyArguments => "format.too-many-args",
        MatchIssue::TooFewArguments => "format.too-few-args",
    }
}
