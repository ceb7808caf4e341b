//! Reconciliation of a parsed format spec against the right-hand operand.

use orion_core::TypeName;
use orion_python_hir::{ExprId, ExprKind, Module};
use orion_python_resolve::{follow_assignments, resolve_callee, TypeOracle};
use thiserror::Error;

use crate::literal::{ExpectedKind, ParsedFormat};

/// A defect found while matching arguments against the format spec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchIssue {
    #[error("Format requires a mapping")]
    RequiresMapping,
    #[error("Format doesn't require a mapping")]
    MappingNotRequired,
    #[error("Key '{0}' has no following argument")]
    UnsatisfiedKey(String),
    #[error("Unexpected type {0}")]
    UnexpectedType(TypeName),
    #[error("Too many arguments for format string")]
    TooManyArguments,
    #[error("Too few arguments for format string")]
    TooFewArguments,
}

/// Match the right-hand operand against `parsed`. Returns each defect with
/// the expression it should be reported on.
///
/// State is fresh per call; nothing is shared across analyzed expressions.
#[must_use]
pub fn match_arguments<O: TypeOracle + ?Sized>(
    module: &Module,
    oracle: &O,
    parsed: &ParsedFormat,
    follow_depth: usize,
    rhs: ExprId,
) -> Vec<(ExprId, MatchIssue)> {
    let mut matcher = Matcher {
        module,
        oracle,
        parsed,
        follow_depth,
        used_keys: parsed
            .mapping_keys
            .iter()
            .map(|key| (key.clone(), false))
            .collect(),
        issues: Vec::new(),
    };
    matcher.inspect_values(rhs);
    matcher.issues
}

struct Matcher<'a, O: TypeOracle + ?Sized> {
    module: &'a Module,
    oracle: &'a O,
    parsed: &'a ParsedFormat,
    follow_depth: usize,
    /// Declared mapping keys, flagged once a dict entry satisfies them.
    used_keys: Vec<(String, bool)>,
    issues: Vec<(ExprId, MatchIssue)>,
}

impl<O: TypeOracle + ?Sized> Matcher<'_, O> {
    fn inspect_values(&mut self, expr: ExprId) {
        if let ExprKind::Paren(inner) = self.module.kind(expr) {
            self.inspect_values(*inner);
            return;
        }

        if let Some(ty) = self.oracle.type_of(self.module, expr) {
            if !self.used_keys.is_empty() && ty != "dict" {
                self.report(expr, MatchIssue::RequiresMapping);
                return;
            }
        }

        let supplied = self.inspect_arguments(expr);
        // Count reconciliation is mapping-mode-exempt.
        if self.used_keys.is_empty() {
            if let Some(supplied) = supplied {
                if self.parsed.expected_arguments < supplied {
                    self.report(expr, MatchIssue::TooManyArguments);
                } else if self.parsed.expected_arguments > supplied {
                    self.report(expr, MatchIssue::TooFewArguments);
                }
            }
        }
    }

    /// Number of values the expression statically supplies; `None` when the
    /// arity cannot be determined and the count check must stay silent.
    fn inspect_arguments(&mut self, expr: ExprId) -> Option<usize> {
        match self.module.kind(expr) {
            // Scalar-like shapes supply exactly one value.
            ExprKind::StringLiteral(_)
            | ExprKind::IntLiteral(_)
            | ExprKind::FloatLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::NoneLiteral
            | ExprKind::Binary { .. }
            | ExprKind::Conditional { .. }
            | ExprKind::Subscript { .. } => {
                if let Some(expected) = self.parsed.spec.get("1") {
                    self.check_expression_type(expr, expected);
                }
                Some(1)
            }
            ExprKind::Reference(_) => {
                let defining = follow_assignments(self.module, expr, self.follow_depth)?;
                self.inspect_arguments(defining)
            }
            ExprKind::Call { callee } => {
                let resolved = resolve_callee(self.module, callee)?;
                if resolved.implicit {
                    return None;
                }
                let mut size: Option<usize> = None;
                for ret in &resolved.function.returns {
                    if let Some(value) = ret {
                        // A returned call would require recursive inference.
                        if matches!(self.module.kind(*value), ExprKind::Call { .. }) {
                            return None;
                        }
                    }
                    let values = self.module.flattened_parens(*ret);
                    match size {
                        None => size = Some(values.len()),
                        Some(seen) if seen != values.len() => return None,
                        Some(_) => {}
                    }
                }
                size
            }
            ExprKind::Paren(inner) => self.inspect_arguments(*inner),
            ExprKind::Tuple(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if let Some(expected) = self.parsed.spec.positional(i + 1) {
                        self.check_expression_type(*element, expected);
                    }
                }
                Some(elements.len())
            }
            ExprKind::Dict(entries) => {
                if self.used_keys.is_empty() && !entries.is_empty() {
                    self.report(expr, MatchIssue::MappingNotRequired);
                }
                for (key, value) in entries {
                    let ExprKind::StringLiteral(name) = self.module.kind(*key) else {
                        continue;
                    };
                    let declared = match self.used_keys.iter_mut().find(|(k, _)| k == name) {
                        Some(slot) => {
                            slot.1 = true;
                            true
                        }
                        None => false,
                    };
                    if declared {
                        if let Some(expected) = self.parsed.spec.get(name) {
                            self.check_expression_type(*value, expected);
                        }
                    }
                }
                let unsatisfied = self
                    .used_keys
                    .iter()
                    .find(|(_, used)| !used)
                    .map(|(key, _)| key.clone());
                if let Some(key) = unsatisfied {
                    self.report(expr, MatchIssue::UnsatisfiedKey(key));
                }
                Some(entries.len())
            }
            // The `%s`-against-a-container idiom: a single string-like value,
            // but only when the first slot is actually declared.
            ExprKind::List(_) | ExprKind::Slice { .. } | ExprKind::ListComp { .. } => {
                let expected = self.parsed.spec.get("1")?;
                self.check_type_compatible(expr, &TypeName::new("str"), expected);
                Some(1)
            }
            ExprKind::Unknown => None,
        }
    }

    fn check_expression_type(&mut self, expr: ExprId, expected: ExpectedKind) {
        if let Some(provided) = self.oracle.type_of(self.module, expr) {
            self.check_type_compatible(expr, &provided, expected);
        }
    }

    /// `str` slots stringify anything; numeric slots accept either numeric
    /// type.
    fn check_type_compatible(&mut self, expr: ExprId, provided: &TypeName, expected: ExpectedKind) {
        if expected == ExpectedKind::Str {
            return;
        }
        if *provided == "int" || *provided == "float" {
            return;
        }
        self.report(expr, MatchIssue::UnexpectedType(provided.clone()));
    }

    fn report(&mut self, expr: ExprId, issue: MatchIssue) {
        self.issues.push((expr, issue));
    }
}
