use orion_core::TypeName;
use orion_python_hir::{ExprId, ExprKind, Module};

use crate::resolve::follow_assignments;

/// Answers "what nominal type does this expression have", or `None` when the
/// answer is not statically known. A deferred/unresolved type is reported as
/// `None`, never as a guess.
pub trait TypeOracle {
    fn type_of(&self, module: &Module, expr: ExprId) -> Option<TypeName>;
}

/// Default oracle: literal shapes name themselves, references follow the
/// assignment chain, everything else is unknown.
#[derive(Debug, Clone, Copy)]
pub struct HirTypeOracle {
    pub follow_depth: usize,
}

impl HirTypeOracle {
    #[must_use]
    pub fn new(follow_depth: usize) -> Self {
        Self { follow_depth }
    }
}

impl Default for HirTypeOracle {
    fn default() -> Self {
        Self { follow_depth: 16 }
    }
}

impl TypeOracle for HirTypeOracle {
    fn type_of(&self, module: &Module, expr: ExprId) -> Option<TypeName> {
        match module.kind(expr) {
            ExprKind::StringLiteral(_) => Some(TypeName::new("str")),
            ExprKind::IntLiteral(_) => Some(TypeName::new("int")),
            ExprKind::FloatLiteral(_) => Some(TypeName::new("float")),
            ExprKind::BoolLiteral(_) => Some(TypeName::new("bool")),
            ExprKind::NoneLiteral => Some(TypeName::new("NoneType")),
            ExprKind::Tuple(_) => Some(TypeName::new("tuple")),
            ExprKind::List(_) | ExprKind::ListComp { .. } => Some(TypeName::new("list")),
            ExprKind::Dict(_) => Some(TypeName::new("dict")),
            ExprKind::Paren(inner) => self.type_of(module, *inner),
            ExprKind::Reference(_) => {
                let defining = follow_assignments(module, expr, self.follow_depth)?;
                self.type_of(module, defining)
            }
            // Arithmetic, calls, subscripts and the rest would need real
            // inference; unknown keeps the checks silent instead of wrong.
            ExprKind::Binary { .. }
            | ExprKind::Conditional { .. }
            | ExprKind::Subscript { .. }
            | ExprKind::Call { .. }
            | ExprKind::Slice { .. }
            | ExprKind::Unknown => None,
        }
    }
}
