use std::fmt;

use orion_core::{Name, TextRange};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u32);

impl ExprId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        ExprId(raw)
    }

    #[must_use]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    /// Also Python's legacy `%` string formatting when the left operand is a
    /// string literal.
    Mod,
    Pow,
}

/// The closed set of right-hand-side shapes the analyses distinguish.
///
/// Anything the lowering cannot classify becomes [`ExprKind::Unknown`], which
/// every consumer treats as "statically unknowable".
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Cooked string value, escapes already processed.
    StringLiteral(String),
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    NoneLiteral,
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Conditional {
        truthy: ExprId,
        cond: ExprId,
        falsy: ExprId,
    },
    Subscript {
        base: ExprId,
        index: ExprId,
    },
    Tuple(Vec<ExprId>),
    List(Vec<ExprId>),
    Dict(Vec<(ExprId, ExprId)>),
    Reference(Name),
    Call {
        callee: Name,
    },
    Paren(ExprId),
    Slice {
        base: ExprId,
    },
    ListComp {
        element: ExprId,
    },
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    /// Source range when the expression is physical; synthetic expressions
    /// (e.g. produced by a lowering that desugars) carry `None`.
    pub range: Option<TextRange>,
}

/// A plain function reduced to its return statements. `None` is a bare
/// `return`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Name,
    pub returns: Vec<Option<ExprId>>,
}

/// A `target = value` statement. Later assignments to the same name shadow
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Name,
    pub value: ExprId,
}

/// One analyzed unit: an arena of expressions plus the declaration-level
/// facts the semantic services need. Ids are only meaningful for the module
/// that allocated them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    exprs: Vec<Expr>,
    functions: Vec<Function>,
    assignments: Vec<Assignment>,
}

impl Module {
    #[must_use]
    pub fn new() -> Self {
        Module::default()
    }

    pub fn alloc(&mut self, kind: ExprKind, range: Option<TextRange>) -> ExprId {
        let id = ExprId::from_raw(self.exprs.len() as u32);
        self.exprs.push(Expr { kind, range });
        id
    }

    #[must_use]
    pub fn kind(&self, id: ExprId) -> &ExprKind {
        &self.exprs[id.idx()].kind
    }

    #[must_use]
    pub fn range(&self, id: ExprId) -> Option<TextRange> {
        self.exprs[id.idx()].range
    }

    pub fn exprs(&self) -> impl Iterator<Item = (ExprId, &Expr)> {
        self.exprs
            .iter()
            .enumerate()
            .map(|(i, e)| (ExprId::from_raw(i as u32), e))
    }

    pub fn define_function(&mut self, name: impl Into<Name>, returns: Vec<Option<ExprId>>) {
        self.functions.push(Function {
            name: name.into(),
            returns,
        });
    }

    pub fn functions_named(&self, name: &Name) -> impl Iterator<Item = &Function> {
        self.functions.iter().filter(move |f| &f.name == name)
    }

    pub fn assign(&mut self, target: impl Into<Name>, value: ExprId) {
        self.assignments.push(Assignment {
            target: target.into(),
            value,
        });
    }

    /// The value of the most recent assignment to `name`, if any.
    #[must_use]
    pub fn latest_assignment(&self, name: &Name) -> Option<ExprId> {
        self.assignments
            .iter()
            .rev()
            .find(|a| &a.target == name)
            .map(|a| a.value)
    }

    /// Strip parenthesization and flatten a tuple into its elements.
    ///
    /// `None` (a bare `return`) contributes no values; any non-tuple
    /// expression is a single value.
    #[must_use]
    pub fn flattened_parens(&self, expr: Option<ExprId>) -> Vec<ExprId> {
        let Some(mut id) = expr else {
            return Vec::new();
        };
        while let ExprKind::Paren(inner) = self.kind(id) {
            id = *inner;
        }
        match self.kind(id) {
            ExprKind::Tuple(elements) => elements.clone(),
            _ => vec![id],
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expr_ids_render_compactly() {
        let mut module = Module::new();
        let id = module.alloc(ExprKind::NoneLiteral, None);
        assert_eq!(format!("{id:?}"), "ExprId(0)");
    }

    #[test]
    fn latest_assignment_wins() {
        let mut module = Module::new();
        let first = module.alloc(ExprKind::IntLiteral(1), None);
        let second = module.alloc(ExprKind::IntLiteral(2), None);
        module.assign("a", first);
        module.assign("a", second);
        assert_eq!(module.latest_assignment(&Name::new("a")), Some(second));
        assert_eq!(module.latest_assignment(&Name::new("b")), None);
    }

    #[test]
    fn flattened_parens_unwraps_tuples_and_bare_returns() {
        let mut module = Module::new();
        let one = module.alloc(ExprKind::IntLiteral(1), None);
        let two = module.alloc(ExprKind::IntLiteral(2), None);
        let tuple = module.alloc(ExprKind::Tuple(vec![one, two]), None);
        let paren = module.alloc(ExprKind::Paren(tuple), None);

        assert_eq!(module.flattened_parens(Some(paren)), vec![one, two]);
        assert_eq!(module.flattened_parens(Some(one)), vec![one]);
        assert_eq!(module.flattened_parens(None), Vec::<ExprId>::new());
    }

    #[test]
    fn functions_named_filters_by_name() {
        let mut module = Module::new();
        let one = module.alloc(ExprKind::IntLiteral(1), None);
        module.define_function("f", vec![Some(one)]);
        module.define_function("g", vec![None]);

        let hits: Vec<_> = module.functions_named(&Name::new("f")).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].returns, vec![Some(one)]);
    }
}
