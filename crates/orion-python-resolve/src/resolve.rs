use std::collections::HashSet;

use orion_core::Name;
use orion_python_hir::{ExprId, ExprKind, Function, Module};

/// Follow a chain of name assignments to the defining expression.
///
/// The host platform this was modeled on relies on its own cycle protection
/// when walking assignment chains; here the guard is explicit: a visited-name
/// set plus a hop bound. Returns the first non-reference expression, or
/// `None` when the chain leaves the statically known world.
#[must_use]
pub fn follow_assignments(module: &Module, expr: ExprId, max_hops: usize) -> Option<ExprId> {
    let mut current = expr;
    let mut visited: HashSet<Name> = HashSet::new();
    let mut hops = 0usize;

    loop {
        match module.kind(current) {
            ExprKind::Reference(name) => {
                if hops >= max_hops || !visited.insert(name.clone()) {
                    return None;
                }
                hops += 1;
                current = module.latest_assignment(name)?;
            }
            _ => return Some(current),
        }
    }
}

/// A statically resolved call target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCallee<'a> {
    pub function: &'a Function,
    /// True when the resolution was a dynamic or ambiguous fallback rather
    /// than an exact match. Callers must not trust arity inferred from an
    /// implicit resolution.
    pub implicit: bool,
}

/// Resolve a call expression's callee to a module-level function.
///
/// An exact single definition resolves non-implicitly; multiple definitions
/// under the same name still resolve (to the last one, which is what Python
/// rebinding leaves visible) but are flagged implicit.
#[must_use]
pub fn resolve_callee<'a>(module: &'a Module, callee: &Name) -> Option<ResolvedCallee<'a>> {
    let mut matches = module.functions_named(callee);
    let first = matches.next()?;
    match matches.last() {
        None => Some(ResolvedCallee {
            function: first,
            implicit: false,
        }),
        Some(shadowing) => Some(ResolvedCallee {
            function: shadowing,
            implicit: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn follows_a_two_hop_chain() {
        let mut module = Module::new();
        let value = module.alloc(ExprKind::IntLiteral(7), None);
        module.assign("a", value);
        let a_ref = module.alloc(ExprKind::Reference(Name::new("a")), None);
        module.assign("b", a_ref);
        let b_ref = module.alloc(ExprKind::Reference(Name::new("b")), None);

        assert_eq!(follow_assignments(&module, b_ref, 16), Some(value));
    }

    #[test]
    fn self_assignment_terminates_with_unknown() {
        let mut module = Module::new();
        let a_ref = module.alloc(ExprKind::Reference(Name::new("a")), None);
        module.assign("a", a_ref);
        let usage = module.alloc(ExprKind::Reference(Name::new("a")), None);

        assert_eq!(follow_assignments(&module, usage, 16), None);
    }

    #[test]
    fn hop_bound_cuts_long_chains() {
        let mut module = Module::new();
        let value = module.alloc(ExprKind::IntLiteral(0), None);
        module.assign("n0", value);
        for i in 1..8 {
            let prev = module.alloc(ExprKind::Reference(Name::new(format!("n{}", i - 1))), None);
            module.assign(format!("n{i}"), prev);
        }
        let tail = module.alloc(ExprKind::Reference(Name::new("n7")), None);

        assert_eq!(follow_assignments(&module, tail, 16), Some(value));
        assert_eq!(follow_assignments(&module, tail, 3), None);
    }

    #[test]
    fn unassigned_name_is_unresolved() {
        let mut module = Module::new();
        let usage = module.alloc(ExprKind::Reference(Name::new("missing")), None);
        assert_eq!(follow_assignments(&module, usage, 16), None);
    }

    #[test]
    fn single_definition_resolves_exactly() {
        let mut module = Module::new();
        let one = module.alloc(ExprKind::IntLiteral(1), None);
        module.define_function("f", vec![Some(one)]);

        let resolved = resolve_callee(&module, &Name::new("f")).unwrap();
        assert!(!resolved.implicit);
        assert_eq!(resolved.function.returns, vec![Some(one)]);
        assert!(resolve_callee(&module, &Name::new("g")).is_none());
    }

    #[test]
    fn redefined_function_resolves_implicitly() {
        let mut module = Module::new();
        let one = module.alloc(ExprKind::IntLiteral(1), None);
        let two = module.alloc(ExprKind::IntLiteral(2), None);
        module.define_function("f", vec![Some(one)]);
        module.define_function("f", vec![Some(two)]);

        let resolved = resolve_callee(&module, &Name::new("f")).unwrap();
        assert!(resolved.implicit);
        assert_eq!(resolved.function.returns, vec![Some(two)]);
    }
}
