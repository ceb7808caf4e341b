//! Expression-level model of Python right-hand sides.
//!
//! This is not a Python parser. A host lowering (or a test fixture) allocates
//! expressions into a [`Module`] arena; the inspection crates only ever walk
//! the closed [`ExprKind`] variant, so every consumer dispatches with an
//! exhaustive `match` instead of dynamic type tests.

mod hir;

pub use hir::{
    Assignment, BinaryOp, Expr, ExprId, ExprKind, Function, Module,
};
