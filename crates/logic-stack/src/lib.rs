//! Fixed-capacity boolean stack packed into a single machine word.
//!
//! [`LogicStack`] is meant for evaluating boolean expression trees in a hot loop, e.g.
//! checking whether a point lies inside a region built from halfspaces with intersections,
//! unions and complements. It never allocates, and every operation is a handful of
//! branch-free bit operations.
//!
//! The crate offers two layers:
//!
//! - [`LogicStack`] performs no bounds checks (except for debug assertions). This is the primary API.
//! - [`CheckedLogicStack`] validates every precondition and returns a [`StackError`] instead.
//!
//! [`Expression`] compiles region expressions into a form that is validated once and then
//! evaluated on the unchecked stack.

pub use logic_stack_interface::{self as interface, StackInterface, Tracer};

pub use self::{
    checked::{CheckedLogicStack, StackError},
    expression::{tokenize, Expression, ExpressionError, Token},
    op::Op,
    stack::LogicStack,
};

mod checked;
pub mod expression;
mod op;
mod stack;
