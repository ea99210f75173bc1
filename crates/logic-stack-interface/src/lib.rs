//! # Logic Stack Interface
//!
//! This crate defines the read-only view of a boolean logic stack and a tracer interface
//! for observing the operations an evaluator performs on it. Neither interface allows
//! mutating the stack, so tracers and diagnostic formatters can never change the outcome
//! of an evaluation.
//!
//! A struct implementing [`Tracer`] may inspect the stack via [`StackInterface`]
//! before and after each operation.
//!
//! # Examples
//!
//! Rendering a stack from the bottom to the top:
//!
//! ```
//! use logic_stack_interface::StackInterface;
//!
//! fn render(stack: &impl StackInterface) -> String {
//!     (0..stack.size())
//!         .map(|i| if stack.get(i) { '1' } else { '0' })
//!         .collect()
//! }
//! # struct Fixed;
//! # impl StackInterface for Fixed {
//! #     fn size(&self) -> usize { 3 }
//! #     fn get(&self, index: usize) -> bool { index != 1 }
//! # }
//! # assert_eq!(render(&Fixed), "101");
//! ```

pub use self::{stack_interface::*, tracer_interface::*};

mod stack_interface;
mod tracer_interface;
