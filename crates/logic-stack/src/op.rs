use logic_stack_interface::{opcodes, Opcode, OpcodeType, Tracer};

use crate::{CheckedLogicStack, LogicStack, StackError};

/// Single stack operation, i.e. one step of a flattened boolean program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Op {
    /// Push the value onto the stack.
    Push(bool),
    /// Pop the top value.
    Pop,
    /// Negate the top value.
    Not,
    /// Replace the two top values with their conjunction.
    And,
    /// Replace the two top values with their disjunction.
    Or,
}

impl Op {
    /// Returns the corresponding [`Opcode`].
    pub const fn opcode(self) -> Opcode {
        match self {
            Self::Push(_) => Opcode::Push,
            Self::Pop => Opcode::Pop,
            Self::Not => Opcode::Not,
            Self::And => Opcode::And,
            Self::Or => Opcode::Or,
        }
    }

    /// Applies this operation to an unchecked stack. Returns the popped value for [`Self::Pop`].
    ///
    /// The caller is responsible for the stack holding enough elements (or enough free space
    /// for [`Self::Push`]); see [`LogicStack`] for what happens otherwise.
    #[inline(always)]
    pub fn apply(self, stack: &mut LogicStack) -> Option<bool> {
        self.apply_traced(stack, &mut ())
    }

    /// Same as [`Self::apply()`], but reports the operation to `tracer`.
    #[inline(always)]
    pub fn apply_traced<T: Tracer>(self, stack: &mut LogicStack, tracer: &mut T) -> Option<bool> {
        match self {
            Self::Push(value) => traced::<opcodes::Push, _>(stack, tracer, |stack| {
                stack.push(value);
                None
            }),
            Self::Pop => traced::<opcodes::Pop, _>(stack, tracer, |stack| Some(stack.pop())),
            Self::Not => traced::<opcodes::Not, _>(stack, tracer, |stack| {
                stack.apply_not();
                None
            }),
            Self::And => traced::<opcodes::And, _>(stack, tracer, |stack| {
                stack.apply_and();
                None
            }),
            Self::Or => traced::<opcodes::Or, _>(stack, tracer, |stack| {
                stack.apply_or();
                None
            }),
        }
    }

    /// Applies this operation to a checked stack. Returns the popped value for [`Self::Pop`].
    ///
    /// # Errors
    ///
    /// Propagates the [`StackError`] of the underlying operation; the stack is unchanged in this case.
    pub fn try_apply(self, stack: &mut CheckedLogicStack) -> Result<Option<bool>, StackError> {
        match self {
            Self::Push(value) => stack.push(value).map(|()| None),
            Self::Pop => stack.pop().map(Some),
            Self::Not => stack.apply_not().map(|()| None),
            Self::And => stack.apply_and().map(|()| None),
            Self::Or => stack.apply_or().map(|()| None),
        }
    }
}

#[inline(always)]
fn traced<OP: OpcodeType, T: Tracer>(
    stack: &mut LogicStack,
    tracer: &mut T,
    business_logic: impl FnOnce(&mut LogicStack) -> Option<bool>,
) -> Option<bool> {
    tracer.before_op::<OP, _>(stack);
    let result = business_logic(stack);
    tracer.after_op::<OP, _>(stack);
    result
}
