use crate::StackInterface;

macro_rules! forall_opcodes {
    ($m:ident) => {
        $m!(Push);
        $m!(Pop);
        $m!(Not);
        $m!(And);
        $m!(Or);
    };
}

macro_rules! pub_struct {
    ($x:ident) => {
        #[doc = concat!("`", stringify!($x), "` stack operation.")]
        #[derive(Debug)]
        pub struct $x;
    };
}

/// Stack operations as types.
pub mod opcodes {
    forall_opcodes!(pub_struct);
}

/// All logic stack operations in a single enumeration.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Opcode {
    /// Pushes a value onto the stack.
    Push,
    /// Pops the top value off the stack.
    Pop,
    /// Negates the top value in place.
    Not,
    /// Replaces the two top values with their conjunction.
    And,
    /// Replaces the two top values with their disjunction.
    Or,
}

impl Opcode {
    /// Returns the number of stack elements this operation requires to be present.
    pub const fn operands(self) -> usize {
        match self {
            Self::Push => 0,
            Self::Pop | Self::Not => 1,
            Self::And | Self::Or => 2,
        }
    }

    /// Returns the change of the stack size caused by this operation.
    pub const fn depth_change(self) -> isize {
        match self {
            Self::Push => 1,
            Self::Not => 0,
            Self::Pop | Self::And | Self::Or => -1,
        }
    }
}

/// Trait mapping opcodes as types to the corresponding variants of the [`Opcode`] enum.
pub trait OpcodeType {
    /// `Opcode` variant corresponding to this opcode type.
    const VALUE: Opcode;
}

macro_rules! impl_opcode {
    ($x:ident) => {
        impl OpcodeType for opcodes::$x {
            const VALUE: Opcode = Opcode::$x;
        }
    };
}

forall_opcodes!(impl_opcode);

/// Logic stack operation tracer.
///
/// [`Self::before_op()`] is called just before an operation is applied to the stack, and
/// [`Self::after_op()`] right after it. Both receive a read-only view of the stack.
///
/// # Examples
///
/// Here `PeakDepth` records the deepest stack seen during an evaluation.
///
/// ```
/// # use logic_stack_interface::{Tracer, StackInterface, OpcodeType};
/// struct PeakDepth(usize);
///
/// impl Tracer for PeakDepth {
///     fn after_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
///         self.0 = self.0.max(stack.size());
///     }
/// }
/// ```
pub trait Tracer {
    /// Executes logic before a stack operation.
    ///
    /// The default implementation does nothing.
    fn before_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
        let _ = stack;
    }

    /// Executes logic after a stack operation.
    ///
    /// The default implementation does nothing.
    fn after_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
        let _ = stack;
    }
}

/// No-op tracer implementation.
impl Tracer for () {}

// Multiple tracers can be combined by building a linked list out of tuples.
impl<A: Tracer, B: Tracer> Tracer for (A, B) {
    fn before_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
        self.0.before_op::<OP, S>(stack);
        self.1.before_op::<OP, S>(stack);
    }

    fn after_op<OP: OpcodeType, S: StackInterface>(&mut self, stack: &S) {
        self.0.after_op::<OP, S>(stack);
        self.1.after_op::<OP, S>(stack);
    }
}
