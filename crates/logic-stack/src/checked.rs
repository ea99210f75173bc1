use std::{error::Error, fmt};

use logic_stack_interface::StackInterface;

use crate::LogicStack;

/// Error returned by [`CheckedLogicStack`] operations whose preconditions do not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackError {
    /// Pushing onto a stack that already holds `capacity` elements.
    Overflow {
        /// Maximum number of elements, i.e. [`LogicStack::max_stack_depth()`].
        capacity: usize,
    },
    /// The operation consumes more elements than the stack holds.
    Underflow {
        /// Number of elements the operation consumes.
        required: usize,
        /// Number of elements on the stack.
        available: usize,
    },
    /// Indexed read past the top of the stack.
    OutOfBounds {
        /// Requested index (counting from the bottom).
        index: usize,
        /// Number of elements on the stack.
        size: usize,
    },
}

impl fmt::Display for StackError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { capacity } => {
                write!(formatter, "logic stack overflow (capacity is {capacity})")
            }
            Self::Underflow {
                required,
                available,
            } => write!(
                formatter,
                "logic stack underflow: operation needs {required} element(s), stack has {available}"
            ),
            Self::OutOfBounds { index, size } => {
                write!(formatter, "index {index} out of range for logic stack of size {size}")
            }
        }
    }
}

impl Error for StackError {}

/// [`LogicStack`] wrapper checking every precondition.
///
/// A failed operation returns an error and leaves the stack unchanged.
///
/// # Examples
///
/// ```
/// use logic_stack::{CheckedLogicStack, StackError};
///
/// let mut stack = CheckedLogicStack::new();
/// stack.push(true)?;
/// assert_eq!(
///     stack.apply_or(),
///     Err(StackError::Underflow { required: 2, available: 1 })
/// );
/// assert_eq!(stack.pop(), Ok(true));
/// # Ok::<_, StackError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CheckedLogicStack(LogicStack);

impl CheckedLogicStack {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self(LogicStack::new())
    }

    /// Returns the number of elements on the stack.
    pub const fn size(&self) -> usize {
        self.0.size()
    }

    /// Checks whether the stack holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the top element without removing it.
    ///
    /// # Errors
    ///
    /// Fails if the stack is empty.
    pub fn top(&self) -> Result<bool, StackError> {
        self.require(1)?;
        Ok(self.0.top())
    }

    /// Returns the element with the specified 0-based index counting from the bottom.
    ///
    /// # Errors
    ///
    /// Fails if `index` is not less than [`Self::size()`].
    pub fn get(&self, index: usize) -> Result<bool, StackError> {
        if index >= self.0.size() {
            return Err(StackError::OutOfBounds {
                index,
                size: self.0.size(),
            });
        }
        Ok(self.0.get(index))
    }

    /// Pushes a value onto the stack.
    ///
    /// # Errors
    ///
    /// Fails if the stack already holds [`LogicStack::max_stack_depth()`] elements.
    pub fn push(&mut self, value: bool) -> Result<(), StackError> {
        if self.0.size() >= LogicStack::max_stack_depth() {
            return Err(StackError::Overflow {
                capacity: LogicStack::max_stack_depth(),
            });
        }
        self.0.push(value);
        Ok(())
    }

    /// Removes the top element and returns it.
    ///
    /// # Errors
    ///
    /// Fails if the stack is empty.
    pub fn pop(&mut self) -> Result<bool, StackError> {
        self.require(1)?;
        Ok(self.0.pop())
    }

    /// Negates the top element in place.
    ///
    /// # Errors
    ///
    /// Fails if the stack is empty.
    pub fn apply_not(&mut self) -> Result<(), StackError> {
        self.require(1)?;
        self.0.apply_not();
        Ok(())
    }

    /// Replaces the two top elements with their conjunction.
    ///
    /// # Errors
    ///
    /// Fails if the stack holds fewer than two elements.
    pub fn apply_and(&mut self) -> Result<(), StackError> {
        self.require(2)?;
        self.0.apply_and();
        Ok(())
    }

    /// Replaces the two top elements with their disjunction.
    ///
    /// # Errors
    ///
    /// Fails if the stack holds fewer than two elements.
    pub fn apply_or(&mut self) -> Result<(), StackError> {
        self.require(2)?;
        self.0.apply_or();
        Ok(())
    }

    /// Returns the wrapped unchecked stack.
    pub const fn as_unchecked(&self) -> &LogicStack {
        &self.0
    }

    /// Unwraps into the unchecked stack.
    pub const fn into_inner(self) -> LogicStack {
        self.0
    }

    fn require(&self, required: usize) -> Result<(), StackError> {
        let available = self.0.size();
        if available < required {
            return Err(StackError::Underflow {
                required,
                available,
            });
        }
        Ok(())
    }
}

impl From<LogicStack> for CheckedLogicStack {
    fn from(stack: LogicStack) -> Self {
        Self(stack)
    }
}

impl StackInterface for CheckedLogicStack {
    fn size(&self) -> usize {
        self.0.size()
    }

    fn get(&self, index: usize) -> bool {
        self.0.get(index)
    }
}
