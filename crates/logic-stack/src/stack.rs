use std::{
    fmt,
    hash::{Hash, Hasher},
    ops,
};

use logic_stack_interface::StackInterface;

/// Boolean stack packed into a single `usize`.
///
/// Bit 0 of the backing word is always the top of the stack; the element with logical index `i`
/// (counting from the bottom) lives at bit `size() - i - 1`. Bits above `size()` carry no meaning
/// and are never read as data.
///
/// All operations are branch-free bit arithmetic and perform **no** bounds checks in release builds.
/// Pushing onto a full stack, or popping / applying an operator with fewer elements than the operation
/// consumes, is a contract violation: it panics in debug builds and leaves the stack in an unspecified
/// (but memory-safe) state otherwise. Use [`CheckedLogicStack`](crate::CheckedLogicStack) if
/// the operation sequence is not trusted.
///
/// # Examples
///
/// ```
/// use logic_stack::LogicStack;
///
/// // true OR (true AND false)
/// let mut stack = LogicStack::new();
/// stack.push(true);
/// stack.push(true);
/// stack.push(false);
/// stack.apply_and();
/// stack.apply_or();
/// assert_eq!(stack.size(), 1);
/// assert!(stack.pop());
/// ```
#[derive(Clone, Copy, Default)]
pub struct LogicStack {
    bits: usize,
    depth: usize,
}

impl LogicStack {
    /// Creates an empty stack.
    pub const fn new() -> Self {
        Self { bits: 0, depth: 0 }
    }

    /// Greatest number of booleans the stack can hold, equal to the bit width of `usize`.
    pub const fn max_stack_depth() -> usize {
        usize::BITS as usize
    }

    /// Returns the number of elements on the stack.
    #[inline(always)]
    pub const fn size(&self) -> usize {
        self.depth
    }

    /// Checks whether the stack holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.depth == 0
    }

    /// Alias for [`Self::is_empty()`].
    #[inline(always)]
    pub const fn empty(&self) -> bool {
        self.is_empty()
    }

    /// Returns the top element without removing it.
    #[inline(always)]
    pub fn top(&self) -> bool {
        debug_assert!(self.depth >= 1, "top() called on an empty logic stack");
        lsb(self.bits) != 0
    }

    /// Returns the element with the specified 0-based index counting from the bottom of the stack,
    /// so that `get(size() - 1) == top()`.
    ///
    /// Intended for inspection only; evaluation never needs it.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.depth,
            "index {index} out of range for logic stack of size {}",
            self.depth
        );
        let shift = self.depth.wrapping_sub(index).wrapping_sub(1);
        lsb(self.bits.wrapping_shr(shift_amount(shift))) != 0
    }

    /// Pushes a value onto the stack.
    #[inline(always)]
    pub fn push(&mut self, value: bool) {
        debug_assert!(
            self.depth < Self::max_stack_depth(),
            "push() onto a full logic stack"
        );
        self.bits = shl(self.bits) | usize::from(value);
        self.depth = self.depth.wrapping_add(1);
    }

    /// Removes the top element and returns it.
    #[inline(always)]
    pub fn pop(&mut self) -> bool {
        debug_assert!(self.depth >= 1, "pop() called on an empty logic stack");
        let result = lsb(self.bits) != 0;
        self.bits = shr(self.bits);
        self.depth = self.depth.wrapping_sub(1);
        result
    }

    /// Negates the top element in place.
    #[inline(always)]
    pub fn apply_not(&mut self) {
        debug_assert!(self.depth >= 1, "apply_not() called on an empty logic stack");
        self.bits ^= 1;
    }

    /// Replaces the two top elements with their conjunction.
    #[inline(always)]
    pub fn apply_and(&mut self) {
        debug_assert!(self.depth >= 2, "apply_and() needs two operands");
        // A zero top clears the new bit 0; a one top leaves it untouched.
        let top = lsb(self.bits);
        self.bits = shr(self.bits) & (top | !1);
        self.depth = self.depth.wrapping_sub(1);
    }

    /// Replaces the two top elements with their disjunction.
    #[inline(always)]
    pub fn apply_or(&mut self) {
        debug_assert!(self.depth >= 2, "apply_or() needs two operands");
        self.bits = shr(self.bits) | lsb(self.bits);
        self.depth = self.depth.wrapping_sub(1);
    }

    /// Backing word with the bits above `size()` cleared.
    fn live_bits(&self) -> usize {
        if self.depth >= Self::max_stack_depth() {
            self.bits
        } else {
            self.bits & ((1 << self.depth) - 1)
        }
    }
}

#[inline(always)]
const fn lsb(value: usize) -> usize {
    value & 1
}

#[inline(always)]
const fn shr(value: usize) -> usize {
    value >> 1
}

#[inline(always)]
const fn shl(value: usize) -> usize {
    value << 1
}

#[inline(always)]
fn shift_amount(shift: usize) -> u32 {
    // Only reachable with an out-of-range index; `wrapping_shr` masks it anyway.
    u32::try_from(shift).unwrap_or(u32::MAX)
}

impl PartialEq for LogicStack {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.live_bits() == other.live_bits()
    }
}

impl Eq for LogicStack {}

impl Hash for LogicStack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.depth.hash(state);
        self.live_bits().hash(state);
    }
}

/// Lists the live elements from the bottom to the top of the stack.
impl fmt::Debug for LogicStack {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LogicStack")?;
        let size = self.depth.min(Self::max_stack_depth());
        formatter
            .debug_list()
            .entries((0..size).map(|i| self.get(i)))
            .finish()
    }
}

impl ops::Index<usize> for LogicStack {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if self.get(index) {
            &true
        } else {
            &false
        }
    }
}

impl StackInterface for LogicStack {
    fn size(&self) -> usize {
        self.depth
    }

    fn get(&self, index: usize) -> bool {
        LogicStack::get(self, index)
    }

    fn top(&self) -> bool {
        LogicStack::top(self)
    }
}
