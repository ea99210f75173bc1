/// Read-only view of a boolean stack.
///
/// Indices count from the bottom of the stack: `0` is the oldest element and `size() - 1` is the top.
pub trait StackInterface {
    /// Returns the number of live elements.
    fn size(&self) -> usize;

    /// Returns the element with the specified 0-based index counting from the bottom.
    ///
    /// Implementations may panic or return an arbitrary value if `index >= self.size()`.
    fn get(&self, index: usize) -> bool;

    /// Returns the top element.
    ///
    /// The default implementation reads the element at `size() - 1`.
    fn top(&self) -> bool {
        self.get(self.size() - 1)
    }

    /// Checks whether the stack holds no elements.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

#[cfg(test)]
#[derive(Debug)]
pub(crate) struct DummyStack(pub(crate) Vec<bool>);

#[cfg(test)]
impl StackInterface for DummyStack {
    fn size(&self) -> usize {
        self.0.len()
    }

    fn get(&self, index: usize) -> bool {
        self.0[index]
    }
}
