/// Number of operands a calculator program may have on its stack at once
pub const STACK_CAPACITY: usize = 100;

/// A fixed-capacity stack of real numbers.
///
/// Overflowing pushes are dropped and underflowing pops produce `0.0`, so
/// that a malformed function degrades a single sample rather than aborting
/// the render. These are the only ways to mutate the stack
#[derive(Debug, Clone)]
pub struct OperandStack {
    values: [f32; STACK_CAPACITY],
    len: usize,
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl OperandStack {
    pub const fn new() -> Self {
        Self {
            values: [0.0; STACK_CAPACITY],
            len: 0,
        }
    }

    pub fn push(&mut self, value: f32) {
        if self.len < STACK_CAPACITY {
            self.values[self.len] = value;
            self.len += 1;
        }
    }

    pub fn pop(&mut self) -> f32 {
        if self.len == 0 {
            return 0.0;
        }

        self.len -= 1;
        self.values[self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// The live operands, bottom first
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.len]
    }

    /// Duplicates the top `n` operands in order. Does nothing if fewer than `n`
    /// operands exist or the copies would not fit
    pub(super) fn copy_top(&mut self, n: usize) {
        if n > self.len || n > STACK_CAPACITY - self.len {
            return;
        }

        self.values.copy_within(self.len - n..self.len, self.len);
        self.len += n;
    }

    /// The operand `n` places below the top, if there is one
    pub(super) fn peek_from_top(&self, n: usize) -> Option<f32> {
        let idx = self.len.checked_sub(n)?.checked_sub(1)?;

        Some(self.values[idx])
    }

    /// Rotates the top `n` operands `shift` places toward the top of the stack
    pub(super) fn roll_top(&mut self, n: usize, shift: usize) {
        if n > self.len || shift > n {
            return;
        }

        self.values[self.len - n..self.len].rotate_right(shift);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pop_empty_is_zero() {
        let mut stack = OperandStack::new();

        assert_eq!(stack.pop(), 0.0);
        assert_eq!(stack.pop(), 0.0);
        assert!(stack.is_empty());
    }

    #[test]
    fn push_past_capacity_is_dropped() {
        let mut stack = OperandStack::new();

        for i in 0..=STACK_CAPACITY {
            stack.push(i as f32);
        }

        assert_eq!(stack.len(), STACK_CAPACITY);
        assert_eq!(stack.pop(), (STACK_CAPACITY - 1) as f32);
    }

    #[test]
    fn copy_top_in_order() {
        let mut stack = OperandStack::new();
        stack.push(1.0);
        stack.push(2.0);
        stack.push(3.0);

        stack.copy_top(2);

        assert_eq!(stack.as_slice(), &[1.0, 2.0, 3.0, 2.0, 3.0]);
    }

    #[test]
    fn copy_top_that_would_overflow_is_ignored() {
        let mut stack = OperandStack::new();

        for i in 0..STACK_CAPACITY - 1 {
            stack.push(i as f32);
        }

        stack.copy_top(2);

        assert_eq!(stack.len(), STACK_CAPACITY - 1);
    }

    #[test]
    fn peek_from_top() {
        let mut stack = OperandStack::new();
        stack.push(1.0);
        stack.push(2.0);

        assert_eq!(stack.peek_from_top(0), Some(2.0));
        assert_eq!(stack.peek_from_top(1), Some(1.0));
        assert_eq!(stack.peek_from_top(2), None);
        assert_eq!(stack.peek_from_top(usize::MAX), None);
    }
}
