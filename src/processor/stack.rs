//! Bounded operand stack for the second pass.

use crate::error::ErrorKind;

pub const STACK_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackValue {
    Integer(i32),
    /// Packed 24-bit RGB.
    RgbColor(u32),
}

/// Fixed-capacity stack. Popped slots are reset to `None`.
#[derive(Debug)]
pub struct Stack {
    slots: [Option<StackValue>; STACK_CAPACITY],
    len: usize,
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Stack {
    pub fn new() -> Self {
        Self {
            slots: [None; STACK_CAPACITY],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, value: StackValue) -> Result<(), ErrorKind> {
        let slot = self.slots.get_mut(self.len).ok_or(ErrorKind::StackOverflow)?;
        *slot = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Copy of the top `N` values, deepest first.
    pub fn peek<const N: usize>(&self) -> Result<[StackValue; N], ErrorKind> {
        let start = self.len.checked_sub(N).ok_or(ErrorKind::StackUnderflow)?;
        let mut out = [StackValue::Integer(0); N];
        for (dst, slot) in out.iter_mut().zip(&self.slots[start..self.len]) {
            *dst = slot.ok_or(ErrorKind::StackUnderflow)?;
        }
        Ok(out)
    }

    /// Discard the top `n` values.
    pub fn pop(&mut self, n: usize) {
        let start = self.len.saturating_sub(n);
        for slot in &mut self.slots[start..self.len] {
            *slot = None;
        }
        self.len = start;
    }
}
