use crate::error::{Error, Result};

/// # Call Stack
/// A fixed-capacity LIFO of return addresses.
///
/// The buffer is allocated once; `len` counts how many slots are live.
#[derive(Clone, Debug)]
pub struct Stack {
    slots: Box<[u16]>,
    len: usize,
}

impl Stack {
    pub fn with_capacity(capacity: usize) -> Self {
        Stack {
            slots: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<()> {
        match self.slots.get_mut(self.len) {
            Some(slot) => {
                *slot = addr;
                self.len += 1;
                Ok(())
            }
            None => Err(Error::StackOverflow {
                capacity: self.capacity(),
            }),
        }
    }

    pub fn pop(&mut self) -> Result<u16> {
        let addr = self.peek()?;
        self.len -= 1;
        Ok(addr)
    }

    pub fn peek(&self) -> Result<u16> {
        match self.len {
            0 => Err(Error::StackUnderflow),
            len => Ok(self.slots[len - 1]),
        }
    }

    pub fn depth(&self) -> usize {
        self.len
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every live entry; the capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}
