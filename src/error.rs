use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
///
/// Only `ProgramTooLarge` is recoverable; the rest halt the machine until it is reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unknown instruction {0:#06X}")]
    UnknownInstruction(u16),

    #[error("stack overflow: call depth exceeded {capacity}")]
    StackOverflow { capacity: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("machine halted after a fatal error; reset before running again")]
    Halted,
}

impl Error {
    /// Whether the machine may keep running after this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ProgramTooLarge { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
