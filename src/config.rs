use crate::constants::STACK_CAPACITY;

/// What FX0A does when no key is held.
///
/// Either way the cycle ends early and the timers are not ticked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyWait {
    /// The pc has already moved past FX0A, so the next cycle carries on with the following
    /// instruction. This is how the reference interpreter behaves.
    FallThrough,
    /// The pc is wound back onto FX0A so it is fetched again next cycle.
    Block,
}

/// # Config
/// Knobs that change how a `Chip8` behaves without changing the instruction set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nested subroutine calls.
    pub stack_capacity: usize,
    pub key_wait: KeyWait,
    /// Seed for CXNN. `None` draws a fresh seed from the OS on every reset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_capacity: STACK_CAPACITY,
            key_wait: KeyWait::FallThrough,
            seed: None,
        }
    }
}
