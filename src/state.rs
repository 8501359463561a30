use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;
use crate::constants::{
    DISPLAY_SIZE, KEY_COUNT, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    SPRITE_SHEET,
};
use crate::error::{Error, Result};
use crate::stack::Stack;

/// The frame buffer is 64x32 cells in row-major order, each 0 (off) or 1 (on).
/// Cell `(x, y)` lives at `y * DISPLAY_WIDTH + x`.
pub type FrameBuffer = [u8; DISPLAY_SIZE];

/// # Machine State
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF
///     - VF doubles as the carry/borrow/shift/collision flag
/// - (i) a 16-bit index register, normally a 12-bit memory pointer
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Memory
/// - 4096 bytes; the sprite sheet occupies 0x000..0x050, programs start at 0x200
/// - a bounded call stack of return addresses
/// - the 64x32 frame buffer plus a flag telling the renderer it changed
///
/// ## Input
/// - 16 key cells, written by the host between cycles
///
/// ## Timers
/// - delay and sound, both decremented once per cycle while nonzero
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; KEY_COUNT],
    pub delay_timer: u8,
    pub sound_timer: u8,
    rng: StdRng,
    seed: Option<u64>,
}

impl State {
    /// Builds a freshly reset machine.
    pub fn new(config: &Config) -> Self {
        let mut state = State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::with_capacity(config.stack_capacity),
            memory: [0; MEMORY_SIZE],
            frame_buffer: [0; DISPLAY_SIZE],
            draw_flag: false,
            keys: [false; KEY_COUNT],
            delay_timer: 0,
            sound_timer: 0,
            rng: StdRng::seed_from_u64(0),
            seed: config.seed,
        };
        state.reset();
        state
    }

    /// Zeroes everything, reinstalls the sprite sheet and re-seeds the RNG.
    pub fn reset(&mut self) {
        self.v = [0; REGISTER_COUNT];
        self.i = 0;
        self.pc = PROGRAM_START;
        self.stack.clear();
        self.memory = [0; MEMORY_SIZE];
        self.memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        self.frame_buffer = [0; DISPLAY_SIZE];
        self.draw_flag = false;
        self.keys = [false; KEY_COUNT];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::debug!("machine reset");
    }

    /// Copies a program image into memory at 0x200.
    ///
    /// Nothing is written if the image doesn't fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Bounds-checked view of `len` bytes of memory starting at `addr`.
    pub fn read(&self, addr: usize, len: usize) -> Result<&[u8]> {
        self.memory
            .get(addr..addr + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
    }

    /// Bounds-checked mutable view of `len` bytes of memory starting at `addr`.
    pub fn write(&mut self, addr: usize, len: usize) -> Result<&mut [u8]> {
        self.memory
            .get_mut(addr..addr + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: addr.max(MEMORY_SIZE),
            })
    }

    pub fn random_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Counts both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_reset() {
        let state = State::default();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.i, 0);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.stack.depth(), 0);
        assert!(!state.draw_flag);
        assert_eq!(&state.memory[..80], &SPRITE_SHEET[..]);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = State::default();
        state.v[3] = 9;
        state.pc = 0x400;
        state.memory[0x300] = 0xAA;
        state.frame_buffer[10] = 1;
        state.keys[4] = true;
        state.delay_timer = 7;
        state.stack.push(0x222).unwrap();
        state.reset();
        state.reset();
        assert_eq!(state.v[3], 0);
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.memory[0x300], 0);
        assert_eq!(state.frame_buffer[10], 0);
        assert!(!state.keys[4]);
        assert_eq!(state.delay_timer, 0);
        assert!(state.stack.is_empty());
        assert_eq!(&state.memory[..80], &SPRITE_SHEET[..]);
    }

    #[test]
    fn test_load_program_of_max_size() {
        let mut state = State::default();
        let program: Vec<u8> = (0..3584).map(|b| (b % 251) as u8 + 1).collect();
        assert_eq!(state.load_program(&program), Ok(()));
        assert_eq!(state.memory[0x200], program[0]);
        assert_eq!(state.memory[0xFFF], program[3583]);
    }

    #[test]
    fn test_load_program_too_large() {
        let mut state = State::default();
        let program = vec![0xFF; 3585];
        assert_eq!(
            state.load_program(&program),
            Err(Error::ProgramTooLarge {
                size: 3585,
                max: 3584
            })
        );
        assert!(state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_read_out_of_bounds() {
        let state = State::default();
        assert_eq!(state.read(0xFFE, 2).map(|s| s.len()), Ok(2));
        assert_eq!(
            state.read(0xFFF, 2),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        );
        assert_eq!(
            state.read(0x1234, 1),
            Err(Error::MemoryOutOfBounds { address: 0x1234 })
        );
    }

    #[test]
    fn test_timers_stop_at_zero() {
        let mut state = State::default();
        state.delay_timer = 2;
        state.sound_timer = 1;
        state.tick_timers();
        assert_eq!((state.delay_timer, state.sound_timer), (1, 0));
        state.tick_timers();
        state.tick_timers();
        assert_eq!((state.delay_timer, state.sound_timer), (0, 0));
    }

    #[test]
    fn test_seeded_rng_repeats_after_reset() {
        let config = Config {
            seed: Some(42),
            ..Config::default()
        };
        let mut state = State::new(&config);
        let first: Vec<u8> = (0..8).map(|_| state.random_byte()).collect();
        state.reset();
        let second: Vec<u8> = (0..8).map(|_| state.random_byte()).collect();
        assert_eq!(first, second);
    }
}
