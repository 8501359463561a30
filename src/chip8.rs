use crate::config::{Config, KeyWait};
use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::operations::Flow;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `config` it was built with
///  - whether a fatal error has `halted` it
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    config: Config,
    halted: bool,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Chip8 {
            state: State::new(&config),
            config,
            halted: false,
        }
    }

    /// Returns the machine to its power-on state and clears any halt.
    pub fn reset(&mut self) {
        self.state.reset();
        self.halted = false;
    }

    /// Resets the machine and installs a rom at 0x200
    ///
    /// # Arguments
    /// * `rom` the raw program image
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.reset();
        self.state.load_program(rom)
    }

    /// Read-only view of the whole machine.
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    pub fn draw_flag(&self) -> bool {
        self.state.draw_flag
    }

    pub fn clear_draw_flag(&mut self) {
        self.state.draw_flag = false;
    }

    /// Returns the FrameBuffer if the display should be redrawn, consuming the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Whether a tone should be sounding.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn keys(&self) -> &[bool; KEY_COUNT] {
        &self.state.keys
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keys.get_mut(usize::from(key)) {
            Some(cell) => *cell = pressed,
            None => log::warn!("ignoring key {:#04X} outside the keypad", key),
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    /// - ticks the timers, unless FX0A is still waiting for a key
    ///
    /// A fatal error halts the machine; every later call returns `Error::Halted` until `reset`.
    pub fn cycle(&mut self) -> Result<()> {
        if self.halted {
            return Err(Error::Halted);
        }
        self.step().map_err(|err| {
            self.halted = err.is_fatal();
            err
        })
    }

    fn step(&mut self) -> Result<()> {
        let op = self.get_op()?;
        self.state.pc = self.state.pc.wrapping_add(2);

        let instruction = Instruction::decode(op)?;
        log::trace!(
            "{} {} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction,
            self.state.v,
            self.state.i,
            self.state.pc
        );

        match instruction.execute(&mut self.state)? {
            Flow::Next => self.state.tick_timers(),
            Flow::AwaitingKey => {
                if self.config.key_wait == KeyWait::Block {
                    self.state.pc = self.state.pc.wrapping_sub(2);
                }
            }
        }
        Ok(())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<Opcode> {
        let bytes = self.state.read(usize::from(self.state.pc), 2)?;
        Ok(Opcode::from_bytes(bytes[0], bytes[1]))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load_rom(program).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Ok(Opcode(0xAABB)));
    }

    #[test]
    fn test_cycle_advances_pc() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert!(chip8.draw_flag());
    }

    #[test]
    fn test_cycle_ticks_timers_once() {
        // LD V0, 3; LD DT, V0; LD ST, V0; then jump to self
        let mut chip8 = with_program(&[0x60, 0x03, 0xF0, 0x15, 0xF0, 0x18, 0x12, 0x06]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.delay_timer, 2);
        chip8.cycle().unwrap();
        assert_eq!((chip8.state.delay_timer, chip8.state.sound_timer), (1, 2));
        assert!(chip8.sound_active());
        for _ in 0..4 {
            chip8.cycle().unwrap();
        }
        assert_eq!((chip8.state.delay_timer, chip8.state.sound_timer), (0, 0));
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_call_then_return() {
        // 0x200: CALL 0x206; 0x202: JP 0x202; 0x204: (pad); 0x206: RET
        let mut chip8 = with_program(&[0x22, 0x06, 0x12, 0x02, 0x00, 0x00, 0x00, 0xEE]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x206);
        assert_eq!(chip8.state.stack.depth(), 1);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.stack.depth(), 0);
    }

    #[test]
    fn test_fatal_error_halts() {
        let mut chip8 = with_program(&[0x00, 0xEE, 0x00, 0xE0]);
        assert_eq!(chip8.cycle(), Err(Error::StackUnderflow));
        assert!(chip8.is_halted());
        assert_eq!(chip8.cycle(), Err(Error::Halted));
        assert_eq!(chip8.state.pc, 0x202);
        chip8.reset();
        assert!(!chip8.is_halted());
    }

    #[test]
    fn test_runaway_recursion_overflows() {
        let mut chip8 = with_program(&[0x22, 0x00]);
        for _ in 0..16 {
            chip8.cycle().unwrap();
        }
        assert_eq!(chip8.cycle(), Err(Error::StackOverflow { capacity: 16 }));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut chip8 = with_program(&[0x1F, 0xFF]);
        chip8.cycle().unwrap();
        assert_eq!(
            chip8.cycle(),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        );
    }

    #[test]
    fn test_load_rom_too_large_is_recoverable() {
        let mut chip8 = Chip8::new();
        assert_eq!(
            chip8.load_rom(&[0; 3585]),
            Err(Error::ProgramTooLarge {
                size: 3585,
                max: 3584
            })
        );
        assert!(!chip8.is_halted());
        chip8.load_rom(&[0x00, 0xE0]).unwrap();
        chip8.cycle().unwrap();
    }

    #[test]
    fn test_wait_key_falls_through_by_default() {
        let mut chip8 = with_program(&[0x60, 0x05, 0xF0, 0x15, 0xF1, 0x0A]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.delay_timer, 4);
        chip8.cycle().unwrap();
        // pc moved on and timers didn't tick
        assert_eq!(chip8.state.pc, 0x206);
        assert_eq!(chip8.state.delay_timer, 4);
    }

    #[test]
    fn test_wait_key_blocks_when_configured() {
        let config = Config {
            key_wait: KeyWait::Block,
            ..Config::default()
        };
        let mut chip8 = Chip8::with_config(config);
        chip8.load_rom(&[0xF1, 0x0A]).unwrap();
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0x7);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x7);
    }

    #[test]
    fn test_key_press_and_release() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xE);
        assert!(chip8.keys()[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.keys()[0xE]);
        chip8.key_press(0x10);
        assert!(chip8.keys().iter().all(|&k| !k));
    }

    #[test]
    fn test_take_frame_consumes_draw_flag() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        assert_eq!(chip8.take_frame(), None);
        chip8.cycle().unwrap();
        assert!(chip8.take_frame().is_some());
        assert!(!chip8.draw_flag());
        assert_eq!(chip8.take_frame(), None);
    }

    #[test]
    fn test_seeded_machines_agree() {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };
        let program = [0xC0, 0xFF, 0xC1, 0xFF];
        let mut a = Chip8::with_config(config);
        let mut b = Chip8::with_config(config);
        a.load_rom(&program).unwrap();
        b.load_rom(&program).unwrap();
        for _ in 0..2 {
            a.cycle().unwrap();
            b.cycle().unwrap();
        }
        assert_eq!(a.state().v, b.state().v);
    }
}
