use std::fmt;

/// # Opcode
///
/// A raw 16-bit instruction word, fetched big-endian from two consecutive bytes.
///
/// Its behavior is cased on some combination of nibbles:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` or `(_, _, n, n)` specific behavior within a category
///
/// The remaining nibbles carry operands:
/// - `[_x__]` a register index Vx, or the last register of a range V0..=Vx
/// - `[__y_]` a register index Vy
/// - `[___n]` a 4-bit immediate
/// - `[__nn]` an 8-bit immediate
/// - `[_nnn]` a 12-bit address
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from_be_bytes([high, low]))
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (
            ((self.0 & 0xF000) >> 12) as u8,
            ((self.0 & 0x0F00) >> 8) as u8,
            ((self.0 & 0x00F0) >> 4) as u8,
            (self.0 & 0x000F) as u8,
        )
    }

    pub fn x(self) -> usize {
        usize::from((self.0 & 0x0F00) >> 8)
    }

    pub fn y(self) -> usize {
        usize::from((self.0 & 0x00F0) >> 4)
    }

    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(word: u16) -> Self {
        Opcode(word)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
