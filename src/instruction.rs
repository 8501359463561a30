use std::fmt;

use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::operations::{self, Flow};
use crate::state::State;

/// A decoded instruction with its operands already pulled out of the opcode.
///
/// `x` and `y` are register indices, `nn` an 8-bit immediate, `addr` a 12-bit address
/// and `n` a 4-bit immediate (the sprite height for `Draw`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0, or any 0NN0
    Clear,
    /// 00EE, or any 0NNE
    Return,
    /// Any other opcode in a recognized group that has no defined behavior, e.g. 0123.
    Ignored(Opcode),
    /// 1NNN
    Jump { addr: u16 },
    /// 2NNN
    Call { addr: u16 },
    /// 3XNN
    SkipEq { x: usize, nn: u8 },
    /// 4XNN
    SkipNe { x: usize, nn: u8 },
    /// 5XY0
    SkipEqReg { x: usize, y: usize },
    /// 6XNN
    Load { x: usize, nn: u8 },
    /// 7XNN
    Add { x: usize, nn: u8 },
    /// 8XY0
    Move { x: usize, y: usize },
    /// 8XY1
    Or { x: usize, y: usize },
    /// 8XY2
    And { x: usize, y: usize },
    /// 8XY3
    Xor { x: usize, y: usize },
    /// 8XY4
    AddReg { x: usize, y: usize },
    /// 8XY5
    Sub { x: usize, y: usize },
    /// 8XY6
    ShiftRight { x: usize, y: usize },
    /// 8XY7
    SubN { x: usize, y: usize },
    /// 8XYE
    ShiftLeft { x: usize, y: usize },
    /// 9XY0
    SkipNeReg { x: usize, y: usize },
    /// ANNN
    LoadI { addr: u16 },
    /// BNNN
    JumpV0 { addr: u16 },
    /// CXNN
    Random { x: usize, nn: u8 },
    /// DXYN
    Draw { x: usize, y: usize, n: u8 },
    /// EX9E
    SkipPressed { x: usize },
    /// EXA1
    SkipNotPressed { x: usize },
    /// FX07
    LoadDelay { x: usize },
    /// FX0A
    WaitKey { x: usize },
    /// FX15
    SetDelay { x: usize },
    /// FX18
    SetSound { x: usize },
    /// FX1E
    AddI { x: usize },
    /// FX29
    LoadSprite { x: usize },
    /// FX33
    Bcd { x: usize },
    /// FX55
    Store { x: usize },
    /// FX65
    Read { x: usize },
}

impl Instruction {
    /// Selects the Instruction for a given Opcode.
    ///
    /// Unhandled sub-codes inside a known group decode to `Ignored`; only an
    /// unrecognized leading nibble is an error.
    pub fn decode(op: Opcode) -> Result<Self> {
        use Instruction::*;

        let (x, y, n, nn, addr) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
        let instruction = match op.nibbles() {
            // the 0 group is cased on its low nibble alone, so 0000 clears too
            (0x0, .., 0x0) => Clear,
            (0x0, .., 0xE) => Return,
            (0x0, ..) => Ignored(op),
            (0x1, ..) => Jump { addr },
            (0x2, ..) => Call { addr },
            (0x3, ..) => SkipEq { x, nn },
            (0x4, ..) => SkipNe { x, nn },
            (0x5, ..) => SkipEqReg { x, y },
            (0x6, ..) => Load { x, nn },
            (0x7, ..) => Add { x, nn },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddReg { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x, y },
            (0x8, .., 0x7) => SubN { x, y },
            (0x8, .., 0xE) => ShiftLeft { x, y },
            (0x8, ..) => Ignored(op),
            (0x9, ..) => SkipNeReg { x, y },
            (0xA, ..) => LoadI { addr },
            (0xB, ..) => JumpV0 { addr },
            (0xC, ..) => Random { x, nn },
            (0xD, ..) => Draw { x, y, n },
            (0xE, .., 0x9, 0xE) => SkipPressed { x },
            (0xE, .., 0xA, 0x1) => SkipNotPressed { x },
            (0xE, ..) => Ignored(op),
            (0xF, .., 0x0, 0x7) => LoadDelay { x },
            (0xF, .., 0x0, 0xA) => WaitKey { x },
            (0xF, .., 0x1, 0x5) => SetDelay { x },
            (0xF, .., 0x1, 0x8) => SetSound { x },
            (0xF, .., 0x1, 0xE) => AddI { x },
            (0xF, .., 0x2, 0x9) => LoadSprite { x },
            (0xF, .., 0x3, 0x3) => Bcd { x },
            (0xF, .., 0x5, 0x5) => Store { x },
            (0xF, .., 0x6, 0x5) => Read { x },
            (0xF, ..) => Ignored(op),
            _ => return Err(Error::UnknownInstruction(op.0)),
        };
        Ok(instruction)
    }

    /// Applies the instruction to `state`.
    ///
    /// The pc must already point past this instruction.
    pub fn execute(self, state: &mut State) -> Result<Flow> {
        use Instruction::*;

        match self {
            Clear => operations::clr(state),
            Return => operations::rts(state),
            Ignored(op) => {
                log::debug!("ignoring {}", op);
                operations::sys(state)
            }
            Jump { addr } => operations::jump(state, addr),
            Call { addr } => operations::call(state, addr),
            SkipEq { x, nn } => operations::ske(state, x, nn),
            SkipNe { x, nn } => operations::skne(state, x, nn),
            SkipEqReg { x, y } => operations::skre(state, x, y),
            Load { x, nn } => operations::load(state, x, nn),
            Add { x, nn } => operations::add(state, x, nn),
            Move { x, y } => operations::mv(state, x, y),
            Or { x, y } => operations::or(state, x, y),
            And { x, y } => operations::and(state, x, y),
            Xor { x, y } => operations::xor(state, x, y),
            AddReg { x, y } => operations::addr(state, x, y),
            Sub { x, y } => operations::sub(state, x, y),
            ShiftRight { x, y } => operations::shr(state, x, y),
            SubN { x, y } => operations::subn(state, x, y),
            ShiftLeft { x, y } => operations::shl(state, x, y),
            SkipNeReg { x, y } => operations::skrne(state, x, y),
            LoadI { addr } => operations::loadi(state, addr),
            JumpV0 { addr } => operations::jumpi(state, addr),
            Random { x, nn } => operations::rand(state, x, nn),
            Draw { x, y, n } => operations::draw(state, x, y, n),
            SkipPressed { x } => operations::skpr(state, x),
            SkipNotPressed { x } => operations::skup(state, x),
            LoadDelay { x } => operations::moved(state, x),
            WaitKey { x } => operations::keyd(state, x),
            SetDelay { x } => operations::loads(state, x),
            SetSound { x } => operations::ld(state, x),
            AddI { x } => operations::addi(state, x),
            LoadSprite { x } => operations::ldspr(state, x),
            Bcd { x } => operations::bcd(state, x),
            Store { x } => operations::stor(state, x),
            Read { x } => operations::read(state, x),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;

        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Ignored(op) => write!(f, "SYS {}", op),
            Jump { addr } => write!(f, "JP {:03X}", addr),
            Call { addr } => write!(f, "CALL {:03X}", addr),
            SkipEq { x, nn } => write!(f, "SE V{:X}, {:02X}", x, nn),
            SkipNe { x, nn } => write!(f, "SNE V{:X}, {:02X}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Load { x, nn } => write!(f, "LD V{:X}, {:02X}", x, nn),
            Add { x, nn } => write!(f, "ADD V{:X}, {:02X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, .. } => write!(f, "SHR V{:X}", x),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, .. } => write!(f, "SHL V{:X}", x),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadI { addr } => write!(f, "LD I, {:03X}", addr),
            JumpV0 { addr } => write!(f, "JP V0, {:03X}", addr),
            Random { x, nn } => write!(f, "RND V{:X}, {:02X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {:X}", x, y, n),
            SkipPressed { x } => write!(f, "SKP V{:X}", x),
            SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddI { x } => write!(f, "ADD I, V{:X}", x),
            LoadSprite { x } => write!(f, "LD F, V{:X}", x),
            Bcd { x } => write!(f, "LD B, V{:X}", x),
            Store { x } => write!(f, "LD [I], V{:X}", x),
            Read { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
