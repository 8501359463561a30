pub use chip8::Chip8;
pub use config::{Config, KeyWait};
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operations::Flow;
pub use stack::Stack;
pub use state::{FrameBuffer, State};

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
mod stack;
mod state;
