pub use crate::disasm::disassemble;
pub use crate::error::Error;
pub use crate::machine::{FrameBuffer, Machine};
pub use crate::opcode::Opcode;

pub mod constants;
mod disasm;
mod error;
mod instruction;
mod machine;
mod opcode;
mod operations;
