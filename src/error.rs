use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can go wrong while executing a single instruction.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid display operation '{0}'.")]
    Display(#[from] DisplayError),
    #[error("Invalid memory operation '{0}'.")]
    Memory(#[from] MemoryError),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack overflow!")]
    Full,
    #[error("Attempted to leave subroutine with empty stack!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayError {
    #[error("Unable to scroll {0} rows in low resolution mode, the amount has to be even.")]
    InvalidScroll(u8),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("There is no large glyph for the value {0:#04X}.")]
    InvalidGlyphIndex(u8),
    #[error("Only the flag registers 0 to 7 exist, requested up to {0}.")]
    InvalidFlagRegisterRange(usize),
    #[error("The interpreter memory at {0:#05X} is write protected.")]
    ReservedWrite(usize),
}

/// A fault raised by [`advance`](crate::chip8::ChipSet::advance), it
/// carries the address of the instruction that failed.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("{address:#05X} - Aborting - {source}")]
pub struct Fault {
    pub address: usize,
    #[source]
    pub source: ProcessError,
}

impl Fault {
    pub fn new(address: usize, source: impl Into<ProcessError>) -> Self {
        Self {
            address,
            source: source.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum LoadError {
    #[error("The rom is too large ({size} bytes), at most {max_size} bytes fit into memory.")]
    RomTooLarge { size: usize, max_size: usize },
}
