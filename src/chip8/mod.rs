//! The full implementation of the SUPER-CHIP-48 interpreter, from the opcodes to the
//! frame buffer and an option to pretty print the state.
mod chipset;
mod opcodes;
mod print;
mod screen;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
pub use screen::FrameBuffer;
