//! A SUPER-CHIP-48 interpreter core.
//!
//! The [`ChipSet`](chip8::ChipSet) executes a program one instruction at a time,
//! the host supplies the screen, sound and keyboard through the traits in
//! [`devices`] and drives it either by hand or through the [`Runner`].
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
pub mod resources;
mod error;

// reexporting for convenience
mod runner;
pub use error::*;
pub use runner::*;
