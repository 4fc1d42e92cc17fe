use crate::definitions::{cpu, memory};

/// The amount of bytes a program may occupy
pub const MAX_ROM_SIZE: usize = memory::SIZE - cpu::PROGRAM_COUNTER;

/// Draws an endless random maze out of two diagonal line sprites.
const MAZE: [u8; 38] = [
    0x60, 0x00, 0x61, 0x00, 0xA2, 0x22, 0xC2, 0x01, 0x32, 0x01, 0xA2, 0x1E, 0xD0, 0x14, 0x70,
    0x04, 0x30, 0x40, 0x12, 0x04, 0x60, 0x00, 0x71, 0x04, 0x31, 0x20, 0x12, 0x04, 0x12, 0x1C,
    0x80, 0x40, 0x20, 0x10, 0x20, 0x40, 0x80, 0x10,
];

#[derive(Clone, Debug, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, it is copied to `0x200` on load
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new(name: &str, data: impl Into<Box<[u8]>>) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// The built in demo program, it fills the low resolution screen with
    /// a random maze and afterwards idles in a jump to itself.
    pub fn maze() -> Self {
        Rom::new("MAZE", &MAZE[..])
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Does the program fit behind the interpreter area.
    pub fn fits(&self) -> bool {
        self.data.len() <= MAX_ROM_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{build_opcode, Opcode};

    const MAZE_OPCODES: [Opcode; 14] = [
        0x6000, 0x6100, 0xA222, 0xC201, 0x3201, 0xA21E, 0xD014, 0x7004, 0x3040, 0x1204, 0x6000,
        0x7104, 0x3120, 0x1204,
    ];

    #[test]
    fn test_maze_opcodes() {
        let rom = Rom::maze();
        assert_eq!(rom.get_name(), "MAZE");
        for (i, expected) in MAZE_OPCODES.iter().enumerate() {
            let opcode = build_opcode(rom.get_data(), i * 2).expect("The maze is well formed.");
            assert_eq!(opcode, *expected);
        }
    }

    #[test]
    fn test_rom_size() {
        assert!(Rom::maze().fits());
        assert!(Rom::new("FULL", vec![0; MAX_ROM_SIZE]).fits());
        assert!(!Rom::new("LARGE", vec![0; MAX_ROM_SIZE + 1]).fits());
    }
}
