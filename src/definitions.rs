//! Machine constants of the SUPER-CHIP-48 virtual machine.

pub mod memory {
    /// The size of the chipset ram
    pub const SIZE: usize = 0x1000; // 4096

    /// All addresses are taken modulo the ram size.
    pub const ADDRESS_MASK: usize = SIZE - 1;

    /// Everything below this address belongs to the interpreter and
    /// may never be written by a running program.
    pub const RESERVED_END: usize = 0x200;

    /// opcode information
    pub mod opcodes {
        /// The step used for calculating the program counter increments
        pub const SIZE: usize = 2;
    }
}

/// The definitions for the cpu
pub mod cpu {
    /// The starting point for the program
    pub const PROGRAM_COUNTER: usize = 0x0200;
    /// The amount of instructions the run driver executes per second by default.
    pub const HERTZ: u64 = 500;

    /// The definitions needed for the register
    pub mod register {
        /// The size of the chip set registers
        pub const SIZE: usize = 16;
        /// The last entry of the registers, doubles as the flag register `VF`
        pub const LAST: usize = SIZE - 1;
    }

    /// The SUPER-CHIP user flag registers (`FX75` / `FX85`)
    pub mod flags {
        /// The amount of flag registers
        pub const SIZE: usize = 8;
        /// The highest register index that may be persisted
        pub const LAST: usize = SIZE - 1;
    }

    /// The stack definitions
    pub mod stack {
        /// The count of nesting entries
        pub const SIZE: usize = 16;
    }
}

/// The timer definitions
pub mod timer {
    /// The frequency the delay and sound timers count down at
    pub const HERZ: u64 = 60;
}

/// The display definitions
pub mod display {
    /// The amount of physical pixels per row
    pub const WIDTH: usize = 128;
    /// The amount of physical rows
    pub const HEIGHT: usize = 64;
    /// The amount of pixels the display has
    pub const RESOLUTION: usize = HEIGHT * WIDTH;
    /// The side length of the block a single low resolution pixel covers
    pub const LOW_RESOLUTION_SCALE: usize = 2;
    /// The amount of columns `00FB` and `00FC` move the screen by
    pub const HORIZONTAL_SCROLL: usize = 4;
    /// The size of the `DXY0` sprite in both directions
    pub const LARGE_SPRITE_SIZE: usize = 16;

    /// The small hexadecimal font information
    pub mod fontset {
        /// Is the location of the beginning to the font in memory
        pub const LOCATION: usize = 0x000;
        /// The amount of bytes of a single character
        pub const GLYPH_SIZE: usize = 5;
        /// The font set character to be rendered on the screen
        pub const FONTSET: [u8; 80] = [
            0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
            0x20, 0x60, 0x20, 0x20, 0x70, // 1
            0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
            0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
            0x90, 0x90, 0xF0, 0x10, 0x10, // 4
            0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
            0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
            0xF0, 0x10, 0x20, 0x40, 0x40, // 7
            0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
            0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
            0xF0, 0x90, 0xF0, 0x90, 0x90, // A
            0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
            0xF0, 0x80, 0x80, 0x80, 0xF0, // C
            0xE0, 0x90, 0x90, 0x90, 0xE0, // D
            0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
            0xF0, 0x80, 0xF0, 0x80, 0x80, // F
        ];
    }

    /// The large decimal font used by `FX30`
    pub mod large_fontset {
        /// Is the location of the beginning to the font in memory
        pub const LOCATION: usize = 0x080;
        /// The amount of bytes of a single character
        pub const GLYPH_SIZE: usize = 10;
        /// There are only glyphs for the digits `0-9`
        pub const GLYPHS: u8 = 10;
        /// The 8x10 digits
        pub const FONTSET: [u8; 100] = [
            0x3C, 0x7E, 0xE7, 0xC3, 0xC3, 0xC3, 0xC3, 0xE7, 0x7E, 0x3C, // 0
            0x18, 0x38, 0x58, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, // 1
            0x3E, 0x7F, 0xC3, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFF, 0xFF, // 2
            0x3C, 0x7E, 0xC3, 0x03, 0x0E, 0x0E, 0x03, 0xC3, 0x7E, 0x3C, // 3
            0x06, 0x0E, 0x1E, 0x36, 0x66, 0xC6, 0xFF, 0xFF, 0x06, 0x06, // 4
            0xFF, 0xFF, 0xC0, 0xC0, 0xFC, 0xFE, 0x03, 0xC3, 0x7E, 0x3C, // 5
            0x3E, 0x7C, 0xC0, 0xC0, 0xFC, 0xFE, 0xC3, 0xC3, 0x7E, 0x3C, // 6
            0xFF, 0xFF, 0x03, 0x06, 0x0C, 0x18, 0x30, 0x60, 0x60, 0x60, // 7
            0x3C, 0x7E, 0xC3, 0xC3, 0x7E, 0x7E, 0xC3, 0xC3, 0x7E, 0x3C, // 8
            0x3C, 0x7E, 0xC3, 0xC3, 0x7F, 0x3F, 0x03, 0x03, 0x3E, 0x7C, // 9
        ];
    }
}

/// The definitions needed for correct keyboard definitions.
pub mod keyboard {
    /// all the different keyboard entries
    pub const SIZE: usize = 16;
    /// Key codes are taken modulo the key count
    pub const MASK: u8 = SIZE as u8 - 1;
}
