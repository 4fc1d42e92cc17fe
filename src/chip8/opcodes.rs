use crate::{
    definitions::{
        cpu,
        display::{fontset, large_fontset, LARGE_SPRITE_SIZE},
        keyboard, memory,
    },
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    opcode::{
        AddConst, Arithmetic, ArithmeticOp, Call, ChipOpcodes, Draw, Jump, JumpOffset, Key, KeyOp,
        Load, Misc, MiscOp, Operation, ProgramCounterStep, Random, SetIndex, SkipEqual,
        SkipNotEqual, SkipRegistersEqual, SkipRegistersNotEqual, System,
    },
    DisplayError, MemoryError, ProcessError,
};

use super::{ChipSet, Mode};

/// The bytes making up a `16x16` sprite
const LARGE_SPRITE_BYTES: usize = 2 * LARGE_SPRITE_SIZE;

impl<D, S, K> ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    /// Will read `len` sprite bytes starting at `I`, the addresses wrap
    /// around the memory.
    fn sprite(&self, len: usize) -> [u8; LARGE_SPRITE_BYTES] {
        let mut data = [0; LARGE_SPRITE_BYTES];
        for (offset, byte) in data.iter_mut().take(len).enumerate() {
            *byte = self.memory[(self.index_register + offset) & memory::ADDRESS_MASK];
        }
        data
    }

    /// The register the shift instructions read from.
    fn shift_source(&self, x: usize, y: usize) -> u8 {
        match self.mode {
            Mode::SuperChip => self.registers[x],
            Mode::Chip8 => self.registers[y],
        }
    }

    /// `I` after a bulk register transfer of `V0` to `VX`.
    fn index_after_transfer(&self, x: usize) -> usize {
        match self.mode {
            Mode::SuperChip => self.index_register,
            Mode::Chip8 => (self.index_register + x) & memory::ADDRESS_MASK,
        }
    }
}

impl<D, S, K> ChipOpcodes for ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    fn zero(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match *opcode {
            System::ScrollDown(rows) => {
                // 00CN
                // low resolution pixels are two rows high
                if !self.high_resolution && rows % 2 != 0 {
                    return Err(DisplayError::InvalidScroll(rows).into());
                }
                self.screen.scroll_down(rows as usize);
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Clear => {
                // 00E0
                self.screen.clear();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // Return from sub routine => pop from stack, the stack holds the
                // address of the call itself
                let pc = self.pop_stack()?;
                log::trace!("return to {:#05X}", pc);
                Ok((
                    ProgramCounterStep::Jump(pc + memory::opcodes::SIZE),
                    Operation::None,
                ))
            }
            System::ScrollRight => {
                // 00FB
                self.screen.scroll_right();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::ScrollLeft => {
                // 00FC
                self.screen.scroll_left();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Exit => Ok((ProgramCounterStep::None, Operation::Exit)),
            System::LowResolution => {
                // 00FE
                self.high_resolution = false;
                Ok((ProgramCounterStep::Next, Operation::None))
            }
            System::HighResolution => {
                // 00FF
                self.high_resolution = true;
                Ok((ProgramCounterStep::Next, Operation::None))
            }
        }
    }

    fn one(&self, opcode: &Jump) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn two(&mut self, opcode: &Call) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN
        self.push_stack(self.program_counter)?;
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn three(&self, opcode: &SkipEqual) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] == opcode.nn))
    }

    fn four(&self, opcode: &SkipNotEqual) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] != opcode.nn))
    }

    fn five(&self, opcode: &SkipRegistersEqual) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] == self.registers[opcode.y],
        ))
    }

    fn six(&mut self, opcode: &Load) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn seven(&mut self, opcode: &AddConst) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[opcode.x] = self.registers[opcode.x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn eight(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];

        let (res, flag) = match ops {
            ArithmeticOp::Assign => (vy, None),
            ArithmeticOp::Or => (vx | vy, None),
            ArithmeticOp::And => (vx & vy, None),
            ArithmeticOp::Xor => (vx ^ vy, None),
            ArithmeticOp::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            ArithmeticOp::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            ArithmeticOp::ShiftRight => {
                let source = self.shift_source(x, y);
                (source >> 1, Some(source & 0x01))
            }
            ArithmeticOp::SubReverse => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            ArithmeticOp::ShiftLeft => {
                let source = self.shift_source(x, y);
                (source << 1, Some(source >> 7))
            }
        };

        // the flag is written last, so it wins if X is F
        self.registers[x] = res;
        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        Ok(ProgramCounterStep::Next)
    }

    fn nine(&self, opcode: &SkipRegistersNotEqual) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] != self.registers[opcode.y],
        ))
    }

    fn a(&mut self, opcode: &SetIndex) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = opcode.nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn b(&self, opcode: &JumpOffset) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // the jump wraps around the memory
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(opcode.nnn + v0))
    }

    fn c(&mut self, opcode: &Random) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn d(&mut self, opcode: &Draw) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // Draws a sprite at coordinate (VX, VY), I doesn't change. VF is set to 1 if any
        // screen pixels are flipped from set to unset when the sprite is drawn, and to 0 if
        // that doesn't happen.
        let x = self.registers[opcode.x] as usize;
        let y = self.registers[opcode.y] as usize;

        let collision = if opcode.n == 0 {
            if !self.high_resolution {
                log::trace!("ignoring large sprite in low resolution");
                self.registers[cpu::register::LAST] = 0;
                return Ok((ProgramCounterStep::Next, Operation::None));
            }
            let sprite = self.sprite(LARGE_SPRITE_BYTES);
            self.screen.draw_large(x, y, &sprite)
        } else {
            let len = opcode.n as usize;
            let sprite = self.sprite(len);
            self.screen.draw(x, y, &sprite[..len], self.high_resolution)
        };

        self.registers[cpu::register::LAST] = collision as u8;
        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn e(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError> {
        let key = self.registers[opcode.x] & keyboard::MASK;
        let pressed = self.keyboard.is_pressed(key);
        let skip = match opcode.ops {
            // EX9E
            KeyOp::Pressed => pressed,
            // EXA1
            KeyOp::NotPressed => !pressed,
        };
        Ok(ProgramCounterStep::cond(skip))
    }

    fn f(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = opcode.x;
        let vx = self.registers[x];

        match opcode.ops {
            MiscOp::GetDelayTimer => {
                // FX07
                self.registers[x] = self.delay_timer;
            }
            MiscOp::AwaitKeyPress => {
                // FX0A
                // the instruction is retried until a key press arrives
                match self.keyboard.wait_for_key() {
                    Some(key) => self.registers[x] = key & keyboard::MASK,
                    None => return Ok((ProgramCounterStep::None, Operation::Wait)),
                }
            }
            MiscOp::SetDelayTimer => {
                // FX15
                self.delay_timer = vx;
            }
            MiscOp::SetSoundTimer => {
                // FX18
                self.sound_timer = vx;
                self.sound.set_sound(vx > 0, vx);
            }
            MiscOp::AddVxToI => {
                // FX1E
                // VF is not affected
                self.index_register = (self.index_register + vx as usize) & memory::ADDRESS_MASK;
            }
            MiscOp::SetIToSprite => {
                // FX29
                let digit = (vx & 0x0F) as usize;
                self.index_register = fontset::LOCATION + fontset::GLYPH_SIZE * digit;
            }
            MiscOp::SetIToLargeSprite => {
                // FX30
                if vx >= large_fontset::GLYPHS {
                    return Err(MemoryError::InvalidGlyphIndex(vx).into());
                }
                self.index_register =
                    large_fontset::LOCATION + large_fontset::GLYPH_SIZE * vx as usize;
            }
            MiscOp::StoreBCD => {
                // FX33
                let digits = [vx / 100, (vx / 10) % 10, vx % 10];
                self.check_writable(digits.len())?;
                for (offset, digit) in digits.iter().enumerate() {
                    self.memory[(self.index_register + offset) & memory::ADDRESS_MASK] = *digit;
                }
            }
            MiscOp::StoreV0ToVx => {
                // FX55
                self.check_writable(x + 1)?;
                for (offset, value) in self.registers[..=x].iter().enumerate() {
                    self.memory[(self.index_register + offset) & memory::ADDRESS_MASK] = *value;
                }
                self.index_register = self.index_after_transfer(x);
            }
            MiscOp::FillV0ToVx => {
                // FX65
                for offset in 0..=x {
                    self.registers[offset] =
                        self.memory[(self.index_register + offset) & memory::ADDRESS_MASK];
                }
                self.index_register = self.index_after_transfer(x);
            }
            MiscOp::StoreFlags => {
                // FX75
                if x > cpu::flags::LAST {
                    return Err(MemoryError::InvalidFlagRegisterRange(x).into());
                }
                self.flag_registers[..=x].copy_from_slice(&self.registers[..=x]);
            }
            MiscOp::FillFlags => {
                // FX85
                if x > cpu::flags::LAST {
                    return Err(MemoryError::InvalidFlagRegisterRange(x).into());
                }
                self.registers[..=x].copy_from_slice(&self.flag_registers[..=x]);
            }
        }

        Ok((ProgramCounterStep::Next, Operation::None))
    }
}
