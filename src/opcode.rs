//! Opcode abstractions, decoding and the dispatch table.
use crate::{definitions::memory, OpcodeError, ProcessError};

/// the mask for the top nibble
pub(crate) const OPCODE_MASK_F000: u16 = 0xF000;

/// the mask for the second nibble
pub(crate) const OPCODE_MASK_0F00: u16 = 0x0F00;

/// the mask for the third nibble
pub(crate) const OPCODE_MASK_00F0: u16 = 0x00F0;

/// the mask for the last nibble
pub(crate) const OPCODE_MASK_000F: u16 = 0x000F;

/// the mask for the second byte
pub(crate) const OPCODE_MASK_00FF: u16 = 0x00FF;

/// the mask for the twelve bit address
pub(crate) const OPCODE_MASK_0FFF: u16 = 0x0FFF;

/// the size of a single nibble
const NIBBLE: u16 = 4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use schip::opcode::*;
/// # use schip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00FE, 0xD120];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xFE, 0xD1, 0x20];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # assert_eq!(
/// #    Err(OpcodeError::MemoryInvalid { pointer, len: SPLIT_OPCODE.len() }),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // the second byte has to exist as well
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// Extractors for the fields encoded in an opcode `TXYN`.
pub trait OpcodeTrait {
    /// The type nibble `T`, used for the first dispatch.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0xD12F;
    /// assert_eq!(opcode.t(), 0xD);
    /// ```
    fn t(&self) -> u8;

    /// The register index `X`.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0xD12F;
    /// assert_eq!(opcode.x(), 0x1);
    /// ```
    fn x(&self) -> usize;

    /// The register index `Y`.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0xD12F;
    /// assert_eq!(opcode.y(), 0x2);
    /// ```
    fn y(&self) -> usize;

    /// The last nibble `N`, either a constant or a sub opcode.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0xD12F;
    /// assert_eq!(opcode.n(), 0xF);
    /// ```
    fn n(&self) -> u8;

    /// The constant byte `NN`.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0x7A42;
    /// assert_eq!(opcode.nn(), 0x42);
    /// ```
    fn nn(&self) -> u8;

    /// The twelve bit address `NNN`.
    ///
    /// ```rust
    /// # use schip::opcode::*;
    /// let opcode: Opcode = 0x1EDA;
    /// assert_eq!(opcode.nnn(), 0xEDA);
    /// ```
    fn nnn(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0F00) >> (2 * NIBBLE)) as usize
    }

    fn y(&self) -> usize {
        ((self & OPCODE_MASK_00F0) >> NIBBLE) as usize
    }

    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take after an instruction was executed.
pub enum ProgramCounterStep {
    /// Will not change the program counter, the instruction is retried
    None,
    /// Will move to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will move the program counter to the given location, the
    /// location wraps around the memory size.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use schip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Calculates the program counter following `current`.
    ///
    /// # Example
    /// ```rust
    /// # use schip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next.apply(0x200), 0x202);
    /// assert_eq!(ProgramCounterStep::Skip.apply(0x200), 0x204);
    /// assert_eq!(ProgramCounterStep::None.apply(0x200), 0x200);
    /// assert_eq!(ProgramCounterStep::Jump(0x1234).apply(0x200), 0x234);
    /// ```
    #[inline]
    pub fn apply(&self, current: usize) -> usize {
        match *self {
            ProgramCounterStep::None => current,
            ProgramCounterStep::Next => current + memory::opcodes::SIZE,
            ProgramCounterStep::Skip => current + 2 * memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer & memory::ADDRESS_MASK,
        }
    }
}

/// Generates the conversion of an opcode into one of the
/// operand structs.
macro_rules! implFromOpcode {
    ($type_name:ident { nnn }) => {
        impl From<Opcode> for $type_name {
            fn from(value: Opcode) -> Self {
                Self { nnn: value.nnn() }
            }
        }
    };
    ($type_name:ident { x, nn }) => {
        impl From<Opcode> for $type_name {
            fn from(value: Opcode) -> Self {
                Self {
                    x: value.x(),
                    nn: value.nn(),
                }
            }
        }
    };
    ($type_name:ident { x, y }) => {
        impl From<Opcode> for $type_name {
            fn from(value: Opcode) -> Self {
                Self {
                    x: value.x(),
                    y: value.y(),
                }
            }
        }
    };
    ($type_name:ident { x, y, n }) => {
        impl From<Opcode> for $type_name {
            fn from(value: Opcode) -> Self {
                Self {
                    x: value.x(),
                    y: value.y(),
                    n: value.n(),
                }
            }
        }
    };
}

/// Generates a sub opcode enum together with the lookup from
/// the selecting opcode bits.
macro_rules! implSubOpcode {
    ($(#[$meta:meta])* $type_name:ident : $type_from:ty {
        $( $(#[$vmeta:meta])* $key:literal => $variant:ident ),+ $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $type_name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $( $key => Ok($type_name::$variant), )+
                    _ => Err(()),
                }
            }
        }
    };
}

/// The `00NN` system instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// `00CN` scroll the display down by `N` rows
    ScrollDown(u8),
    /// `00E0` clears the display
    Clear,
    /// `00EE` returns from the subroutine
    Return,
    /// `00FB` scroll the display right by four columns
    ScrollRight,
    /// `00FC` scroll the display left by four columns
    ScrollLeft,
    /// `00FD` exit the interpreter
    Exit,
    /// `00FE` switch to the 64x32 low resolution mode
    LowResolution,
    /// `00FF` switch to the 128x64 high resolution mode
    HighResolution,
}

impl TryFrom<Opcode> for System {
    type Error = ();

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        match value {
            0x00C0..=0x00CF => Ok(System::ScrollDown(value.n())),
            0x00E0 => Ok(System::Clear),
            0x00EE => Ok(System::Return),
            0x00FB => Ok(System::ScrollRight),
            0x00FC => Ok(System::ScrollLeft),
            0x00FD => Ok(System::Exit),
            0x00FE => Ok(System::LowResolution),
            0x00FF => Ok(System::HighResolution),
            // 0NNN machine code routines are not supported
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub nnn: usize,
}

implFromOpcode!(Jump { nnn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub nnn: usize,
}

implFromOpcode!(Call { nnn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipEqual {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(SkipEqual { x, nn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipNotEqual {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(SkipNotEqual { x, nn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRegistersEqual {
    pub x: usize,
    pub y: usize,
}

implFromOpcode!(SkipRegistersEqual { x, y });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Load {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(Load { x, nn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddConst {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(AddConst { x, nn });

implSubOpcode!(
    /// The `8XYN` register operations, selected by `N`.
    ArithmeticOp : u8 {
        /// `8XY0` VX = VY
        0x0 => Assign,
        /// `8XY1` VX |= VY
        0x1 => Or,
        /// `8XY2` VX &= VY
        0x2 => And,
        /// `8XY3` VX ^= VY
        0x3 => Xor,
        /// `8XY4` VX += VY, VF = carry
        0x4 => Add,
        /// `8XY5` VX -= VY, VF = no borrow
        0x5 => Sub,
        /// `8XY6` VX = source >> 1, VF = shifted out bit
        0x6 => ShiftRight,
        /// `8XY7` VX = VY - VX, VF = no borrow
        0x7 => SubReverse,
        /// `8XYE` VX = source << 1, VF = shifted out bit
        0xE => ShiftLeft,
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOp,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipRegistersNotEqual {
    pub x: usize,
    pub y: usize,
}

implFromOpcode!(SkipRegistersNotEqual { x, y });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetIndex {
    pub nnn: usize,
}

implFromOpcode!(SetIndex { nnn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpOffset {
    pub nnn: usize,
}

implFromOpcode!(JumpOffset { nnn });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Random {
    pub x: usize,
    pub nn: u8,
}

implFromOpcode!(Random { x, nn });

/// `DXYN`, a `N` of zero selects the 16x16 sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub x: usize,
    pub y: usize,
    pub n: u8,
}

implFromOpcode!(Draw { x, y, n });

implSubOpcode!(
    /// The `EXNN` keyboard operations, selected by `NN`.
    KeyOp : u8 {
        /// `EX9E` skip if the key in VX is pressed
        0x9E => Pressed,
        /// `EXA1` skip if the key in VX isn't pressed
        0xA1 => NotPressed,
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub ops: KeyOp,
    pub x: usize,
}

implSubOpcode!(
    /// The `FXNN` timer, memory and key operations, selected by `NN`.
    MiscOp : u8 {
        /// `FX07` VX = delay timer
        0x07 => GetDelayTimer,
        /// `FX0A` await a key press and store it in VX
        0x0A => AwaitKeyPress,
        /// `FX15` delay timer = VX
        0x15 => SetDelayTimer,
        /// `FX18` sound timer = VX
        0x18 => SetSoundTimer,
        /// `FX1E` I += VX
        0x1E => AddVxToI,
        /// `FX29` I = small glyph of VX
        0x29 => SetIToSprite,
        /// `FX30` I = large glyph of VX
        0x30 => SetIToLargeSprite,
        /// `FX33` BCD of VX at I
        0x33 => StoreBCD,
        /// `FX55` store V0 to VX at I
        0x55 => StoreV0ToVx,
        /// `FX65` fill V0 to VX from I
        0x65 => FillV0ToVx,
        /// `FX75` store V0 to VX in the flag registers
        0x75 => StoreFlags,
        /// `FX85` fill V0 to VX from the flag registers
        0x85 => FillFlags,
    }
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOp,
    pub x: usize,
}

/// A fully decoded instruction, one variant per type nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    System(System),
    Jump(Jump),
    Call(Call),
    SkipEqual(SkipEqual),
    SkipNotEqual(SkipNotEqual),
    SkipRegistersEqual(SkipRegistersEqual),
    Load(Load),
    AddConst(AddConst),
    Arithmetic(Arithmetic),
    SkipRegistersNotEqual(SkipRegistersNotEqual),
    SetIndex(SetIndex),
    JumpOffset(JumpOffset),
    Random(Random),
    Draw(Draw),
    Key(Key),
    Misc(Misc),
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let invalid = |_| OpcodeError::InvalidOpcode(value);

        let res = match value.t() {
            0x0 => Instruction::System(System::try_from(value).map_err(invalid)?),
            0x1 => Instruction::Jump(value.into()),
            0x2 => Instruction::Call(value.into()),
            0x3 => Instruction::SkipEqual(value.into()),
            0x4 => Instruction::SkipNotEqual(value.into()),
            0x5 if value.n() == 0 => Instruction::SkipRegistersEqual(value.into()),
            0x6 => Instruction::Load(value.into()),
            0x7 => Instruction::AddConst(value.into()),
            0x8 => Instruction::Arithmetic(Arithmetic {
                ops: ArithmeticOp::try_from(value.n()).map_err(invalid)?,
                x: value.x(),
                y: value.y(),
            }),
            0x9 if value.n() == 0 => Instruction::SkipRegistersNotEqual(value.into()),
            0xA => Instruction::SetIndex(value.into()),
            0xB => Instruction::JumpOffset(value.into()),
            0xC => Instruction::Random(value.into()),
            0xD => Instruction::Draw(value.into()),
            0xE => Instruction::Key(Key {
                ops: KeyOp::try_from(value.nn()).map_err(invalid)?,
                x: value.x(),
            }),
            0xF => Instruction::Misc(Misc {
                ops: MiscOp::try_from(value.nn()).map_err(invalid)?,
                x: value.x(),
            }),
            _ => return Err(OpcodeError::InvalidOpcode(value)),
        };
        Ok(res)
    }
}

/// Moves the program counter, this requires the enum
/// [`ProgramCounterStep`](ProgramCounterStep) to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The instruction is waiting for a key press and
    /// has to be executed again.
    Wait,
    /// The frame buffer changed and has to be sent to the screen.
    Draw,
    /// The program requested the interpreter to stop.
    Exit,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter)
/// trait, as every handler only reports how the counter shall move.
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction and move the program counter
    /// if the handler succeeded.
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match instruction {
            Instruction::System(opcode) => self.zero(opcode).map(step_op),
            Instruction::Jump(opcode) => self.one(opcode),
            Instruction::Call(opcode) => self.two(opcode),
            Instruction::SkipEqual(opcode) => self.three(opcode),
            Instruction::SkipNotEqual(opcode) => self.four(opcode),
            Instruction::SkipRegistersEqual(opcode) => self.five(opcode),
            Instruction::Load(opcode) => self.six(opcode),
            Instruction::AddConst(opcode) => self.seven(opcode),
            Instruction::Arithmetic(opcode) => self.eight(opcode),
            Instruction::SkipRegistersNotEqual(opcode) => self.nine(opcode),
            Instruction::SetIndex(opcode) => self.a(opcode),
            Instruction::JumpOffset(opcode) => self.b(opcode),
            Instruction::Random(opcode) => self.c(opcode),
            Instruction::Draw(opcode) => self.d(opcode).map(step_op),
            Instruction::Key(opcode) => self.e(opcode),
            Instruction::Misc(opcode) => self.f(opcode).map(step_op),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// A multiuse opcode base for type `00NN`
    ///
    /// - `00CN` - Display  - `scroll_down(N)`      - Scrolls the display down by `N` rows (`N` has to be even in low resolution).
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    /// - `00FB` - Display  - `scroll_right()`      - Scrolls the display right by `4` columns.
    /// - `00FC` - Display  - `scroll_left()`       - Scrolls the display left by `4` columns.
    /// - `00FD` - Flow     - `exit()`              - Stops the interpreter.
    /// - `00FE` - Display  - `low_res()`           - Switches to low resolution drawing.
    /// - `00FF` - Display  - `high_res()`          - Switches to high resolution drawing.
    fn zero(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn one(&self, opcode: &Jump) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`, the address of the call itself is pushed.
    fn two(&mut self, opcode: &Call) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn three(&self, opcode: &SkipEqual) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn four(&self, opcode: &SkipNotEqual) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn five(&self, opcode: &SkipRegistersEqual) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn six(&mut self, opcode: &Load) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn seven(&mut self, opcode: &AddConst) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYN`
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - `VF` is set to `1` when the sum is at least `256`.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VF` is set to `1` when `VX >= VY`.
    /// - `8XY6` - BitOp    - `Vx=Vs>>1`            - Shifts `VX` (super mode) or `VY` right, `VF` is the lost bit.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - `VF` is set to `1` when `VY >= VX`.
    /// - `8XYE` - BitOp    - `Vx=Vs<<1`            - Shifts `VX` (super mode) or `VY` left, `VF` is the lost bit.
    fn eight(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn nine(&self, opcode: &SkipRegistersNotEqual) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn a(&mut self, opcode: &SetIndex) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn b(&self, opcode: &JumpOffset) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte masked with `NN`.
    fn c(&mut self, opcode: &Random) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws an `8xN` sprite from `I` at `(VX, VY)`, `VF` is set on collision.
    /// - `DXY0` - Disp     - `draw(Vx,Vy,16)`      - Draws a `16x16` sprite in high resolution, does nothing in low resolution.
    fn d(&mut self, opcode: &Draw) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// A multiuse opcode base for type `EXNN`
    ///
    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn e(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXNN`
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX` and notifies the sound device.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Points `I` to the `4x5` glyph of the hex digit in `VX`.
    /// - `FX30` - MEM      - `I=large_addr[Vx]`    - Points `I` to the `8x10` glyph of the decimal digit in `VX`.
    /// - `FX33` - BCD      - `246 => 2, 4, 6`      - Stores the decimal digits of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` at `I`, `I` moves by `X` unless in super mode.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` from `I`, `I` moves by `X` unless in super mode.
    /// - `FX75` - MEM      - `flag_dump(Vx)`       - Stores `V0` to `VX` in the flag registers (`X < 8`).
    /// - `FX85` - MEM      - `flag_load(Vx)`       - Fills `V0` to `VX` from the flag registers (`X < 8`).
    fn f(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv = value.try_into();
        assert_eq!(conv, Ok(Instruction::System(System::Clear)));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_machine_code_calls_are_rejected() {
        for value in [0x0000, 0x0123, 0x0FFF, 0x01E0, 0x00D0, 0x00F0] {
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, Err(OpcodeError::InvalidOpcode(value)));
        }
    }

    #[test]
    fn test_scroll_down_keeps_row_count() {
        for n in 0..=0xF {
            let value: Opcode = 0x00C0 | n;
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, Ok(Instruction::System(System::ScrollDown(n as u8))));
        }
    }

    #[test]
    fn test_tryfrom_opcode_multiple() {
        let arithmetic = |ops| {
            Ok(Instruction::Arithmetic(Arithmetic {
                ops,
                x: 0x1,
                y: 0x2,
            }))
        };
        let misc = |ops| Ok(Instruction::Misc(Misc { ops, x: 0x3 }));

        let tests = [
            // System
            (0x00C4, Ok(Instruction::System(System::ScrollDown(4)))),
            (0x00E0, Ok(Instruction::System(System::Clear))),
            (0x00EE, Ok(Instruction::System(System::Return))),
            (0x00FB, Ok(Instruction::System(System::ScrollRight))),
            (0x00FC, Ok(Instruction::System(System::ScrollLeft))),
            (0x00FD, Ok(Instruction::System(System::Exit))),
            (0x00FE, Ok(Instruction::System(System::LowResolution))),
            (0x00FF, Ok(Instruction::System(System::HighResolution))),
            (0x00FA, Err(())),
            // Flow
            (0x1919, Ok(Instruction::Jump(Jump { nnn: 0x919 }))),
            (0x2222, Ok(Instruction::Call(Call { nnn: 0x222 }))),
            // Conditions
            (0x3123, Ok(Instruction::SkipEqual(SkipEqual { x: 0x1, nn: 0x23 }))),
            (
                0x4123,
                Ok(Instruction::SkipNotEqual(SkipNotEqual { x: 0x1, nn: 0x23 })),
            ),
            (
                0x5120,
                Ok(Instruction::SkipRegistersEqual(SkipRegistersEqual {
                    x: 0x1,
                    y: 0x2,
                })),
            ),
            (0x5121, Err(())),
            (0x6123, Ok(Instruction::Load(Load { x: 0x1, nn: 0x23 }))),
            (0x7123, Ok(Instruction::AddConst(AddConst { x: 0x1, nn: 0x23 }))),
            // Arithmetic
            (0x8120, arithmetic(ArithmeticOp::Assign)),
            (0x8121, arithmetic(ArithmeticOp::Or)),
            (0x8122, arithmetic(ArithmeticOp::And)),
            (0x8123, arithmetic(ArithmeticOp::Xor)),
            (0x8124, arithmetic(ArithmeticOp::Add)),
            (0x8125, arithmetic(ArithmeticOp::Sub)),
            (0x8126, arithmetic(ArithmeticOp::ShiftRight)),
            (0x8127, arithmetic(ArithmeticOp::SubReverse)),
            (0x812E, arithmetic(ArithmeticOp::ShiftLeft)),
            (0x8128, Err(())),
            (0x812F, Err(())),
            (
                0x9120,
                Ok(Instruction::SkipRegistersNotEqual(SkipRegistersNotEqual {
                    x: 0x1,
                    y: 0x2,
                })),
            ),
            (0x9121, Err(())),
            (0xA222, Ok(Instruction::SetIndex(SetIndex { nnn: 0x222 }))),
            (0xB222, Ok(Instruction::JumpOffset(JumpOffset { nnn: 0x222 }))),
            (0xC123, Ok(Instruction::Random(Random { x: 0x1, nn: 0x23 }))),
            // Display
            (
                0xD123,
                Ok(Instruction::Draw(Draw {
                    x: 0x1,
                    y: 0x2,
                    n: 0x3,
                })),
            ),
            (
                0xD120,
                Ok(Instruction::Draw(Draw {
                    x: 0x1,
                    y: 0x2,
                    n: 0x0,
                })),
            ),
            // Keyboard
            (
                0xE19E,
                Ok(Instruction::Key(Key {
                    ops: KeyOp::Pressed,
                    x: 0x1,
                })),
            ),
            (
                0xE1A1,
                Ok(Instruction::Key(Key {
                    ops: KeyOp::NotPressed,
                    x: 0x1,
                })),
            ),
            (0xE111, Err(())),
            // Misc
            (0xF307, misc(MiscOp::GetDelayTimer)),
            (0xF30A, misc(MiscOp::AwaitKeyPress)),
            (0xF315, misc(MiscOp::SetDelayTimer)),
            (0xF318, misc(MiscOp::SetSoundTimer)),
            (0xF31E, misc(MiscOp::AddVxToI)),
            (0xF329, misc(MiscOp::SetIToSprite)),
            (0xF330, misc(MiscOp::SetIToLargeSprite)),
            (0xF333, misc(MiscOp::StoreBCD)),
            (0xF355, misc(MiscOp::StoreV0ToVx)),
            (0xF365, misc(MiscOp::FillV0ToVx)),
            (0xF375, misc(MiscOp::StoreFlags)),
            (0xF385, misc(MiscOp::FillFlags)),
            (0xF3AA, Err(())),
        ];

        for (value, res) in tests {
            let conv: Result<Instruction, _> = value.try_into();
            assert_eq!(conv, res.map_err(|_| OpcodeError::InvalidOpcode(value)));
        }
    }

    #[test]
    fn test_decoding_is_deterministic() {
        // every word either decodes or reports itself as invalid
        for value in 0..=Opcode::MAX {
            let first: Result<Instruction, _> = value.try_into();
            let second: Result<Instruction, _> = value.try_into();
            assert_eq!(first, second);
            if let Err(err) = first {
                assert_eq!(err, OpcodeError::InvalidOpcode(value));
            }
        }
    }
}
