use {
    crate::{
        definitions::{cpu, display, memory},
        devices::{DisplayCommands, KeyboardCommands, Screen, SoundCommands},
        opcode::{self, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        resources::{Rom, MAX_ROM_SIZE},
        Fault, LoadError, MemoryError, ProcessError, StackError,
    },
    rand::{rngs::StdRng, RngCore, SeedableRng},
    tinyvec::ArrayVec,
};

use super::screen::FrameBuffer;

/// The instruction set variant selected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `8XY6` / `8XYE` shift `VY` and `FX55` / `FX65` move `I`.
    Chip8,
    /// `8XY6` / `8XYE` shift `VX` in place and `FX55` / `FX65` leave `I` alone.
    SuperChip,
}

/// The execution state reported after every instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    /// `FX0A` is waiting for a key press, the next advance retries it.
    WaitingForKey,
    /// `00FD` was executed, the program is done.
    Halted,
}

impl State {
    /// Will return if the program can still make progress.
    pub fn is_running(&self) -> bool {
        *self != State::Halted
    }
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// SUPER-CHIP-48 CPU.
pub struct ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    /// name of the loaded rom
    pub(super) name: String,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x04F` - The built in `4x5` pixel font set (`0-F`)
    /// - `0x080-0x0E3` - The built in `8x10` pixel font set (`0-9`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction, it
    /// is the "no borrow" flag. In the draw instruction `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The user flag registers, only reachable through `FX75` and `FX85`.
    pub(super) flag_registers: [u8; cpu::flags::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called.
    /// It holds at most `16` levels of nesting.
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: u8,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: u8,
    /// The `128x64` black and white frame buffer.
    pub(super) screen: FrameBuffer,
    /// Set by `00FF`, cleared by `00FE`.
    pub(super) high_resolution: bool,
    pub(super) mode: Mode,
    pub(super) state: State,
    pub(super) display: D,
    pub(super) sound: S,
    pub(super) keyboard: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl<D, S, K> ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    /// will create a new chipset object
    pub fn new(rom: &Rom, mode: Mode, display: D, sound: S, keyboard: K) -> Result<Self, LoadError> {
        let data = rom.get_data();
        if !rom.fits() {
            return Err(LoadError::RomTooLarge {
                size: data.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        let small = display::fontset::LOCATION;
        ram[small..(small + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);
        let large = display::large_fontset::LOCATION;
        ram[large..(large + display::large_fontset::FONTSET.len())]
            .copy_from_slice(&display::large_fontset::FONTSET);

        // write the rom data into memory
        ram[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())].copy_from_slice(data);

        log::info!(
            "loaded {} ({} bytes) in {:?} mode",
            rom.get_name(),
            data.len(),
            mode
        );

        Ok(Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            flag_registers: [0; cpu::flags::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: 0,
            sound_timer: 0,
            screen: FrameBuffer::new(),
            high_resolution: false,
            mode,
            state: State::Running,
            display,
            sound,
            keyboard,
            rng: Box::new(StdRng::from_entropy()),
        })
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        Ok(())
    }

    /// will fetch, decode and run a single instruction
    fn execute(&mut self) -> Result<Operation, ProcessError> {
        // import here as to not bloat the namespace
        use crate::opcode::ChipOpcodes;

        self.set_opcode()?;
        log::debug!("opcode {:#06X} at {:#05X}", self.opcode, self.program_counter);
        let instruction = Instruction::try_from(self.opcode)?;
        self.calc(&instruction)
    }

    /// will advance the program by a single step
    ///
    /// A fault is reported with the address of the failing instruction, the
    /// chipset is left as it was before the instruction.
    pub fn advance(&mut self) -> Result<State, Fault> {
        if self.state == State::Halted {
            return Ok(State::Halted);
        }

        let address = self.program_counter;
        let operation = self.execute().map_err(|err| {
            let fault = Fault::new(address, err);
            log::warn!("{}", fault);
            fault
        })?;

        self.state = match operation {
            Operation::None => State::Running,
            Operation::Wait => State::WaitingForKey,
            Operation::Draw => {
                self.display.display(self.screen.pixels());
                State::Running
            }
            Operation::Exit => {
                log::info!("{} exited at {:#05X}", self.name, address);
                State::Halted
            }
        };
        Ok(self.state)
    }

    /// Will count both timers down by one, has to be called at 60Hz.
    pub fn tick(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);

        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0 {
                self.sound.set_sound(false, 0);
            }
        }
    }

    /// Will push the given pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Full),
        }
    }

    /// Will pop the last pointer from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }

    /// Will make sure that the `len` bytes starting at `I` may be written.
    pub(super) fn check_writable(&self, len: usize) -> Result<(), MemoryError> {
        for offset in 0..len {
            let address = (self.index_register + offset) & memory::ADDRESS_MASK;
            if address < memory::RESERVED_END {
                return Err(MemoryError::ReservedWrite(address));
            }
        }
        Ok(())
    }

    /// name of the loaded rom
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The last fetched opcode
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn index_register(&self) -> usize {
        self.index_register
    }

    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn flag_registers(&self) -> &[u8] {
        &self.flag_registers
    }

    /// The return addresses, the most recent one is last.
    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    /// Points at the top of the stack, `-1` means empty.
    pub fn stack_cursor(&self) -> i8 {
        self.stack.len() as i8 - 1
    }

    /// will return the delay timer
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// will return the sound timer
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// Will return the current frame buffer
    pub fn screen(&self) -> &Screen {
        self.screen.pixels()
    }

    pub fn is_high_resolution(&self) -> bool {
        self.high_resolution
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Used by the host to forward key presses.
    pub fn keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }
}

impl<D, S, K> ProgramCounter for ChipSet<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }
}
