use std::{
    thread,
    time::{Duration, Instant},
};

use crate::{
    chip8::{ChipSet, State},
    definitions::{cpu, timer},
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    Fault,
};

/// the length of a second in nano seconds
const SECOND: u64 = 1_000_000_000;

/// Will calculate the interval of something happening `hertz` times per second.
///
/// The interval never drops below a nano second, otherwise `update` could not
/// consume the elapsed time.
fn interval(hertz: u64) -> Duration {
    Duration::from_nanos((SECOND / hertz.max(1)).max(1))
}

/// Drives a [`ChipSet`](crate::chip8::ChipSet) in real time.
///
/// The host hands in the elapsed time, the runner then catches up with the
/// timers (60Hz) and the cpu (500Hz by default).
pub struct Runner<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    chipset: ChipSet<D, S, K>,
    cpu_interval: Duration,
    timer_interval: Duration,
    cpu_elapsed: Duration,
    timer_elapsed: Duration,
}

impl<D, S, K> Runner<D, S, K>
where
    D: DisplayCommands,
    S: SoundCommands,
    K: KeyboardCommands,
{
    pub fn new(chipset: ChipSet<D, S, K>) -> Self {
        Self::with_hertz(chipset, cpu::HERTZ)
    }

    /// Will execute `hertz` instructions per second.
    pub fn with_hertz(chipset: ChipSet<D, S, K>, hertz: u64) -> Self {
        Self {
            chipset,
            cpu_interval: interval(hertz),
            timer_interval: interval(timer::HERZ),
            cpu_elapsed: Duration::ZERO,
            timer_elapsed: Duration::ZERO,
        }
    }

    /// Will run as many timer ticks and instructions as fit into `elapsed`.
    ///
    /// Execution stops early if the program waits for a key or halts, the
    /// remaining time is dropped so the program doesn't race to catch up.
    pub fn update(&mut self, elapsed: Duration) -> Result<State, Fault> {
        self.timer_elapsed += elapsed;
        self.cpu_elapsed += elapsed;

        while self.timer_elapsed >= self.timer_interval {
            self.timer_elapsed -= self.timer_interval;
            self.chipset.tick();
        }

        while self.cpu_elapsed >= self.cpu_interval {
            self.cpu_elapsed -= self.cpu_interval;
            match self.chipset.advance()? {
                State::Running => {}
                state => {
                    self.cpu_elapsed = Duration::ZERO;
                    return Ok(state);
                }
            }
        }

        Ok(self.chipset.state())
    }

    /// Will block until the program halts or faults.
    pub fn run(&mut self) -> Result<(), Fault> {
        let mut last = Instant::now();
        loop {
            thread::sleep(self.timer_interval);

            let now = Instant::now();
            let state = self.update(now - last)?;
            last = now;

            if !state.is_running() {
                log::info!("{} halted", self.chipset.name());
                return Ok(());
            }
        }
    }

    pub fn chipset(&self) -> &ChipSet<D, S, K> {
        &self.chipset
    }

    pub fn chipset_mut(&mut self) -> &mut ChipSet<D, S, K> {
        &mut self.chipset
    }

    pub fn into_inner(self) -> ChipSet<D, S, K> {
        self.chipset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chip8::Mode,
        devices::{Headless, Keyboard},
        resources::Rom,
        OpcodeError,
    };

    fn runner(program: &[u8], hertz: u64) -> Runner<Headless, Headless, Keyboard> {
        let rom = Rom::new("TEST", program);
        let chipset = ChipSet::new(&rom, Mode::SuperChip, Headless, Headless, Keyboard::new())
            .expect("The test program fits into memory.");
        Runner::with_hertz(chipset, hertz)
    }

    #[test]
    fn test_instruction_rate() {
        // 0x200: V0 += 1, 0x202: jump 0x200
        let mut runner = runner(&[0x70, 0x01, 0x12, 0x00], 1_000);

        assert_eq!(runner.update(Duration::from_millis(10)), Ok(State::Running));
        assert_eq!(runner.chipset().registers()[0], 5);

        // not enough time for a single instruction
        assert_eq!(runner.update(Duration::from_micros(500)), Ok(State::Running));
        assert_eq!(runner.chipset().registers()[0], 5);
        assert_eq!(runner.update(Duration::from_micros(500)), Ok(State::Running));
        assert_eq!(runner.chipset().program_counter(), 0x202);
    }

    #[test]
    fn test_rate_above_resolution() {
        // 0x200: jump 0x200
        let mut runner = runner(&[0x12, 0x00], 2 * SECOND);
        assert_eq!(runner.cpu_interval, Duration::from_nanos(1));

        assert_eq!(runner.update(Duration::from_micros(10)), Ok(State::Running));
        assert_eq!(runner.chipset().program_counter(), 0x200);
        assert_eq!(runner.cpu_elapsed, Duration::ZERO);
    }

    #[test]
    fn test_timer_rate() {
        // V1 = 0x30, delay = V1, loop
        let mut runner = runner(&[0x61, 0x30, 0xF1, 0x15, 0x12, 0x04], cpu::HERTZ);

        assert_eq!(runner.update(Duration::from_secs(1)), Ok(State::Running));
        assert_eq!(runner.chipset().delay_timer(), 0x30);

        runner.update(Duration::from_millis(100)).expect("The loop is valid.");
        assert_eq!(runner.chipset().delay_timer(), 0x30 - 6);
    }

    #[test]
    fn test_wait_for_key() {
        // V0 = key, loop
        let mut runner = runner(&[0xF0, 0x0A, 0x12, 0x02], 1_000);

        assert_eq!(
            runner.update(Duration::from_millis(10)),
            Ok(State::WaitingForKey)
        );
        assert_eq!(runner.chipset().program_counter(), 0x200);

        runner.chipset_mut().keyboard_mut().set_key(0x7, true);
        assert_eq!(runner.update(Duration::from_millis(10)), Ok(State::Running));
        assert_eq!(runner.chipset().registers()[0], 0x7);
        assert_eq!(runner.chipset().program_counter(), 0x202);
    }

    #[test]
    fn test_run_until_halt() {
        // V0 = 1, exit
        let mut runner = runner(&[0x60, 0x01, 0x00, 0xFD], cpu::HERTZ);

        assert_eq!(runner.run(), Ok(()));

        let chipset = runner.into_inner();
        assert_eq!(chipset.state(), State::Halted);
        assert_eq!(chipset.registers()[0], 1);
    }

    #[test]
    fn test_run_fault() {
        let mut runner = runner(&[0x01, 0x23], cpu::HERTZ);

        assert_eq!(
            runner.run(),
            Err(Fault::new(0x200, OpcodeError::InvalidOpcode(0x0123)))
        );
    }
}
