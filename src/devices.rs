use crate::definitions::{display, keyboard};

/// The physical frame buffer handed to the display, `[row][column]`.
pub type Screen = [[bool; display::WIDTH]; display::HEIGHT];

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels, called once after every
    /// clear, draw or scroll instruction.
    fn display(&mut self, pixels: &Screen);
}

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the sound based code
pub trait SoundCommands {
    /// Will be called whenever the buzzer has to change, `sound_timer`
    /// is the value the sound timer is left at.
    fn set_sound(&mut self, is_playing: bool, sound_timer: u8);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for reading the keyboard data
pub trait KeyboardCommands {
    /// Is the key `key` (`0x0-0xF`) currently held down.
    fn is_pressed(&self, key: u8) -> bool;

    /// Will hand out a single key press if one happened since the last
    /// call, `None` keeps the interpreter waiting.
    fn wait_for_key(&mut self) -> Option<u8>;
}

/// Will store the state of the hex keyboard and latch the last
/// press for `FX0A`.
///
/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
    last: Option<u8>,
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    /// Will change the state of a single key, only the transition from
    /// released to pressed is latched.
    pub fn set_key(&mut self, key: u8, to: bool) {
        let key = key & keyboard::MASK;
        let index = key as usize;

        if to && !self.keys[index] {
            self.last = Some(key);
        }
        self.keys[index] = to;
    }

    pub fn toggle_key(&mut self, key: u8) {
        let index = (key & keyboard::MASK) as usize;
        self.set_key(key, !self.keys[index]);
    }

    /// Will release every key and forget the latched press.
    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
        self.last = None;
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn get_last(&self) -> Option<u8> {
        self.last
    }
}

impl KeyboardCommands for Keyboard {
    fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & keyboard::MASK) as usize]
    }

    fn wait_for_key(&mut self) -> Option<u8> {
        self.last.take()
    }
}

/// A device without any output, used when the interpreter only has
/// to be driven (benchmarks, servers, tests).
#[derive(Default, Debug, Clone, Copy)]
pub struct Headless;

impl DisplayCommands for Headless {
    fn display(&mut self, _: &Screen) {}
}

impl SoundCommands for Headless {
    fn set_sound(&mut self, _: bool, _: u8) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_latches_press() {
        let mut keyboard = Keyboard::new();
        assert_eq!(keyboard.wait_for_key(), None);

        keyboard.set_key(0xA, true);
        assert!(keyboard.is_pressed(0xA));
        assert_eq!(keyboard.get_last(), Some(0xA));

        assert_eq!(keyboard.wait_for_key(), Some(0xA));
        // the press is only handed out once
        assert_eq!(keyboard.wait_for_key(), None);
        assert!(keyboard.is_pressed(0xA));
    }

    #[test]
    fn test_keyboard_release_is_not_latched() {
        let mut keyboard = Keyboard::new();
        keyboard.set_key(0x3, true);
        keyboard.wait_for_key();

        keyboard.set_key(0x3, false);
        assert!(!keyboard.is_pressed(0x3));
        assert_eq!(keyboard.wait_for_key(), None);

        // holding a key down doesn't produce a second press
        keyboard.set_key(0x4, true);
        keyboard.wait_for_key();
        keyboard.set_key(0x4, true);
        assert_eq!(keyboard.wait_for_key(), None);
    }

    #[test]
    fn test_keyboard_masks_keys() {
        let mut keyboard = Keyboard::new();
        keyboard.set_key(0x12, true);
        assert!(keyboard.is_pressed(0x2));
        assert!(keyboard.is_pressed(0xF2));
        assert_eq!(keyboard.wait_for_key(), Some(0x2));
    }

    #[test]
    fn test_keyboard_toggle_and_reset() {
        let mut keyboard = Keyboard::new();
        keyboard.toggle_key(0x1);
        assert!(keyboard.is_pressed(0x1));
        keyboard.toggle_key(0x1);
        assert!(!keyboard.is_pressed(0x1));

        keyboard.set_key(0x5, true);
        keyboard.reset();
        assert!(keyboard.get_keys().iter().all(|key| !key));
        assert_eq!(keyboard.get_last(), None);
    }
}
