use crate::{
    definitions::display::{HEIGHT, HORIZONTAL_SCROLL, LARGE_SPRITE_SIZE, LOW_RESOLUTION_SCALE, WIDTH},
    devices::Screen,
};

/// The width of a regular sprite row
const BYTE: usize = 8;

/// The physical `128x64` frame buffer.
///
/// In low resolution every logical pixel covers a `2x2` block, so programs
/// address a `64x32` screen while the buffer keeps its physical size.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Box<Screen>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([[false; WIDTH]; HEIGHT]),
        }
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pixels(&self) -> &Screen {
        &self.pixels
    }

    /// Will turn off every pixel.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// Will move every row down by `rows`, the rows at the top are cleared.
    pub fn scroll_down(&mut self, rows: usize) {
        let rows = rows.min(HEIGHT);
        self.pixels.copy_within(0..(HEIGHT - rows), rows);
        for row in self.pixels[..rows].iter_mut() {
            row.fill(false);
        }
    }

    /// Will move every column right by four, the left most columns are cleared.
    pub fn scroll_right(&mut self) {
        for row in self.pixels.iter_mut() {
            row.copy_within(0..(WIDTH - HORIZONTAL_SCROLL), HORIZONTAL_SCROLL);
            row[..HORIZONTAL_SCROLL].fill(false);
        }
    }

    /// Will move every column left by four, the right most columns are cleared.
    pub fn scroll_left(&mut self) {
        for row in self.pixels.iter_mut() {
            row.copy_within(HORIZONTAL_SCROLL.., 0);
            row[(WIDTH - HORIZONTAL_SCROLL)..].fill(false);
        }
    }

    /// Will xor an `8xN` sprite onto the buffer at the logical coordinate
    /// `(x, y)`, every row is a single byte with the most significant bit on
    /// the left. Returns if any set pixel got turned off.
    pub fn draw(&mut self, x: usize, y: usize, sprite: &[u8], high_resolution: bool) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            for column in 0..BYTE {
                if byte & (0x80 >> column) != 0 {
                    collision |= self.plot(x + column, y + row, high_resolution);
                }
            }
        }
        collision
    }

    /// Will xor a `16x16` sprite onto the high resolution buffer, every row
    /// is made up of two bytes.
    pub fn draw_large(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, bytes) in sprite
            .chunks_exact(2)
            .take(LARGE_SPRITE_SIZE)
            .enumerate()
        {
            let line = u16::from_be_bytes([bytes[0], bytes[1]]);
            for column in 0..LARGE_SPRITE_SIZE {
                if line & (0x8000 >> column) != 0 {
                    collision |= self.plot(x + column, y + row, true);
                }
            }
        }
        collision
    }

    /// Will flip a single logical pixel, coordinates wrap around the screen.
    fn plot(&mut self, x: usize, y: usize, high_resolution: bool) -> bool {
        if high_resolution {
            return self.flip(x % WIDTH, y % HEIGHT);
        }

        let x = (x * LOW_RESOLUTION_SCALE) % WIDTH;
        let y = (y * LOW_RESOLUTION_SCALE) % HEIGHT;
        let mut collision = false;
        for dy in 0..LOW_RESOLUTION_SCALE {
            for dx in 0..LOW_RESOLUTION_SCALE {
                collision |= self.flip(x + dx, y + dy);
            }
        }
        collision
    }

    fn flip(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[y][x];
        let was_set = *pixel;
        *pixel = !was_set;
        was_set
    }
}
