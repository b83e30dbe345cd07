// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the mirror image (camera + garment).
// 2) Click / number-key / quit input, turned into orchestrator events.
// 3) A tiny 5x7 bitmap font for the HUD line and the startup splash.

use crate::error::Error;
use crate::orchestrator::{Display, InputEvent};
use crate::types::FrameBuffer;
use minifb::{Key, KeyRepeat, MouseButton, Window, WindowOptions};
use std::time::{Duration, Instant};

pub struct Drawer {
    window: Window, // the on-screen window you see
    mouse_down_prev: bool,
}

impl Drawer {
    /// Create a window sized to the camera feed.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, mouse_down_prev: false })
    }

    /// Edge-triggered: true only on the frame the left button goes down.
    fn clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.mouse_down_prev;
        self.mouse_down_prev = down;
        clicked
    }
}

impl Display for Drawer {
    /// Push the pixels for this frame to the screen.
    fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.clicked() {
            events.push(InputEvent::Click);
        }
        for key in self.window.get_keys_pressed(KeyRepeat::No) {
            if let Some(ev) = key_event(key) {
                events.push(ev);
            }
        }
        events
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}

fn key_event(key: Key) -> Option<InputEvent> {
    match key {
        Key::Escape | Key::Q => Some(InputEvent::Quit),
        Key::Key1 | Key::NumPad1 => Some(InputEvent::Key('1')),
        Key::Key2 | Key::NumPad2 => Some(InputEvent::Key('2')),
        Key::Key3 | Key::NumPad3 => Some(InputEvent::Key('3')),
        _ => None,
    }
}

/// Black screen with centred text for `secs`. Returns false if the user quit
/// (Q/Escape or closed the window) during the splash.
pub fn show_splash<D: Display + ?Sized>(
    display: &mut D,
    width: usize,
    height: usize,
    text: &str,
    secs: f32,
) -> Result<bool, Error> {
    let mut screen = FrameBuffer::new(width, height);
    let scale = 3;
    let text_w = text.chars().count() as i32 * 6 * scale;
    let x = (width as i32 - text_w) / 2;
    let y = (height as i32 - 7 * scale) / 2;
    draw_text_5x7_scaled(&mut screen, x, y, text, 0x00_FF_FF_FF, scale);

    let start = Instant::now();
    let until = Duration::from_secs_f32(secs.max(0.0));
    while start.elapsed() < until {
        if !display.is_open() {
            return Ok(false);
        }
        display.present(&screen)?;
        if display.poll_events().contains(&InputEvent::Quit) {
            return Ok(false);
        }
    }
    Ok(true)
}

/* ---------- Software drawing: pixels and a tiny bitmap font ---------- */

/// Fill a `size`x`size` block at (x,y), clipped to the frame.
#[inline]
fn put_block(fb: &mut FrameBuffer, x: i32, y: i32, size: i32, color: u32) {
    for dy in 0..size {
        for dx in 0..size {
            let (px, py) = ((x + dx) as i64, (y + dy) as i64);
            if px < 0 || py < 0 || px as usize >= fb.width || py as usize >= fb.height {
                continue;
            }
            fb.pixels[py as usize * fb.width + px as usize] = color;
        }
    }
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters use the uppercase shapes.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation: space, vertical bar, colon, dot, slash, dash
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw one character at (x,y), each font pixel a `scale`x`scale` block,
/// with a black drop shadow for contrast against the video.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    if let Some(rows) = glyph5x7(ch) {
        for (pass_color, offset) in [(0x00000000, scale), (color, 0)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_block(
                            fb,
                            x + rx * scale + offset,
                            y + ry as i32 * scale + offset,
                            scale,
                            pass_color,
                        );
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs (1 pixel spacing). Unknown characters are blank.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: u32) {
    draw_text_5x7_scaled(fb, x, y, text, color, 1);
}

pub fn draw_text_5x7_scaled(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    let scale = scale.max(1);
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}
