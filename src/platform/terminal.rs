//! Terminal backend using crossterm
//!
//! Draws into a half-block pixel buffer (two pixels per character cell,
//! upper half as foreground, lower half as background) scaled from world
//! coordinates to the terminal size.
//!
//! Key release events only exist on terminals that support the keyboard
//! enhancement protocol. Elsewhere a key counts as held for a short window
//! after its last press or autorepeat.

use std::collections::HashMap;
use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{cursor, execute, queue, style, terminal};

use super::clock::FrameClock;
use super::{Backend, Color, DiscreteEvent, DrawCommand, Key, TextAnchor};
use crate::error::Result;

/// How long a key stays held without release events. Covers the usual
/// autorepeat delay.
const HOLD_WINDOW: Duration = Duration::from_millis(550);

pub struct TerminalBackend {
    out: Stdout,
    /// World size the draw commands are expressed in
    world: (f32, f32),
    buf: PixelBuf,
    /// Text drawn on top of the pixel buffer, in character cells
    labels: Vec<Label>,
    /// Key -> last press (or repeat) time
    held: HashMap<Key, Instant>,
    release_events: bool,
    clock: FrameClock,
}

struct Label {
    col: i32,
    row: i32,
    text: String,
    color: Color,
}

impl TerminalBackend {
    /// Enter raw mode and the alternate screen. The terminal is restored when
    /// the backend is dropped.
    pub fn new(world_width: f32, world_height: f32) -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        let release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if release_events {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        log::info!("terminal backend ready (key release events: {release_events})");

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            world: (world_width, world_height),
            buf: PixelBuf::new(cols as usize, rows as usize * 2),
            labels: Vec::new(),
            held: HashMap::new(),
            release_events,
            clock: FrameClock::new(),
        })
    }

    fn handle_key(&mut self, key: KeyEvent, events: &mut Vec<DiscreteEvent>) {
        let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
            if key.kind == KeyEventKind::Press {
                events.push(DiscreteEvent::Quit);
            }
            return;
        }

        let mapped = map_key(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.held.insert(mapped, Instant::now());
                events.push(DiscreteEvent::KeyDown(mapped));
            }
            KeyEventKind::Repeat => {
                self.held.insert(mapped, Instant::now());
            }
            KeyEventKind::Release => {
                if self.held.remove(&mapped).is_some() {
                    events.push(DiscreteEvent::KeyUp(mapped));
                }
            }
        }
    }

    /// Without release events, time out keys that stopped repeating
    fn expire_held(&mut self, events: &mut Vec<DiscreteEvent>) {
        if self.release_events {
            return;
        }
        let now = Instant::now();
        self.held.retain(|key, pressed| {
            let alive = now.duration_since(*pressed) < HOLD_WINDOW;
            if !alive {
                events.push(DiscreteEvent::KeyUp(*key));
            }
            alive
        });
    }

    /// World x/y to buffer pixel x/y
    fn to_pixel(&self, x: i32, y: i32) -> (i32, i32) {
        let sx = self.buf.w as f32 / self.world.0;
        let sy = self.buf.h as f32 / self.world.1;
        ((x as f32 * sx).floor() as i32, (y as f32 * sy).floor() as i32)
    }

    fn rasterize(&mut self, commands: &[DrawCommand]) {
        self.labels.clear();
        for command in commands {
            match command {
                DrawCommand::Clear(color) => self.buf.clear(*color),
                DrawCommand::FillRect { rect, color } => {
                    let (x0, y0) = self.to_pixel(rect.x, rect.y);
                    let (x1, y1) = self.to_pixel(rect.x + rect.w, rect.y + rect.h);
                    // Anything visible in world space keeps at least one pixel
                    let w = (x1 - x0).max(1);
                    let h = (y1 - y0).max(1);
                    self.buf.fill_rect(x0, y0, w, h, *color);
                }
                DrawCommand::Text {
                    text,
                    x,
                    y,
                    color,
                    anchor,
                } => {
                    let (px, py) = self.to_pixel(*x, *y);
                    let mut col = px;
                    let row = py / 2;
                    if *anchor == TextAnchor::Center {
                        col -= text.chars().count() as i32 / 2;
                    }
                    self.labels.push(Label {
                        col: col.max(0),
                        row,
                        text: text.clone(),
                        color: *color,
                    });
                }
            }
        }
    }

    fn flush_labels(&mut self) -> io::Result<()> {
        for label in &self.labels {
            if label.row < 0 || label.row as usize >= self.buf.h / 2 {
                continue;
            }
            let Color(r, g, b) = label.color;
            let bg = self.buf.get(label.col.max(0) as usize, label.row as usize * 2);
            queue!(
                self.out,
                cursor::MoveTo(label.col as u16, label.row as u16),
                style::SetForegroundColor(style::Color::Rgb { r, g, b }),
                style::SetBackgroundColor(to_term(bg)),
                style::Print(&label.text),
            )?;
        }
        Ok(())
    }
}

impl Backend for TerminalBackend {
    fn poll_events(&mut self) -> Result<Vec<DiscreteEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key, &mut events),
                Event::Resize(cols, rows) => {
                    self.buf.resize(cols as usize, rows as usize * 2);
                    execute!(self.out, terminal::Clear(terminal::ClearType::All))?;
                }
                _ => {}
            }
        }
        self.expire_held(&mut events);
        Ok(events)
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains_key(&key)
    }

    fn present(&mut self, commands: &[DrawCommand]) -> Result<()> {
        self.rasterize(commands);
        self.buf.render(&mut self.out)?;
        self.flush_labels()?;
        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn tick_pace(&mut self, target_hz: u32) {
        self.clock.tick(target_hz);
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if self.release_events {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(
            self.out,
            style::ResetColor,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Key::W,
            'a' => Key::A,
            's' => Key::S,
            'd' => Key::D,
            'r' => Key::R,
            ' ' => Key::Space,
            _ => Key::Other,
        },
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Esc => Key::Escape,
        _ => Key::Other,
    }
}

fn to_term(Color(r, g, b): Color) -> style::Color {
    style::Color::Rgb { r, g, b }
}

/// Pixel grid, two pixel rows per terminal row
struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Color>,
}

impl PixelBuf {
    fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Color(0, 0, 0); w * h],
        }
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, Color(0, 0, 0));
    }

    fn clear(&mut self, c: Color) {
        self.px.fill(c);
    }

    fn get(&self, x: usize, y: usize) -> Color {
        if x < self.w && y < self.h {
            self.px[y * self.w + x]
        } else {
            Color(0, 0, 0)
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Color) {
        let x0 = (x.max(0) as usize).min(self.w);
        let y0 = (y.max(0) as usize).min(self.h);
        let x1 = ((x + w).max(0) as usize).min(self.w);
        let y1 = ((y + h).max(0) as usize).min(self.h);
        if x1 <= x0 {
            return;
        }
        for row in y0..y1 {
            self.px[row * self.w + x0..row * self.w + x1].fill(c);
        }
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut prev: Option<(Color, Color)> = None;

        for row in 0..self.h / 2 {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev != Some((top, bot)) {
                    queue!(
                        out,
                        style::SetForegroundColor(to_term(top)),
                        style::SetBackgroundColor(to_term(bot)),
                    )?;
                    prev = Some((top, bot));
                }
                queue!(out, style::Print('▀'))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_key() {
        assert_eq!(map_key(KeyCode::Char('W')), Key::W);
        assert_eq!(map_key(KeyCode::Char(' ')), Key::Space);
        assert_eq!(map_key(KeyCode::Left), Key::Left);
        assert_eq!(map_key(KeyCode::Char('x')), Key::Other);
    }

    #[test]
    fn test_fill_rect_clips_to_buffer() {
        let mut buf = PixelBuf::new(4, 4);
        buf.fill_rect(-2, 2, 10, 10, Color(1, 2, 3));
        assert_eq!(buf.get(0, 1), Color(0, 0, 0));
        assert_eq!(buf.get(0, 2), Color(1, 2, 3));
        assert_eq!(buf.get(3, 3), Color(1, 2, 3));

        // Entirely off-buffer is a no-op
        buf.fill_rect(10, 10, 2, 2, Color(9, 9, 9));
        buf.fill_rect(-5, -5, 2, 2, Color(9, 9, 9));
        assert!(!buf.px.contains(&Color(9, 9, 9)));
    }
}
