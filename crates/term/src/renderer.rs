//! TerminalDisplay: an emulated LED matrix on a real terminal.
//!
//! Each matrix pixel is drawn as two terminal columns painted with the
//! pixel's background colour, which keeps pixels roughly square. The display
//! remembers the last presented grid and only re-emits changed runs.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor},
    terminal, QueueableCommand,
};
use tracing::{debug, info};

use crate::display::{check_fits, DisplayError, DisplaySink};
use crate::pixels::PixelGrid;
use crate::types::Rgb;

/// Terminal columns per matrix pixel.
pub const PIXEL_COLS: u16 = 2;

const PIXEL_GLYPH: &str = "  ";

pub struct TerminalDisplay<W: Write = io::Stdout> {
    out: W,
    staged: PixelGrid,
    last: Option<PixelGrid>,
    brightness: f32,
    buf: Vec<u8>,
    raw_terminal: bool,
}

impl TerminalDisplay<io::Stdout> {
    /// Take over the terminal and present a `width × height` matrix.
    ///
    /// Fails if the terminal cannot be queried or is too small to hold the
    /// matrix.
    pub fn open(width: usize, height: usize) -> Result<Self, DisplayError> {
        let (cols, rows) = terminal::size().map_err(DisplayError::Unavailable)?;
        let need_cols = (width as u16).saturating_mul(PIXEL_COLS);
        let need_rows = height as u16;
        if cols < need_cols || rows < need_rows {
            return Err(DisplayError::TooSmall {
                cols,
                rows,
                need_cols,
                need_rows,
            });
        }

        let mut display = Self::with_writer(io::stdout(), width, height);
        display.enter().map_err(|e| match e {
            DisplayError::Io(err) => DisplayError::Unavailable(err),
            other => other,
        })?;
        info!(width, height, cols, rows, "terminal display opened");
        Ok(display)
    }

    fn enter(&mut self) -> Result<(), DisplayError> {
        terminal::enable_raw_mode()?;
        self.raw_terminal = true;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Drive an arbitrary writer without touching terminal modes.
    pub fn with_writer(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            staged: PixelGrid::new(width, height),
            last: None,
            brightness: 1.0,
            buf: Vec::with_capacity(16 * 1024),
            raw_terminal: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Force the next show to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Give the terminal back: leave the alternate screen and raw mode.
    pub fn close(&mut self) -> Result<(), DisplayError> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        if self.raw_terminal {
            self.buf.queue(terminal::EnableLineWrap)?;
            self.buf.queue(cursor::Show)?;
            self.buf.queue(terminal::LeaveAlternateScreen)?;
        }
        self.flush_buf()?;
        if self.raw_terminal {
            self.raw_terminal = false;
            terminal::disable_raw_mode()?;
            debug!("terminal restored");
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<(), DisplayError> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn shape(&self) -> (usize, usize) {
        (self.staged.width(), self.staged.height())
    }

    fn set_pixels(&mut self, grid: &PixelGrid) -> Result<(), DisplayError> {
        check_fits(grid, self.staged.width(), self.staged.height())?;
        self.staged.fill(Rgb::BLACK);
        self.staged.blit(grid);
        Ok(())
    }

    fn show(&mut self) -> Result<(), DisplayError> {
        self.buf.clear();
        match self.last.as_mut() {
            Some(prev) => {
                encode_diff_into(prev, &self.staged, self.brightness, &mut self.buf)?;
                prev.blit(&self.staged);
            }
            None => {
                encode_full_into(&self.staged, self.brightness, &mut self.buf)?;
                self.last = Some(self.staged.clone());
            }
        }
        self.flush_buf()
    }

    fn set_brightness(&mut self, brightness: f32) {
        let brightness = brightness.clamp(0.0, 1.0);
        if brightness != self.brightness {
            self.brightness = brightness;
            self.invalidate();
        }
    }

    fn off(&mut self) -> Result<(), DisplayError> {
        self.staged.fill(Rgb::BLACK);
        self.show()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(grid: &PixelGrid, brightness: f32, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current: Option<Rgb> = None;
    for y in 0..grid.height() {
        out.queue(cursor::MoveTo(0, y as u16))?;
        for x in 0..grid.width() {
            let color = grid.get(x, y).unwrap_or_default().scaled(brightness);
            paint_into(out, color, &mut current)?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(
    prev: &PixelGrid,
    next: &PixelGrid,
    brightness: f32,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut current: Option<Rgb> = None;

    for_each_changed_run(prev, next, |x, y, len| {
        out.queue(cursor::MoveTo((x as u16) * PIXEL_COLS, y as u16))?;
        for dx in 0..len {
            let color = next.get(x + dx, y).unwrap_or_default().scaled(brightness);
            paint_into(out, color, &mut current)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn paint_into(out: &mut Vec<u8>, color: Rgb, current: &mut Option<Rgb>) -> io::Result<()> {
    if *current != Some(color) {
        out.queue(SetBackgroundColor(rgb_to_color(color)))?;
        *current = Some(color);
    }
    out.queue(Print(PIXEL_GLYPH))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn for_each_changed_run(
    prev: &PixelGrid,
    next: &PixelGrid,
    mut f: impl FnMut(usize, usize, usize) -> io::Result<()>,
) -> io::Result<()> {
    if prev.width() != next.width() || prev.height() != next.height() {
        // Size changed: treat everything as dirty in a single pass (row runs).
        for y in 0..next.height() {
            f(0, y, next.width())?;
        }
        return Ok(());
    }

    let w = next.width();
    for y in 0..next.height() {
        let mut x = 0;
        while x < w {
            if prev.get(x, y) == next.get(x, y) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && prev.get(x, y) != next.get(x, y) {
                x += 1;
            }
            f(start, y, x - start)?;
        }
    }

    Ok(())
}
