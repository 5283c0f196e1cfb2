/// Presentation layer: the half-block compositor.
///
/// The field has twice the vertical resolution of the terminal: pixel
/// rows 2k and 2k+1 share terminal row k, and the pair of stacked
/// colors picks each cell's ink:
///   - both empty          → plain blank, no color codes
///   - upper only          → upper-half glyph, foreground = upper
///   - lower only          → lower-half glyph, foreground = lower
///   - both equal          → blank over that background color
///   - both set, distinct  → lower-half glyph, foreground = lower,
///                           background = upper
/// Every cell is followed by a color reset so state never bleeds into
/// its neighbor. Commands are batched with `queue!` into a BufWriter
/// and flushed once per frame.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::config::Charset;
use crate::domain::actor::Actor;
use crate::domain::grid::Grid;

// ── Glyphs and ink ──

/// The three glyphs a cell can show, resolved once at construction.
#[derive(Clone, Copy, Debug)]
struct GlyphSet {
    blank: char,
    upper: char,
    lower: char,
}

impl GlyphSet {
    fn for_charset(charset: Charset) -> Self {
        match charset {
            Charset::Unicode => GlyphSet { blank: ' ', upper: '▀', lower: '▄' },
            Charset::Ascii => GlyphSet { blank: ' ', upper: '"', lower: '_' },
        }
    }
}

/// One terminal cell's ink: a glyph plus optional 256-color codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Ink {
    glyph: char,
    fg: Option<u8>,
    bg: Option<u8>,
}

/// The compositing rule for one stacked pixel pair.
fn compose(upper: u8, lower: u8, glyphs: GlyphSet) -> Ink {
    match (upper, lower) {
        (0, 0) => Ink { glyph: glyphs.blank, fg: None, bg: None },
        (u, 0) => Ink { glyph: glyphs.upper, fg: Some(u), bg: None },
        (0, l) => Ink { glyph: glyphs.lower, fg: Some(l), bg: None },
        (u, l) if u == l => Ink { glyph: glyphs.blank, fg: None, bg: Some(u) },
        (u, l) => Ink { glyph: glyphs.lower, fg: Some(l), bg: Some(u) },
    }
}

/// Which pixel row of a terminal cell a pointer event addressed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubRow {
    Upper,
    Lower,
}

impl SubRow {
    fn offset(self) -> i32 {
        match self {
            SubRow::Upper => 0,
            SubRow::Lower => 1,
        }
    }
}

// ── PixelCanvas: background plane + working frame ──

/// Two same-shaped color planes. `background` holds the terrain
/// snapshot for the round; `frame` is rebuilt from it every repaint
/// and stamped over with sprites.
struct PixelCanvas {
    width: usize,
    height: usize,
    frame: Vec<u8>,
    background: Vec<u8>,
}

impl PixelCanvas {
    fn new(width: usize, height: usize) -> Self {
        PixelCanvas {
            width,
            height,
            frame: vec![0; width * height],
            background: vec![0; width * height],
        }
    }

    fn reset(&mut self) {
        self.frame.fill(0);
    }

    fn load_background(&mut self) {
        self.frame.copy_from_slice(&self.background);
    }

    fn set_background(&mut self, grid: &Grid) {
        self.background.fill(0);
        for y in 0..self.height.min(grid.height) {
            for x in 0..self.width.min(grid.width) {
                self.background[y * self.width + x] = grid.at(x, y);
            }
        }
    }

    /// Write one pixel into the working frame. Off-field pixels are
    /// dropped.
    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        self.frame[y * self.width + x] = color;
    }

    fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame[y * self.width + x]
    }
}

// ── Screen: the compositor and its terminal session ──

pub struct Screen {
    writer: BufWriter<io::Stdout>,
    canvas: PixelCanvas,
    glyphs: GlyphSet,
    origin_col: i32,
    origin_row: i32,
}

impl Screen {
    /// Build a compositor for a `width` x `height` pixel field
    /// (`height` even). The frame sits centered in the terminal,
    /// horizontally at full width and vertically at half height since
    /// two pixel rows share a terminal row. Terminal size is sampled
    /// once, here.
    pub fn new(width: usize, height: usize, charset: Charset) -> Self {
        let (term_w, term_h) = terminal::size().unwrap_or((80, 24));
        let origin_col = (term_w as i32 - width as i32).max(0) / 2;
        let origin_row = (term_h as i32 - (height / 2) as i32).max(0) / 2;
        Screen {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            canvas: PixelCanvas::new(width, height),
            glyphs: GlyphSet::for_charset(charset),
            origin_col,
            origin_row,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    /// Blank the working frame without touching the background.
    #[allow(dead_code)]
    pub fn reset(&mut self) {
        self.canvas.reset();
    }

    pub fn load_background(&mut self) {
        self.canvas.load_background();
    }

    pub fn set_background(&mut self, grid: &Grid) {
        self.canvas.set_background(grid);
    }

    /// Stamp an actor's sprite into the working frame. Pixels that fall
    /// off the field are dropped; later stamps win overlaps.
    pub fn stamp(&mut self, actor: &Actor) {
        for &(dx, dy, color) in &actor.sprite {
            self.canvas.set_pixel(actor.x + dx, actor.y + dy, color);
        }
    }

    /// Composite and flush the frame. Output failures are swallowed;
    /// the screen just goes stale until the next repaint.
    pub fn present(&mut self) {
        let _ = self.emit_frame();
    }

    fn emit_frame(&mut self) -> io::Result<()> {
        for term_row in 0..self.canvas.height / 2 {
            queue!(
                self.writer,
                MoveTo(
                    self.origin_col as u16,
                    (self.origin_row + term_row as i32) as u16
                )
            )?;
            for x in 0..self.canvas.width {
                let upper = self.canvas.pixel(x, term_row * 2);
                let lower = self.canvas.pixel(x, term_row * 2 + 1);
                let ink = compose(upper, lower, self.glyphs);
                if let Some(fg) = ink.fg {
                    queue!(self.writer, SetForegroundColor(Color::AnsiValue(fg)))?;
                }
                if let Some(bg) = ink.bg {
                    queue!(self.writer, SetBackgroundColor(Color::AnsiValue(bg)))?;
                }
                queue!(self.writer, Print(ink.glyph), ResetColor)?;
            }
        }
        self.writer.flush()
    }

    // ── Field ↔ terminal mapping ──

    /// Where pixel (x, y) lands: its terminal column and the terminal
    /// row its pixel pair shares.
    #[allow(dead_code)]
    pub fn grid_to_terminal(&self, x: i32, y: i32) -> (i32, i32) {
        (self.origin_col + x, self.origin_row + y.div_euclid(2))
    }

    /// The inverse: which pixel a terminal position addresses, with
    /// `sub` picking the upper or lower half of the cell. Results can
    /// fall outside the field; callers decide what that means.
    pub fn terminal_to_grid(&self, col: i32, row: i32, sub: SubRow) -> (i32, i32) {
        (
            col - self.origin_col,
            (row - self.origin_row) * 2 + sub.offset(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs() -> GlyphSet {
        GlyphSet::for_charset(Charset::Unicode)
    }

    /// A screen with a fixed origin, independent of the test terminal.
    fn test_screen(width: usize, height: usize) -> Screen {
        Screen {
            writer: BufWriter::with_capacity(64, io::stdout()),
            canvas: PixelCanvas::new(width, height),
            glyphs: glyphs(),
            origin_col: 10,
            origin_row: 4,
        }
    }

    #[test]
    fn compose_covers_all_five_pairings() {
        let g = glyphs();
        assert_eq!(compose(0, 0, g), Ink { glyph: ' ', fg: None, bg: None });
        assert_eq!(compose(9, 0, g), Ink { glyph: '▀', fg: Some(9), bg: None });
        assert_eq!(compose(0, 9, g), Ink { glyph: '▄', fg: Some(9), bg: None });
        assert_eq!(compose(7, 7, g), Ink { glyph: ' ', fg: None, bg: Some(7) });
        assert_eq!(compose(7, 9, g), Ink { glyph: '▄', fg: Some(9), bg: Some(7) });
    }

    #[test]
    fn ascii_charset_swaps_glyphs_only() {
        let g = GlyphSet::for_charset(Charset::Ascii);
        assert_eq!(compose(5, 0, g).glyph, '"');
        assert_eq!(compose(0, 5, g).glyph, '_');
        assert_eq!(compose(5, 5, g).glyph, ' ');
        assert_eq!(compose(5, 5, g).bg, Some(5));
    }

    #[test]
    fn transform_round_trips_per_sub_row() {
        let screen = test_screen(8, 6);
        for y in 0..6 {
            for x in 0..8 {
                let (col, row) = screen.grid_to_terminal(x, y);
                let sub = if y % 2 == 0 { SubRow::Upper } else { SubRow::Lower };
                assert_eq!(screen.terminal_to_grid(col, row, sub), (x, y));
            }
        }
    }

    #[test]
    fn clicks_left_of_the_frame_go_negative() {
        let screen = test_screen(8, 6);
        let (x, y) = screen.terminal_to_grid(3, 0, SubRow::Upper);
        assert!(x < 0 && y < 0);
    }

    #[test]
    fn stamping_overwrites_and_drops_off_field() {
        let mut screen = test_screen(4, 4);
        let a = Actor::new(0, 0, vec![(0, -1, 5), (0, 0, 5)], 1);
        screen.stamp(&a); // the (0,-1) pixel is off the field, dropped
        assert_eq!(screen.canvas.pixel(0, 0), 5);

        let b = Actor::new(0, 0, vec![(0, 0, 8)], 1);
        screen.stamp(&b);
        assert_eq!(screen.canvas.pixel(0, 0), 8, "later stamp wins");
    }

    #[test]
    fn frame_rebuilds_from_background() {
        let mut screen = test_screen(2, 2);
        let grid = Grid::from_cells(vec![vec![3, 0], vec![0, 4]]);
        screen.set_background(&grid);
        screen.load_background();
        assert_eq!(screen.canvas.pixel(0, 0), 3);
        assert_eq!(screen.canvas.pixel(1, 1), 4);

        screen.stamp(&Actor::new(1, 0, vec![(0, 0, 9)], 1));
        assert_eq!(screen.canvas.pixel(1, 0), 9);
        screen.load_background();
        assert_eq!(screen.canvas.pixel(1, 0), 0, "stamps never reach the background");

        screen.reset();
        assert_eq!(screen.canvas.pixel(0, 0), 0);
    }
}
