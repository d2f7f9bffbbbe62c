#![forbid(unsafe_code)]

//! Terminal frame composition.
//!
//! [`compose`] lays the page out over the Braille particle background into a
//! [`Screen`] of cells; [`flush`] writes a screen with crossterm. Composition
//! is pure so layouts can be asserted on without a terminal.

use std::io::{self, Write};

use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, queue};
use treasure_core::view::{
    EMPTY_STATE_MESSAGE, FOOTER_TEXT, ResultsView, SEARCH_PLACEHOLDER, TITLE,
};
use treasure_core::{PageView, Rgba, Theme};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::braille::BraillePainter;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const LOADING_TEXT: &str = "Поиск...";
const CLEAR_GLYPH: &str = "✕";
const SEARCH_BOX_MAX_WIDTH: u16 = 64;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgba,
    pub text: Rgba,
    pub muted: Rgba,
    pub accent: Rgba,
}

impl Palette {
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Rgba::rgb(0xdb, 0xea, 0xfe),
                text: Rgba::rgb(0x11, 0x18, 0x27),
                muted: Rgba::rgb(0x4b, 0x55, 0x63),
                accent: Rgba::rgb(0x3b, 0x82, 0xf6),
            },
            Theme::Dark => Self {
                background: Rgba::rgb(0x11, 0x18, 0x27),
                text: Rgba::WHITE,
                muted: Rgba::rgb(0x9c, 0xa3, 0xaf),
                accent: Rgba::rgb(0x60, 0xa5, 0xfa),
            },
        }
    }
}

/// Composite `color` over an opaque `background`.
pub fn blend(color: Rgba, background: Rgba) -> Rgba {
    let a = u16::from(color.a());
    let mix = |fg: u8, bg: u8| ((u16::from(fg) * a + u16::from(bg) * (255 - a)) / 255) as u8;
    Rgba::rgb(
        mix(color.r(), background.r()),
        mix(color.g(), background.g()),
        mix(color.b(), background.b()),
    )
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bold: bool,
    /// Right half of a double-width glyph; not printed.
    pub continuation: bool,
}

/// A composed frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    cols: u16,
    rows: u16,
    background: Rgba,
    cells: Vec<Cell>,
    cursor: Option<(u16, u16)>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16, background: Rgba, fg: Rgba) -> Self {
        let blank = Cell {
            ch: ' ',
            fg,
            bold: false,
            continuation: false,
        };
        Self {
            cols,
            rows,
            background,
            cells: vec![blank; usize::from(cols) * usize::from(rows)],
            cursor: None,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    fn cell_mut(&mut self, col: u16, row: u16) -> Option<&mut Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells
            .get_mut(usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    /// Printable text of `row`, trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|c| self.cell(c, row))
            .filter(|cell| !cell.continuation)
            .map(|cell| cell.ch)
            .collect::<String>()
            .trim_end()
            .to_owned()
    }

    /// Blank `len` cells starting at `col`.
    fn blank(&mut self, col: u16, row: u16, len: u16) {
        for c in col..col.saturating_add(len) {
            if let Some(cell) = self.cell_mut(c, row) {
                cell.ch = ' ';
                cell.continuation = false;
            }
        }
    }

    /// Write `text` at `(col, row)`, clipped to the row. Returns the column
    /// after the last written glyph.
    fn put_str(&mut self, col: u16, row: u16, text: &str, fg: Rgba, bold: bool) -> u16 {
        let mut x = col;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if x.saturating_add(w) > self.cols {
                break;
            }
            if let Some(cell) = self.cell_mut(x, row) {
                *cell = Cell {
                    ch,
                    fg,
                    bold,
                    continuation: false,
                };
            }
            if w == 2
                && let Some(cell) = self.cell_mut(x + 1, row)
            {
                *cell = Cell {
                    ch: ' ',
                    fg,
                    bold,
                    continuation: true,
                };
            }
            x += w;
        }
        x
    }

    fn put_centered(&mut self, row: u16, text: &str, fg: Rgba, bold: bool) {
        let w = text.width() as u16;
        let col = self.cols.saturating_sub(w) / 2;
        self.blank(col.saturating_sub(1), row, w.saturating_add(2));
        self.put_str(col, row, text, fg, bold);
    }
}

/// Cut `text` to at most `max` columns, ending with `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_owned();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// The last `max` columns of `text`.
fn tail(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices().rev() {
        used += ch.width().unwrap_or(0);
        if used > max {
            return &text[idx + ch.len_utf8()..];
        }
    }
    text
}

/// Lay out one frame.
///
/// `tick` animates the loading spinner.
pub fn compose(view: &PageView, painter: &BraillePainter, tick: u64) -> Screen {
    let palette = Palette::for_theme(view.theme);
    let (cols, rows) = painter.cell_size();
    let mut screen = Screen::new(cols, rows, palette.background, palette.text);

    // Particle background
    for row in 0..rows {
        for col in 0..cols {
            let (ch, color) = painter.cell(col, row);
            if let (Some(color), Some(cell)) = (color, screen.cell_mut(col, row)) {
                cell.ch = ch;
                cell.fg = blend(color, palette.background);
            }
        }
    }

    if rows == 0 || cols == 0 {
        return screen;
    }

    // Header
    if rows > 1 {
        let title_w = TITLE.width() as u16;
        screen.blank(1, 1, title_w + 2);
        screen.put_str(2, 1, TITLE, palette.text, true);

        let toggle = format!("[ {} ]", view.toggle_label());
        let toggle_w = toggle.width() as u16;
        let col = cols.saturating_sub(toggle_w + 2);
        screen.blank(col.saturating_sub(1), 1, toggle_w + 2);
        screen.put_str(col, 1, &toggle, palette.accent, true);
    }

    // Search box
    let box_w = cols.saturating_sub(4).min(SEARCH_BOX_MAX_WIDTH);
    let left = cols.saturating_sub(box_w) / 2;
    let top = 3;
    if box_w >= 6 && rows > top + 2 {
        let inner = usize::from(box_w - 4);
        let horizontal = "─".repeat(usize::from(box_w - 2));
        screen.put_str(left, top, &format!("┌{horizontal}┐"), palette.muted, false);
        screen.put_str(left, top + 2, &format!("└{horizontal}┘"), palette.muted, false);
        screen.blank(left, top + 1, box_w);
        screen.put_str(left, top + 1, "│", palette.muted, false);
        screen.put_str(left + box_w - 1, top + 1, "│", palette.muted, false);

        let text_room = if view.show_clear { inner - 2 } else { inner };
        if view.query.is_empty() {
            screen.put_str(
                left + 2,
                top + 1,
                &truncate(SEARCH_PLACEHOLDER, text_room),
                palette.muted,
                false,
            );
            screen.cursor = Some((left + 2, top + 1));
        } else {
            let shown = tail(&view.query, text_room.saturating_sub(1));
            let end = screen.put_str(left + 2, top + 1, shown, palette.text, false);
            screen.cursor = Some((end, top + 1));
        }
        if view.show_clear {
            screen.put_str(left + box_w - 3, top + 1, CLEAR_GLYPH, palette.muted, false);
        }
    }

    // Results
    let footer_row = rows - 1;
    let mut row = top + 4;
    match &view.results {
        ResultsView::Idle => {}
        ResultsView::Loading => {
            if row < footer_row {
                let spinner = SPINNER[(tick % SPINNER.len() as u64) as usize];
                let text = format!("{spinner} {LOADING_TEXT}");
                screen.put_centered(row, &text, palette.accent, false);
            }
        }
        ResultsView::Cards(cards) => {
            let width = usize::from(box_w.max(10));
            for record in cards {
                if row + 2 >= footer_row {
                    break;
                }
                let lines = [
                    (format!("▌ {}", record.location), palette.accent, true),
                    (format!("  {}", record.note), palette.text, false),
                    (format!("  {}", record.image), palette.muted, false),
                ];
                for (text, fg, bold) in lines {
                    screen.blank(left, row, box_w);
                    screen.put_str(left, row, &truncate(&text, width), fg, bold);
                    row += 1;
                }
                row += 1;
            }
        }
        ResultsView::Empty => {
            if row < footer_row {
                screen.put_centered(row, EMPTY_STATE_MESSAGE, palette.muted, false);
            }
        }
    }

    // Footer
    if footer_row > top {
        screen.put_centered(footer_row, FOOTER_TEXT, palette.muted, false);
    }

    screen
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r(),
        g: c.g(),
        b: c.b(),
    }
}

/// Write `screen` to `out` and flush.
pub fn flush(screen: &Screen, out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        cursor::Hide,
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(to_color(screen.background))
    )?;

    let mut fg: Option<Rgba> = None;
    let mut bold = false;
    for row in 0..screen.rows {
        queue!(out, cursor::MoveTo(0, row))?;
        for col in 0..screen.cols {
            let Some(cell) = screen.cell(col, row) else {
                continue;
            };
            if cell.continuation {
                continue;
            }
            if fg != Some(cell.fg) {
                queue!(out, SetForegroundColor(to_color(cell.fg)))?;
                fg = Some(cell.fg);
            }
            if bold != cell.bold {
                let attr = if cell.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(out, SetAttribute(attr))?;
                bold = cell.bold;
            }
            queue!(out, Print(cell.ch))?;
        }
    }

    if let Some((col, row)) = screen.cursor {
        queue!(out, cursor::MoveTo(col, row), cursor::Show)?;
    }
    out.flush()
}
