#![forbid(unsafe_code)]

//! Event loop.
//!
//! [`App`] maps crossterm events to page messages and produces frames; [`run`]
//! drives it against the real terminal at a fixed frame rate. Time is the
//! elapsed time since start, so the page's search deadlines are served by
//! polling on every frame.

use std::io::{self, BufWriter};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use treasure_core::{Msg, PageConfig, TreasurePage};

use crate::braille::BraillePainter;
use crate::cli::Opts;
use crate::render::{self, Screen};
use crate::session::TerminalSession;

/// Pixels per Braille dot. With 2×4 dots a cell is 8×16 pixels, close to a
/// typical terminal font cell.
pub const PX_PER_DOT: f64 = 4.0;

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Page plus its terminal surface.
#[derive(Debug)]
pub struct App {
    page: TreasurePage,
    painter: BraillePainter,
    ticks: u64,
}

impl App {
    pub fn new(config: PageConfig, cols: u16, rows: u16, entropy: u64) -> Self {
        let painter = BraillePainter::new(cols, rows, PX_PER_DOT);
        let (width, height) = painter.pixel_size();
        Self {
            page: TreasurePage::new(config, width, height, entropy),
            painter,
            ticks: 0,
        }
    }

    pub fn page(&self) -> &TreasurePage {
        &self.page
    }

    pub fn painter(&self) -> &BraillePainter {
        &self.painter
    }

    /// Apply one terminal event.
    pub fn handle(&mut self, event: Event, now: Duration) -> Control {
        let msg = match event {
            Event::Key(key) => match self.key_action(key) {
                KeyAction::Quit => return Control::Quit,
                KeyAction::Send(msg) => Some(msg),
                KeyAction::Ignore => None,
            },
            Event::Mouse(mouse) => self.mouse_msg(mouse),
            Event::Resize(cols, rows) => {
                self.painter.resize(cols, rows);
                let (width, height) = self.painter.pixel_size();
                tracing::debug!(cols, rows, "terminal resized");
                Some(Msg::Resize { width, height })
            }
            Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
        };
        if let Some(msg) = msg {
            // Timer requests are served by `tick` polling the search deadline.
            let _ = self.page.update(msg, now);
        }
        Control::Continue
    }

    fn key_action(&self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c' | 'q') if ctrl => KeyAction::Quit,
            KeyCode::Char('t') if ctrl => KeyAction::Send(Msg::ToggleTheme),
            KeyCode::F(2) => KeyAction::Send(Msg::ToggleTheme),
            KeyCode::Esc => KeyAction::Send(Msg::Clear),
            KeyCode::Backspace => {
                let mut query = self.page.search().query().to_owned();
                match query.pop() {
                    Some(_) => KeyAction::Send(Msg::Input(query)),
                    None => KeyAction::Ignore,
                }
            }
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let mut query = self.page.search().query().to_owned();
                query.push(ch);
                KeyAction::Send(Msg::Input(query))
            }
            _ => KeyAction::Ignore,
        }
    }

    fn mouse_msg(&self, mouse: MouseEvent) -> Option<Msg> {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                let (x, y) = self.painter.cell_center(mouse.column, mouse.row);
                Some(Msg::PointerMove { x, y })
            }
            _ => None,
        }
    }

    /// Complete due searches, advance the particles one frame and compose it.
    pub fn tick(&mut self, now: Duration) -> Screen {
        self.page.poll(now);
        self.page.frame(&mut self.painter);
        self.ticks += 1;
        render::compose(&self.page.view(), &self.painter, self.ticks)
    }

    /// When the loop must wake up next: the next frame or an earlier search
    /// deadline.
    pub fn next_wake(&self, next_frame: Duration) -> Duration {
        self.page
            .search()
            .next_deadline()
            .map_or(next_frame, |due| due.min(next_frame))
    }
}

enum KeyAction {
    Send(Msg),
    Quit,
    Ignore,
}

fn entropy() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Run the page in the terminal until the user quits.
pub fn run(opts: &Opts) -> io::Result<()> {
    let session = TerminalSession::new(opts.mouse)?;
    let (cols, rows) = session.size()?;

    let start = Instant::now();
    let mut app = App::new(opts.page.clone(), cols, rows, entropy());
    let frame_interval = Duration::from_secs(1) / opts.fps.max(1);
    let mut out = BufWriter::new(io::stdout());
    let mut next_frame = Duration::ZERO;

    loop {
        let now = start.elapsed();
        if now >= next_frame {
            let screen = app.tick(now);
            render::flush(&screen, &mut out)?;
            next_frame = now + frame_interval;
        }

        let wake = app.next_wake(next_frame);
        let timeout = wake.saturating_sub(start.elapsed());
        if event::poll(timeout)? {
            let event = event::read()?;
            if app.handle(event, start.elapsed()) == Control::Quit {
                tracing::info!("quit requested");
                break;
            }
        } else if start.elapsed() < next_frame {
            // A search came due before the next frame.
            app.page.poll(start.elapsed());
        }
    }

    drop(session);
    Ok(())
}
