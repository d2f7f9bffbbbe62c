#![forbid(unsafe_code)]

//! Terminal modes for the page.
//!
//! [`TerminalSession`] switches to raw mode on the alternate screen and, on
//! request, captures the mouse. The terminal is restored by one routine,
//! `restore`, whichever way the program ends: the session is dropped, a
//! panic unwinds, or `SIGINT`/`SIGTERM` arrives.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, event, style, terminal};

/// RAII owner of the terminal modes.
#[derive(Debug)]
pub struct TerminalSession {
    #[cfg(unix)]
    _signals: SignalGuard,
}

impl TerminalSession {
    /// Enter raw mode and the alternate screen; capture the mouse when
    /// `mouse` is set.
    ///
    /// # Errors
    ///
    /// Returns an error when a mode cannot be enabled. The terminal is
    /// restored before returning.
    pub fn new(mouse: bool) -> io::Result<Self> {
        install_panic_hook();
        enter(&mut io::stdout(), mouse).inspect_err(|_| restore())?;
        tracing::info!(mouse, "terminal session started");
        Ok(Self {
            #[cfg(unix)]
            _signals: SignalGuard::new().inspect_err(|_| restore())?,
        })
    }

    /// Current terminal size (columns, rows).
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore();
        tracing::info!("terminal session ended");
    }
}

fn enter(out: &mut impl Write, mouse: bool) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    crossterm::execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
    if mouse {
        crossterm::execute!(out, event::EnableMouseCapture)?;
    }
    Ok(())
}

fn write_restore(out: &mut impl Write) -> io::Result<()> {
    crossterm::execute!(
        out,
        event::DisableMouseCapture,
        style::ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )
}

/// Put the terminal back in cooked mode on the main screen. Disabling a mode
/// that was never enabled is harmless, so this needs no session state.
fn restore() {
    let mut stdout = io::stdout();
    if let Err(err) = write_restore(&mut stdout) {
        tracing::warn!(%err, "terminal restore failed");
    }
    if let Err(err) = terminal::disable_raw_mode() {
        tracing::warn!(%err, "leaving raw mode failed");
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));
    });
}

/// Restores the terminal and exits on `SIGINT`/`SIGTERM`. Raw mode turns
/// Ctrl+C into a key event, so this mostly serves `kill`.
#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        use signal_hook::consts::signal::{SIGINT, SIGTERM};

        let mut signals = signal_hook::iterator::Signals::new([SIGINT, SIGTERM])
            .map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "terminated by signal");
                restore();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::warn!("signal thread panicked");
        }
    }
}
