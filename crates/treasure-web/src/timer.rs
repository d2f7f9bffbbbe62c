#![forbid(unsafe_code)]

//! Host timer bookkeeping for the search debounce.
//!
//! The page controller asks for timers through [`Cmd`]; [`SearchTimer`]
//! turns those requests into calls on a [`TimerHost`] (on the web,
//! `setTimeout` / `clearTimeout`) and remembers which ticket the single
//! armed timer belongs to.

use std::time::Duration;

use treasure_core::{Cmd, SearchTicket};

/// Platform one-shot timers.
pub trait TimerHost {
    type Handle;
    type Error;

    /// Arm a timer that fires once after `delay`.
    fn arm(&mut self, delay: Duration) -> Result<Self::Handle, Self::Error>;

    /// Disarm a timer that has not fired yet.
    fn disarm(&mut self, handle: Self::Handle);
}

/// At most one armed search timer.
#[derive(Debug)]
pub struct SearchTimer<H> {
    armed: Option<(SearchTicket, H)>,
}

impl<H> Default for SearchTimer<H> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<H> SearchTimer<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Carry out the timer requests in `cmd`.
    pub fn apply<T>(&mut self, cmd: Cmd, host: &mut T) -> Result<(), T::Error>
    where
        T: TimerHost<Handle = H>,
    {
        let mut leaves = Vec::new();
        cmd.for_each(&mut |c| leaves.push(c));

        for leaf in leaves {
            match leaf {
                Cmd::CancelSearch(ticket) => {
                    if self.armed_ticket() == Some(ticket) {
                        self.disarm(host);
                    }
                }
                Cmd::ScheduleSearch { ticket, delay } => {
                    self.disarm(host);
                    let handle = host.arm(delay)?;
                    self.armed = Some((ticket, handle));
                }
                Cmd::None | Cmd::Batch(_) => {}
            }
        }
        Ok(())
    }

    /// The armed timer fired: forget it and return its ticket.
    pub fn fire(&mut self) -> Option<SearchTicket> {
        self.armed.take().map(|(ticket, _)| ticket)
    }

    /// Disarm whatever is armed.
    pub fn disarm<T>(&mut self, host: &mut T)
    where
        T: TimerHost<Handle = H>,
    {
        if let Some((_, handle)) = self.armed.take() {
            host.disarm(handle);
        }
    }

    #[must_use]
    pub fn armed_ticket(&self) -> Option<SearchTicket> {
        self.armed.as_ref().map(|(ticket, _)| *ticket)
    }
}
