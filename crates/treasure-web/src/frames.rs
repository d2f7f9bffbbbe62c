#![forbid(unsafe_code)]

//! Animation frame bookkeeping.
//!
//! [`FrameLoop`] keeps at most one frame request outstanding on a
//! [`FrameHost`] (on the web, `requestAnimationFrame` /
//! `cancelAnimationFrame`). Once stopped it never requests again, even when a
//! callback that was already queued still runs.

/// Platform frame scheduling.
pub trait FrameHost {
    type Handle;
    type Error;

    /// Ask for one callback before the next repaint.
    fn request(&mut self) -> Result<Self::Handle, Self::Error>;

    /// Withdraw a request that has not run yet.
    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug)]
pub struct FrameLoop<H> {
    pending: Option<H>,
    running: bool,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self {
            pending: None,
            running: false,
        }
    }
}

impl<H> FrameLoop<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the loop with its first request.
    pub fn start<T>(&mut self, host: &mut T) -> Result<(), T::Error>
    where
        T: FrameHost<Handle = H>,
    {
        self.running = true;
        self.schedule(host)
    }

    /// The requested frame is running. Returns `false` when the loop was
    /// stopped and the frame must not be drawn.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.running
    }

    /// Request the next frame unless one is outstanding or the loop stopped.
    pub fn schedule<T>(&mut self, host: &mut T) -> Result<(), T::Error>
    where
        T: FrameHost<Handle = H>,
    {
        if self.running && self.pending.is_none() {
            self.pending = Some(host.request()?);
        }
        Ok(())
    }

    /// Stop for good and withdraw the outstanding request.
    pub fn stop<T>(&mut self, host: &mut T)
    where
        T: FrameHost<Handle = H>,
    {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            host.cancel(handle);
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
