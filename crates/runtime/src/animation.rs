use tracing::{debug, trace};

use crate::frame::Frame;

/// Nominal frame interval for display-synced loops.
pub const DEFAULT_DT_S: f64 = 1.0 / 60.0;

/// Owned handle to a single cooperative render loop.
///
/// `R` is the host's pending frame request (for example a browser
/// animation-frame registration). Dropping an `R` must cancel it; the handle
/// never holds more than one, so at most one frame callback is outstanding
/// per live handle.
#[derive(Debug)]
pub struct AnimationHandle<R> {
    pending: Option<R>,
    next: Frame,
    frames_run: u64,
    stopped: bool,
}

impl<R> Default for AnimationHandle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> AnimationHandle<R> {
    pub fn new() -> Self {
        Self::with_dt(DEFAULT_DT_S)
    }

    pub fn with_dt(dt_s: f64) -> Self {
        Self {
            pending: None,
            next: Frame::first(dt_s),
            frames_run: 0,
            stopped: false,
        }
    }

    /// Register the request for the next frame.
    ///
    /// A previous pending request is dropped (cancelled). Requests handed to a
    /// stopped handle are dropped immediately and `false` is returned.
    pub fn schedule(&mut self, request: R) -> bool {
        if self.stopped {
            drop(request);
            return false;
        }
        if self.pending.replace(request).is_some() {
            trace!("replaced pending frame request");
        }
        true
    }

    /// Consume the pending request at the start of a frame callback.
    ///
    /// Returns `None` once the handle has been stopped; the callback should
    /// then return without drawing or rescheduling.
    pub fn begin_frame(&mut self) -> Option<Frame> {
        self.pending = None;
        if self.stopped {
            return None;
        }
        let frame = self.next;
        self.next = frame.next();
        self.frames_run += 1;
        Some(frame)
    }

    /// Cancel the pending request; no further frames will run.
    pub fn stop(&mut self) {
        if !self.stopped {
            debug!(frames = self.frames_run, "animation loop stopped");
        }
        self.stopped = true;
        self.pending = None;
    }

    /// Stop and consume the handle.
    pub fn dispose(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        !self.stopped
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
