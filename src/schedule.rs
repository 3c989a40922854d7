//! Cancellable repeating frame task.
//!
//! A [`FrameLoop`] asks its scheduler for one frame at a time. The scheduler
//! calls back into [`FrameLoop::on_frame`], which runs the body and asks for
//! the next one. Detaching cancels the single outstanding request, and a
//! detached loop never asks again.

use tracing::{debug, warn};

use crate::error::Result;

/// Opaque id of a pending frame request.
pub type FrameId = i32;

/// Source of display-refresh callbacks.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Detached,
}

#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameId>,
    state: LoopState,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Request the first frame. Only an idle loop starts.
    pub fn start(&mut self) {
        if self.state != LoopState::Idle {
            return;
        }
        self.state = LoopState::Running;
        self.request_next();
    }

    /// Scheduler callback. Runs `body` and requests the next frame, unless
    /// the loop was detached meanwhile. Returns whether `body` ran.
    pub fn on_frame<F: FnOnce()>(&mut self, body: F) -> bool {
        self.pending = None;
        if self.state != LoopState::Running {
            return false;
        }
        body();
        self.request_next();
        true
    }

    /// Stop for good. The outstanding request, if any, is cancelled exactly
    /// once; repeated calls do nothing.
    pub fn detach(&mut self) {
        if self.state == LoopState::Detached {
            return;
        }
        self.state = LoopState::Detached;
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        debug!("frame loop detached");
    }

    fn request_next(&mut self) {
        match self.scheduler.request_frame() {
            Ok(id) => self.pending = Some(id),
            Err(err) => {
                warn!(%err, "stopping frame loop");
                self.detach();
            }
        }
    }
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Scheduler that only counts. Frames are delivered by calling
/// [`FrameLoop::on_frame`] by hand.
#[derive(Debug, Default, Clone)]
pub struct CountingScheduler {
    pub requested: u32,
    pub cancelled: Vec<FrameId>,
    /// Fail every request after this many have succeeded.
    pub fail_after: Option<u32>,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> Result<FrameId> {
        if self.fail_after.is_some_and(|n| self.requested >= n) {
            return Err(crate::Error::Schedule("no display".into()));
        }
        self.requested += 1;
        Ok(self.requested as FrameId)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled.push(id);
    }
}
