//! Cancellable scroll-to-index task
//!
//! The task does not move anything by itself. The owner polls it once per
//! tick, asks for the interpolated index, performs the actual scroll step and
//! then calls [`ActiveScroll::advance`]. Cancellation goes through a
//! [`CancellationToken`] so code outside the owner (a key handler, a script)
//! can abort an animation without a mutable borrow of the scroller.

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::timing::progress;
use crate::config::EasingType;

/// Lifecycle of the scroll task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    /// No animation has run, or the last one finished normally
    #[default]
    Idle,
    /// An animation is in flight
    Animating,
    /// The last animation was aborted before reaching its target
    Cancelled,
}

/// State of an in-flight scroll-to-index animation
#[derive(Debug, Clone)]
pub struct ActiveScroll {
    /// Top index when the animation started (0-based)
    pub start_index: usize,
    /// Requested top index (0-based, may exceed the reachable maximum)
    pub target: usize,
    /// Time accumulated from ticks so far
    pub elapsed: Duration,
    /// Total animation duration
    pub duration: Duration,
    token: CancellationToken,
}

impl ActiveScroll {
    /// Wheel-delta sign that moves towards the target
    ///
    /// Positive deltas scroll up (towards index 0), so moving down needs a
    /// negative delta.
    pub fn wheel_direction(&self) -> f32 {
        if self.target > self.start_index {
            -1.0
        } else {
            1.0
        }
    }

    /// Raw progress in [0, 1]
    pub fn progress(&self) -> f64 {
        progress(self.elapsed, self.duration)
    }

    /// Index the animation should be at now, given an easing curve
    pub fn interpolated_index(&self, easing: EasingType) -> usize {
        easing.index_at(self.start_index, self.target, self.progress())
    }

    /// Accumulate one tick of elapsed time
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Scroll-to-index task: Idle -> Animating -> Idle | Cancelled
#[derive(Debug, Default)]
pub struct ScrollTask {
    active: Option<ActiveScroll>,
    state: TaskState,
}

impl ScrollTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin animating from `start_index` towards `target`
    ///
    /// Any running animation is cancelled first. Returns a token that aborts
    /// the new animation when cancelled.
    pub fn start(&mut self, start_index: usize, target: usize, duration: Duration) -> CancellationToken {
        self.cancel();
        let token = CancellationToken::new();
        self.active = Some(ActiveScroll {
            start_index,
            target,
            elapsed: Duration::ZERO,
            duration,
            token: token.clone(),
        });
        self.state = TaskState::Animating;
        token
    }

    #[inline]
    pub fn state(&self) -> TaskState {
        self.state
    }

    /// True while an animation runs and has not been cancelled
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.is_cancelled())
    }

    pub fn active(&self) -> Option<&ActiveScroll> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveScroll> {
        self.active.as_mut()
    }

    /// Token of the running animation, if any
    pub fn token(&self) -> Option<CancellationToken> {
        self.active.as_ref().map(|a| a.token.clone())
    }

    /// Abort the running animation. Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                active.token.cancel();
                self.state = TaskState::Cancelled;
                true
            }
            None => false,
        }
    }

    /// Drop the animation if its token was cancelled from outside.
    /// Returns true when a cancellation was observed.
    pub fn poll_cancelled(&mut self) -> bool {
        if self.active.as_ref().is_some_and(ActiveScroll::is_cancelled) {
            self.active = None;
            self.state = TaskState::Cancelled;
            true
        } else {
            false
        }
    }

    /// Complete the running animation normally
    pub fn finish(&mut self) -> Option<ActiveScroll> {
        let finished = self.active.take();
        if finished.is_some() {
            self.state = TaskState::Idle;
        }
        finished
    }
}
