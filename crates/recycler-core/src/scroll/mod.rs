//! Scroll animation building blocks
//!
//! ## Atoms
//! - `easing` - Curves mapping animation progress to the top index to show
//! - `timing` - Progress and duration calculations driven by tick deltas
//!
//! ## Molecules
//! - `task` - Cancellable scroll-to-index task state machine
//!
//! The scroller owns one [`ScrollTask`] and advances it once per tick; nothing
//! here touches slots or offsets directly.

pub mod easing;
pub mod timing;

pub mod task;

pub use task::{ActiveScroll, ScrollTask, TaskState};
