pub mod config;
pub mod error;
pub mod list;
pub mod scroll;
pub mod script;

pub use config::{AppConfig, EasingType, LayoutSettings, ReentryPolicy, ScrollConfig};
pub use error::{Error, Result};
pub use list::{IgnoreReason, ItemSlot, LayoutConfig, LayoutMetrics, Outcome, Scroller, Slot};
pub use scroll::{ScrollTask, TaskState};
