//! Virtualized list: layout arithmetic, recyclable slots and the scroller
//! that keeps offset, top index and slot bindings in agreement.

mod layout;
mod outcome;
mod scroller;
mod slot;

pub use layout::{LayoutConfig, LayoutMetrics};
pub use outcome::{parse_index, IgnoreReason, Outcome};
pub use scroller::Scroller;
pub use slot::{ItemSlot, Slot};
