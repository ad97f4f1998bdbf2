//! Scroller: owns the backing collection, the slot pool and the scroll state
//!
//! Pixel offset and top index are two views of one position. Every step keeps
//! them in agreement by wrapping the offset by exactly one unit whenever a
//! boundary is crossed, instead of letting the offset drift on its own.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::layout::{LayoutConfig, LayoutMetrics};
use super::outcome::{parse_index, IgnoreReason, Outcome};
use super::slot::{ItemSlot, Slot};
use crate::config::{ReentryPolicy, ScrollConfig};
use crate::scroll::{timing, ScrollTask, TaskState};
use crate::{Error, Result};

pub struct Scroller<V, S = Slot<V>> {
    layout: LayoutConfig,
    config: ScrollConfig,
    items: Vec<V>,
    slots: Vec<S>,
    offset: f32,
    top_index: usize,
    /// 1-based backing index of the selected item
    selected: Option<usize>,
    task: ScrollTask,
}

impl<V, S> std::fmt::Debug for Scroller<V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scroller")
            .field("count", &self.items.len())
            .field("pool", &self.slots.len())
            .field("offset", &self.offset)
            .field("top_index", &self.top_index)
            .field("selected", &self.selected)
            .field("task", &self.task.state())
            .finish()
    }
}

fn validate_scroll(layout: &LayoutConfig, config: &ScrollConfig) -> Result<()> {
    if !config.step_px.is_finite() || config.step_px <= 0.0 {
        return Err(Error::InvalidLayout(format!(
            "scroll step must be positive, got {}",
            config.step_px
        )));
    }
    if config.step_px > layout.unit_size() {
        return Err(Error::InvalidLayout(format!(
            "scroll step {} exceeds item unit {}",
            config.step_px,
            layout.unit_size()
        )));
    }
    if !config.max_animation_secs.is_finite() || config.max_animation_secs < 0.0 {
        return Err(Error::InvalidLayout(format!(
            "max animation time must be a non-negative number, got {}",
            config.max_animation_secs
        )));
    }
    if !config.items_per_second.is_finite() || config.items_per_second <= 0.0 {
        return Err(Error::InvalidLayout(format!(
            "animation speed must be positive, got {}",
            config.items_per_second
        )));
    }
    Ok(())
}

impl<V, S> Scroller<V, S>
where
    V: Clone,
    S: ItemSlot<V> + Default,
{
    /// Build a scroller over `items`, positioned at the top
    pub fn new(layout: LayoutConfig, config: ScrollConfig, items: Vec<V>) -> Result<Self> {
        validate_scroll(&layout, &config)?;
        let mut scroller = Self {
            offset: layout.start_y(),
            layout,
            config,
            items,
            slots: Vec::new(),
            top_index: 0,
            selected: None,
            task: ScrollTask::new(),
        };
        scroller.rebuild_pool();
        scroller.sync_visible_content();
        Ok(scroller)
    }

    // ---- read access -------------------------------------------------------

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn metrics(&self) -> LayoutMetrics {
        self.layout.metrics(self.items.len())
    }

    pub fn items(&self) -> &[V] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slots(&self) -> &[S] {
        &self.slots
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn top_index(&self) -> usize {
        self.top_index
    }

    /// 1-based index of the selected item
    #[inline]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Pool position of the slot showing the selected item
    pub fn selected_position(&self) -> Option<usize> {
        let selected = self.selected?;
        self.slots
            .iter()
            .position(|slot| slot.backing_index() == Some(selected))
    }

    /// True while a scroll-to-index animation suppresses wheel input
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.task.is_busy()
    }

    pub fn task_state(&self) -> TaskState {
        self.task.state()
    }

    /// Token that aborts the running animation when cancelled
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.task.token()
    }

    /// Target of the running animation (0-based)
    pub fn animation_target(&self) -> Option<usize> {
        self.task.active().map(|a| a.target)
    }

    // ---- geometry ------------------------------------------------------------

    /// Viewport-relative top edge of the slot at `position`
    pub fn slot_top(&self, position: usize) -> f32 {
        position as f32 * self.layout.unit_size() - self.offset
    }

    /// Pool position of the slot under viewport coordinate `y`, if `y` hits
    /// an item rather than spacing
    pub fn slot_at(&self, y: f32) -> Option<usize> {
        if !y.is_finite() || y < 0.0 {
            return None;
        }
        let unit = self.layout.unit_size();
        let container_y = y + self.offset;
        let position = (container_y / unit).floor() as usize;
        let within = container_y - position as f32 * unit;
        (position < self.slots.len() && within < self.layout.item_height()).then_some(position)
    }

    // ---- pool & content ------------------------------------------------------

    /// Replace the slot pool with freshly created slots sized for the
    /// current item count
    pub fn rebuild_pool(&mut self) {
        let size = self.layout.pool_size(self.items.len());
        self.slots.clear();
        self.slots.extend((0..size).map(|_| S::default()));
        debug!(size, count = self.items.len(), "rebuilt slot pool");
    }

    /// Rebind every slot from the backing collection and re-apply selection
    pub fn sync_visible_content(&mut self) {
        let count = self.items.len();
        for (position, slot) in self.slots.iter_mut().enumerate() {
            let index = self.top_index + position;
            if index == 0 || index > count {
                slot.unbind();
            } else {
                slot.bind(index, &self.items[index - 1]);
            }
        }
        self.apply_selection();
    }

    fn apply_selection(&mut self) {
        let selected = self.selected;
        for slot in &mut self.slots {
            let index = slot.backing_index();
            slot.set_selected(index.is_some() && index == selected);
        }
    }

    // ---- selection -------------------------------------------------------------

    /// Select the item with 1-based `index`
    pub fn select_index(&mut self, index: usize) -> Outcome {
        if index == 0 || index > self.items.len() {
            return Outcome::Ignored(IgnoreReason::OutOfRange);
        }
        self.selected = Some(index);
        self.apply_selection();
        Outcome::Applied
    }

    /// Select whatever item the slot at pool `position` currently shows
    pub fn select_slot(&mut self, position: usize) -> Outcome {
        match self.slots.get(position).and_then(|slot| slot.backing_index()) {
            Some(index) => self.select_index(index),
            None => Outcome::Ignored(IgnoreReason::EmptySlot),
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.apply_selection();
    }

    // ---- scrolling ---------------------------------------------------------------

    /// Device scroll input: one fixed step in the direction of `delta`
    ///
    /// Positive deltas scroll towards the top. Ignored while animating or
    /// when the delta is within the noise threshold.
    pub fn wheel(&mut self, delta: f32) -> Outcome {
        self.poll_cancellation();
        if self.task.is_busy() {
            return Outcome::Ignored(IgnoreReason::Busy);
        }
        if !delta.is_finite() || delta.abs() <= self.config.wheel_threshold {
            return Outcome::Ignored(IgnoreReason::BelowThreshold);
        }
        self.scroll_step(delta, 1, None);
        Outcome::Applied
    }

    /// One discrete scroll step
    ///
    /// `step` is how many items the top index moves when a unit boundary is
    /// crossed; `clamp` is the index an animation must not move past.
    pub fn scroll_step(&mut self, delta: f32, step: usize, clamp: Option<usize>) {
        self.clear_selection();

        if self.layout.fits(self.items.len()) {
            return;
        }

        let m = self.metrics();
        let mut next = self.offset - delta.signum() * self.config.step_px;

        if next < m.start_y {
            if self.top_index == 0 {
                next = m.start_y;
            } else {
                next += m.unit_size;
                let floor = clamp.unwrap_or(0).min(self.top_index);
                self.top_index = self.top_index.saturating_sub(step).max(floor);
                self.sync_visible_content();
            }
        } else if self.top_index >= m.max_reach_index && next > m.end_pos_y {
            if self.top_index != m.max_reach_index {
                self.top_index = m.max_reach_index;
                self.sync_visible_content();
            }
            next = m.end_pos_y;
        } else if next >= m.end_y {
            next -= m.unit_size;
            let ceiling = clamp
                .map_or(m.max_reach_index, |c| c.min(m.max_reach_index))
                .max(self.top_index);
            self.top_index = (self.top_index + step).min(ceiling);
            if self.top_index >= m.max_reach_index && next > m.end_pos_y {
                self.top_index = m.max_reach_index;
                next = m.end_pos_y;
            }
            self.sync_visible_content();
        }

        // Land the last animation frame on a clean position
        if let Some(target) = clamp {
            if self.top_index == target {
                next = m.start_y;
            } else if target > m.max_reach_index && self.top_index == m.max_reach_index {
                next = m.end_pos_y;
            }
        }

        self.offset = next;
    }

    /// Parse 1-based `raw` text and animate to it; bad input is ignored
    pub fn scroll_to_index(&mut self, raw: &str) -> Outcome {
        self.poll_cancellation();
        match parse_index(raw, self.items.len()) {
            Ok(index) => self.animate_scroll_to(index - 1),
            Err(reason) => Outcome::Ignored(reason),
        }
    }

    /// Start animating the top index towards 0-based `target`
    ///
    /// Completes synchronously when there is nothing to animate. The target
    /// item is selected when the animation ends.
    pub fn animate_scroll_to(&mut self, target: usize) -> Outcome {
        if target >= self.items.len() {
            return Outcome::Ignored(IgnoreReason::OutOfRange);
        }
        if self.task.is_busy() {
            match self.config.reentry {
                ReentryPolicy::Reject => return Outcome::Ignored(IgnoreReason::Busy),
                ReentryPolicy::Restart => {
                    self.cancel_animation();
                }
            }
        }

        let goal = target.min(self.metrics().max_reach_index);
        if target == self.top_index || self.layout.fits(self.items.len()) || self.top_index == goal {
            self.select_index(target + 1);
            return Outcome::Applied;
        }

        let distance = target.abs_diff(self.top_index);
        let duration = timing::scroll_duration(
            distance,
            self.config.items_per_second,
            self.config.max_animation_secs,
        );
        self.task.start(self.top_index, target, duration);
        debug!(from = self.top_index, target, ?duration, "scroll animation started");
        Outcome::Started
    }

    /// Advance the running animation by one tick of `dt`
    pub fn tick(&mut self, dt: Duration) -> TaskState {
        if self.poll_cancellation() {
            return TaskState::Cancelled;
        }
        let Some(active) = self.task.active() else {
            return self.task.state();
        };
        let target = active.target;
        let goal = target.min(self.metrics().max_reach_index);

        if self.top_index != goal {
            let interpolated = active.interpolated_index(self.config.easing);
            let step = interpolated.abs_diff(self.top_index).max(1);
            let direction = active.wheel_direction();
            self.scroll_step(direction, step, Some(target));
            if let Some(active) = self.task.active_mut() {
                active.advance(dt);
            }
        }

        if self.top_index == goal {
            self.finish_animation();
        }
        self.task.state()
    }

    fn finish_animation(&mut self) {
        if let Some(active) = self.task.finish() {
            debug!(target = active.target, "scroll animation finished");
            self.select_index(active.target + 1);
        }
    }

    /// Abort the running animation, leaving the list where it stopped
    pub fn cancel_animation(&mut self) -> bool {
        if self.task.cancel() {
            debug!(top_index = self.top_index, "scroll animation cancelled");
            self.sync_visible_content();
            true
        } else {
            false
        }
    }

    /// Observe a cancellation requested through the token
    fn poll_cancellation(&mut self) -> bool {
        if self.task.poll_cancelled() {
            debug!(top_index = self.top_index, "scroll animation cancelled by token");
            self.sync_visible_content();
            true
        } else {
            false
        }
    }

    // ---- structural edits ----------------------------------------------------------

    /// Append an item; the pool is rebuilt and the selection cleared
    pub fn add_item(&mut self, value: V) -> Outcome {
        self.cancel_animation();
        self.items.push(value);
        self.selected = None;
        self.rebuild_pool();
        self.sync_visible_content();
        info!(count = self.items.len(), "item added");
        Outcome::Applied
    }

    /// Replace the selected item's value in place
    pub fn update_item(&mut self, value: V) -> Outcome {
        self.poll_cancellation();
        let Some(index) = self.selected else {
            return Outcome::Ignored(IgnoreReason::NoSelection);
        };
        let Some(entry) = self.items.get_mut(index - 1) else {
            return Outcome::Ignored(IgnoreReason::NoSelection);
        };
        *entry = value;

        let value = &self.items[index - 1];
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.backing_index() == Some(index))
        {
            slot.bind(index, value);
            slot.set_selected(true);
        }
        info!(index, "item updated");
        Outcome::Applied
    }

    /// Remove the selected item; the pool is rebuilt and the selection cleared
    pub fn delete_item(&mut self) -> Outcome {
        self.poll_cancellation();
        let Some(index) = self.selected else {
            return Outcome::Ignored(IgnoreReason::NoSelection);
        };
        if index > self.items.len() {
            return Outcome::Ignored(IgnoreReason::NoSelection);
        }
        self.cancel_animation();

        self.items.remove(index - 1);
        let max_reach = self.metrics().max_reach_index;
        if self.top_index > max_reach {
            self.top_index = max_reach;
        }
        self.clamp_offset();
        self.selected = None;
        self.rebuild_pool();
        self.sync_visible_content();
        info!(index, count = self.items.len(), "item deleted");
        Outcome::Applied
    }

    /// Apply a new viewport/item geometry
    ///
    /// Cancels any animation, keeps the top item and realigns the offset to it.
    pub fn set_layout(&mut self, layout: LayoutConfig) -> Result<()> {
        if layout == self.layout {
            return Ok(());
        }
        validate_scroll(&layout, &self.config)?;
        self.cancel_animation();
        self.layout = layout;

        let m = self.metrics();
        self.top_index = self.top_index.min(m.max_reach_index);
        self.offset = m.start_y;
        self.clamp_offset();
        self.rebuild_pool();
        self.sync_visible_content();
        debug!(
            viewport = layout.viewport_height(),
            visible = m.visible_slots,
            "layout changed"
        );
        Ok(())
    }

    /// Pull the offset back inside the bounds allowed by the top index
    fn clamp_offset(&mut self) {
        let m = self.metrics();
        if self.layout.fits(self.items.len()) {
            self.top_index = 0;
            self.offset = m.start_y;
            return;
        }
        if self.offset < m.start_y || self.offset >= m.end_y {
            self.offset = m.start_y;
        }
        if self.top_index >= m.max_reach_index && self.offset > m.end_pos_y {
            self.top_index = m.max_reach_index;
            self.offset = m.end_pos_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn reference_layout() -> LayoutConfig {
        LayoutConfig::new(330.0, 90.0, 10.0).unwrap()
    }

    fn seeded(count: usize) -> Scroller<String> {
        let items = (1..=count).map(|i| i.to_string()).collect();
        Scroller::new(reference_layout(), ScrollConfig::default(), items).unwrap()
    }

    fn settle(scroller: &mut Scroller<String>) -> usize {
        let mut frames = 0;
        while scroller.tick(FRAME) == TaskState::Animating {
            frames += 1;
            assert!(frames < 10_000, "animation never finished");
        }
        frames
    }

    fn bindings(scroller: &Scroller<String>) -> Vec<Slot<String>> {
        scroller.slots().to_vec()
    }

    fn assert_in_bounds(scroller: &Scroller<String>) {
        let m = scroller.metrics();
        assert!(scroller.top_index() <= m.max_reach_index, "{scroller:?}");
        assert!(scroller.offset() >= m.start_y, "{scroller:?}");
        assert!(scroller.offset() < m.end_y, "{scroller:?}");
        if scroller.top_index() == m.max_reach_index {
            assert!(scroller.offset() <= m.end_pos_y, "{scroller:?}");
        }
        for (position, slot) in scroller.slots().iter().enumerate() {
            if let Some(index) = slot.backing_index() {
                assert_eq!(index, scroller.top_index() + position);
                assert!(index >= 1 && index <= scroller.len());
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let scroller = seeded(7);
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), 90.0);
        assert_eq!(scroller.slots().len(), 6);
        assert!(!scroller.slots()[0].is_bound());
        assert_eq!(scroller.slots()[1].label(), "1");
        assert_eq!(scroller.slots()[5].value().map(String::as_str), Some("5"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut scroller = seeded(20);
        for _ in 0..13 {
            scroller.wheel(-1.0);
        }
        scroller.select_index(scroller.top_index() + 2);
        scroller.sync_visible_content();
        let first = bindings(&scroller);
        scroller.sync_visible_content();
        assert_eq!(first, bindings(&scroller));
    }

    #[test]
    fn test_wheel_wraps_offset_by_one_unit() {
        let mut scroller = seeded(7);
        for _ in 0..4 {
            scroller.wheel(-1.0);
        }
        assert_eq!(scroller.offset(), 170.0);
        assert_eq!(scroller.top_index(), 0);

        scroller.wheel(-1.0);
        assert_eq!(scroller.top_index(), 1);
        assert_eq!(scroller.offset(), 90.0);
        assert_eq!(scroller.slots()[0].label(), "1");

        scroller.wheel(1.0);
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), 170.0);
    }

    #[test]
    fn test_wheel_noise_is_ignored() {
        let mut scroller = seeded(7);
        assert_eq!(
            scroller.wheel(0.005),
            Outcome::Ignored(IgnoreReason::BelowThreshold)
        );
        assert_eq!(
            scroller.wheel(f32::NAN),
            Outcome::Ignored(IgnoreReason::BelowThreshold)
        );
        assert_eq!(scroller.offset(), 90.0);
    }

    #[test]
    fn test_wheel_at_top_clamps() {
        let mut scroller = seeded(7);
        scroller.wheel(1.0);
        assert_eq!(scroller.offset(), 90.0);
        assert_eq!(scroller.top_index(), 0);
    }

    #[test]
    fn test_short_list_never_scrolls() {
        let mut scroller = seeded(3);
        assert_eq!(scroller.slots().len(), 4);
        scroller.wheel(-1.0);
        assert_eq!(scroller.offset(), 90.0);
        assert_eq!(scroller.top_index(), 0);
    }

    #[test]
    fn test_bounds_hold_for_any_tick_sequence() {
        for count in [0, 1, 3, 4, 5, 7, 40] {
            let mut scroller = seeded(count);
            let mut seed: u32 = 0x2545_f491 ^ count as u32;
            for _ in 0..2_000 {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                let delta = if seed % 3 == 0 { 1.0 } else { -1.0 };
                scroller.wheel(delta);
                assert_in_bounds(&scroller);
            }
        }
    }

    #[test]
    fn test_round_trip_returns_to_start() {
        let mut scroller = seeded(30);
        let max_reach = scroller.metrics().max_reach_index;
        while scroller.top_index() < max_reach {
            scroller.wheel(-1.0);
        }
        for _ in 0..6 {
            scroller.wheel(-1.0);
        }
        assert_eq!(scroller.top_index(), max_reach);
        assert_eq!(scroller.offset(), scroller.metrics().end_pos_y);

        while scroller.top_index() > 0 {
            scroller.wheel(1.0);
        }
        for _ in 0..10 {
            scroller.wheel(1.0);
        }
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
    }

    #[test]
    fn test_scroll_to_last_item_lands_on_bottom() {
        let mut scroller = seeded(7);
        assert_eq!(scroller.scroll_to_index("7"), Outcome::Started);
        assert!(scroller.is_busy());
        settle(&mut scroller);

        let m = scroller.metrics();
        assert_eq!(scroller.top_index(), 4);
        assert_eq!(m.max_reach_index, 4);
        assert_eq!(scroller.offset(), m.end_pos_y);
        assert_eq!(scroller.selected_index(), Some(7));
        let position = scroller.selected_position().unwrap();
        assert!(scroller.slots()[position].is_selected());
        assert!(!scroller.is_busy());
        assert_eq!(scroller.task_state(), TaskState::Idle);
    }

    #[test]
    fn test_scroll_to_reachable_index_snaps_to_start() {
        let mut scroller = seeded(100);
        scroller.scroll_to_index("51");
        settle(&mut scroller);
        assert_eq!(scroller.top_index(), 50);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
        assert_eq!(scroller.selected_index(), Some(51));

        scroller.scroll_to_index("3");
        settle(&mut scroller);
        assert_eq!(scroller.top_index(), 2);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
        assert_eq!(scroller.selected_index(), Some(3));
    }

    #[test]
    fn test_long_animation_is_capped_in_time() {
        let mut scroller = seeded(1_000);
        scroller.scroll_to_index("1000");
        let frames = settle(&mut scroller);
        // 2 s cap at 16 ms per frame, plus the frames spent wrapping units
        assert!(frames < 400, "took {frames} frames");
        assert_eq!(scroller.top_index(), scroller.metrics().max_reach_index);
    }

    #[test]
    fn test_scroll_to_current_index_selects_immediately() {
        let mut scroller = seeded(7);
        assert_eq!(scroller.scroll_to_index("1"), Outcome::Applied);
        assert!(!scroller.is_busy());
        assert_eq!(scroller.selected_index(), Some(1));
        assert!(scroller.slots()[1].is_selected());
    }

    #[test]
    fn test_scroll_to_on_short_list_selects_immediately() {
        let mut scroller = seeded(3);
        assert_eq!(scroller.scroll_to_index("3"), Outcome::Applied);
        assert_eq!(scroller.selected_index(), Some(3));
    }

    #[test]
    fn test_scroll_to_out_of_range_is_ignored() {
        let mut scroller = seeded(7);
        assert_eq!(
            scroller.scroll_to_index("0"),
            Outcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(
            scroller.scroll_to_index("999"),
            Outcome::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(
            scroller.scroll_to_index("x"),
            Outcome::Ignored(IgnoreReason::Unparsable)
        );
        assert!(!scroller.is_busy());
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), 90.0);
    }

    #[test]
    fn test_wheel_is_ignored_while_animating() {
        let mut scroller = seeded(50);
        scroller.scroll_to_index("40");
        scroller.tick(FRAME);
        let (top, offset) = (scroller.top_index(), scroller.offset());
        assert_eq!(scroller.wheel(1.0), Outcome::Ignored(IgnoreReason::Busy));
        assert_eq!((scroller.top_index(), scroller.offset()), (top, offset));
    }

    #[test]
    fn test_reentry_rejected_by_default() {
        let mut scroller = seeded(50);
        scroller.scroll_to_index("40");
        assert_eq!(
            scroller.scroll_to_index("10"),
            Outcome::Ignored(IgnoreReason::Busy)
        );
        assert_eq!(scroller.animation_target(), Some(39));
    }

    #[test]
    fn test_reentry_restart_policy() {
        let config = ScrollConfig {
            reentry: ReentryPolicy::Restart,
            ..Default::default()
        };
        let items = (1..=50).map(|i| i.to_string()).collect();
        let mut scroller: Scroller<String> =
            Scroller::new(reference_layout(), config, items).unwrap();
        scroller.scroll_to_index("40");
        let first = scroller.cancellation_token().unwrap();
        scroller.tick(FRAME);

        assert_eq!(scroller.scroll_to_index("10"), Outcome::Started);
        assert!(first.is_cancelled());
        settle(&mut scroller);
        assert_eq!(scroller.selected_index(), Some(10));
        assert_eq!(scroller.top_index(), 9);
    }

    #[test]
    fn test_external_cancellation_leaves_consistent_state() {
        let mut scroller = seeded(80);
        scroller.scroll_to_index("70");
        for _ in 0..8 {
            scroller.tick(FRAME);
        }
        scroller.cancellation_token().unwrap().cancel();
        assert!(!scroller.is_busy());

        assert_eq!(scroller.tick(FRAME), TaskState::Cancelled);
        assert_eq!(scroller.task_state(), TaskState::Cancelled);
        assert_eq!(scroller.selected_index(), None);
        assert_in_bounds(&scroller);
        assert_eq!(scroller.wheel(-1.0), Outcome::Applied);
    }

    #[test]
    fn test_structural_edit_cancels_animation() {
        let mut scroller = seeded(80);
        scroller.scroll_to_index("70");
        let token = scroller.cancellation_token().unwrap();
        scroller.tick(FRAME);

        scroller.add_item("81".to_string());
        assert!(token.is_cancelled());
        assert!(!scroller.is_busy());
        assert_eq!(scroller.task_state(), TaskState::Cancelled);
        assert_in_bounds(&scroller);
    }

    #[test]
    fn test_add_item_rebuilds_pool_and_clears_selection() {
        let mut scroller = seeded(7);
        scroller.select_index(2);
        assert_eq!(scroller.add_item("8".to_string()), Outcome::Applied);

        assert_eq!(scroller.len(), 8);
        assert_eq!(scroller.slots().len(), scroller.metrics().visible_slots + 2);
        assert_eq!(scroller.selected_index(), None);
        assert!(scroller.slots().iter().all(|s| !s.is_selected()));
        assert_eq!(scroller.items()[7], "8");
    }

    #[test]
    fn test_add_item_grows_short_list_pool() {
        let mut scroller = seeded(2);
        assert_eq!(scroller.slots().len(), 3);
        scroller.add_item("3".to_string());
        assert_eq!(scroller.slots().len(), 4);
        assert_eq!(scroller.slots()[3].label(), "3");
    }

    #[test]
    fn test_update_without_selection_is_noop() {
        let mut scroller = seeded(7);
        let before = scroller.items().to_vec();
        assert_eq!(
            scroller.update_item("X".to_string()),
            Outcome::Ignored(IgnoreReason::NoSelection)
        );
        assert_eq!(scroller.items(), before.as_slice());
    }

    #[test]
    fn test_update_selected_item_in_place() {
        let mut scroller = seeded(7);
        scroller.select_slot(3);
        assert_eq!(scroller.selected_index(), Some(3));

        assert_eq!(scroller.update_item("X".to_string()), Outcome::Applied);
        assert_eq!(scroller.items()[2], "X");
        let slot = &scroller.slots()[3];
        assert_eq!(slot.value().map(String::as_str), Some("X"));
        assert!(slot.is_selected());
        assert_eq!(scroller.selected_index(), Some(3));
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let mut scroller = seeded(7);
        assert_eq!(
            scroller.delete_item(),
            Outcome::Ignored(IgnoreReason::NoSelection)
        );
        assert_eq!(scroller.len(), 7);
    }

    #[test]
    fn test_delete_at_bottom_clamps_top_index() {
        let mut scroller = seeded(7);
        scroller.scroll_to_index("7");
        settle(&mut scroller);
        assert_eq!(scroller.top_index(), 4);

        assert_eq!(scroller.delete_item(), Outcome::Applied);
        assert_eq!(scroller.len(), 6);
        assert_eq!(scroller.top_index(), scroller.metrics().max_reach_index);
        assert_eq!(scroller.top_index(), 3);
        assert_eq!(scroller.selected_index(), None);
        assert!(!scroller.items().contains(&"7".to_string()));
        assert_in_bounds(&scroller);
    }

    #[test]
    fn test_delete_until_list_fits() {
        let mut scroller = seeded(7);
        scroller.scroll_to_index("7");
        settle(&mut scroller);
        while !scroller.is_empty() {
            let last = scroller.len();
            scroller.select_index(last);
            scroller.delete_item();
            assert_in_bounds(&scroller);
            assert!(scroller.top_index() <= scroller.metrics().max_reach_index);
        }
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
        assert_eq!(scroller.slots().len(), 1);
    }

    #[test]
    fn test_selection_follows_item_not_slot() {
        let mut scroller = seeded(20);
        scroller.select_index(4);
        assert_eq!(scroller.selected_position(), Some(4));

        // Rebinding without a scroll step keeps the selection on item 4
        scroller.sync_visible_content();
        assert_eq!(scroller.selected_position(), Some(4));
        assert_eq!(
            scroller.slots().iter().filter(|s| s.is_selected()).count(),
            1
        );

        scroller.wheel(-1.0);
        assert_eq!(scroller.selected_index(), None);
    }

    #[test]
    fn test_select_empty_slot_is_ignored() {
        let mut scroller = seeded(7);
        assert_eq!(
            scroller.select_slot(0),
            Outcome::Ignored(IgnoreReason::EmptySlot)
        );
        assert_eq!(
            scroller.select_slot(99),
            Outcome::Ignored(IgnoreReason::EmptySlot)
        );
    }

    #[test]
    fn test_slot_hit_testing() {
        let scroller = seeded(7);
        // offset 90: slot 1 spans viewport [10, 100)
        assert_eq!(scroller.slot_top(1), 10.0);
        assert_eq!(scroller.slot_at(5.0), None);
        assert_eq!(scroller.slot_at(10.0), Some(1));
        assert_eq!(scroller.slot_at(99.0), Some(1));
        assert_eq!(scroller.slot_at(111.0), Some(2));
        assert_eq!(scroller.slot_at(-1.0), None);
    }

    #[test]
    fn test_resize_keeps_top_and_rebuilds_pool() {
        let mut scroller = seeded(30);
        for _ in 0..23 {
            scroller.wheel(-1.0);
        }
        let top = scroller.top_index();
        scroller.select_index(top + 1);

        let taller = scroller.layout().with_viewport(530.0).unwrap();
        scroller.set_layout(taller).unwrap();
        assert_eq!(scroller.top_index(), top);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
        assert_eq!(scroller.slots().len(), 8);
        assert_eq!(scroller.selected_index(), Some(top + 1));
        assert!(scroller.slots()[1].is_selected());
        assert_in_bounds(&scroller);
    }

    #[test]
    fn test_resize_to_fit_resets_to_top() {
        let mut scroller = seeded(7);
        scroller.scroll_to_index("7");
        settle(&mut scroller);
        let huge = scroller.layout().with_viewport(2_000.0).unwrap();
        scroller.set_layout(huge).unwrap();
        assert_eq!(scroller.top_index(), 0);
        assert_eq!(scroller.offset(), scroller.metrics().start_y);
        assert_eq!(scroller.slots().len(), 8);
    }

    #[test]
    fn test_invalid_scroll_config_fails_fast() {
        let config = ScrollConfig {
            step_px: 150.0,
            ..Default::default()
        };
        let result: Result<Scroller<String>> =
            Scroller::new(reference_layout(), config, Vec::new());
        assert!(matches!(result, Err(Error::InvalidLayout(_))));

        let config = ScrollConfig {
            step_px: 0.0,
            ..Default::default()
        };
        let result: Result<Scroller<String>> =
            Scroller::new(reference_layout(), config, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_slot_type() {
        #[derive(Default)]
        struct Counting {
            index: Option<usize>,
            selected: bool,
            binds: usize,
        }

        impl ItemSlot<u32> for Counting {
            fn bind(&mut self, index: usize, _value: &u32) {
                self.index = Some(index);
                self.binds += 1;
            }
            fn unbind(&mut self) {
                self.index = None;
            }
            fn set_selected(&mut self, selected: bool) {
                self.selected = selected;
            }
            fn is_selected(&self) -> bool {
                self.selected
            }
            fn backing_index(&self) -> Option<usize> {
                self.index
            }
        }

        let mut scroller: Scroller<u32, Counting> =
            Scroller::new(reference_layout(), ScrollConfig::default(), (1..=10).collect()).unwrap();
        assert_eq!(scroller.slots()[1].binds, 1);
        scroller.wheel(-1.0);
        // No boundary crossed: no rebinding
        assert_eq!(scroller.slots()[1].binds, 1);
        assert_eq!(scroller.select_index(2), Outcome::Applied);
        assert!(scroller.slots()[2].is_selected());
    }
}
