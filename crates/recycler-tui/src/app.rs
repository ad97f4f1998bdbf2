use std::time::Duration;

use anyhow::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use recycler_core::{AppConfig, IgnoreReason, ItemSlot, LayoutConfig, Outcome, Scroller, TaskState};
use tracing::{debug, warn};

use crate::input::Action;
use crate::theme::Theme;
use crate::themes::load_theme;

/// Which text prompt is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Goto,
    Add,
    Edit,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::Goto => "Go to item",
            PromptKind::Add => "Add item",
            PromptKind::Edit => "Edit item",
        }
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Prompt(PromptKind),
    Help,
}

/// Conversion between abstract list pixels and terminal rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScale {
    px_per_row: f32,
}

impl RowScale {
    const FALLBACK_PX_PER_ROW: f32 = 10.0;

    pub fn new(px_per_row: f32) -> Self {
        if px_per_row.is_finite() && px_per_row > 0.0 {
            Self { px_per_row }
        } else {
            warn!(
                "Invalid px_per_row {}, using {}",
                px_per_row,
                Self::FALLBACK_PX_PER_ROW
            );
            Self {
                px_per_row: Self::FALLBACK_PX_PER_ROW,
            }
        }
    }

    #[inline]
    pub fn px_per_row(&self) -> f32 {
        self.px_per_row
    }

    pub fn rows(&self, px: f32) -> u16 {
        (px / self.px_per_row).round().max(0.0) as u16
    }

    pub fn px(&self, rows: u16) -> f32 {
        f32::from(rows) * self.px_per_row
    }

    /// Scroller viewport height for a list area of `rows` terminal rows
    ///
    /// The bottom clamp leaves the last item either one unit plus spacing
    /// above the viewport bottom, or just the spacing above it, depending on
    /// where the viewport height falls within a unit. Pick the height whose
    /// clamp lands the last item exactly on the last screen row.
    pub fn viewport_px(&self, rows: u16, layout: &LayoutConfig) -> f32 {
        let screen = self.px(rows);
        let unit = layout.unit_size();
        let rem = screen.rem_euclid(unit);
        if rem > 0.0 && rem < layout.item_height() {
            screen + unit + layout.spacing()
        } else {
            screen + layout.spacing()
        }
    }
}

/// Application state
pub struct App {
    pub config: AppConfig,
    pub scroller: Scroller<String>,
    pub theme: Theme,
    pub mode: Mode,
    /// Text typed into the open prompt
    pub input: String,
    pub status_message: Option<String>,
    /// Status message reports a rejected or aborted request
    pub status_is_warning: bool,
    pub should_quit: bool,
    /// Inner area of the list widget from the last draw
    pub list_area: Rect,
    scale: RowScale,
    viewport_rows: Option<u16>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let layout = LayoutConfig::from_settings(&config.layout)?;
        let scroller = Scroller::new(layout, config.scroll.clone(), config.seed_items())?;
        let theme = load_theme(&config.ui.theme);
        let scale = RowScale::new(config.ui.px_per_row);

        Ok(Self {
            config,
            scroller,
            theme,
            mode: Mode::Normal,
            input: String::new(),
            status_message: None,
            status_is_warning: false,
            should_quit: false,
            list_area: Rect::default(),
            scale,
            viewport_rows: None,
        })
    }

    pub fn scale(&self) -> RowScale {
        self.scale
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_warning = false;
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_warning = true;
    }

    pub fn is_animating(&self) -> bool {
        self.scroller.task_state() == TaskState::Animating
    }

    /// Record the list area and resize the scroller viewport to match it
    pub fn set_list_area(&mut self, area: Rect) {
        self.list_area = area;
        if self.viewport_rows == Some(area.height) {
            return;
        }
        self.viewport_rows = Some(area.height);

        let viewport = self.scale.viewport_px(area.height, self.scroller.layout());
        let resized = self
            .scroller
            .layout()
            .with_viewport(viewport)
            .and_then(|layout| self.scroller.set_layout(layout));
        match resized {
            Ok(()) => debug!(rows = area.height, viewport, "list viewport resized"),
            Err(e) => {
                warn!("Failed to resize list viewport: {}", e);
                self.set_warning(format!("Resize failed: {e}"));
            }
        }
    }

    /// Advance a running animation; returns true while it keeps running
    pub fn on_tick(&mut self, dt: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        match self.scroller.tick(dt) {
            TaskState::Animating => true,
            TaskState::Idle => {
                if let Some(index) = self.scroller.selected_index() {
                    self.set_status(format!("Item {index}"));
                }
                false
            }
            TaskState::Cancelled => {
                self.set_warning("Scroll cancelled");
                false
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.wheel(-1.0),
            Action::ScrollUp => self.wheel(1.0),
            Action::StartGoto => self.open_prompt(PromptKind::Goto),
            Action::StartAdd => self.open_prompt(PromptKind::Add),
            Action::StartEdit => match self.selected_value() {
                Some(value) => {
                    self.open_prompt(PromptKind::Edit);
                    self.input = value;
                }
                None => self.set_warning("No item selected"),
            },
            Action::Delete => {
                let selected = self.scroller.selected_index();
                let outcome = self.scroller.delete_item();
                match selected {
                    Some(index) if !outcome.is_ignored() => {
                        self.set_status(format!("Deleted item {index}"))
                    }
                    _ => self.report_ignored(outcome),
                }
            }
            Action::SelectNext => self.select_relative(1),
            Action::SelectPrev => self.select_relative(-1),
            Action::CancelAnimation => {
                if self.scroller.cancel_animation() {
                    self.set_warning("Scroll cancelled");
                }
            }
            Action::ShowHelp => self.mode = Mode::Help,
            Action::ExitMode => {
                if self.mode == Mode::Normal {
                    self.scroller.clear_selection();
                } else {
                    self.mode = Mode::Normal;
                }
            }
            Action::Confirm => self.submit_prompt(),
            Action::Cancel => {
                self.mode = Mode::Normal;
                self.input.clear();
            }
            Action::InputChar(c) => self.input.push(c),
            Action::Backspace => {
                self.input.pop();
            }
            Action::None => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.wheel(1.0),
            MouseEventKind::ScrollDown => self.wheel(-1.0),
            MouseEventKind::Down(MouseButton::Left) => self.click(mouse.column, mouse.row),
            _ => {}
        }
    }

    fn wheel(&mut self, delta: f32) {
        if self.mode != Mode::Normal {
            return;
        }
        if let Outcome::Ignored(IgnoreReason::Busy) = self.scroller.wheel(delta) {
            debug!("wheel ignored while animating");
        }
    }

    /// Select the item under a terminal cell inside the list
    pub fn click(&mut self, column: u16, row: u16) {
        if self.mode != Mode::Normal || !self.list_area.contains(Position::new(column, row)) {
            return;
        }
        let y = self.scale.px(row - self.list_area.y) + self.scale.px_per_row() / 2.0;
        if let Some(position) = self.scroller.slot_at(y) {
            self.scroller.select_slot(position);
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        self.mode = Mode::Prompt(kind);
        self.input.clear();
    }

    fn selected_value(&self) -> Option<String> {
        let index = self.scroller.selected_index()?;
        self.scroller.items().get(index - 1).cloned()
    }

    fn submit_prompt(&mut self) {
        let Mode::Prompt(kind) = self.mode else {
            return;
        };
        let text = std::mem::take(&mut self.input);
        self.mode = Mode::Normal;

        let outcome = match kind {
            PromptKind::Goto => self.scroller.scroll_to_index(&text),
            PromptKind::Add => self.scroller.add_item(text),
            PromptKind::Edit => self.scroller.update_item(text),
        };
        match (kind, outcome) {
            (_, Outcome::Ignored(_)) => self.report_ignored(outcome),
            (PromptKind::Goto, Outcome::Started) => self.set_status("Scrolling..."),
            (PromptKind::Goto, _) => {
                if let Some(index) = self.scroller.selected_index() {
                    self.set_status(format!("Item {index}"));
                }
            }
            (PromptKind::Add, _) => {
                let count = self.scroller.len();
                self.set_status(format!("Added item {count}"));
            }
            (PromptKind::Edit, _) => self.set_status("Item updated"),
        }
    }

    fn report_ignored(&mut self, outcome: Outcome) {
        let Outcome::Ignored(reason) = outcome else {
            return;
        };
        let message = match reason {
            IgnoreReason::Unparsable => "Not a number",
            IgnoreReason::OutOfRange => "No such item",
            IgnoreReason::Busy => "Busy scrolling",
            IgnoreReason::BelowThreshold => return,
            IgnoreReason::NoSelection => "No item selected",
            IgnoreReason::EmptySlot => return,
        };
        self.set_warning(message);
    }

    /// Backing indices of the items at least partly on screen
    pub fn visible_indices(&self) -> Vec<usize> {
        let screen = self.scale.px(self.list_area.height);
        let item_height = self.scroller.layout().item_height();
        self.scroller
            .slots()
            .iter()
            .enumerate()
            .filter(|(position, _)| {
                let top = self.scroller.slot_top(*position);
                screen <= 0.0 || (top + item_height > 0.0 && top < screen)
            })
            .filter_map(|(_, slot)| slot.backing_index())
            .collect()
    }

    /// Move the selection through the items on screen
    fn select_relative(&mut self, delta: isize) {
        let visible = self.visible_indices();
        let (Some(&first), Some(&last)) = (visible.first(), visible.last()) else {
            return;
        };
        let next = match self.scroller.selected_index() {
            Some(current) if visible.contains(&current) => {
                let position = visible.iter().position(|&i| i == current).unwrap_or(0);
                let target = position.saturating_add_signed(delta).min(visible.len() - 1);
                visible[target]
            }
            _ if delta >= 0 => first,
            _ => last,
        };
        self.scroller.select_index(next);
    }
}
