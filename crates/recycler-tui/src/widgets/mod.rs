mod popup;
mod slot_list;
mod status_bar;

pub use popup::PopupWidget;
pub use slot_list::SlotListWidget;
pub use status_bar::StatusBarWidget;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, Mode};

/// Draw the whole screen: list, status bar and any open popup
pub fn draw(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    // The list geometry follows the terminal, so resize before rendering
    app.set_list_area(SlotListWidget::inner(main_layout[0]));

    SlotListWidget::render(frame, main_layout[0], app);
    StatusBarWidget::render(frame, main_layout[1], app);

    match &app.mode {
        Mode::Prompt(kind) => PopupWidget::render_prompt(frame, *kind, &app.input, &app.theme),
        Mode::Help => PopupWidget::render_help(frame, &app.config.keymap, &app.theme),
        Mode::Normal => {}
    }
}
