use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, PromptKind};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match &app.mode {
            Mode::Normal if app.is_animating() => "SCROLL",
            Mode::Normal => "NORMAL",
            Mode::Prompt(PromptKind::Goto) => "GOTO",
            Mode::Prompt(PromptKind::Add) => "ADD",
            Mode::Prompt(PromptKind::Edit) => "EDIT",
            Mode::Help => "HELP",
        };

        let selected = app
            .scroller
            .selected_index()
            .map(|i| i.to_string())
            .unwrap_or_else(|| "-".to_string());

        let status_text = match &app.status_message {
            Some(msg) => format!(" {} | {}", mode_str, msg),
            None => format!(
                " {} | Items: {} | Top: {} | Selected: {}",
                mode_str,
                app.scroller.len(),
                app.scroller.top_index() + 1,
                selected
            ),
        };

        let is_warning = app.status_is_warning && app.status_message.is_some();

        let help_hint = " q:quit j/k:scroll ::goto ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, theme.status(is_warning)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
