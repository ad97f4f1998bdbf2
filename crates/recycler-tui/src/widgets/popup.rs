use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use recycler_core::config::KeymapConfig;
use unicode_width::UnicodeWidthStr;

use super::slot_list::fit_width;
use crate::app::PromptKind;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the single-line text prompt
    pub fn render_prompt(frame: &mut Frame, kind: PromptKind, input: &str, theme: &Theme) {
        let area = frame.area();

        let popup_width = 44u16.min(area.width.saturating_sub(4));
        let popup_height = 6u16.min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", kind.title()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Input
                Constraint::Length(1), // Spacer
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        // Keep the tail of long input visible, leaving room for the cursor
        let room = (inner_area.width as usize).saturating_sub(3);
        let visible = tail_fit(input, room);
        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(visible, Style::default().fg(theme.fg0)),
            Span::styled("█", Style::default().fg(theme.fg1)),
        ]);
        frame.render_widget(Paragraph::new(input_line), chunks[0]);

        let hint = Paragraph::new(Line::from(vec![
            Span::styled("[", Style::default().fg(theme.grey1)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("] confirm  [", Style::default().fg(theme.grey1)),
            Span::styled(
                "Esc",
                Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("] cancel", Style::default().fg(theme.grey1)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[2]);
    }

    /// Render the key binding overview
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries = [
            (keymap.scroll_down.as_str(), "scroll down"),
            (keymap.scroll_up.as_str(), "scroll up"),
            (keymap.goto.as_str(), "go to item"),
            (keymap.add.as_str(), "add item"),
            (keymap.edit.as_str(), "edit selected item"),
            (keymap.delete.as_str(), "delete selected item"),
            (keymap.select_next.as_str(), "select next"),
            (keymap.select_prev.as_str(), "select previous"),
            (keymap.cancel_animation.as_str(), "cancel scrolling"),
            ("<Esc>", "clear selection"),
            (keymap.help.as_str(), "this help"),
            (keymap.quit.as_str(), "quit"),
        ];

        let area = frame.area();
        let popup_width = 40u16.min(area.width.saturating_sub(4));
        let popup_height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.info))
            .style(Style::default().bg(theme.bg1));

        let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>width$}  ", key, width = key_width),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "mouse: wheel scrolls, click selects",
                Style::default().fg(theme.grey1),
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Last part of `s` that fits in `max` columns
fn tail_fit(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let reversed: String = s.chars().rev().collect();
    fit_width(&reversed, max).chars().rev().collect()
}
