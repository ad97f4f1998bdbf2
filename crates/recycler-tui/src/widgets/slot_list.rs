use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use recycler_core::{ItemSlot, Slot};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, Mode};
use crate::theme::Theme;

/// Draws the slot pool as cards, shifted up by the scroll offset
pub struct SlotListWidget;

impl SlotListWidget {
    /// Area inside the border, where cards are drawn
    pub fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.mode == Mode::Normal;

        let border_style = theme.list_border(is_focused);

        let title = if app.is_animating() {
            format!(" Items ({}) scrolling ", app.scroller.len())
        } else {
            format!(" Items ({}) ", app.scroller.len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        let scale = app.scale();
        let layout = app.scroller.layout();
        let item_rows = scale.rows(layout.item_height()).max(1);
        let spacing_rows = scale.rows(layout.spacing());
        let width = inner.width as usize;

        let mut lines = Vec::new();
        for slot in app.scroller.slots() {
            lines.extend(Self::card_lines(slot, item_rows, width, theme));
            lines.extend((0..spacing_rows).map(|_| Line::default()));
        }

        let scroll = scale.rows(app.scroller.offset());
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(theme.fg0).bg(theme.bg0))
            .scroll((scroll, 0));

        frame.render_widget(paragraph, area);
    }

    fn card_lines(slot: &Slot<String>, rows: u16, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let Some(index) = slot.backing_index() else {
            return (0..rows).map(|_| Line::default()).collect();
        };

        let selected = slot.is_selected();
        let card = theme.card(selected);
        let blank = Line::from(Span::styled(" ".repeat(width), card));
        let label_row = rows / 2;

        (0..rows)
            .map(|row| {
                if row != label_row {
                    return blank.clone();
                }
                let marker = if selected { "▌" } else { " " };
                let label = format!("{marker}{index:>4}  ");
                let value = slot.value().map(String::as_str).unwrap_or_default();
                let room = width.saturating_sub(label.width());
                let value = fit_width(value, room);
                let padding = room.saturating_sub(value.width());

                Line::from(vec![
                    Span::styled(label, theme.card_label(selected)),
                    Span::styled(value, theme.card_value(selected)),
                    Span::styled(" ".repeat(padding), card),
                ])
            })
            .collect()
    }
}

/// Cut `s` to at most `max` display columns, marking the cut with an ellipsis
pub(crate) fn fit_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
