use ratatui::style::{Color, Modifier, Style};

/// Colors for the list, status bar and popups
#[derive(Debug, Clone)]
pub struct Theme {
    /// List background behind the cards
    pub bg0: Color,
    /// Card and popup background
    pub bg1: Color,
    /// Status bar background
    pub bg2: Color,
    /// Item values and status text
    pub fg0: Color,
    /// Prompt cursor
    pub fg1: Color,
    /// Unfocused list border
    pub grey0: Color,
    /// Hints
    pub grey1: Color,
    /// Focused border and index labels
    pub accent: Color,
    /// Background of the selected card
    pub selection: Color,
    pub error: Color,
    pub success: Color,
    /// Rejected or aborted requests on the status bar
    pub warning: Color,
    pub info: Color,
}

impl Theme {
    /// Background of one card; the selected item stands out
    pub fn card(&self, selected: bool) -> Style {
        let bg = if selected { self.selection } else { self.bg1 };
        Style::default().bg(bg)
    }

    /// Value text on a card
    pub fn card_value(&self, selected: bool) -> Style {
        let style = self.card(selected).fg(self.fg0);
        if selected {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Index label on a card
    pub fn card_label(&self, selected: bool) -> Style {
        self.card(selected).fg(self.accent)
    }

    /// List border; dimmed while a prompt or the help overlay has focus
    pub fn list_border(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.grey0 })
    }

    /// Status bar message text
    pub fn status(&self, is_warning: bool) -> Style {
        let fg = if is_warning { self.warning } else { self.fg0 };
        Style::default().fg(fg).bg(self.bg2)
    }
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            selection: Color::Rgb(0x5a, 0x52, 0x4c),
            error: Color::Rgb(0xea, 0x69, 0x62),
            success: Color::Rgb(0xa9, 0xb6, 0x65),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            info: Color::Rgb(0x7d, 0xae, 0xa3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_card_differs_from_plain_card() {
        let theme = Theme::default();
        assert_eq!(theme.card(true).bg, Some(theme.selection));
        assert_eq!(theme.card(false).bg, Some(theme.bg1));
        assert!(theme.card_value(true).add_modifier.contains(Modifier::BOLD));
        assert!(!theme.card_value(false).add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.card_label(true).fg, Some(theme.accent));
    }

    #[test]
    fn test_status_and_border_styles() {
        let theme = Theme::default();
        assert_eq!(theme.status(true).fg, Some(theme.warning));
        assert_eq!(theme.status(false).fg, Some(theme.fg0));
        assert_eq!(theme.status(false).bg, Some(theme.bg2));
        assert_eq!(theme.list_border(false).fg, Some(theme.grey0));
    }
}
