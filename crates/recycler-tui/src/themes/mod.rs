//! Built-in themes and the loader that applies user overrides

mod dracula;
mod nord;
mod one_dark;

use recycler_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

use crate::theme::Theme;

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "gruvbox-dark" | "gruvbox" => Theme::default(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        "one-dark" | "onedark" => one_dark::default(),
        other => {
            warn!("Unknown theme '{}', falling back to gruvbox-dark", other);
            Theme::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 11] = [
        (&overrides.bg0, &mut theme.bg0),
        (&overrides.bg1, &mut theme.bg1),
        (&overrides.bg2, &mut theme.bg2),
        (&overrides.fg0, &mut theme.fg0),
        (&overrides.fg1, &mut theme.fg1),
        (&overrides.accent, &mut theme.accent),
        (&overrides.selection, &mut theme.selection),
        (&overrides.error, &mut theme.error),
        (&overrides.success, &mut theme.success),
        (&overrides.warning, &mut theme.warning),
        (&overrides.info, &mut theme.info),
    ];

    for (hex, target) in slots {
        if let Some(hex) = hex {
            match parse_hex_color(hex) {
                Some(color) => *target = color,
                None => warn!("Ignoring invalid theme color '{}'", hex),
            }
        }
    }

    theme
}

/// Names accepted by [`load_theme`]
pub fn available_themes() -> Vec<&'static str> {
    vec!["gruvbox-dark", "nord", "dracula", "one-dark"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_forms() {
        assert!(matches!(parse_hex_color("#ff5500"), Some(Color::Rgb(255, 85, 0))));
        assert!(matches!(parse_hex_color("#f50"), Some(Color::Rgb(255, 85, 0))));
        assert!(matches!(parse_hex_color("ff5500"), Some(Color::Rgb(255, 85, 0))));
    }

    #[test]
    fn test_parse_hex_color_invalid() {
        assert!(parse_hex_color("invalid").is_none());
        assert!(parse_hex_color("#gg0000").is_none());
        assert!(parse_hex_color("#éé").is_none());
    }

    #[test]
    fn test_load_theme_default() {
        let theme = load_theme(&ThemeConfig::default());
        assert!(matches!(theme.bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "no-such-theme".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert!(matches!(load_theme(&config).bg0, Color::Rgb(0x28, 0x28, 0x28)));
    }

    #[test]
    fn test_load_theme_with_override() {
        let config = ThemeConfig {
            name: "nord".to_string(),
            colors: ThemeColorOverrides {
                selection: Some("#ff0000".to_string()),
                accent: Some("not-a-color".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert!(matches!(theme.selection, Color::Rgb(255, 0, 0)));
        assert!(matches!(theme.accent, Color::Rgb(0x88, 0xc0, 0xd0)));
    }

    #[test]
    fn test_every_listed_theme_loads() {
        for name in available_themes() {
            let config = ThemeConfig {
                name: name.to_string(),
                colors: ThemeColorOverrides::default(),
            };
            let _ = load_theme(&config);
        }
    }
}
