//! One Dark theme

use ratatui::style::Color;
use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34),
        bg1: Color::Rgb(0x2f, 0x34, 0x3f),
        bg2: Color::Rgb(0x3e, 0x44, 0x51),
        fg0: Color::Rgb(0xab, 0xb2, 0xbf),
        fg1: Color::Rgb(0x9d, 0xa5, 0xb4),
        grey0: Color::Rgb(0x5c, 0x63, 0x70),
        grey1: Color::Rgb(0x7f, 0x84, 0x8e),
        accent: Color::Rgb(0x56, 0xb6, 0xc2),
        selection: Color::Rgb(0x4b, 0x52, 0x63),
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        success: Color::Rgb(0x98, 0xc3, 0x79),
        warning: Color::Rgb(0xd1, 0x9a, 0x66),
        info: Color::Rgb(0x61, 0xaf, 0xef),
    }
}
