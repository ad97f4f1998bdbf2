use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use recycler_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Normalize what terminals report into the shape `parse_key_binding` produces
impl From<KeyEvent> for KeyBinding {
    fn from(key: KeyEvent) -> Self {
        let modifiers = key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
        match key.code {
            KeyCode::BackTab => Self::shift(KeyCode::Tab),
            KeyCode::Char(c) if c.is_ascii_uppercase() => {
                Self::new(key.code, modifiers | KeyModifiers::SHIFT)
            }
            // Shift is implied by the character itself ("?", ":")
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                Self::new(key.code, modifiers - KeyModifiers::SHIFT)
            }
            code => Self::new(code, modifiers),
        }
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', action {:?} is unbound", key_str, action);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.scroll_down, Action::ScrollDown);
        add_binding(&config.scroll_up, Action::ScrollUp);
        add_binding(&config.goto, Action::StartGoto);
        add_binding(&config.add, Action::StartAdd);
        add_binding(&config.edit, Action::StartEdit);
        add_binding(&config.delete, Action::Delete);
        add_binding(&config.select_next, Action::SelectNext);
        add_binding(&config.select_prev, Action::SelectPrev);
        add_binding(&config.cancel_animation, Action::CancelAnimation);
        add_binding(&config.help, Action::ShowHelp);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Arrow keys scroll as an alternative
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::ScrollDown);
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::ScrollUp);
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self { bindings }
    }

    pub fn lookup(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "j", "k", "q", ":", "?"
/// - Uppercase (Shift): "G", "N"
/// - Ctrl: "<C-j>"
/// - Shift: "<S-Tab>"
/// - Special keys: "<CR>", "<Enter>", "<Esc>", "<Tab>", "<Space>", "<Up>", "<Down>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        let inner = &s[1..s.len() - 1];
        return parse_special_key(inner);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        return Some(KeyBinding::shift(KeyCode::Char(c)));
    }
    Some(KeyBinding::simple(KeyCode::Char(c)))
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::ctrl(key));
    }

    if let Some(rest) = inner.strip_prefix("S-") {
        let key = parse_key_name(rest)?;
        return Some(KeyBinding::shift(key));
    }

    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name.to_lowercase().as_str() {
        "cr" | "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "space" | "spc" => Some(KeyCode::Char(' ')),
        "bs" | "backspace" => Some(KeyCode::Backspace),
        "del" | "delete" => Some(KeyCode::Delete),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        _ => {
            // Single character after modifier (e.g., "j" in "<C-j>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(c.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}
