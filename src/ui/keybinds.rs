// keybind configuration

use crossterm::event::{KeyCode, KeyModifiers};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Keybinds {
    #[serde(default = "default_up")]
    pub up: Vec<KeyBind>,
    #[serde(default = "default_down")]
    pub down: Vec<KeyBind>,
    #[serde(default = "default_page_up")]
    pub page_up: Vec<KeyBind>,
    #[serde(default = "default_page_down")]
    pub page_down: Vec<KeyBind>,
    #[serde(default = "default_first")]
    pub first: Vec<KeyBind>,
    #[serde(default = "default_last")]
    pub last: Vec<KeyBind>,
    #[serde(default = "default_select")]
    pub select: Vec<KeyBind>,
    #[serde(default = "default_rescan")]
    pub rescan: Vec<KeyBind>,
    #[serde(default = "default_exit")]
    pub exit: Vec<KeyBind>,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            page_up: default_page_up(),
            page_down: default_page_down(),
            first: default_first(),
            last: default_last(),
            select: default_select(),
            rescan: default_rescan(),
            exit: default_exit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeyBind {
    Simple(String),
    WithMod { key: String, modifiers: String },
}

impl KeyBind {
    pub fn matches(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        match self {
            KeyBind::Simple(key) => {
                // Shift is already in the case of a typed character
                let mods = match code {
                    KeyCode::Char(_) => mods - KeyModifiers::SHIFT,
                    _ => mods,
                };
                parse_key(key) == code && mods == KeyModifiers::NONE
            }
            KeyBind::WithMod { key, modifiers } => {
                parse_key(key) == code && mods == parse_modifiers(modifiers)
            }
        }
    }
}

fn parse_key(key: &str) -> KeyCode {
    match key.to_lowercase().as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        _ => {
            // single characters keep their case, "R" is Shift+r
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Null,
            }
        }
    }
}

fn parse_modifiers(mods: &str) -> KeyModifiers {
    let mut result = KeyModifiers::NONE;
    for part in mods.split('+') {
        match part.trim().to_lowercase().as_str() {
            "ctrl" | "control" => result |= KeyModifiers::CONTROL,
            "shift" => result |= KeyModifiers::SHIFT,
            "alt" => result |= KeyModifiers::ALT,
            _ => {}
        }
    }
    result
}

fn with_ctrl(key: &str) -> KeyBind {
    KeyBind::WithMod {
        key: key.to_string(),
        modifiers: "ctrl".to_string(),
    }
}

fn default_up() -> Vec<KeyBind> {
    vec![KeyBind::Simple("up".to_string()), KeyBind::Simple("k".to_string()), with_ctrl("p")]
}

fn default_down() -> Vec<KeyBind> {
    vec![KeyBind::Simple("down".to_string()), KeyBind::Simple("j".to_string()), with_ctrl("n")]
}

fn default_page_up() -> Vec<KeyBind> {
    vec![KeyBind::Simple("pageup".to_string())]
}

fn default_page_down() -> Vec<KeyBind> {
    vec![KeyBind::Simple("pagedown".to_string())]
}

fn default_first() -> Vec<KeyBind> {
    vec![KeyBind::Simple("home".to_string()), KeyBind::Simple("g".to_string())]
}

fn default_last() -> Vec<KeyBind> {
    vec![KeyBind::Simple("end".to_string())]
}

fn default_select() -> Vec<KeyBind> {
    vec![KeyBind::Simple("enter".to_string()), with_ctrl("y")]
}

fn default_rescan() -> Vec<KeyBind> {
    vec![KeyBind::Simple("R".to_string()), with_ctrl("r")]
}

fn default_exit() -> Vec<KeyBind> {
    vec![
        KeyBind::Simple("esc".to_string()),
        KeyBind::Simple("q".to_string()),
        with_ctrl("q"),
        with_ctrl("c"),
    ]
}

impl Keybinds {
    pub fn matches_up(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.up.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_down(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.down.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_page_up(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.page_up.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_page_down(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.page_down.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_first(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.first.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_last(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.last.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_select(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.select.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_rescan(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.rescan.iter().any(|kb| kb.matches(code, mods))
    }

    pub fn matches_exit(&self, code: KeyCode, mods: KeyModifiers) -> bool {
        self.exit.iter().any(|kb| kb.matches(code, mods))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keybinds() {
        let kb = Keybinds::default();
        assert!(kb.matches_up(KeyCode::Up, KeyModifiers::NONE));
        assert!(kb.matches_up(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert!(!kb.matches_up(KeyCode::Char('p'), KeyModifiers::NONE));
        assert!(kb.matches_select(KeyCode::Enter, KeyModifiers::NONE));
        assert!(kb.matches_rescan(KeyCode::Char('R'), KeyModifiers::SHIFT));
        assert!(kb.matches_rescan(KeyCode::Char('R'), KeyModifiers::NONE));
        assert!(!kb.matches_rescan(KeyCode::Char('r'), KeyModifiers::NONE));
        assert!(kb.matches_rescan(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(kb.matches_exit(KeyCode::Esc, KeyModifiers::NONE));
        assert!(kb.matches_page_down(KeyCode::PageDown, KeyModifiers::NONE));
    }

    #[test]
    fn test_keybinds_from_toml() {
        let kb: Keybinds = toml::from_str(
            r#"
            select = ["space", { key = "o", modifiers = "ctrl+shift" }]
            "#,
        )
        .unwrap();
        assert!(kb.matches_select(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(kb.matches_select(
            KeyCode::Char('o'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT
        ));
        assert!(!kb.matches_select(KeyCode::Enter, KeyModifiers::NONE));
        // untouched binds keep their defaults
        assert!(kb.matches_down(KeyCode::Down, KeyModifiers::NONE));
    }

    #[test]
    fn test_single_char_keys_keep_case() {
        let upper = KeyBind::Simple("G".to_string());
        assert!(upper.matches(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert!(!upper.matches(KeyCode::Char('g'), KeyModifiers::NONE));

        let named = KeyBind::Simple("PageDown".to_string());
        assert!(named.matches(KeyCode::PageDown, KeyModifiers::NONE));
        assert!(!named.matches(KeyCode::PageDown, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_unknown_key_never_matches() {
        let kb = KeyBind::Simple("nonsense".to_string());
        assert!(!kb.matches(KeyCode::Char('n'), KeyModifiers::NONE));
    }
}
