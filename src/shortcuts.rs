//! Keyboard shortcuts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewNote,
    Save,
    ToggleTheme,
    TogglePageSelector,
    Share,
    Escape,
}

/// A key press. `ctrl` covers both Ctrl and Cmd.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub shift: bool,
}

impl<'a> KeyPress<'a> {
    pub fn plain(key: &'a str) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: &'a str) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: &'a str) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
        }
    }
}

impl Shortcut {
    /// The shortcut bound to `press`, if any. Shifted letters arrive uppercase.
    pub fn from_key(press: KeyPress<'_>) -> Option<Self> {
        if press.key == "Escape" {
            return Some(Shortcut::Escape);
        }
        if !press.ctrl {
            return None;
        }

        match (press.key, press.shift) {
            ("S", true) => Some(Shortcut::Share),
            ("n", false) => Some(Shortcut::NewNote),
            ("s", false) => Some(Shortcut::Save),
            ("d", false) => Some(Shortcut::ToggleTheme),
            ("k", false) => Some(Shortcut::TogglePageSelector),
            _ => None,
        }
    }
}
