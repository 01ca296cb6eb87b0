//! Key bindings: azerty, qwerty, vim or custom directional keys, and the on-screen key hint.

use crate::grid::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Directional keys, stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLayout {
    pub up: char,
    pub down: char,
    pub left: char,
    pub right: char,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::QWERTY
    }
}

impl KeyLayout {
    pub const AZERTY: Self = Self { up: 'z', down: 's', left: 'q', right: 'd' };
    pub const QWERTY: Self = Self { up: 'w', down: 's', left: 'a', right: 'd' };
    pub const VIM: Self = Self { up: 'k', down: 'j', left: 'h', right: 'l' };

    /// Four distinct printable keys in up, down, left, right order (e.g. `"wsad"`).
    pub fn custom(keys: &str) -> Result<Self, LayoutError> {
        let chars: Vec<char> = keys.chars().map(fold_case).collect();
        let &[up, down, left, right] = chars.as_slice() else {
            return Err(LayoutError::InvalidLayout(format!(
                "expected four keys (up down left right), got {:?}",
                keys
            )));
        };
        if chars.iter().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(LayoutError::InvalidLayout(format!("keys must be printable: {:?}", keys)));
        }
        for (i, c) in chars.iter().enumerate() {
            if chars[i + 1..].contains(c) {
                return Err(LayoutError::InvalidLayout(format!("key {:?} used twice", c)));
            }
        }
        Ok(Self { up, down, left, right })
    }

    /// Direction bound to `c`, ignoring case.
    pub fn direction_for(&self, c: char) -> Option<Direction> {
        let c = fold_case(c);
        Direction::ALL.into_iter().find(|&d| self.key_for(d) == c)
    }

    pub fn key_for(&self, direction: Direction) -> char {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn label(&self, direction: Direction) -> String {
        let key: String = self.key_for(direction).to_uppercase().collect();
        format!("[{}]", key)
    }
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Gravity(Direction),
    Confirm,
    Quit,
    /// A character that is not a directional key.
    Other(char),
    /// Any other non-modifier key with no binding (Tab, Backspace, F-keys...).
    Unbound,
    /// Events the game ignores: Ctrl combinations, lone modifiers, media keys.
    None,
}

/// Map key event to an action. Arrow keys always work alongside the layout keys.
pub fn key_to_action(key: KeyEvent, layout: &KeyLayout) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c' | 'C') => Action::Quit,
            _ => Action::None,
        };
    }
    match code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Confirm,
        KeyCode::Up => Action::Gravity(Direction::Up),
        KeyCode::Down => Action::Gravity(Direction::Down),
        KeyCode::Left => Action::Gravity(Direction::Left),
        KeyCode::Right => Action::Gravity(Direction::Right),
        KeyCode::Char(c) => layout
            .direction_for(c)
            .map_or(Action::Other(c), Action::Gravity),
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Backspace
        | KeyCode::Delete
        | KeyCode::Insert
        | KeyCode::Home
        | KeyCode::End
        | KeyCode::PageUp
        | KeyCode::PageDown
        | KeyCode::F(_) => Action::Unbound,
        _ => Action::None,
    }
}

/// Shape of the key hint shown next to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HintLayout {
    /// `   [W]` over `[A][S][D]`.
    Cross,
    /// `[W][S]` over `[A][D]`.
    Square,
    /// `[A][S][W][D]` on one line.
    Linear,
    /// Pattern of `U`, `D`, `L`, `R` and spaces; `/` or a newline starts a new line.
    Custom(String),
}

impl HintLayout {
    pub fn parse(name: &str, custom: Option<&str>) -> Result<Self, LayoutError> {
        match name {
            "cross" => Ok(Self::Cross),
            "square" => Ok(Self::Square),
            "linear" => Ok(Self::Linear),
            "custom" => {
                let pattern = custom.ok_or_else(|| {
                    LayoutError::InvalidLayout(
                        "a custom hint needs a pattern, e.g. --custom-hint \" U/LDR\"".to_string(),
                    )
                })?;
                validate_pattern(pattern)?;
                Ok(Self::Custom(pattern.to_string()))
            }
            other => {
                let mut echoed: String = other.chars().take(16).collect();
                if other.chars().count() > 16 {
                    echoed.push_str("...");
                }
                Err(LayoutError::InvalidLayout(format!("unknown hint layout: {}", echoed)))
            }
        }
    }

    /// Vim players get the linear hint, everyone else the cross.
    pub fn default_for(keys: &KeyLayout) -> Self {
        if *keys == KeyLayout::VIM {
            Self::Linear
        } else {
            Self::Cross
        }
    }

    /// Hint lines with each key shown uppercase in brackets.
    pub fn render(&self, keys: &KeyLayout) -> Vec<String> {
        let [u, d, l, r] = Direction::ALL.map(|dir| keys.label(dir));
        match self {
            Self::Cross => vec![format!("   {}   ", u), format!("{}{}{}", l, d, r)],
            Self::Square => vec![format!("{}{}", u, d), format!("{}{}", l, r)],
            Self::Linear => vec![format!("{}{}{}{}", l, d, u, r)],
            Self::Custom(pattern) => pattern
                .split(['\n', '/'])
                .map(|line| {
                    line.chars()
                        .map(|c| match c.to_ascii_uppercase() {
                            'U' => u.clone(),
                            'D' => d.clone(),
                            'L' => l.clone(),
                            'R' => r.clone(),
                            _ => "   ".to_string(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<(), LayoutError> {
    for letter in ['U', 'D', 'L', 'R'] {
        let count = pattern
            .chars()
            .filter(|c| c.to_ascii_uppercase() == letter)
            .count();
        if count != 1 {
            return Err(LayoutError::InvalidLayout(format!(
                "custom hint must contain {} exactly once",
                letter
            )));
        }
    }
    if let Some(bad) = pattern
        .chars()
        .find(|c| !matches!(c.to_ascii_uppercase(), 'U' | 'D' | 'L' | 'R' | ' ' | '/' | '\n'))
    {
        return Err(LayoutError::InvalidLayout(format!(
            "unexpected character {:?} in custom hint",
            bad
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_layout_keys_are_case_insensitive() {
        let keys = KeyLayout::AZERTY;
        assert_eq!(key_to_action(press(KeyCode::Char('z')), &keys), Action::Gravity(Direction::Up));
        assert_eq!(key_to_action(press(KeyCode::Char('Q')), &keys), Action::Gravity(Direction::Left));
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('D'), KeyModifiers::SHIFT), &keys),
            Action::Gravity(Direction::Right)
        );
        assert_eq!(key_to_action(press(KeyCode::Char('w')), &keys), Action::Other('w'));
    }

    #[test]
    fn test_arrows_quit_and_confirm() {
        let keys = KeyLayout::VIM;
        assert_eq!(key_to_action(press(KeyCode::Down), &keys), Action::Gravity(Direction::Down));
        assert_eq!(key_to_action(press(KeyCode::Char('l')), &keys), Action::Gravity(Direction::Right));
        assert_eq!(key_to_action(press(KeyCode::Esc), &keys), Action::Quit);
        assert_eq!(key_to_action(press(KeyCode::Enter), &keys), Action::Confirm);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &keys),
            Action::Quit
        );
        assert_eq!(key_to_action(press(KeyCode::Tab), &keys), Action::Unbound);
        assert_eq!(key_to_action(press(KeyCode::F(5)), &keys), Action::Unbound);
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL), &keys),
            Action::None
        );
    }

    #[test]
    fn test_custom_keys() {
        let keys = KeyLayout::custom("IKJL").unwrap();
        assert_eq!(keys.direction_for('i'), Some(Direction::Up));
        assert_eq!(keys.direction_for('L'), Some(Direction::Right));
        assert!(matches!(KeyLayout::custom("wsa"), Err(LayoutError::InvalidLayout(_))));
        assert!(matches!(KeyLayout::custom("wswd"), Err(LayoutError::InvalidLayout(_))));
        assert!(matches!(KeyLayout::custom("wWad"), Err(LayoutError::InvalidLayout(_))));
        assert!(matches!(KeyLayout::custom("w ad"), Err(LayoutError::InvalidLayout(_))));
    }

    #[test]
    fn test_hint_shapes() {
        let keys = KeyLayout::QWERTY;
        assert_eq!(HintLayout::Cross.render(&keys), vec!["   [W]   ", "[A][S][D]"]);
        assert_eq!(HintLayout::Square.render(&keys), vec!["[W][S]", "[A][D]"]);
        assert_eq!(HintLayout::Linear.render(&KeyLayout::VIM), vec!["[H][J][K][L]"]);
        assert_eq!(HintLayout::default_for(&KeyLayout::VIM), HintLayout::Linear);
        assert_eq!(HintLayout::default_for(&KeyLayout::AZERTY), HintLayout::Cross);
    }

    #[test]
    fn test_custom_hint_uses_each_key_once() {
        let keys = KeyLayout::custom("udlr").unwrap();
        let hint = HintLayout::parse("custom", Some("LUR/ D")).unwrap();
        assert_eq!(hint.render(&keys), vec!["[L][U][R]", "   [D]"]);
    }

    #[test]
    fn test_hint_parse_errors() {
        assert!(matches!(HintLayout::parse("diamond", None), Err(LayoutError::InvalidLayout(_))));
        assert!(matches!(HintLayout::parse("custom", None), Err(LayoutError::InvalidLayout(_))));
        assert!(matches!(
            HintLayout::parse("custom", Some("UUDLR")),
            Err(LayoutError::InvalidLayout(_))
        ));
        assert!(matches!(
            HintLayout::parse("custom", Some("UD LRX")),
            Err(LayoutError::InvalidLayout(_))
        ));
        assert_eq!(HintLayout::parse("square", None), Ok(HintLayout::Square));
    }
}
