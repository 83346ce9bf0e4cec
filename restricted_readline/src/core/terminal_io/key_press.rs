// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter},
          str::FromStr};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

/// Examples.
///
/// ```rust
/// use restricted_readline::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress { key: Key::Character('a'), key_char: 'a' });
///
/// let enter = keypress!(@special SpecialKey::Enter);
/// assert_eq!(enter, KeyPress { key: Key::SpecialKey(SpecialKey::Enter), key_char: '\r' });
///
/// let ctrl_a = keypress!(@ctrl 'a');
/// assert_eq!(ctrl_a, KeyPress { key: Key::Character('a'), key_char: '\u{1}' });
///
/// let f1 = keypress!(@fn 1);
/// assert_eq!(f1.key, Key::FunctionKey(1));
/// ```
#[macro_export]
macro_rules! keypress {
    (@char $arg_char : expr) => {
        $crate::KeyPress::from_char($arg_char)
    };

    (@ctrl $arg_char : expr) => {
        $crate::KeyPress::from_ctrl_char($arg_char)
    };

    (@special $arg_special : expr) => {
        $crate::KeyPress::from_special_key($arg_special)
    };

    (@fn $arg_function : expr) => {
        $crate::KeyPress::from_function_key($arg_function)
    };
}

/// One key press as delivered by a [`crate::KeyPressReader`]: the symbolic key that was
/// pressed, and the literal character that key produces.
///
/// Acceptance policies look at [`Self::key_char`], while the commit and delete keys are
/// compared against [`Self::key`]. Special keys carry their control code as the literal
/// character (see [`SpecialKey::key_char`]). A `Ctrl` + letter chord carries the letter
/// as its key and the ASCII control code as its character, so `Ctrl+A` is
/// `Key::Character('a')` with `'\u{1}'`. That keeps chords from ever satisfying a
/// whitelist of printable characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub key_char: char,
}

/// Serialized as the same text [`FromStr`] accepts, so a config file says
/// `"commit_key": "enter"` or `"delete_key": "f5"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// Printable [char] produced by the key.
    Character(char),
    SpecialKey(SpecialKey),
    /// `F1` through `F12` (and beyond, on keyboards that have them).
    FunctionKey(u8),
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpecialKey {
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
}

impl SpecialKey {
    /// The literal character a terminal produces for this key. Keys that produce no
    /// character map to `'\0'`.
    #[must_use]
    pub fn key_char(self) -> char {
        match self {
            SpecialKey::Enter => '\r',
            SpecialKey::Tab | SpecialKey::BackTab => '\t',
            SpecialKey::Backspace => '\u{8}',
            SpecialKey::Esc => '\u{1b}',
            _ => '\0',
        }
    }
}

impl KeyPress {
    #[must_use]
    pub fn from_char(ch: char) -> Self {
        Self {
            key: Key::Character(ch),
            key_char: ch,
        }
    }

    /// `Ctrl` + `ch`. Letters map to their ASCII control code, anything else to `'\0'`.
    #[must_use]
    pub fn from_ctrl_char(ch: char) -> Self {
        let key_char = if ch.is_ascii_alphabetic() {
            char::from(ch.to_ascii_uppercase() as u8 & 0x1f)
        } else {
            '\0'
        };
        Self {
            key: Key::Character(ch),
            key_char,
        }
    }

    #[must_use]
    pub fn from_special_key(special_key: SpecialKey) -> Self {
        Self {
            key: Key::SpecialKey(special_key),
            key_char: special_key.key_char(),
        }
    }

    #[must_use]
    pub fn from_function_key(number: u8) -> Self {
        Self {
            key: Key::FunctionKey(number),
            key_char: '\0',
        }
    }
}

/// Typecast / convert [`KeyEvent`] to [`KeyPress`].
///
/// Only [`KeyEventKind::Press`] converts. Release and repeat events, which only show up
/// in terminals that support the kitty keyboard protocol, are rejected along with keys
/// that have no [`Key`] counterpart (media keys, lone modifiers, lock keys).
impl TryFrom<KeyEvent> for KeyPress {
    type Error = ();

    fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
        if key_event.kind != KeyEventKind::Press {
            return Err(());
        }

        let it = match key_event.code {
            KeyCode::Char(ch) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                KeyPress::from_ctrl_char(ch)
            }
            KeyCode::Char(ch) => KeyPress::from_char(ch),
            KeyCode::F(number) => KeyPress::from_function_key(number),
            KeyCode::Enter => KeyPress::from_special_key(SpecialKey::Enter),
            KeyCode::Backspace => KeyPress::from_special_key(SpecialKey::Backspace),
            KeyCode::Delete => KeyPress::from_special_key(SpecialKey::Delete),
            KeyCode::Tab => KeyPress::from_special_key(SpecialKey::Tab),
            KeyCode::BackTab => KeyPress::from_special_key(SpecialKey::BackTab),
            KeyCode::Esc => KeyPress::from_special_key(SpecialKey::Esc),
            KeyCode::Left => KeyPress::from_special_key(SpecialKey::Left),
            KeyCode::Right => KeyPress::from_special_key(SpecialKey::Right),
            KeyCode::Up => KeyPress::from_special_key(SpecialKey::Up),
            KeyCode::Down => KeyPress::from_special_key(SpecialKey::Down),
            KeyCode::Home => KeyPress::from_special_key(SpecialKey::Home),
            KeyCode::End => KeyPress::from_special_key(SpecialKey::End),
            KeyCode::PageUp => KeyPress::from_special_key(SpecialKey::PageUp),
            KeyCode::PageDown => KeyPress::from_special_key(SpecialKey::PageDown),
            KeyCode::Insert => KeyPress::from_special_key(SpecialKey::Insert),
            _ => return Err(()),
        };

        Ok(it)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a key name, a function key (f1..f24), or a single character")]
pub struct ParseKeyError(pub String);

/// Parse the names used on the command line and in config files: special key names in
/// kebab case (`enter`, `page-up`), function keys (`f5`), or a single character.
impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut chars = text.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return Ok(Key::Character(ch));
        }

        if let Ok(special_key) = SpecialKey::from_str(text) {
            return Ok(Key::SpecialKey(special_key));
        }

        text.strip_prefix(['f', 'F'])
            .and_then(|number| number.parse::<u8>().ok())
            .filter(|number| (1..=24).contains(number))
            .map(Key::FunctionKey)
            .ok_or_else(|| ParseKeyError(text.to_string()))
    }
}

impl TryFrom<String> for Key {
    type Error = ParseKeyError;

    fn try_from(text: String) -> Result<Self, Self::Error> { text.parse() }
}

impl From<Key> for String {
    fn from(key: Key) -> Self { key.to_string() }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Character(ch) => write!(f, "{ch}"),
            Key::SpecialKey(special_key) => write!(f, "{special_key}"),
            Key::FunctionKey(number) => write!(f, "f{number}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;
    use test_case::test_case;

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_plain_char() {
        let it = KeyPress::try_from(press(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(it, Ok(keypress!(@char 'x')));
    }

    #[test]
    fn test_convert_shifted_char_keeps_case() {
        let it = KeyPress::try_from(press(KeyCode::Char('X'), KeyModifiers::SHIFT));
        assert_eq!(it, Ok(keypress!(@char 'X')));
    }

    #[test]
    fn test_convert_ctrl_chord_to_control_code() {
        let it =
            KeyPress::try_from(press(KeyCode::Char('c'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(it.key, Key::Character('c'));
        assert_eq!(it.key_char, '\u{3}');
    }

    #[test]
    fn test_convert_special_keys_carry_control_codes() {
        let enter = KeyPress::try_from(press(KeyCode::Enter, KeyModifiers::NONE)).unwrap();
        assert_eq!(enter.key, Key::SpecialKey(SpecialKey::Enter));
        assert_eq!(enter.key_char, '\r');

        let backspace =
            KeyPress::try_from(press(KeyCode::Backspace, KeyModifiers::NONE)).unwrap();
        assert_eq!(backspace.key_char, '\u{8}');

        let up = KeyPress::try_from(press(KeyCode::Up, KeyModifiers::NONE)).unwrap();
        assert_eq!(up.key_char, '\0');
    }

    #[test]
    fn test_release_events_are_rejected() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(KeyPress::try_from(event), Err(()));
    }

    #[test]
    fn test_unsupported_codes_are_rejected() {
        let event = press(KeyCode::CapsLock, KeyModifiers::NONE);
        assert_eq!(KeyPress::try_from(event), Err(()));
    }

    #[test_case("enter", Key::SpecialKey(SpecialKey::Enter))]
    #[test_case("Enter", Key::SpecialKey(SpecialKey::Enter))]
    #[test_case("page-up", Key::SpecialKey(SpecialKey::PageUp))]
    #[test_case("f5", Key::FunctionKey(5))]
    #[test_case("q", Key::Character('q'))]
    #[test_case(" ", Key::Character(' '))]
    fn test_parse_key(text: &str, expected: Key) {
        assert_eq!(text.parse::<Key>(), Ok(expected));
    }

    #[test_case("f0")]
    #[test_case("f99")]
    #[test_case("nope")]
    #[test_case("")]
    fn test_parse_key_fails(text: &str) {
        assert!(text.parse::<Key>().is_err());
    }

    #[test]
    fn test_key_serde_uses_names() {
        let json = serde_json::to_string(&Key::SpecialKey(SpecialKey::PageDown)).unwrap();
        assert_eq!(json, r#""page-down""#);
        let key: Key = serde_json::from_str(r#""f12""#).unwrap();
        assert_eq!(key, Key::FunctionKey(12));
        assert!(serde_json::from_str::<Key>(r#""bogus""#).is_err());
    }

    #[test]
    fn test_special_key_names_round_trip() {
        for special_key in SpecialKey::iter() {
            let key = Key::SpecialKey(special_key);
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }
}
