// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter},
          str::FromStr};

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

use super::RestrictError;

/// The names accepted by [`ReaderColor::from_str`]. `grey` and `gray` are both fine, as
/// are `-` and `_` separators.
const NAMED_COLORS: [(&str, Color); 16] = [
    ("black", Color::Black),
    ("dark_grey", Color::DarkGrey),
    ("red", Color::Red),
    ("dark_red", Color::DarkRed),
    ("green", Color::Green),
    ("dark_green", Color::DarkGreen),
    ("yellow", Color::Yellow),
    ("dark_yellow", Color::DarkYellow),
    ("blue", Color::Blue),
    ("dark_blue", Color::DarkBlue),
    ("magenta", Color::Magenta),
    ("dark_magenta", Color::DarkMagenta),
    ("cyan", Color::Cyan),
    ("dark_cyan", Color::DarkCyan),
    ("white", Color::White),
    ("grey", Color::Grey),
];

const ANSI_PREFIX: &str = "ansi_";
const RESET_NAME: &str = "reset";

/// Foreground or background color for echoed input.
///
/// ```
/// use restricted_readline::ReaderColor;
///
/// let orange: ReaderColor = "#FFA500".parse().unwrap();
/// assert_eq!(orange, ReaderColor::from_rgb(255, 165, 0));
/// assert_eq!(orange.to_hex().as_deref(), Some("#FFA500"));
///
/// let dark_red: ReaderColor = "Dark-Red".parse().unwrap();
/// assert_eq!(dark_red.to_string(), "dark_red");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReaderColor(pub Color);

impl ReaderColor {
    #[must_use]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self { Self(Color::Rgb { r, g, b }) }

    /// From a packed `0xAARRGGBB` value. Terminals have no alpha, so it is dropped.
    #[must_use]
    pub fn from_argb(argb: u32) -> Self {
        let [_alpha, r, g, b] = argb.to_be_bytes();
        Self::from_rgb(r, g, b)
    }

    /// `#RRGGBB` for RGB colors. Named and ANSI palette colors depend on the terminal's
    /// theme, so they have no fixed hex value.
    #[must_use]
    pub fn to_hex(&self) -> Option<String> {
        match self.0 {
            Color::Rgb { r, g, b } => Some(format!("#{r:02X}{g:02X}{b:02X}")),
            _ => None,
        }
    }

    fn try_parse_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|it| it.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            3 => {
                let expand = |nibble: u32| (nibble & 0xF) as u8 * 0x11;
                Some(Self::from_rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 | 8 => Some(Self::from_argb(value)),
            _ => None,
        }
    }

    fn try_parse_name(name: &str) -> Option<Self> {
        let normalized = name.to_ascii_lowercase().replace('-', "_").replace("gray", "grey");
        if normalized == RESET_NAME {
            return Some(Self(Color::Reset));
        }
        NAMED_COLORS
            .iter()
            .find(|(it, _)| *it == normalized)
            .map(|(_, color)| Self(*color))
    }
}

impl FromStr for ReaderColor {
    type Err = RestrictError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        let maybe_color = if let Some(digits) = trimmed.strip_prefix('#') {
            Self::try_parse_hex(digits)
        } else if let Some(index) = trimmed.strip_prefix(ANSI_PREFIX) {
            index.parse::<u8>().ok().map(|it| Self(Color::AnsiValue(it)))
        } else {
            Self::try_parse_name(trimmed)
        };

        maybe_color.ok_or_else(|| RestrictError::InvalidColor {
            input: input.to_string(),
        })
    }
}

impl TryFrom<String> for ReaderColor {
    type Error = RestrictError;

    fn try_from(input: String) -> Result<Self, Self::Error> { input.parse() }
}

impl From<ReaderColor> for String {
    fn from(color: ReaderColor) -> Self { color.to_string() }
}

impl From<Color> for ReaderColor {
    fn from(color: Color) -> Self { Self(color) }
}

impl Display for ReaderColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(hex) = self.to_hex() {
            return write!(f, "{hex}");
        }
        if let Color::AnsiValue(index) = self.0 {
            return write!(f, "{ANSI_PREFIX}{index}");
        }
        match NAMED_COLORS.iter().find(|(_, color)| *color == self.0) {
            Some((name, _)) => write!(f, "{name}"),
            None => write!(f, "{RESET_NAME}"),
        }
    }
}
