// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use rustc_hash::FxHashSet;

use super::{CharPattern, RestrictError};

/// Decides whether the literal character of a key press goes into the buffer.
///
/// Most callers never build one by hand and pass something convertible instead:
///
/// | from                                          | policy            |
/// | --------------------------------------------- | ----------------- |
/// | `&str`, `String`, `&[char]`, `Vec<char>`      | [`Self::CharSet`]     |
/// | `&[&str]`, `[&str; N]`, `Vec<&str>`, `Vec<String>` | [`Self::AnyOfTokens`] |
/// | [`CharPattern`]                               | [`Self::Pattern`]     |
#[derive(Debug, Clone)]
pub enum AcceptancePolicy {
    /// Accept exactly these characters.
    CharSet(FxHashSet<char>),
    /// Accept any character that occurs in at least one of these tokens.
    AnyOfTokens(Vec<String>),
    /// Accept characters the pattern matches.
    Pattern(CharPattern),
    /// Accept every character that is not a control character, so special keys like
    /// `Enter`, `Tab` and the arrows never land in the buffer.
    Unrestricted,
}

impl AcceptancePolicy {
    /// # Errors
    ///
    /// [`RestrictError::MatchTimeout`] from a [`Self::Pattern`] that ran out of time.
    /// The other variants never fail.
    pub fn accepts(&self, ch: char) -> Result<bool, RestrictError> {
        match self {
            AcceptancePolicy::CharSet(chars) => Ok(chars.contains(&ch)),
            AcceptancePolicy::AnyOfTokens(tokens) => {
                Ok(tokens.iter().any(|token| token.contains(ch)))
            }
            AcceptancePolicy::Pattern(pattern) => pattern.is_match(ch),
            AcceptancePolicy::Unrestricted => Ok(!ch.is_control()),
        }
    }
}

impl From<FxHashSet<char>> for AcceptancePolicy {
    fn from(chars: FxHashSet<char>) -> Self { Self::CharSet(chars) }
}

impl From<&str> for AcceptancePolicy {
    fn from(chars: &str) -> Self { Self::CharSet(chars.chars().collect()) }
}

impl From<String> for AcceptancePolicy {
    fn from(chars: String) -> Self { Self::from(chars.as_str()) }
}

impl From<&String> for AcceptancePolicy {
    fn from(chars: &String) -> Self { Self::from(chars.as_str()) }
}

impl From<&[char]> for AcceptancePolicy {
    fn from(chars: &[char]) -> Self { Self::CharSet(chars.iter().copied().collect()) }
}

impl From<Vec<char>> for AcceptancePolicy {
    fn from(chars: Vec<char>) -> Self { Self::CharSet(chars.into_iter().collect()) }
}

impl From<&[&str]> for AcceptancePolicy {
    fn from(tokens: &[&str]) -> Self {
        Self::AnyOfTokens(tokens.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for AcceptancePolicy {
    fn from(tokens: [&str; N]) -> Self { Self::from(tokens.as_slice()) }
}

impl From<Vec<&str>> for AcceptancePolicy {
    fn from(tokens: Vec<&str>) -> Self { Self::from(tokens.as_slice()) }
}

impl From<Vec<String>> for AcceptancePolicy {
    fn from(tokens: Vec<String>) -> Self { Self::AnyOfTokens(tokens) }
}

impl From<&[String]> for AcceptancePolicy {
    fn from(tokens: &[String]) -> Self { Self::AnyOfTokens(tokens.to_vec()) }
}

impl From<CharPattern> for AcceptancePolicy {
    fn from(pattern: CharPattern) -> Self { Self::Pattern(pattern) }
}
