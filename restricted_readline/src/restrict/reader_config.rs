// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{ConfigError, ReaderColor, RestrictError};
use crate::{Key, SpecialKey};

pub const DEFAULT_MIN_LEN: usize = 0;
pub const DEFAULT_MAX_LEN: usize = 256;

/// Mutable, unvalidated reader options. Fill one in (or deserialize one) and turn it
/// into a [`ReaderConfig`] with [`ReaderConfig::try_from`].
///
/// Every field is optional in JSON, missing ones take their [`Default`] value:
///
/// ```json
/// {
///   "visible": true,
///   "foreground": "dark_green",
///   "commit_key": "enter",
///   "delete_key": "backspace",
///   "min_len": 3,
///   "max_len": 8
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfigDraft {
    pub visible: bool,
    pub foreground: Option<ReaderColor>,
    pub background: Option<ReaderColor>,
    pub commit_key: Key,
    pub delete_key: Key,
    pub delete_enabled: bool,
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for ReaderConfigDraft {
    fn default() -> Self {
        Self {
            visible: true,
            foreground: None,
            background: None,
            commit_key: Key::SpecialKey(SpecialKey::Enter),
            delete_key: Key::SpecialKey(SpecialKey::Backspace),
            delete_enabled: true,
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

/// Validated reader options. Immutable once built, and shared by every read a reader
/// performs. Holds `1 <= max_len` and `min_len <= max_len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    visible: bool,
    foreground: Option<ReaderColor>,
    background: Option<ReaderColor>,
    commit_key: Key,
    delete_key: Key,
    delete_enabled: bool,
    min_len: usize,
    max_len: usize,
}

impl TryFrom<ReaderConfigDraft> for ReaderConfig {
    type Error = ConfigError;

    fn try_from(draft: ReaderConfigDraft) -> Result<Self, Self::Error> {
        if draft.max_len < 1 {
            return Err(ConfigError::MaxLengthTooSmall { max: draft.max_len });
        }
        if draft.min_len > draft.max_len {
            return Err(ConfigError::MinExceedsMax {
                min: draft.min_len,
                max: draft.max_len,
            });
        }

        Ok(Self::from_draft_unchecked(draft))
    }
}

impl Default for ReaderConfig {
    /// The default draft always validates.
    fn default() -> Self { Self::from_draft_unchecked(ReaderConfigDraft::default()) }
}

impl ReaderConfig {
    fn from_draft_unchecked(draft: ReaderConfigDraft) -> Self {
        let ReaderConfigDraft {
            visible,
            foreground,
            background,
            commit_key,
            delete_key,
            delete_enabled,
            min_len,
            max_len,
        } = draft;
        Self {
            visible,
            foreground,
            background,
            commit_key,
            delete_key,
            delete_enabled,
            min_len,
            max_len,
        }
    }

    /// Default options with the given length bounds.
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn try_new(min_len: usize, max_len: usize) -> Result<Self, ConfigError> {
        Self::try_configure(|draft| {
            draft.min_len = min_len;
            draft.max_len = max_len;
        })
    }

    /// Start from the defaults and let `configure` change what it needs.
    ///
    /// ```
    /// use restricted_readline::*;
    ///
    /// let config = ReaderConfig::try_configure(|it| {
    ///     it.max_len = 4;
    ///     it.commit_key = Key::SpecialKey(SpecialKey::Tab);
    /// })
    /// .unwrap();
    /// assert_eq!(config.max_len(), 4);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`ConfigError`].
    pub fn try_configure(
        configure: impl FnOnce(&mut ReaderConfigDraft),
    ) -> Result<Self, ConfigError> {
        let mut draft = ReaderConfigDraft::default();
        configure(&mut draft);
        Self::try_from(draft)
    }

    /// Parse a [`ReaderConfigDraft`] from JSON and validate it.
    ///
    /// # Errors
    ///
    /// [`RestrictError::ConfigFile`] if the JSON is malformed, or
    /// [`RestrictError::Configuration`] if the options are invalid.
    pub fn try_from_json_str(json: &str) -> Result<Self, RestrictError> {
        let draft: ReaderConfigDraft = serde_json::from_str(json)?;
        Ok(Self::try_from(draft)?)
    }

    /// A draft holding these options, to derive a changed config from.
    #[must_use]
    pub fn to_draft(&self) -> ReaderConfigDraft {
        ReaderConfigDraft {
            visible: self.visible,
            foreground: self.foreground,
            background: self.background,
            commit_key: self.commit_key,
            delete_key: self.delete_key,
            delete_enabled: self.delete_enabled,
            min_len: self.min_len,
            max_len: self.max_len,
        }
    }

    #[must_use]
    pub fn visible(&self) -> bool { self.visible }

    #[must_use]
    pub fn foreground(&self) -> Option<ReaderColor> { self.foreground }

    #[must_use]
    pub fn background(&self) -> Option<ReaderColor> { self.background }

    #[must_use]
    pub fn commit_key(&self) -> Key { self.commit_key }

    #[must_use]
    pub fn delete_key(&self) -> Key { self.delete_key }

    #[must_use]
    pub fn delete_enabled(&self) -> bool { self.delete_enabled }

    #[must_use]
    pub fn min_len(&self) -> usize { self.min_len }

    #[must_use]
    pub fn max_len(&self) -> usize { self.max_len }
}
