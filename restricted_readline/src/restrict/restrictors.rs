// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Three ready-made readers, all running [`RestrictedLineReader`] with a fixed echo
//! style.
//!
//! | reader                  | what is accepted                | echo                           |
//! | ----------------------- | ------------------------------- | ------------------------------ |
//! | [`InputRestrictor`]     | passed per call                 | as configured                  |
//! | [`PasswordRestrictor`]  | passed per call                 | always the mask character      |
//! | [`PatternRestrictor`]   | a [`CharPattern`], set up front | as configured                  |

use std::time::Duration;

use super::{AcceptancePolicy, CharPattern, CoerceCommittedText, EchoPolicy, PatternOptions,
            ReaderConfig, RestrictError, RestrictedLineReader};
use crate::{KeyPressReader, OutputDevice};

pub const DEFAULT_MASK: char = '*';

/// Reads input restricted to a set of characters (or tokens) chosen per call, echoed
/// plainly, in color, or not at all, as the [`ReaderConfig`] says.
#[allow(missing_debug_implementations)]
pub struct InputRestrictor {
    reader: RestrictedLineReader,
    echo: EchoPolicy,
}

impl InputRestrictor {
    #[must_use]
    pub fn new(config: ReaderConfig) -> Self {
        Self::new_with_output_device(config, OutputDevice::new_stdout())
    }

    #[must_use]
    pub fn new_with_output_device(config: ReaderConfig, output_device: OutputDevice) -> Self {
        let echo = EchoPolicy::from_config(&config);
        Self {
            reader: RestrictedLineReader::new_with_output_device(config, output_device),
            echo,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig { self.reader.config() }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`].
    pub fn read(
        &self,
        allowed: impl Into<AcceptancePolicy>,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<String, RestrictError> {
        self.reader
            .read_with(&allowed.into(), &self.echo, key_press_reader)
    }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`], plus [`RestrictError::Format`] if the
    /// committed text is not a valid `T`.
    pub fn read_as<T: CoerceCommittedText>(
        &self,
        allowed: impl Into<AcceptancePolicy>,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<T, RestrictError> {
        T::coerce(&self.read(allowed, key_press_reader)?)
    }
}

/// Like [`InputRestrictor`], but every accepted character is drawn as the mask, even
/// when the config hides input.
#[allow(missing_debug_implementations)]
pub struct PasswordRestrictor {
    reader: RestrictedLineReader,
    mask: char,
}

impl PasswordRestrictor {
    /// Masks with [`DEFAULT_MASK`].
    #[must_use]
    pub fn new(config: ReaderConfig) -> Self {
        Self::new_with_output_device(config, OutputDevice::new_stdout())
    }

    #[must_use]
    pub fn new_with_output_device(config: ReaderConfig, output_device: OutputDevice) -> Self {
        Self {
            reader: RestrictedLineReader::new_with_output_device(config, output_device),
            mask: DEFAULT_MASK,
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig { self.reader.config() }

    #[must_use]
    pub fn mask(&self) -> char { self.mask }

    /// Mask echo in the configured colors.
    fn echo(&self) -> EchoPolicy { EchoPolicy::masked(self.mask, self.reader.config()) }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`].
    pub fn read(
        &self,
        allowed: impl Into<AcceptancePolicy>,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<String, RestrictError> {
        self.reader
            .read_with(&allowed.into(), &self.echo(), key_press_reader)
    }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`], plus [`RestrictError::Format`] if the
    /// committed text is not a valid `T`.
    pub fn read_as<T: CoerceCommittedText>(
        &self,
        allowed: impl Into<AcceptancePolicy>,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<T, RestrictError> {
        T::coerce(&self.read(allowed, key_press_reader)?)
    }
}

/// Reads input where each character must match a pattern on its own.
#[allow(missing_debug_implementations)]
pub struct PatternRestrictor {
    reader: RestrictedLineReader,
    policy: AcceptancePolicy,
    echo: EchoPolicy,
}

impl PatternRestrictor {
    #[must_use]
    pub fn new(config: ReaderConfig, pattern: CharPattern) -> Self {
        Self::new_with_output_device(config, pattern, OutputDevice::new_stdout())
    }

    /// Compile `pattern` and build a reader that echoes to stdout.
    ///
    /// # Errors
    ///
    /// See [`CharPattern::try_new`].
    pub fn try_new(
        config: ReaderConfig,
        pattern: &str,
        options: PatternOptions,
        timeout: Option<Duration>,
    ) -> Result<Self, RestrictError> {
        let pattern = CharPattern::try_new(pattern, options, timeout)?;
        Ok(Self::new(config, pattern))
    }

    #[must_use]
    pub fn new_with_output_device(
        config: ReaderConfig,
        pattern: CharPattern,
        output_device: OutputDevice,
    ) -> Self {
        let echo = EchoPolicy::from_config(&config);
        Self {
            reader: RestrictedLineReader::new_with_output_device(config, output_device),
            policy: AcceptancePolicy::Pattern(pattern),
            echo,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig { self.reader.config() }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`].
    pub fn read(
        &self,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<String, RestrictError> {
        self.reader
            .read_with(&self.policy, &self.echo, key_press_reader)
    }

    /// # Errors
    ///
    /// See [`RestrictedLineReader::read_with`], plus [`RestrictError::Format`] if the
    /// committed text is not a valid `T`.
    pub fn read_as<T: CoerceCommittedText>(
        &self,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<T, RestrictError> {
        T::coerce(&self.read(key_press_reader)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{OutputDeviceExt, SpecialKey, TestVecKeyPressReader, keypress};

    #[test]
    fn test_password_mask_builder() {
        let restrictor = PasswordRestrictor::new(ReaderConfig::default());
        assert_eq!(restrictor.mask(), DEFAULT_MASK);
        assert_eq!(restrictor.with_mask('•').mask(), '•');
    }

    #[test]
    fn test_custom_mask_is_what_gets_echoed() {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let restrictor =
            PasswordRestrictor::new_with_output_device(ReaderConfig::default(), output_device)
                .with_mask('#');
        let mut keys = TestVecKeyPressReader::new([
            keypress!(@char 'p'),
            keypress!(@char 'w'),
            keypress!(@special SpecialKey::Backspace),
            keypress!(@char 'x'),
            keypress!(@special SpecialKey::Enter),
        ]);

        let text = restrictor.read(AcceptancePolicy::Unrestricted, &mut keys).unwrap();
        assert_eq!(text, "px");
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string(),
            "##\u{8} \u{8}#"
        );
    }

    #[test]
    fn test_input_restrictor_read_as() {
        let (output_device, _) = OutputDevice::new_mock();
        let restrictor = InputRestrictor::new_with_output_device(
            ReaderConfig::try_new(1, 4).unwrap(),
            output_device,
        );
        let mut keys = TestVecKeyPressReader::new([
            keypress!(@char '-'),
            keypress!(@char '1'),
            keypress!(@char '2'),
            keypress!(@special SpecialKey::Enter),
        ]);

        let value: i16 = restrictor.read_as("-0123456789", &mut keys).unwrap();
        assert_eq!(value, -12);
    }

    #[test]
    fn test_pattern_restrictor_try_new_rejects_bad_pattern() {
        let result = PatternRestrictor::try_new(
            ReaderConfig::default(),
            "(",
            PatternOptions::default(),
            None,
        );
        assert!(matches!(result, Err(RestrictError::InvalidPattern(_))));
    }
}
