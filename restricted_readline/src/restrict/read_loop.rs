// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{AcceptancePolicy, DEBUG_RESTRICT_READLINE, EchoPolicy, ReaderConfig,
            RestrictError};
use crate::{CharBufferPool, GrowableCharBuffer, KeyPress, KeyPressReader, LockedOutputDevice,
            OutputDevice, lock_output_device_as_mut};

/// What one key press did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPressOutcome {
    Accepted,
    Deleted,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLoopState {
    Reading,
    Committed,
}

/// The one read loop every reader variant runs. It owns a validated [`ReaderConfig`]
/// and the [`OutputDevice`] that echo goes to. What gets accepted and how it is drawn
/// are passed in per call.
///
/// For each key press:
/// 1. If the policy accepts its character and the buffer is shorter than
///    [`ReaderConfig::max_len`], append it and echo it.
/// 2. Otherwise, if it is the delete key, deleting is enabled, and the buffer is not
///    empty, drop the last character and erase it on screen.
/// 3. Otherwise ignore it.
/// 4. Then, if it is the commit key and the buffer holds at least
///    [`ReaderConfig::min_len`] characters, return the buffer as text.
///
/// Acceptance is checked first, so a commit key whose character passes the policy is
/// appended before the read commits. The policy is evaluated even when the buffer is
/// full, so a pattern that runs out of time fails the read either way.
///
/// A read is blocking and single threaded. The buffer for each read is rented from the
/// shared [`CharBufferPool`] and handed back, zeroed, when the read ends, whether it
/// committed or failed.
#[allow(missing_debug_implementations)]
pub struct RestrictedLineReader {
    config: ReaderConfig,
    output_device: OutputDevice,
    pool: &'static CharBufferPool,
}

impl RestrictedLineReader {
    /// Echo goes to stdout.
    #[must_use]
    pub fn new(config: ReaderConfig) -> Self {
        Self::new_with_output_device(config, OutputDevice::new_stdout())
    }

    #[must_use]
    pub fn new_with_output_device(config: ReaderConfig, output_device: OutputDevice) -> Self {
        Self {
            config,
            output_device,
            pool: CharBufferPool::shared(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReaderConfig { &self.config }

    /// Read until the commit key is pressed with enough input in the buffer.
    ///
    /// ```
    /// use restricted_readline::*;
    ///
    /// let (output_device, stdout_mock) = OutputDevice::new_mock();
    /// let reader = RestrictedLineReader::new_with_output_device(
    ///     ReaderConfig::try_new(1, 3).unwrap(),
    ///     output_device,
    /// );
    /// let mut keys = TestVecKeyPressReader::new([
    ///     keypress!(@char '4'),
    ///     keypress!(@char '2'),
    ///     keypress!(@special SpecialKey::Enter),
    /// ]);
    ///
    /// let text = reader
    ///     .read_with(&AcceptancePolicy::from("0123456789"), &EchoPolicy::Visible, &mut keys)
    ///     .unwrap();
    /// assert_eq!(text, "42");
    /// assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "42");
    /// ```
    ///
    /// # Errors
    ///
    /// - [`RestrictError::MatchTimeout`] if a pattern policy runs out of time.
    /// - [`RestrictError::InputClosed`] if `key_press_reader` runs dry before commit.
    /// - [`RestrictError::Io`] if echo can't be written.
    ///
    /// The typed text is discarded in every case.
    pub fn read_with(
        &self,
        policy: &AcceptancePolicy,
        echo: &EchoPolicy,
        key_press_reader: &mut impl KeyPressReader,
    ) -> Result<String, RestrictError> {
        let mut buffer = GrowableCharBuffer::new_in(self.pool);
        let mut state = ReadLoopState::Reading;

        while state == ReadLoopState::Reading {
            let Some(key_press) = key_press_reader.read_key_press() else {
                DEBUG_RESTRICT_READLINE.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "restricted read: input closed before commit",
                        len = buffer.len(),
                    );
                });
                return Err(RestrictError::InputClosed);
            };

            let outcome = self.handle_key_press(key_press, policy, echo, &mut buffer)?;
            state = self.next_state(key_press, buffer.len());

            DEBUG_RESTRICT_READLINE.then(|| {
                // % is Display, ? is Debug.
                tracing::trace!(
                    message = "restricted read: key press handled",
                    outcome = ?outcome,
                    state = ?state,
                    len = buffer.len(),
                );
            });
        }

        DEBUG_RESTRICT_READLINE.then(|| {
            tracing::debug!(message = "restricted read: committed", len = buffer.len());
        });

        Ok(buffer.to_text())
    }

    fn handle_key_press(
        &self,
        key_press: KeyPress,
        policy: &AcceptancePolicy,
        echo: &EchoPolicy,
        buffer: &mut GrowableCharBuffer<'_>,
    ) -> Result<KeyPressOutcome, RestrictError> {
        let KeyPress { key, key_char } = key_press;

        if policy.accepts(key_char)? && buffer.len() < self.config.max_len() {
            buffer.append(key_char);
            let writer: LockedOutputDevice<'_> = lock_output_device_as_mut!(self.output_device);
            echo.echo_char(writer, key_char)?;
            writer.flush()?;
            return Ok(KeyPressOutcome::Accepted);
        }

        if key == self.config.delete_key()
            && !buffer.is_empty()
            && self.config.delete_enabled()
        {
            buffer.truncate_by_one()?;
            let writer: LockedOutputDevice<'_> = lock_output_device_as_mut!(self.output_device);
            echo.erase_last(writer)?;
            writer.flush()?;
            return Ok(KeyPressOutcome::Deleted);
        }

        Ok(KeyPressOutcome::Ignored)
    }

    fn next_state(&self, key_press: KeyPress, len: usize) -> ReadLoopState {
        if key_press.key == self.config.commit_key() && len >= self.config.min_len() {
            ReadLoopState::Committed
        } else {
            ReadLoopState::Reading
        }
    }
}
