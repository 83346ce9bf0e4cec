// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor};

use super::{ReaderColor, ReaderConfig};
use crate::{LockedOutputDevice, queue_commands_no_lock};

/// Moves back one column, blanks it, and moves back again.
pub const ERASE_LAST_CHAR: &str = "\u{8} \u{8}";

/// What an accepted character looks like on screen. Nothing here flushes, the read
/// loop flushes once per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoPolicy {
    /// Nothing is written, not even erase sequences.
    Silent,
    Visible,
    Colored {
        foreground: Option<ReaderColor>,
        background: Option<ReaderColor>,
    },
    /// `mask` is drawn in place of every accepted character.
    Masked {
        mask: char,
        foreground: Option<ReaderColor>,
        background: Option<ReaderColor>,
    },
}

impl EchoPolicy {
    /// Plain echo as configured: silent when input is hidden, colored when a color is
    /// set, visible otherwise.
    #[must_use]
    pub fn from_config(config: &ReaderConfig) -> Self {
        match (config.visible(), config.foreground(), config.background()) {
            (false, _, _) => EchoPolicy::Silent,
            (true, None, None) => EchoPolicy::Visible,
            (true, foreground, background) => EchoPolicy::Colored {
                foreground,
                background,
            },
        }
    }

    /// Masked echo in the configured colors. The visibility flag is ignored, password
    /// input always shows its mask.
    #[must_use]
    pub fn masked(mask: char, config: &ReaderConfig) -> Self {
        EchoPolicy::Masked {
            mask,
            foreground: config.foreground(),
            background: config.background(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool { !matches!(self, EchoPolicy::Silent) }

    /// Draw an accepted character.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn echo_char(&self, writer: LockedOutputDevice<'_>, ch: char) -> std::io::Result<()> {
        match *self {
            EchoPolicy::Silent => Ok(()),
            EchoPolicy::Visible => write_colored(writer, ch, None, None),
            EchoPolicy::Colored {
                foreground,
                background,
            } => write_colored(writer, ch, foreground, background),
            EchoPolicy::Masked {
                mask,
                foreground,
                background,
            } => write_colored(writer, mask, foreground, background),
        }
    }

    /// Undraw the last echoed character, whether it was the literal or its mask.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails.
    pub fn erase_last(&self, writer: LockedOutputDevice<'_>) -> std::io::Result<()> {
        if self.is_enabled() {
            queue_commands_no_lock!(writer, Print(ERASE_LAST_CHAR));
        }
        Ok(())
    }
}

/// Colors only apply to this one character. Afterwards the terminal goes back to its
/// default colors, since the ones in effect before can't be queried.
fn write_colored(
    writer: LockedOutputDevice<'_>,
    ch: char,
    foreground: Option<ReaderColor>,
    background: Option<ReaderColor>,
) -> std::io::Result<()> {
    if foreground.is_none() && background.is_none() {
        queue_commands_no_lock!(writer, Print(ch));
        return Ok(());
    }

    if let Some(ReaderColor(color)) = foreground {
        queue_commands_no_lock!(writer, SetForegroundColor(color));
    }
    if let Some(ReaderColor(color)) = background {
        queue_commands_no_lock!(writer, SetBackgroundColor(color));
    }
    queue_commands_no_lock!(writer, Print(ch), ResetColor);

    Ok(())
}

#[cfg(test)]
mod tests {
    use crossterm::style::Color;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{OutputDevice, OutputDeviceExt, StdoutMock, lock_output_device_as_mut};

    fn echo_all(echo: EchoPolicy, text: &str) -> StdoutMock {
        let (device, stdout_mock) = OutputDevice::new_mock();
        let writer: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);
        for ch in text.chars() {
            echo.echo_char(writer, ch).unwrap();
        }
        stdout_mock
    }

    #[test]
    fn test_from_config() {
        let hidden = ReaderConfig::try_configure(|it| it.visible = false).unwrap();
        assert_eq!(EchoPolicy::from_config(&hidden), EchoPolicy::Silent);

        assert_eq!(
            EchoPolicy::from_config(&ReaderConfig::default()),
            EchoPolicy::Visible
        );

        let red = ReaderConfig::try_configure(|it| it.foreground = Some(ReaderColor(Color::Red)))
            .unwrap();
        assert_eq!(
            EchoPolicy::from_config(&red),
            EchoPolicy::Colored {
                foreground: Some(ReaderColor(Color::Red)),
                background: None
            }
        );
    }

    #[test]
    fn test_masked_ignores_visibility() {
        let hidden = ReaderConfig::try_configure(|it| it.visible = false).unwrap();
        let echo = EchoPolicy::masked('#', &hidden);
        assert!(echo.is_enabled());
        assert_eq!(echo_all(echo, "abc").get_copy_of_buffer_as_string(), "###");
    }

    #[test]
    fn test_visible_writes_literal() {
        let stdout_mock = echo_all(EchoPolicy::Visible, "hi!");
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "hi!");
    }

    #[test]
    fn test_silent_writes_nothing() {
        let stdout_mock = echo_all(EchoPolicy::Silent, "secret");
        assert_eq!(stdout_mock.get_copy_of_buffer(), Vec::<u8>::new());
    }

    #[test]
    fn test_colored_wraps_each_char_in_color_codes() {
        let echo = EchoPolicy::Colored {
            foreground: Some(ReaderColor(Color::Red)),
            background: Some(ReaderColor::from_rgb(0, 0, 255)),
        };
        let stdout_mock = echo_all(echo, "ok");

        let raw = stdout_mock.get_copy_of_buffer_as_string();
        assert!(raw.starts_with("\x1b["));
        assert!(raw.contains("\x1b[0m"));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "ok");
    }

    #[test]
    fn test_erase_last() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        let writer: LockedOutputDevice<'_> = lock_output_device_as_mut!(device);

        EchoPolicy::Silent.erase_last(writer).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "");

        EchoPolicy::Visible.erase_last(writer).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), ERASE_LAST_CHAR);
    }
}
