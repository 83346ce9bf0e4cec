// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::IsTerminal;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// Returns [`TTYResult::IsInteractive`] if stdin is a terminal. Key by key reading needs
/// one: when stdin is piped, there is nothing to put into raw mode.
#[must_use]
pub fn is_stdin_interactive() -> TTYResult {
    if std::io::stdin().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}

/// Puts the terminal into raw mode for as long as it is alive, so that key presses are
/// delivered one at a time and are not echoed by the terminal itself. On drop, the
/// previous mode is restored, including when the read returns early with an error.
///
/// If raw mode was already on when the guard was created, it is left on.
#[derive(Debug)]
pub struct RawModeGuard {
    was_already_raw: bool,
}

impl RawModeGuard {
    /// # Errors
    ///
    /// Returns an error if the terminal mode can't be queried or changed, typically
    /// because stdin is not a terminal.
    pub fn try_new() -> std::io::Result<Self> {
        let was_already_raw = is_raw_mode_enabled()?;
        if !was_already_raw {
            enable_raw_mode()?;
        }
        Ok(Self { was_already_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_already_raw {
            // Nothing useful can be done with an error while dropping.
            let _ = disable_raw_mode();
        }
    }
}
