// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use miette::Diagnostic;

use crate::OutOfRangeError;

/// Everything a read (or building a reader) can fail with. None of these carry the
/// characters that were typed, so they are safe to log or show for password input.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum RestrictError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigError),

    #[error(
        "Matching a key press against /{pattern}/ took {elapsed:?}, longer than the \
         {timeout:?} timeout"
    )]
    #[diagnostic(
        code(restricted_readline::pattern::match_timeout),
        help("Simplify the pattern, or raise the timeout")
    )]
    MatchTimeout {
        pattern: String,
        timeout: Duration,
        elapsed: Duration,
    },

    #[error("The committed input is not a valid {target_type}: {reason}")]
    #[diagnostic(code(restricted_readline::coerce::format))]
    Format {
        target_type: &'static str,
        reason: String,
    },

    #[error("The pattern does not compile")]
    #[diagnostic(code(restricted_readline::pattern::invalid))]
    InvalidPattern(#[from] regex::Error),

    #[error("'{input}' is not a color")]
    #[diagnostic(
        code(restricted_readline::color::invalid),
        help(
            "Use a color name like `dark_red`, `ansi_208`, or hex in the form `#RGB`, \
             `#RRGGBB`, or `#AARRGGBB`"
        )
    )]
    InvalidColor { input: String },

    #[error("Key press input closed before the commit key was accepted")]
    #[diagnostic(code(restricted_readline::read::input_closed))]
    InputClosed,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Buffer(#[from] OutOfRangeError),

    #[error("Terminal I/O failed")]
    #[diagnostic(code(restricted_readline::io))]
    Io(#[from] std::io::Error),

    #[error("The reader configuration file is malformed")]
    #[diagnostic(code(restricted_readline::config::file))]
    ConfigFile(#[from] serde_json::Error),
}

/// Invalid combinations of reader options. A reader is never built with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    #[error("Maximum length {max} is smaller than 1")]
    #[diagnostic(code(restricted_readline::config::max_too_small))]
    MaxLengthTooSmall { max: usize },

    #[error("Minimum length {min} is greater than maximum length {max}")]
    #[diagnostic(code(restricted_readline::config::min_exceeds_max))]
    MinExceedsMax { min: usize, max: usize },

    #[error("Pattern match timeout is zero")]
    #[diagnostic(
        code(restricted_readline::config::zero_match_timeout),
        help("Leave the timeout out to match without one")
    )]
    ZeroMatchTimeout,
}
