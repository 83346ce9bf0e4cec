// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `restricted_readline`
//!
//! Character-at-a-time line input for text terminals, where what the user is allowed to
//! type is decided by you and not by the terminal's own line editor.
//!
//! Every key press goes through one small state machine:
//!
//! 1. If the key's character satisfies the active [`AcceptancePolicy`] and the line is
//!    shorter than the configured maximum, the character is appended and echoed
//!    according to the [`EchoPolicy`] (silent, plain, colored, or masked).
//! 2. Otherwise, if the key is the configured delete key, deleting is enabled, and the
//!    line is not empty, the last character is removed and erased from the display.
//! 3. Anything else is ignored.
//! 4. Finally, if the key is the configured commit key and the line is at least the
//!    configured minimum length, the line is returned.
//!
//! # Readers
//!
//! | Reader                    | Acceptance                          | Echo                         |
//! | :------------------------ | :---------------------------------- | :--------------------------- |
//! | [`InputRestrictor`]       | char set or tokens, chosen per call | silent, plain, or colored    |
//! | [`PasswordRestrictor`]    | char set or tokens, chosen per call | mask character               |
//! | [`PatternRestrictor`]     | regex baked in at construction      | silent, plain, or colored    |
//! | [`RestrictedLineReader`]  | any policy, chosen per call         | any echo, chosen per call    |
//!
//! All of them share the same loop. Each can also parse the committed line into a
//! scalar with `read_as::<T>()` (see [`CoerceCommittedText`]).
//!
//! # Dependency injection
//!
//! Key presses come from a [`KeyPressReader`] and echo goes to an [`OutputDevice`].
//! In a real terminal, use [`CrosstermKeyPressReader`] while holding a
//! [`RawModeGuard`]. In tests, use [`TestVecKeyPressReader`] and
//! [`OutputDeviceExt::new_mock()`].
//!
//! ```no_run
//! use miette::IntoDiagnostic as _;
//! use restricted_readline::{CrosstermKeyPressReader, InputRestrictor, RawModeGuard,
//!                           ReaderConfig};
//!
//! fn main() -> miette::Result<()> {
//!     let config = ReaderConfig::try_new(3, 5)?;
//!     let restrictor = InputRestrictor::new(config);
//!     let line = {
//!         let _raw_mode = RawModeGuard::try_new().into_diagnostic()?;
//!         restrictor.read("abc", &mut CrosstermKeyPressReader)?
//!     };
//!     println!("\r\n{line}");
//!     Ok(())
//! }
//! ```

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(rust_2018_idioms)]
// Enable unwrap_in_result lint for production code, but allow it in tests.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod core;
pub mod restrict;

// Re-export.
pub use core::*;
pub use restrict::*;
