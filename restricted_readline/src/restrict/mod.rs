// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The restricted read loop and everything it is parameterized by. Start with
//! [`InputRestrictor`], [`PasswordRestrictor`], or [`PatternRestrictor`]. Use
//! [`RestrictedLineReader::read_with`] directly to pick the policies per call.

/// Emit [`tracing`] events from the read loop. Events carry lengths and outcomes,
/// never the typed characters.
pub const DEBUG_RESTRICT_READLINE: bool = true;

// Attach sources.
mod acceptance_policy;
mod char_pattern;
mod echo_policy;
mod read_loop;
mod reader_color;
mod reader_config;
mod restrict_error;
mod restrictors;
mod result_coercion;

// Re-export.
pub use acceptance_policy::*;
pub use char_pattern::*;
pub use echo_policy::*;
pub use read_loop::*;
pub use reader_color::*;
pub use reader_config::*;
pub use restrict_error::*;
pub use restrictors::*;
pub use result_coercion::*;
