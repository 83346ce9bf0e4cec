// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-memory stand-ins for the terminal, used by this crate's tests and available to
//! downstream tests that drive a reader without a TTY.

// Attach sources.
mod input_device_fixtures;
mod output_device_fixtures;

// Re-export.
pub use input_device_fixtures::*;
pub use output_device_fixtures::*;
