// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
mod key_press_reader_mock;

// Re-export.
pub use key_press_reader_mock::*;
