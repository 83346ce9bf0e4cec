// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The two seams between a reader and the terminal: [`KeyPressReader`] for input and
//! [`OutputDevice`] for echo. Both can be swapped for in-memory fixtures in tests.

// Attach sources.
mod crossterm_macros;
mod key_press;
mod key_press_reader;
mod output_device;
mod terminal_io_type_aliases;

// Re-export.
pub use key_press::*;
pub use key_press_reader::*;
pub use output_device::*;
pub use terminal_io_type_aliases::*;
