// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Append-only, truncate-capable character storage for a single read. See
//! [`GrowableCharBuffer`] and [`CharBufferPool`].

// Attach sources.
mod char_buffer_error;
mod char_buffer_pool;
mod growable_char_buffer;

// Re-export.
pub use char_buffer_error::*;
pub use char_buffer_pool::*;
pub use growable_char_buffer::*;
