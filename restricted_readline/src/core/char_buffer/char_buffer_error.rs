// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;

/// Raised when the logical length of a [`super::GrowableCharBuffer`] would leave
/// `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum OutOfRangeError {
    #[error("Length can not be smaller than 0")]
    #[diagnostic(
        code(restricted_readline::char_buffer::below_zero),
        help("Check that the buffer is not empty before truncating it")
    )]
    BelowZero,

    #[error("Length {requested_len} can not be greater than capacity {capacity}")]
    #[diagnostic(code(restricted_readline::char_buffer::above_capacity))]
    AboveCapacity { requested_len: usize, capacity: usize },
}
