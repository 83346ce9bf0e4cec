// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
mod output_device_ext;
mod stdout_mock;

// Re-export.
pub use output_device_ext::*;
pub use stdout_mock::*;
