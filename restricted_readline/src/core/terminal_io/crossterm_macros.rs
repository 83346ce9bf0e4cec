// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Queue crossterm commands on a writer that the caller has already locked (see
/// [`crate::lock_output_device_as_mut`]). Holding one lock for the whole span of echo
/// output keeps it from interleaving with anything else writing to the same device.
///
/// Each command is queued with `?`, so the enclosing function must return a `Result`
/// whose error type is `From<std::io::Error>`. Nothing is flushed.
#[macro_export]
macro_rules! queue_commands_no_lock {
    ($writer:expr $(, $command:expr)* $(,)?) => {{
        $(
            ::crossterm::QueueableCommand::queue($writer, $command)?;
        )*
    }}
}
