// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::Event;

use crate::KeyPress;

/// Source of key presses for a read. One call blocks until one key is available.
///
/// Returning `None` means no more keys will ever arrive (the terminal went away, or a
/// scripted source ran dry). A reader that sees `None` before its commit key gives up
/// with [`crate::RestrictError::InputClosed`].
pub trait KeyPressReader {
    fn read_key_press(&mut self) -> Option<KeyPress>;
}

/// Reads key presses from the real terminal using [`crossterm::event::read`]. The
/// terminal should be in raw mode (see [`crate::RawModeGuard`]), otherwise keys only
/// show up after the user hits `Enter`, and the terminal echoes them on its own.
///
/// Mouse, focus, paste, and resize events are skipped, as are key events that have no
/// [`KeyPress`] counterpart.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermKeyPressReader;

impl KeyPressReader for CrosstermKeyPressReader {
    fn read_key_press(&mut self) -> Option<KeyPress> {
        next_key_press(crossterm::event::read)
    }
}

/// Pull events from `read_event` until one converts to a [`KeyPress`]. A read error
/// ends the input; it is logged since [`KeyPressReader`] can't carry it.
fn next_key_press(
    mut read_event: impl FnMut() -> std::io::Result<Event>,
) -> Option<KeyPress> {
    loop {
        let event = match read_event() {
            Ok(event) => event,
            Err(error) => {
                // % is Display, ? is Debug.
                tracing::error!(
                    message = "Reading a terminal event failed, ending input",
                    error = %error
                );
                return None;
            }
        };
        let Event::Key(key_event) = event else {
            continue;
        };
        if let Ok(key_press) = KeyPress::try_from(key_event) {
            return Some(key_press);
        }
    }
}
