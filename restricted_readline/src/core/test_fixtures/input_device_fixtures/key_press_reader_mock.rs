// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crate::{KeyPress, KeyPressReader};

/// Plays back a fixed script of key presses, then reports the input as closed by
/// returning `None`.
#[derive(Debug, Clone, Default)]
pub struct TestVecKeyPressReader {
    pub key_press_vec: VecDeque<KeyPress>,
    /// How many key presses have been handed out so far.
    pub consumed: usize,
}

impl TestVecKeyPressReader {
    #[must_use]
    pub fn new(key_presses: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            key_press_vec: key_presses.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Script made of one [`KeyPress::from_char`] per character of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self { Self::new(text.chars().map(KeyPress::from_char)) }

    /// Key presses that were never read.
    #[must_use]
    pub fn remaining(&self) -> usize { self.key_press_vec.len() }
}

impl KeyPressReader for TestVecKeyPressReader {
    fn read_key_press(&mut self) -> Option<KeyPress> {
        let it = self.key_press_vec.pop_front()?;
        self.consumed += 1;
        Some(it)
    }
}
