// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

use super::{CharBufferPool, OutOfRangeError};

/// Append-only character sequence with amortized O(1) [`append`](Self::append) and
/// truncation by length. It knows nothing about input policy.
///
/// The backing storage is rented from a [`CharBufferPool`]. Its length is the capacity
/// of the buffer; only the first [`len`](Self::len) slots hold text. When the buffer
/// is full, capacity grows to `max(len + 1, capacity * 2)` (or more, since the pool
/// rounds requests up to a capacity class), the text is copied over, and the old
/// storage goes back to the pool. Dropping the buffer returns its storage too, so a
/// buffer never outlives the read that created it.
#[derive(Debug)]
pub struct GrowableCharBuffer<'pool> {
    storage: Vec<char>,
    len: usize,
    pool: &'pool CharBufferPool,
}

impl GrowableCharBuffer<'static> {
    #[must_use]
    pub fn new() -> Self { Self::new_in(CharBufferPool::shared()) }
}

impl Default for GrowableCharBuffer<'static> {
    fn default() -> Self { Self::new() }
}

impl<'pool> GrowableCharBuffer<'pool> {
    /// Empty buffer with zero capacity. Nothing is rented until the first append.
    #[must_use]
    pub fn new_in(pool: &'pool CharBufferPool) -> Self {
        Self {
            storage: Vec::new(),
            len: 0,
            pool,
        }
    }

    #[must_use]
    pub fn with_capacity_in(capacity: usize, pool: &'pool CharBufferPool) -> Self {
        Self {
            storage: pool.rent(capacity),
            len: 0,
            pool,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.len }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[must_use]
    pub fn capacity(&self) -> usize { self.storage.len() }

    #[inline]
    pub fn append(&mut self, ch: char) {
        let pos = self.len;
        if pos < self.storage.len() {
            self.storage[pos] = ch;
            self.len = pos + 1;
        } else {
            self.grow_and_append(ch);
        }
    }

    pub fn append_str(&mut self, text: &str) {
        let additional = text.chars().count();
        if self.len + additional > self.storage.len() {
            self.grow(additional);
        }
        for ch in text.chars() {
            self.storage[self.len] = ch;
            self.len += 1;
        }
    }

    /// Drop the last character.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError::BelowZero`] if the buffer is empty.
    pub fn truncate_by_one(&mut self) -> Result<(), OutOfRangeError> {
        match self.len.checked_sub(1) {
            Some(new_len) => self.set_len(new_len),
            None => Err(OutOfRangeError::BelowZero),
        }
    }

    /// Move the logical end of the text. Slots past the new length keep whatever they
    /// held and become unused capacity.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError::AboveCapacity`] if `new_len` exceeds the capacity.
    pub fn set_len(&mut self, new_len: usize) -> Result<(), OutOfRangeError> {
        if new_len > self.storage.len() {
            return Err(OutOfRangeError::AboveCapacity {
                requested_len: new_len,
                capacity: self.storage.len(),
            });
        }
        self.len = new_len;
        Ok(())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[char] { &self.storage[..self.len] }

    /// The text from index 0 to [`len`](Self::len), ignoring unused capacity.
    #[must_use]
    pub fn to_text(&self) -> String { self.as_slice().iter().collect() }

    #[inline(never)]
    fn grow_and_append(&mut self, ch: char) {
        self.grow(1);
        self.append(ch);
    }

    #[inline(never)]
    fn grow(&mut self, additional_capacity_beyond_len: usize) {
        let requested = usize::max(
            self.len + additional_capacity_beyond_len,
            self.storage.len() * 2,
        );
        let mut replacement = self.pool.rent(requested);
        replacement[..self.len].copy_from_slice(&self.storage[..self.len]);
        let previous = std::mem::replace(&mut self.storage, replacement);
        self.pool.give_back(previous);
    }
}

impl Drop for GrowableCharBuffer<'_> {
    fn drop(&mut self) { self.pool.give_back(std::mem::take(&mut self.storage)); }
}

impl Display for GrowableCharBuffer<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_slice().iter().try_for_each(|ch| write!(f, "{ch}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MIN_POOLED_CAPACITY;

    #[test]
    fn test_new_buffer_is_empty_with_no_capacity() {
        let pool = CharBufferPool::new();
        let buffer = GrowableCharBuffer::new_in(&pool);
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 0);
        assert_eq!(buffer.to_text(), "");
    }

    #[test]
    fn test_first_append_rents_smallest_class() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);
        buffer.append('a');
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), MIN_POOLED_CAPACITY);
    }

    #[test]
    fn test_growth_doubles_capacity_and_keeps_text() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);

        let mut expected = String::new();
        let mut capacities = vec![];
        for index in 0..100_u32 {
            let ch = char::from_u32('a' as u32 + index % 26).unwrap();
            buffer.append(ch);
            expected.push(ch);
            if capacities.last() != Some(&buffer.capacity()) {
                capacities.push(buffer.capacity());
            }
            assert_eq!(buffer.to_text(), expected);
        }

        assert_eq!(capacities, vec![16, 32, 64, 128]);
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_growth_from_caller_supplied_capacity() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::with_capacity_in(16, &pool);
        buffer.append_str("0123456789abcdef");
        assert_eq!(buffer.capacity(), 16);

        buffer.append('g');
        assert_eq!(buffer.capacity(), 32);
        assert_eq!(buffer.to_text(), "0123456789abcdefg");
    }

    #[test]
    fn test_append_str_grows_enough_for_long_text() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);
        let long_text = "x".repeat(40);
        buffer.append_str(&long_text);
        assert_eq!(buffer.to_text(), long_text);
        assert_eq!(buffer.capacity(), 64);
    }

    #[test]
    fn test_truncate_by_one() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);
        buffer.append_str("abc");

        buffer.truncate_by_one().unwrap();
        assert_eq!(buffer.to_text(), "ab");

        buffer.append('z');
        assert_eq!(buffer.to_text(), "abz");
    }

    #[test]
    fn test_truncate_empty_is_out_of_range() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);
        assert_eq!(buffer.truncate_by_one(), Err(OutOfRangeError::BelowZero));
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn test_set_len_above_capacity_is_out_of_range() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::with_capacity_in(4, &pool);
        assert_eq!(
            buffer.set_len(17),
            Err(OutOfRangeError::AboveCapacity {
                requested_len: 17,
                capacity: 16
            })
        );
        assert_eq!(buffer.set_len(16), Ok(()));
    }

    #[test]
    fn test_to_text_ignores_trailing_capacity() {
        let pool = CharBufferPool::new();
        let mut buffer = GrowableCharBuffer::new_in(&pool);
        buffer.append_str("hello");
        buffer.set_len(2).unwrap();
        assert_eq!(buffer.to_text(), "he");
        assert_eq!(buffer.to_string(), "he");
    }

    #[test]
    fn test_drop_returns_storage_to_pool() {
        let pool = CharBufferPool::new();
        {
            let mut buffer = GrowableCharBuffer::new_in(&pool);
            for _ in 0..20 {
                buffer.append('y');
            }
            // The 16 slot storage was already given back when growing to 32.
            assert_eq!(pool.pooled_count(), 1);
        }
        assert_eq!(pool.pooled_count(), 2);
    }
}
