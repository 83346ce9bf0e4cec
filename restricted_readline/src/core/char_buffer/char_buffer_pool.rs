// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A reuse pool for the backing storage of [`super::GrowableCharBuffer`].
//!
//! Storage is bucketed by capacity class, where each class is a power of two between
//! [`MIN_POOLED_CAPACITY`] and [`MAX_POOLED_CAPACITY`]. A request is rounded up to the
//! smallest class that fits it, so the storage handed out may be larger than asked for.
//! Requests larger than the biggest class are allocated directly and never pooled.
//!
//! Returned storage is zeroed before it goes back into a bucket, so characters typed
//! into a password prompt don't linger in memory that the next read might observe.

use std::sync::LazyLock;

use crate::StdMutex;

pub const MIN_POOLED_CAPACITY: usize = 16;
pub const MAX_POOLED_CAPACITY: usize = 1 << 20;
pub const MAX_BUFFERS_PER_CLASS: usize = 8;

const CAPACITY_CLASS_COUNT: usize = (MAX_POOLED_CAPACITY.trailing_zeros()
    - MIN_POOLED_CAPACITY.trailing_zeros()
    + 1) as usize;

type Bucket = Vec<Vec<char>>;

static SHARED_POOL: LazyLock<CharBufferPool> = LazyLock::new(CharBufferPool::new);

#[derive(Debug)]
pub struct CharBufferPool {
    buckets: StdMutex<[Bucket; CAPACITY_CLASS_COUNT]>,
}

impl Default for CharBufferPool {
    fn default() -> Self { Self::new() }
}

impl CharBufferPool {
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: StdMutex::new(std::array::from_fn(|_| Vec::new())),
        }
    }

    /// The process wide pool used by the readers in this crate.
    #[must_use]
    pub fn shared() -> &'static CharBufferPool { &SHARED_POOL }

    /// Hand out storage with a length of at least `min_capacity`. Every slot holds
    /// `'\0'`.
    #[must_use]
    pub fn rent(&self, min_capacity: usize) -> Vec<char> {
        if min_capacity == 0 {
            return Vec::new();
        }

        let Some(class_index) = class_index_for(min_capacity) else {
            return vec!['\0'; min_capacity];
        };

        let recycled = match self.buckets.lock() {
            Ok(mut buckets) => buckets[class_index].pop(),
            // A poisoned pool just stops recycling.
            Err(_) => None,
        };

        recycled.unwrap_or_else(|| vec!['\0'; class_capacity(class_index)])
    }

    /// Take back storage previously handed out by [`Self::rent`]. Storage whose length
    /// is not a capacity class, or whose bucket is full, is dropped.
    pub fn give_back(&self, mut storage: Vec<char>) {
        let Some(class_index) = exact_class_index_for(storage.len()) else {
            return;
        };

        storage.fill('\0');

        if let Ok(mut buckets) = self.buckets.lock() {
            let bucket = &mut buckets[class_index];
            if bucket.len() < MAX_BUFFERS_PER_CLASS {
                bucket.push(storage);
            }
        }
    }

    /// Number of buffers currently parked in the pool, across all classes.
    #[must_use]
    pub fn pooled_count(&self) -> usize {
        match self.buckets.lock() {
            Ok(buckets) => buckets.iter().map(Vec::len).sum(),
            Err(_) => 0,
        }
    }
}

fn class_capacity(class_index: usize) -> usize { MIN_POOLED_CAPACITY << class_index }

/// Smallest class that can hold `min_capacity`, or `None` if it is too big to pool.
fn class_index_for(min_capacity: usize) -> Option<usize> {
    if min_capacity > MAX_POOLED_CAPACITY {
        return None;
    }
    let rounded = min_capacity.max(MIN_POOLED_CAPACITY).next_power_of_two();
    Some((rounded.trailing_zeros() - MIN_POOLED_CAPACITY.trailing_zeros()) as usize)
}

/// Class whose capacity is exactly `capacity`.
fn exact_class_index_for(capacity: usize) -> Option<usize> {
    let is_class = capacity.is_power_of_two()
        && (MIN_POOLED_CAPACITY..=MAX_POOLED_CAPACITY).contains(&capacity);
    is_class.then(|| (capacity.trailing_zeros() - MIN_POOLED_CAPACITY.trailing_zeros()) as usize)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(1, 16)]
    #[test_case(16, 16)]
    #[test_case(17, 32)]
    #[test_case(100, 128)]
    #[test_case(MAX_POOLED_CAPACITY, MAX_POOLED_CAPACITY)]
    fn test_rent_rounds_up_to_capacity_class(min_capacity: usize, expected: usize) {
        let pool = CharBufferPool::new();
        let storage = pool.rent(min_capacity);
        assert_eq!(storage.len(), expected);
        assert!(storage.iter().all(|it| *it == '\0'));
    }

    #[test]
    fn test_rent_zero_is_empty() {
        let pool = CharBufferPool::new();
        assert!(pool.rent(0).is_empty());
    }

    #[test]
    fn test_oversized_request_is_not_pooled() {
        let pool = CharBufferPool::new();
        let storage = pool.rent(MAX_POOLED_CAPACITY + 1);
        assert_eq!(storage.len(), MAX_POOLED_CAPACITY + 1);

        pool.give_back(storage);
        assert_eq!(pool.pooled_count(), 0);
    }

    #[test]
    fn test_give_back_then_rent_reuses_and_zeroes() {
        let pool = CharBufferPool::new();

        let mut storage = pool.rent(20);
        storage[0] = 's';
        storage[1] = 'e';
        pool.give_back(storage);
        assert_eq!(pool.pooled_count(), 1);

        let storage = pool.rent(32);
        assert_eq!(pool.pooled_count(), 0);
        assert_eq!(storage.len(), 32);
        assert!(storage.iter().all(|it| *it == '\0'));
    }

    #[test]
    fn test_odd_sized_storage_is_dropped() {
        let pool = CharBufferPool::new();
        pool.give_back(vec!['x'; 17]);
        assert_eq!(pool.pooled_count(), 0);
    }

    #[test]
    fn test_bucket_is_bounded() {
        let pool = CharBufferPool::new();
        for _ in 0..MAX_BUFFERS_PER_CLASS + 3 {
            pool.give_back(vec!['\0'; MIN_POOLED_CAPACITY]);
        }
        assert_eq!(pool.pooled_count(), MAX_BUFFERS_PER_CLASS);
    }
}
