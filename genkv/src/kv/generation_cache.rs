use super::object::KeyType;
use ahash::RandomState;
use rand::Rng;
use std::hash::BuildHasher;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DEFAULT_CACHE_SIZE: usize = 3000;
pub const MAX_CACHE_SIZE: usize = u16::MAX as usize + 1;

/// Last generation observed for the key that owns a bucket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub bucket: u16,
    pub gen: u64,
    pub key: KeyType,
}

struct Stripe {
    // bumped on every commit made under this stripe
    epoch: u64,
    slots: Vec<Option<CacheEntry>>,
}

/// Direct-mapped cache of key generations.
///
/// Every key maps to exactly one bucket, `hash(key) % capacity`, and a new
/// key evicts whatever occupied its bucket. Buckets are split into lock
/// stripes (`bucket % stripes`), holding a stripe's lock serializes every
/// operation on the buckets it owns. The hasher is keyed with a random
/// seed per cache so bucket collisions cannot be planned from outside.
pub struct GenerationCache {
    stripes: Box<[Mutex<Stripe>]>,
    capacity: usize,
    hasher: RandomState,
}

impl GenerationCache {
    pub fn new(capacity: usize, stripes: usize) -> GenerationCache {
        let mut rng = rand::rng();
        let seeds = [rng.random(), rng.random(), rng.random(), rng.random()];
        GenerationCache::with_seeds(capacity, stripes, seeds)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is 0 or greater than [`MAX_CACHE_SIZE`].
    pub fn with_seeds(capacity: usize, stripes: usize, seeds: [u64; 4]) -> GenerationCache {
        assert!(
            (1..=MAX_CACHE_SIZE).contains(&capacity),
            "cache capacity must be within 1..={}, got {}",
            MAX_CACHE_SIZE,
            capacity
        );
        let stripes = stripes.clamp(1, capacity);
        let slots_per_stripe = capacity.div_ceil(stripes);
        let stripes = (0..stripes)
            .map(|_| {
                Mutex::new(Stripe {
                    epoch: 0,
                    slots: vec![None; slots_per_stripe],
                })
            })
            .collect();

        GenerationCache {
            stripes,
            capacity,
            hasher: RandomState::with_seeds(seeds[0], seeds[1], seeds[2], seeds[3]),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stripes(&self) -> usize {
        self.stripes.len()
    }

    pub fn bucket_of(&self, key: &[u8]) -> u16 {
        (self.hasher.hash_one(key) % self.capacity as u64) as u16
    }

    /// Locks the stripe owning `bucket`, the lock is held until the
    /// returned guard is dropped.
    pub fn lock(&self, bucket: u16) -> SlotGuard<'_> {
        debug_assert!((bucket as usize) < self.capacity);
        let stripes = self.stripes.len();
        let stripe = self.stripes[bucket as usize % stripes]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        SlotGuard {
            stripe,
            bucket,
            index: bucket as usize / stripes,
        }
    }
}

/// A single bucket of the cache with its stripe locked
pub struct SlotGuard<'a> {
    stripe: MutexGuard<'a, Stripe>,
    bucket: u16,
    index: usize,
}

impl SlotGuard<'_> {
    pub fn bucket(&self) -> u16 {
        self.bucket
    }

    pub fn epoch(&self) -> u64 {
        self.stripe.epoch
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.stripe.slots[self.index].as_ref()
    }

    /// Cached generation, only when the bucket is currently owned by `key`
    pub fn generation_of(&self, key: &[u8]) -> Option<u64> {
        self.entry()
            .filter(|entry| entry.key[..] == *key)
            .map(|entry| entry.gen)
    }

    /// Overwrites the bucket with a generation read from the engine
    pub fn refresh(&mut self, key: KeyType, gen: u64) {
        let bucket = self.bucket;
        self.stripe.slots[self.index] = Some(CacheEntry { bucket, gen, key });
    }

    /// Overwrites the bucket with a freshly committed generation
    pub fn record_commit(&mut self, key: KeyType, gen: u64) {
        self.refresh(key, gen);
        self.stripe.epoch = self.stripe.epoch.wrapping_add(1);
    }
}
