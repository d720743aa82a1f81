use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::registry::Registry;

/// The indexing strategy a table uses to turn a key into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashFunction {
    Module,
    Multiplication,
    Folding,
}

impl HashFunction {
    pub const ALL: [HashFunction; 3] = [
        HashFunction::Module,
        HashFunction::Multiplication,
        HashFunction::Folding,
    ];

    /// Reciprocal of the golden ratio, truncated to ten places.
    pub const MULTIPLIER: f64 = 0.6180339887;

    pub fn name(&self) -> &'static str {
        match self {
            HashFunction::Module => "MODULE",
            HashFunction::Multiplication => "MULTIPLICATION",
            HashFunction::Folding => "FOLDING",
        }
    }

    /// Maps `key` into `[0, capacity)`. `capacity` must be non-zero, which
    /// `HashTable::new` guarantees for every table.
    pub fn index(&self, key: usize, capacity: usize) -> usize {
        debug_assert!(capacity > 0);
        match self {
            HashFunction::Module => key % capacity,
            HashFunction::Multiplication => {
                let frac: f64 = (key as f64 * Self::MULTIPLIER).fract();
                let i: usize = (capacity as f64 * frac) as usize;
                // rounding in the product can land exactly on `capacity`
                i.min(capacity - 1)
            }
            HashFunction::Folding => fold(key) % capacity,
        }
    }
}

/// Splits the decimal digits of `key` into chunks of `max(1, len / 3)` digits,
/// left to right, and sums the chunks. The last chunk may be shorter.
fn fold(key: usize) -> usize {
    let digits: String = key.to_string();
    let bytes: &[u8] = digits.as_bytes();
    let chunk_size: usize = (bytes.len() / 3).max(1);
    bytes
        .chunks(chunk_size)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0usize, |acc, b| acc * 10 + usize::from(b - b'0'))
        })
        .sum()
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "module" | "modulo" => Ok(HashFunction::Module),
            "multiplication" | "multiplicative" => Ok(HashFunction::Multiplication),
            "folding" => Ok(HashFunction::Folding),
            _ => Err(Error::UnknownHashFunction(s.to_string())),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    registry: Registry,
    next: Option<Box<Bucket>>,
}

/// Fixed-capacity hash table resolving collisions by separate chaining.
///
/// Each slot holds the head of a singly-linked chain. New entries are linked
/// at the tail of their chain, so a search returns the earliest inserted entry
/// among those sharing a key.
#[derive(Debug)]
pub struct HashTable {
    hash_function: HashFunction,
    collisions: usize,
    count: usize,
    buckets: Vec<Option<Box<Bucket>>>,
}

impl HashTable {
    pub fn new(capacity: usize, hash_function: HashFunction) -> Result<HashTable> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }
        let mut buckets: Vec<Option<Box<Bucket>>> = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, || None);
        Ok(HashTable {
            hash_function,
            collisions: 0,
            count: 0,
            buckets,
        })
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash_function
    }

    /// Number of inserts that landed on an already occupied slot.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Number of registries inserted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    pub fn index_of(&self, key: usize) -> usize {
        self.hash_function.index(key, self.capacity())
    }

    /// Length of the chain hanging off `slot`, or 0 for an out of range slot.
    pub fn chain_len(&self, slot: usize) -> usize {
        let mut n: usize = 0;
        let mut bucket: Option<&Bucket> = self.buckets.get(slot).and_then(|b| b.as_deref());
        while let Some(b) = bucket {
            n += 1;
            bucket = b.next.as_deref();
        }
        n
    }

    pub fn insert(&mut self, registry: Registry) {
        let h: usize = self.index_of(registry.value());
        let mut slot: &mut Option<Box<Bucket>> = &mut self.buckets[h];
        if slot.is_some() {
            self.collisions += 1;
        }
        while let Some(bucket) = slot {
            slot = &mut bucket.next;
        }
        *slot = Some(Box::new(Bucket {
            registry,
            next: None,
        }));
        self.count += 1;
    }

    pub fn search(&self, key: usize) -> Option<&Registry> {
        let h: usize = self.index_of(key);
        let mut bucket: Option<&Bucket> = self.buckets[h].as_deref();
        while let Some(b) = bucket {
            if b.registry.value() == key {
                return Some(&b.registry);
            }
            bucket = b.next.as_deref();
        }
        None
    }
}

impl Drop for HashTable {
    // chains can be long; unlink them iteratively
    fn drop(&mut self) {
        for slot in self.buckets.iter_mut() {
            let mut bucket: Option<Box<Bucket>> = slot.take();
            while let Some(mut b) = bucket {
                bucket = b.next.take();
            }
        }
    }
}
