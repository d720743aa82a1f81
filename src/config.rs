use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::hash_table::HashFunction;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub hash_functions: Vec<HashFunction>,
    pub table_sizes: Vec<usize>,
    pub element_counts: Vec<usize>,
    /// Trials per (table size, element count) cell; results are averaged.
    pub runs: usize,
    pub seed: u64,
    /// Keys are drawn uniformly from `0..key_range`.
    pub key_range: usize,
    pub output_dir: PathBuf,
}

impl BenchConfig {
    pub const DEFAULT_TABLE_SIZES: [usize; 5] = [1_000_000, 100_000, 10_000, 1_000, 100];
    pub const DEFAULT_ELEMENT_COUNTS: [usize; 5] = [10_000, 20_000, 100_000, 500_000, 1_000_000];
    pub const DEFAULT_RUNS: usize = 5;
    pub const DEFAULT_SEED: u64 = 2023;
    pub const DEFAULT_KEY_RANGE: usize = 1_000_000;

    pub fn validate(&self) -> Result<()> {
        if self.hash_functions.is_empty() {
            return Err(Error::InvalidConfig("no hash functions selected"));
        }
        if self.table_sizes.is_empty() {
            return Err(Error::InvalidConfig("no table sizes given"));
        }
        if self.table_sizes.contains(&0) {
            return Err(Error::InvalidCapacity);
        }
        if self.element_counts.is_empty() {
            return Err(Error::InvalidConfig("no element counts given"));
        }
        if self.runs == 0 {
            return Err(Error::InvalidConfig("runs must be at least 1"));
        }
        if self.key_range == 0 {
            return Err(Error::InvalidConfig("key range must be at least 1"));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            hash_functions: HashFunction::ALL.to_vec(),
            table_sizes: Self::DEFAULT_TABLE_SIZES.to_vec(),
            element_counts: Self::DEFAULT_ELEMENT_COUNTS.to_vec(),
            runs: Self::DEFAULT_RUNS,
            seed: Self::DEFAULT_SEED,
            key_range: Self::DEFAULT_KEY_RANGE,
            output_dir: PathBuf::from("results"),
        }
    }
}
