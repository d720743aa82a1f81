pub mod bench;
pub mod config;
pub mod error;
pub mod export;
pub mod hash_table;
pub mod logger;
pub mod registry;

use std::path::PathBuf;

use log::info;

pub use crate::bench::{Bench, MatrixResult, TrialResult};
pub use crate::config::BenchConfig;
pub use crate::error::{Error, Result};
pub use crate::hash_table::{HashFunction, HashTable};
pub use crate::registry::{IdCounter, Registry};

/// Sweeps every configured hash function and exports its results as soon as
/// its matrix is complete. Returns every file written.
pub fn run(config: BenchConfig) -> Result<Vec<PathBuf>> {
    let output_dir: PathBuf = config.output_dir.clone();
    let hash_functions: Vec<HashFunction> = config.hash_functions.clone();
    let mut bench: Bench = Bench::new(config)?;
    let mut written: Vec<PathBuf> = Vec::new();

    for hash_function in hash_functions {
        let result: MatrixResult = bench.matrix(hash_function)?;
        written.extend(export::export(&output_dir, &result)?);
    }

    info!(
        "finished {} hash functions, {} registries created",
        bench.config().hash_functions.len(),
        bench.ids().issued()
    );
    Ok(written)
}
