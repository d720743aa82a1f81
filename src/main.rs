use std::path::PathBuf;
use std::process::ExitCode;

use chained_buckets::logger::initialize_logger;
use chained_buckets::{BenchConfig, HashFunction};
use clap::Parser;
use log::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "Benchmark a separate-chaining hash table", long_about = None)]
struct Args {
    /// Hash function to benchmark (module, multiplication, folding). Repeatable; defaults to all.
    #[arg(short = 'f', long = "hash-function")]
    hash_functions: Vec<HashFunction>,

    /// Comma separated table capacities
    #[arg(short, long, value_delimiter = ',')]
    table_sizes: Vec<usize>,

    /// Comma separated numbers of keys to insert
    #[arg(short, long, value_delimiter = ',')]
    element_counts: Vec<usize>,

    /// Trials averaged per cell
    #[arg(short, long, default_value_t = BenchConfig::DEFAULT_RUNS)]
    runs: usize,

    #[arg(short, long, default_value_t = BenchConfig::DEFAULT_SEED)]
    seed: u64,

    /// Keys are drawn from 0..KEY_RANGE
    #[arg(short, long, default_value_t = BenchConfig::DEFAULT_KEY_RANGE)]
    key_range: usize,

    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,
}

impl Args {
    fn into_config(self) -> BenchConfig {
        let mut config: BenchConfig = BenchConfig {
            runs: self.runs,
            seed: self.seed,
            key_range: self.key_range,
            output_dir: self.output_dir,
            ..BenchConfig::default()
        };
        if !self.hash_functions.is_empty() {
            config.hash_functions = self.hash_functions;
        }
        if !self.table_sizes.is_empty() {
            config.table_sizes = self.table_sizes;
        }
        if !self.element_counts.is_empty() {
            config.element_counts = self.element_counts;
        }
        config
    }
}

fn main() -> ExitCode {
    initialize_logger();
    let config: BenchConfig = Args::parse().into_config();

    match chained_buckets::run(config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
