//! Pipelines -- the whole simulation run by the `simulate` subcommand.
//!
//! A run generates a reference genome, simulates independent histories on it,
//! and writes the reference and the histories as JSON files under the output directory.
use serde::{Deserialize, Serialize};
use sv_simulator::chromosome_generator::{generate_genome, AB, CHROMOSOMES_SIZE};
use sv_simulator::manager::{simulate_histories, write_histories};
use sv_simulator::MutationConfig;
extern crate log;
use log::*;
use std::path::PathBuf;

/// The configuration of the pipeline.
/// This struct is a comprehensive list of the parameters that can be set by a user.
/// The mutation process is set in the `[mutation]` table.
/// When the table is omitted, the default one is used.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SimulationConfig {
    /// The path to the output directory.
    out_dir: PathBuf,
    /// Sub-directory of `out_dir` holding this run.
    prefix: String,
    #[serde(default)]
    verbose: usize,
    #[serde(default = "default_threads")]
    threads: usize,
    seed: u64,
    chromosomes_cnt: usize,
    #[serde(default = "default_chromosome_size")]
    chromosome_size: usize,
    #[serde(default = "default_ab")]
    ab: bool,
    mutation_cnt: usize,
    genomes_cnt: usize,
    #[serde(default)]
    mutation: MutationConfig,
}

fn default_threads() -> usize {
    1
}

fn default_chromosome_size() -> usize {
    CHROMOSOMES_SIZE
}

fn default_ab() -> bool {
    AB
}

fn to_io_error<E: std::error::Error + Send + Sync + 'static>(why: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, why)
}

pub fn run_pipeline(config: &SimulationConfig) -> std::io::Result<()> {
    let SimulationConfig {
        out_dir,
        prefix,
        verbose,
        threads,
        seed,
        chromosomes_cnt,
        chromosome_size,
        ab,
        mutation_cnt,
        genomes_cnt,
        mutation,
    } = config.clone();
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    if let Err(why) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        debug!("{:?} The global thread pool is already built.", why);
    }
    mutation.validate().map_err(to_io_error)?;
    let out_dir = out_dir.join(prefix);
    info!(
        "SIMULATE\t{}\t{}\t{}\t{}",
        chromosomes_cnt, chromosome_size, mutation_cnt, genomes_cnt
    );
    let reference = generate_genome(chromosome_size, chromosomes_cnt, ab);
    let histories = simulate_histories(&reference, &mutation, genomes_cnt, mutation_cnt, seed)
        .map_err(to_io_error)?;
    write_histories(&out_dir, &reference, &histories, ab).map_err(to_io_error)?;
    info!("WRITE\t{:?}", out_dir);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn parse_profile() {
        let profile = r#"
out_dir = "out"
prefix = "run"
seed = 42
chromosomes_cnt = 2
mutation_cnt = 5
genomes_cnt = 3

[mutation]
mutation_types = ["REVERSAL", "DELETION"]
mutation_probs = [0.5, 0.5]
reversal = { arm_reversal = true }
duplication = { arm_duplication = true }
deletion = { arm_deletion = false }
translocation = { chr1_empty_arm = false, chr2_empty_arm = false, homozygous = false }
"#;
        let config: SimulationConfig = toml::from_str(profile).unwrap();
        assert_eq!(config.threads, 1);
        assert_eq!(config.chromosome_size, CHROMOSOMES_SIZE);
        assert!(config.ab);
        assert_eq!(config.mutation.mutation_types.len(), 2);
        assert!(config.mutation.reversal.arm_reversal);
        assert_eq!(config.mutation.max_attempts, sv_simulator::config::MAX_ATTEMPTS);
        assert!(config.mutation.validate().is_ok());
    }
    #[test]
    fn default_mutation_table() {
        let profile = r#"
out_dir = "out"
prefix = "run"
seed = 1
chromosomes_cnt = 3
mutation_cnt = 10
genomes_cnt = 1
"#;
        let config: SimulationConfig = toml::from_str(profile).unwrap();
        assert_eq!(config.mutation, MutationConfig::default());
    }
}
