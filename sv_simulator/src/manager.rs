//! Simulations made of several histories.
use crate::breakage::MutatedExtremities;
use crate::config::MutationConfig;
use crate::error::Result;
use crate::history::{generate_mutated_genome, History};
use definitions::Genome;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// A clone followed by a subclone derived from it.
#[derive(Debug, Clone)]
pub struct ClonalSubclonalManager {
    config: MutationConfig,
    clonal_mutation_cnt: usize,
    subclonal_mutation_cnt: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClonalSubclonalHistory {
    pub clonal: History,
    pub subclonal: History,
}

impl ClonalSubclonalHistory {
    pub fn majority_clone(&self) -> Option<&Genome> {
        self.clonal.final_genome()
    }
    pub fn minority_clone(&self) -> Option<&Genome> {
        self.subclonal.final_genome()
    }
}

impl ClonalSubclonalManager {
    pub fn new(
        config: MutationConfig,
        clonal_mutation_cnt: usize,
        subclonal_mutation_cnt: usize,
    ) -> Self {
        Self {
            config,
            clonal_mutation_cnt,
            subclonal_mutation_cnt,
        }
    }
    /// Both stages share the same breakpoints, so the subclone never reuses a clonal breakpoint.
    pub fn generate_mutated_genomes<R: Rng>(
        &self,
        reference: &Genome,
        rng: &mut R,
    ) -> Result<ClonalSubclonalHistory> {
        let mut extremities = MutatedExtremities::new();
        let clonal = generate_mutated_genome(
            reference,
            self.clonal_mutation_cnt,
            &self.config,
            &mut extremities,
            rng,
        )?;
        let clone = clonal.final_genome().unwrap_or(reference);
        let subclonal = generate_mutated_genome(
            clone,
            self.subclonal_mutation_cnt,
            &self.config,
            &mut extremities,
            rng,
        )?;
        Ok(ClonalSubclonalHistory { clonal, subclonal })
    }
}

/// Simulate `histories_cnt` independent histories in parallel.
/// The `i`-th history is driven by a generator seeded with `seed + i`,
/// and owns its copy of the configuration and its own breakpoints.
pub fn simulate_histories(
    reference: &Genome,
    config: &MutationConfig,
    histories_cnt: usize,
    mutation_cnt: usize,
    seed: u64,
) -> Result<Vec<History>> {
    config.validate()?;
    (0..histories_cnt)
        .into_par_iter()
        .map(|i| {
            let seed = seed.wrapping_add(i as u64);
            let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(seed);
            let config = config.clone();
            let mut extremities = MutatedExtremities::new();
            generate_mutated_genome(reference, mutation_cnt, &config, &mut extremities, &mut rng)
        })
        .collect()
}

/// File name of the `index`-th history.
pub fn history_file_name(index: usize, mutation_cnt: usize, ab: bool) -> String {
    let ab = if ab { "AB" } else { "A" };
    format!("{}_{}_{}.json", index, mutation_cnt, ab)
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut wtr = std::fs::File::create(path).map(std::io::BufWriter::new)?;
    serde_json::ser::to_writer(&mut wtr, value)?;
    wtr.flush()?;
    Ok(())
}

/// Write the reference and all the histories under `out_dir`.
pub fn write_histories<P: AsRef<Path>>(
    out_dir: P,
    reference: &Genome,
    histories: &[History],
    ab: bool,
) -> Result<()> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;
    write_json(reference, out_dir.join("reference.json"))?;
    for (i, history) in histories.iter().enumerate() {
        let path = out_dir.join(history_file_name(i, history.mutation_count(), ab));
        debug!("WRITE\t{:?}", path);
        write_json(history, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::chromosome_generator::generate_genome;
    #[test]
    fn clonal_then_subclonal() {
        let mut rng: Xoshiro256StarStar = SeedableRng::seed_from_u64(392);
        let reference = generate_genome(60, 3, true);
        let manager = ClonalSubclonalManager::new(MutationConfig::default(), 10, 5);
        let result = manager.generate_mutated_genomes(&reference, &mut rng).unwrap();
        assert_eq!(result.clonal.genomes.len(), 11);
        assert_eq!(result.subclonal.genomes.len(), 6);
        assert_eq!(result.subclonal.starting_genome(), result.majority_clone());
        assert!(result.minority_clone().is_some());
        let mut used = MutatedExtremities::new();
        for mutation in result
            .clonal
            .mutations
            .iter()
            .chain(result.subclonal.mutations.iter())
        {
            assert!(mutation.positions().all(|p| !used.contains(&p)));
            used.record(mutation);
        }
    }
    #[test]
    fn batch_is_reproducible() {
        let reference = generate_genome(40, 2, true);
        let config = MutationConfig::default();
        let first = simulate_histories(&reference, &config, 4, 8, 10).unwrap();
        let second = simulate_histories(&reference, &config, 4, 8, 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 4);
        assert!(first.iter().all(|h| h.mutations.len() == 8));
        // Each history has its own generator.
        assert_ne!(first[0], first[1]);
    }
    #[test]
    fn file_names() {
        assert_eq!(history_file_name(3, 60, true), "3_60_AB.json");
        assert_eq!(history_file_name(0, 5, false), "0_5_A.json");
    }
    #[test]
    fn write_and_read() {
        let reference = generate_genome(10, 2, true);
        let config = MutationConfig::default();
        let histories = simulate_histories(&reference, &config, 2, 3, 1).unwrap();
        let dir = std::env::temp_dir().join(format!("sv_simulator_{}", std::process::id()));
        write_histories(&dir, &reference, &histories, true).unwrap();
        let rdr = std::fs::File::open(dir.join("1_3_AB.json")).map(std::io::BufReader::new);
        let history: History = serde_json::de::from_reader(rdr.unwrap()).unwrap();
        assert_eq!(history, histories[1]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
