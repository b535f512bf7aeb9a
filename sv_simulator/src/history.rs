//! Mutation history driver.
use crate::apply::apply_mutation;
use crate::breakage::MutatedExtremities;
use crate::config::MutationConfig;
use crate::error::Result;
use crate::generate::generate_mutation;
use definitions::{Genome, Mutation};
use rand::distributions::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The genomes and the mutations of a simulation.
/// `genomes[i+1]` is the result of applying `mutations[i]` to `genomes[i]`.
/// A simulated history has at least one genome, but one read from a file may have none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct History {
    pub genomes: Vec<Genome>,
    pub mutations: Vec<Mutation>,
}

impl History {
    pub fn starting_genome(&self) -> Option<&Genome> {
        self.genomes.first()
    }
    pub fn final_genome(&self) -> Option<&Genome> {
        self.genomes.last()
    }
    pub fn mutation_count(&self) -> usize {
        self.mutations.len()
    }
}

/// Apply `mutation_cnt` random mutations one after another.
/// Every breakpoint extremity used is added to `extremities`, so that later mutations avoid it.
pub fn generate_mutated_genome<R: Rng>(
    starting_genome: &Genome,
    mutation_cnt: usize,
    config: &MutationConfig,
    extremities: &mut MutatedExtremities,
    rng: &mut R,
) -> Result<History> {
    config.validate()?;
    let types = config.type_distribution()?;
    let mut genomes = Vec::with_capacity(mutation_cnt + 1);
    let mut mutations = Vec::with_capacity(mutation_cnt);
    genomes.push(starting_genome.clone());
    for i in 0..mutation_cnt {
        let current = &genomes[i];
        let mutation_type = config.mutation_types[types.sample(rng)];
        let mutation = generate_mutation(mutation_type, current, config, extremities, rng)?;
        debug!("MUTATION\t{}\t{}", i, mutation);
        let next = apply_mutation(current, &mutation)?;
        extremities.record(&mutation);
        mutations.push(mutation);
        genomes.push(next);
    }
    debug!(
        "HISTORY\t{}\t{}\t{}",
        mutation_cnt,
        genomes[mutation_cnt].segment_count(),
        extremities.len()
    );
    Ok(History { genomes, mutations })
}
