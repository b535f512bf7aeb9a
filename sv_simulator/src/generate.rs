//! Sampling a random, structurally valid mutation against a genome.
use crate::breakage::{boundary_positions, breakage_indexes, strip_termini, MutatedExtremities};
use crate::config::MutationConfig;
use crate::error::{Result, SimulationError};
use definitions::{Chromosome, Genome, Mutation, MutationType, SegmentRange, Translocation};
use rand::Rng;

pub fn generate_mutation<R: Rng>(
    mutation_type: MutationType,
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<Mutation> {
    match mutation_type {
        MutationType::Reversal => generate_reversal(genome, config, extremities, rng),
        MutationType::Duplication => generate_duplication(genome, config, extremities, rng),
        MutationType::Deletion => generate_deletion(genome, config, extremities, rng),
        MutationType::Translocation => generate_translocation(genome, config, extremities, rng),
    }
}

pub fn generate_reversal<R: Rng>(
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<Mutation> {
    let arm = config.reversal.arm_reversal;
    let range =
        generate_segment_range(MutationType::Reversal, arm, genome, config, extremities, rng)?;
    Ok(Mutation::Reversal(range))
}

pub fn generate_duplication<R: Rng>(
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<Mutation> {
    let arm = config.duplication.arm_duplication;
    let range =
        generate_segment_range(MutationType::Duplication, arm, genome, config, extremities, rng)?;
    Ok(Mutation::Duplication(range))
}

pub fn generate_deletion<R: Rng>(
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<Mutation> {
    let arm = config.deletion.arm_deletion;
    let range =
        generate_segment_range(MutationType::Deletion, arm, genome, config, extremities, rng)?;
    Ok(Mutation::Deletion(range))
}

fn candidate_indexes(
    chromosome: &Chromosome,
    extremities: &MutatedExtremities,
    keep_termini: bool,
) -> Vec<usize> {
    let indexes = breakage_indexes(chromosome, extremities);
    match keep_termini {
        true => indexes,
        false => strip_termini(indexes, chromosome.len()),
    }
}

// Pick a chromosome with at least two breakage indices, then pick start < end among them.
fn generate_segment_range<R: Rng>(
    mutation_type: MutationType,
    keep_termini: bool,
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<SegmentRange> {
    if genome.is_empty() {
        return Err(SimulationError::Feasibility {
            mutation_type,
            attempts: 0,
        });
    }
    for attempt in 0..config.max_attempts {
        let chromosome_index = rng.gen_range(0..genome.len());
        let chromosome = &genome[chromosome_index];
        let indexes = candidate_indexes(chromosome, extremities, keep_termini);
        if indexes.len() < 2 {
            trace!("RETRY\t{}\t{}\t{}", mutation_type, attempt, chromosome_index);
            continue;
        }
        let start_i = rng.gen_range(0..indexes.len() - 1);
        let end_i = rng.gen_range(start_i + 1..indexes.len());
        let (start_index, end_index) = (indexes[start_i], indexes[end_i]);
        let (sp1, sp2) = boundary_positions(chromosome, start_index);
        let (ep1, ep2) = boundary_positions(chromosome, end_index);
        return Ok(SegmentRange {
            chromosome_index,
            start_index,
            end_index,
            positions: [sp1, sp2, ep1, ep2],
        });
    }
    Err(SimulationError::Feasibility {
        mutation_type,
        attempts: config.max_attempts,
    })
}

/// Return true if the two chromosomes are the homologs of the same chromosome,
/// judged by their most common chromosome of origin.
pub fn chromosomes_are_mates(chromosome1: &Chromosome, chromosome2: &Chromosome) -> bool {
    match (
        chromosome1.most_common_chromosome(),
        chromosome2.most_common_chromosome(),
    ) {
        (Some(c1), Some(c2)) => c1 == c2,
        _ => false,
    }
}

pub fn generate_translocation<R: Rng>(
    genome: &Genome,
    config: &MutationConfig,
    extremities: &MutatedExtremities,
    rng: &mut R,
) -> Result<Mutation> {
    let policy = &config.translocation;
    if genome.is_empty() {
        return Err(SimulationError::Feasibility {
            mutation_type: MutationType::Translocation,
            attempts: 0,
        });
    }
    for attempt in 0..config.max_attempts {
        let chromosome1_index = rng.gen_range(0..genome.len());
        let chromosome2_index = rng.gen_range(0..genome.len());
        if chromosome1_index == chromosome2_index {
            continue;
        }
        let chromosome1 = &genome[chromosome1_index];
        let chromosome2 = &genome[chromosome2_index];
        if !policy.homozygous && chromosomes_are_mates(chromosome1, chromosome2) {
            trace!("RETRY\tMATES\t{}\t{}", chromosome1_index, chromosome2_index);
            continue;
        }
        let indexes1 = candidate_indexes(chromosome1, extremities, policy.chr1_empty_arm);
        let indexes2 = candidate_indexes(chromosome2, extremities, policy.chr2_empty_arm);
        if indexes1.is_empty() || indexes2.is_empty() {
            trace!("RETRY\tTRANSLOCATION\t{}", attempt);
            continue;
        }
        let chromosome1_split = indexes1[rng.gen_range(0..indexes1.len())];
        let chromosome2_split = indexes2[rng.gen_range(0..indexes2.len())];
        let cc = rng.gen_bool(0.5);
        let (p1, p2) = boundary_positions(chromosome1, chromosome1_split);
        let (p3, p4) = boundary_positions(chromosome2, chromosome2_split);
        return Ok(Mutation::Translocation(Translocation {
            chromosome1_index,
            chromosome2_index,
            chromosome1_split,
            chromosome2_split,
            cc,
            positions: [p1, p2, p3, p4],
        }));
    }
    Err(SimulationError::Feasibility {
        mutation_type: MutationType::Translocation,
        attempts: config.max_attempts,
    })
}
