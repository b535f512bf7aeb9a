//! Synthetic reference genomes.
use definitions::{Chromosome, Genome, Haplotype, Segment};

pub const CHROMOSOMES_SIZE: usize = 100;
pub const AB: bool = true;

/// A chromosome of `size` consecutive segments. The `i`-th segment spans `[i, i+1]`.
pub fn generate_chromosome(label: u32, size: usize, haplotype: Haplotype) -> Chromosome {
    (0..size as u64)
        .map(|i| Segment::new(label, i, i + 1, haplotype))
        .collect::<Vec<_>>()
        .into()
}

/// Diploid genome. Each chromosome `1..=chromosomes_cnt` has two homologs, next to each other.
/// If `ab` is false, the haplotypes are left unknown.
pub fn generate_genome(chromosome_size: usize, chromosomes_cnt: usize, ab: bool) -> Genome {
    let (hap_a, hap_b) = match ab {
        true => (Haplotype::A, Haplotype::B),
        false => (Haplotype::Unknown, Haplotype::Unknown),
    };
    let chromosomes: Vec<_> = (1..=chromosomes_cnt as u32)
        .flat_map(|label| {
            vec![
                generate_chromosome(label, chromosome_size, hap_a),
                generate_chromosome(label, chromosome_size, hap_b),
            ]
        })
        .collect();
    debug!(
        "REFERENCE\t{}\t{}\t{}",
        chromosomes_cnt, chromosome_size, ab
    );
    chromosomes.into()
}
