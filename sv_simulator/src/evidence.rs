//! Copy-number evidence derived from genomes, and comparison of adjacency copy-number profiles.
//!
//! An adjacency profile maps an adjacency identity to its occurrences (or counts) per phasing.
//! Profiles extracted from a genome keep every occurrence, so the copy number is the length of the list.
//! Profiles coming from an inference keep the counts directly. Both are handled via [CopyNumber].
use definitions::{
    Adjacency, AdjacencyId, AdjacencyType, Genome, Haplotype, Phasing, Position, Segment,
    SegmentId,
};
use std::collections::{HashMap, HashSet};

pub type PhasedProfile<T> = HashMap<AdjacencyId, HashMap<Phasing, T>>;
/// Occurrences of each adjacency in a genome.
pub type AdjacencyProfile = PhasedProfile<Vec<Adjacency>>;
/// Copy number of each adjacency.
pub type AdjacencyCopyNumbers = PhasedProfile<usize>;
/// Occurrences of each segment, keyed by its canonical identity and haplotype.
pub type SegmentProfile = HashMap<SegmentId, HashMap<Haplotype, Vec<Segment>>>;

pub trait CopyNumber {
    fn copy_number(&self) -> usize;
}

impl CopyNumber for usize {
    fn copy_number(&self) -> usize {
        *self
    }
}

impl<T> CopyNumber for Vec<T> {
    fn copy_number(&self) -> usize {
        self.len()
    }
}

/// Collect the adjacencies between consecutive segments.
/// If `is_reference` is true, every adjacency is registered in `ref_adjacencies`.
/// Otherwise, an adjacency is a reference one if and only if it is in `ref_adjacencies`.
pub fn get_adjacencies_from_genome(
    genome: &Genome,
    is_reference: bool,
    ref_adjacencies: &mut HashSet<AdjacencyId>,
) -> AdjacencyProfile {
    let mut result: AdjacencyProfile = HashMap::new();
    for chromosome in genome.iter() {
        for pair in chromosome.segments().windows(2) {
            let (s1, s2) = (&pair[0], &pair[1]);
            let mut adjacency = Adjacency::new(s1.end, s2.start, AdjacencyType::Novel);
            if is_reference || ref_adjacencies.contains(&adjacency.idx()) {
                adjacency.adjacency_type = AdjacencyType::Reference;
                ref_adjacencies.insert(adjacency.idx());
            }
            // The first haplotype is the one of the segment at `position2`.
            let phasing = match s1.end == adjacency.position2 {
                true => Phasing::from_haplotypes(s1.haplotype, s2.haplotype),
                false => Phasing::from_haplotypes(s2.haplotype, s1.haplotype),
            };
            result
                .entry(adjacency.idx())
                .or_default()
                .entry(phasing)
                .or_default()
                .push(adjacency);
        }
    }
    result
}

pub fn get_scn_profile_from_genome(genome: &Genome) -> SegmentProfile {
    let mut result: SegmentProfile = HashMap::new();
    for segment in genome.segments() {
        result
            .entry(segment.canonical_id())
            .or_default()
            .entry(segment.haplotype)
            .or_default()
            .push(*segment);
    }
    result
}

pub fn get_telomeres_from_genome(genome: &Genome) -> Vec<Position> {
    genome.telomeres()
}

/// Split the adjacencies of `mut_genome` into the reference ones and the novel ones.
pub fn get_novel_adjacencies(
    ref_genome: &Genome,
    mut_genome: &Genome,
) -> (HashSet<AdjacencyId>, HashSet<AdjacencyId>) {
    let mut ref_adjacencies = HashSet::new();
    get_adjacencies_from_genome(ref_genome, true, &mut ref_adjacencies);
    let profile = get_adjacencies_from_genome(mut_genome, false, &mut ref_adjacencies);
    profile
        .keys()
        .partition(|id| ref_adjacencies.contains(*id))
}

pub fn to_copy_numbers<T: CopyNumber>(profile: &PhasedProfile<T>) -> AdjacencyCopyNumbers {
    profile
        .iter()
        .map(|(id, phased)| {
            let phased: HashMap<Phasing, usize> = phased
                .iter()
                .map(|(&phasing, occs)| (phasing, occs.copy_number()))
                .collect();
            (*id, phased)
        })
        .collect()
}

/// The total copy number of the adjacency over all phasings, `default` if it is not in the profile.
pub fn get_unphased_adjacency_cn<T: CopyNumber>(
    adjacency_id: &AdjacencyId,
    acnp: &PhasedProfile<T>,
    default: usize,
) -> usize {
    match acnp.get(adjacency_id) {
        None => default,
        Some(phased) => Phasing::ALL
            .iter()
            .filter_map(|phasing| phased.get(phasing))
            .map(|value| value.copy_number())
            .sum(),
    }
}

// Apply `pred` to (reference cn, inferred cn) of every adjacency in either profile.
fn select_adjacencies<T, U, F>(
    ref_acnp: &PhasedProfile<T>,
    inf_acnp: &PhasedProfile<U>,
    pred: F,
) -> HashSet<AdjacencyId>
where
    T: CopyNumber,
    U: CopyNumber,
    F: Fn(usize, usize) -> bool,
{
    ref_acnp
        .keys()
        .chain(inf_acnp.keys())
        .filter(|id| {
            let ref_total = get_unphased_adjacency_cn(id, ref_acnp, 0);
            let inf_total = get_unphased_adjacency_cn(id, inf_acnp, 0);
            pred(ref_total, inf_total)
        })
        .copied()
        .collect()
}

pub fn get_correctly_inferred_present_unphased_adjacencies<T: CopyNumber, U: CopyNumber>(
    ref_acnp: &PhasedProfile<T>,
    inf_acnp: &PhasedProfile<U>,
) -> HashSet<AdjacencyId> {
    select_adjacencies(ref_acnp, inf_acnp, |r, i| r > 0 && i > 0)
}

pub fn get_correctly_inferred_absent_unphased_adjacencies<T: CopyNumber, U: CopyNumber>(
    ref_acnp: &PhasedProfile<T>,
    inf_acnp: &PhasedProfile<U>,
) -> HashSet<AdjacencyId> {
    select_adjacencies(ref_acnp, inf_acnp, |r, i| r == 0 && i == 0)
}

pub fn get_correctly_inferred_present_absent_unphased_adjacencies<
    T: CopyNumber,
    U: CopyNumber,
>(
    ref_acnp: &PhasedProfile<T>,
    inf_acnp: &PhasedProfile<U>,
) -> HashSet<AdjacencyId> {
    let mut result = get_correctly_inferred_present_unphased_adjacencies(ref_acnp, inf_acnp);
    result.extend(get_correctly_inferred_absent_unphased_adjacencies(
        ref_acnp, inf_acnp,
    ));
    result
}

/// Adjacencies with exactly the same total copy number in both profiles.
pub fn get_correctly_inferred_unphased_adjacencies<T: CopyNumber, U: CopyNumber>(
    ref_acnp: &PhasedProfile<T>,
    inf_acnp: &PhasedProfile<U>,
) -> HashSet<AdjacencyId> {
    select_adjacencies(ref_acnp, inf_acnp, |r, i| r == i)
}
