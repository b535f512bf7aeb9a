//! Applying a mutation to a genome. The input genome is never modified.
use crate::error::{Result, SimulationError};
use definitions::{Genome, Mutation, SegmentRange, Translocation};

pub fn apply_mutation(genome: &Genome, mutation: &Mutation) -> Result<Genome> {
    match mutation {
        Mutation::Reversal(range) => apply_reversal(genome, range),
        Mutation::Duplication(range) => apply_duplication(genome, range),
        Mutation::Deletion(range) => apply_deletion(genome, range),
        Mutation::Translocation(transl) => apply_translocation(genome, transl),
    }
}

fn check_range(genome: &Genome, range: &SegmentRange) -> Result<()> {
    let chromosome = genome.get(range.chromosome_index).ok_or_else(|| {
        SimulationError::invalid_mutation(format!(
            "chromosome {} is out of {} chromosomes",
            range.chromosome_index,
            genome.len()
        ))
    })?;
    if range.end_index < range.start_index || chromosome.len() < range.end_index {
        return Err(SimulationError::invalid_mutation(format!(
            "[{},{}) does not fit in a chromosome of {} segments",
            range.start_index,
            range.end_index,
            chromosome.len()
        )));
    }
    Ok(())
}

pub fn apply_reversal(genome: &Genome, range: &SegmentRange) -> Result<Genome> {
    check_range(genome, range)?;
    let mut new_genome = genome.clone();
    let chr_index = range.chromosome_index;
    new_genome[chr_index] = genome[chr_index].reverse_segments(range.start_index, range.end_index);
    Ok(new_genome)
}

pub fn apply_duplication(genome: &Genome, range: &SegmentRange) -> Result<Genome> {
    check_range(genome, range)?;
    let mut new_genome = genome.clone();
    let chr_index = range.chromosome_index;
    new_genome[chr_index] =
        genome[chr_index].duplicate_segments(range.start_index, range.end_index);
    Ok(new_genome)
}

pub fn apply_deletion(genome: &Genome, range: &SegmentRange) -> Result<Genome> {
    check_range(genome, range)?;
    let mut new_genome = genome.clone();
    let chr_index = range.chromosome_index;
    new_genome[chr_index] = genome[chr_index].delete_segments(range.start_index, range.end_index);
    Ok(new_genome)
}

pub fn apply_translocation(genome: &Genome, transl: &Translocation) -> Result<Genome> {
    let (i1, i2) = (transl.chromosome1_index, transl.chromosome2_index);
    let (chr1, chr2) = match (genome.get(i1), genome.get(i2)) {
        (Some(chr1), Some(chr2)) if i1 != i2 => (chr1, chr2),
        _ => {
            return Err(SimulationError::invalid_mutation(format!(
                "translocation between {} and {} in {} chromosomes",
                i1,
                i2,
                genome.len()
            )))
        }
    };
    if chr1.len() < transl.chromosome1_split || chr2.len() < transl.chromosome2_split {
        return Err(SimulationError::invalid_mutation(format!(
            "split {}/{} exceeds chromosome lengths {}/{}",
            transl.chromosome1_split,
            transl.chromosome2_split,
            chr1.len(),
            chr2.len()
        )));
    }
    let (new_chr1, new_chr2) = chr1.translocate_segments(
        chr2,
        transl.chromosome1_split,
        transl.chromosome2_split,
        transl.cc,
    );
    let mut new_genome = genome.clone();
    new_genome[i1] = new_chr1;
    new_genome[i2] = new_chr2;
    Ok(new_genome)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::breakage::boundary_positions;
    use crate::chromosome_generator::generate_genome;
    use definitions::*;
    fn range(genome: &Genome, chromosome_index: usize, start: usize, end: usize) -> SegmentRange {
        let chr = &genome[chromosome_index];
        let (sp1, sp2) = boundary_positions(chr, start);
        let (ep1, ep2) = boundary_positions(chr, end);
        SegmentRange {
            chromosome_index,
            start_index: start,
            end_index: end,
            positions: [sp1, sp2, ep1, ep2],
        }
    }
    #[test]
    fn reversal_roundtrip() {
        let genome = generate_genome(4, 1, true);
        let reversal = Mutation::Reversal(range(&genome, 0, 1, 3));
        let reversed = apply_mutation(&genome, &reversal).unwrap();
        let (before, after) = (&genome[0], &reversed[0]);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[2].reversed());
        assert_eq!(after[2], before[1].reversed());
        assert_eq!(after[3], before[3]);
        assert_eq!(reversed[1], genome[1]);
        let restored = apply_mutation(&reversed, &reversal).unwrap();
        assert_eq!(restored, genome);
    }
    #[test]
    fn deletion_shrinks() {
        let genome = generate_genome(10, 2, true);
        let deletion = range(&genome, 2, 3, 7);
        let deleted = apply_deletion(&genome, &deletion).unwrap();
        assert_eq!(deleted[2].len(), 10 - 4);
        assert_eq!(deleted.segment_count(), genome.segment_count() - 4);
        let removed: Vec<_> = genome[2].segments()[3..7]
            .iter()
            .flat_map(|s| vec![s.start, s.end])
            .collect();
        for seg in deleted[2].iter() {
            assert!(!removed.contains(&seg.start));
            assert!(!removed.contains(&seg.end));
        }
    }
    #[test]
    fn duplication_grows() {
        let genome = generate_genome(6, 1, true);
        let duplication = range(&genome, 1, 2, 5);
        let duplicated = apply_duplication(&genome, &duplication).unwrap();
        assert_eq!(duplicated[1].len(), 9);
        assert_eq!(duplicated[1][5], genome[1][2]);
        assert_eq!(duplicated[1][7], genome[1][4]);
        assert_eq!(duplicated[0], genome[0]);
    }
    #[test]
    fn translocation_conserves() {
        let genome = generate_genome(7, 2, true);
        for cc in [true, false] {
            let transl = Translocation {
                chromosome1_index: 0,
                chromosome2_index: 3,
                chromosome1_split: 2,
                chromosome2_split: 5,
                cc,
                positions: [None; 4],
            };
            let moved = apply_translocation(&genome, &transl).unwrap();
            assert_eq!(moved[0].len() + moved[3].len(), 14);
            assert_ne!(moved[0], genome[0]);
            assert_eq!(moved[1], genome[1]);
            assert_eq!(moved.segment_count(), genome.segment_count());
        }
    }
    #[test]
    fn input_is_untouched() {
        let genome = generate_genome(5, 2, true);
        let copy = genome.clone();
        let _ = apply_mutation(&genome, &Mutation::Deletion(range(&genome, 0, 1, 4))).unwrap();
        let _ = apply_mutation(&genome, &Mutation::Reversal(range(&genome, 3, 0, 5))).unwrap();
        assert_eq!(genome, copy);
    }
    #[test]
    fn invalid_mutations() {
        let genome = generate_genome(5, 1, true);
        let mut bad = range(&genome, 0, 1, 4);
        bad.chromosome_index = 9;
        assert!(apply_reversal(&genome, &bad).is_err());
        let mut bad = range(&genome, 0, 1, 4);
        bad.end_index = 6;
        assert!(matches!(
            apply_deletion(&genome, &bad),
            Err(SimulationError::InvalidMutation(_))
        ));
        let transl = Translocation {
            chromosome1_index: 1,
            chromosome2_index: 1,
            chromosome1_split: 1,
            chromosome2_split: 1,
            cc: true,
            positions: [None; 4],
        };
        assert!(apply_translocation(&genome, &transl).is_err());
    }
}
