//! Definitions -- A tiny interface for simulating structural variants on diploid genomes.
//! Roughly speaking, a genome is a list of chromosomes, and a chromosome is a list of [Segment](Segment)s.
//! Every rearrangement is recorded as a [Mutation](Mutation), and a run of the simulator is
//! exchanged with other programs as a JSON object.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The side of an extremity.
/// A segment in the reference orientation starts at a `Reverse` extremity and ends at a `Forward` one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strand {
    Forward,
    Reverse,
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// An extremity of a segment on the reference.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// The label of the chromosome this position comes from.
    pub chromosome: u32,
    pub coordinate: u64,
    pub strand: Strand,
}

impl Position {
    pub fn new(chromosome: u32, coordinate: u64, strand: Strand) -> Self {
        Self {
            chromosome,
            coordinate,
            strand,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}{}", self.chromosome, self.coordinate, self.strand)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Haplotype {
    A,
    B,
    Unknown,
}

/// Identity of a segment. The coordinates are ordered as the segment reads,
/// so a reversed segment has `start > end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId {
    pub chromosome: u32,
    pub start: u64,
    pub end: u64,
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: Position,
    pub end: Position,
    pub haplotype: Haplotype,
}

impl Segment {
    /// Create a segment in the reference orientation.
    pub fn new(chromosome: u32, start: u64, end: u64, haplotype: Haplotype) -> Self {
        Self {
            start: Position::new(chromosome, start, Strand::Reverse),
            end: Position::new(chromosome, end, Strand::Forward),
            haplotype,
        }
    }
    pub fn chromosome(&self) -> u32 {
        self.start.chromosome
    }
    pub fn is_reversed(&self) -> bool {
        self.start.strand == Strand::Forward
    }
    /// Return the same segment read in the other direction.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            haplotype: self.haplotype,
        }
    }
    pub fn id(&self) -> SegmentId {
        SegmentId {
            chromosome: self.chromosome(),
            start: self.start.coordinate,
            end: self.end.coordinate,
        }
    }
    /// The identity of this segment in the reference orientation.
    pub fn canonical_id(&self) -> SegmentId {
        match self.is_reversed() {
            true => self.reversed().id(),
            false => self.id(),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{}]{:?}", self.start, self.end, self.haplotype)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Chromosome {
    segments: Vec<Segment>,
}

impl From<Vec<Segment>> for Chromosome {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl std::ops::Index<usize> for Chromosome {
    type Output = Segment;
    fn index(&self, index: usize) -> &Segment {
        &self.segments[index]
    }
}

fn reverse_block(segments: &[Segment]) -> impl Iterator<Item = Segment> + '_ {
    segments.iter().rev().map(Segment::reversed)
}

impl Chromosome {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    pub fn len(&self) -> usize {
        self.segments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }
    /// Reverse the order and the orientation of the segments in `[start, end)`.
    pub fn reverse_segments(&self, start: usize, end: usize) -> Self {
        let (head, rest) = self.segments.split_at(start);
        let (middle, tail) = rest.split_at(end - start);
        let segments: Vec<_> = head
            .iter()
            .copied()
            .chain(reverse_block(middle))
            .chain(tail.iter().copied())
            .collect();
        Self { segments }
    }
    /// Tandem duplication. The copy of `[start, end)` is placed right after `end`.
    pub fn duplicate_segments(&self, start: usize, end: usize) -> Self {
        let segments: Vec<_> = self.segments[..end]
            .iter()
            .chain(self.segments[start..end].iter())
            .chain(self.segments[end..].iter())
            .copied()
            .collect();
        Self { segments }
    }
    pub fn delete_segments(&self, start: usize, end: usize) -> Self {
        let segments: Vec<_> = self.segments[..start]
            .iter()
            .chain(self.segments[end..].iter())
            .copied()
            .collect();
        Self { segments }
    }
    /// Exchange the arms of two chromosomes.
    /// Let `self = p1|q1` split at `self_index` and `other = p2|q2` split at `other_index`.
    /// If `cc` is true, the result is `(p1 q2, p2 q1)`,
    /// otherwise `(p1 rev(p2), rev(q1) q2)`, where `rev` flips both the order and the orientation.
    pub fn translocate_segments(
        &self,
        other: &Self,
        self_index: usize,
        other_index: usize,
        cc: bool,
    ) -> (Self, Self) {
        let (p1, q1) = self.segments.split_at(self_index);
        let (p2, q2) = other.segments.split_at(other_index);
        let (first, second): (Vec<_>, Vec<_>) = if cc {
            (
                p1.iter().chain(q2.iter()).copied().collect(),
                p2.iter().chain(q1.iter()).copied().collect(),
            )
        } else {
            (
                p1.iter().copied().chain(reverse_block(p2)).collect(),
                reverse_block(q1).chain(q2.iter().copied()).collect(),
            )
        };
        (Self { segments: first }, Self { segments: second })
    }
    /// The most frequent chromosome of origin. Ties go to the smaller label.
    pub fn most_common_chromosome(&self) -> Option<u32> {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for segment in self.segments.iter() {
            *counts.entry(segment.chromosome()).or_default() += 1;
        }
        counts
            .into_iter()
            .max_by(|(c1, n1), (c2, n2)| n1.cmp(n2).then(c2.cmp(c1)))
            .map(|(chromosome, _)| chromosome)
    }
    pub fn telomeres(&self) -> Vec<Position> {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => vec![first.start, last.end],
            _ => vec![],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Genome {
    chromosomes: Vec<Chromosome>,
}

impl From<Vec<Chromosome>> for Genome {
    fn from(chromosomes: Vec<Chromosome>) -> Self {
        Self { chromosomes }
    }
}

impl std::ops::Index<usize> for Genome {
    type Output = Chromosome;
    fn index(&self, index: usize) -> &Chromosome {
        &self.chromosomes[index]
    }
}

impl std::ops::IndexMut<usize> for Genome {
    fn index_mut(&mut self, index: usize) -> &mut Chromosome {
        &mut self.chromosomes[index]
    }
}

impl Genome {
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }
    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }
    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.chromosomes.iter().flat_map(|c| c.iter())
    }
    pub fn segment_count(&self) -> usize {
        self.chromosomes.iter().map(|c| c.len()).sum()
    }
    pub fn telomeres(&self) -> Vec<Position> {
        self.chromosomes.iter().flat_map(|c| c.telomeres()).collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AdjacencyType {
    Reference,
    Novel,
}

/// Identity of an adjacency. The first position is never larger than the second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdjacencyId(pub Position, pub Position);

impl std::fmt::Display for AdjacencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}--{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Adjacency {
    pub position1: Position,
    pub position2: Position,
    pub adjacency_type: AdjacencyType,
}

impl Adjacency {
    pub fn new(p1: Position, p2: Position, adjacency_type: AdjacencyType) -> Self {
        let (position1, position2) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
        Self {
            position1,
            position2,
            adjacency_type,
        }
    }
    pub fn idx(&self) -> AdjacencyId {
        AdjacencyId(self.position1, self.position2)
    }
}

/// Haplotypes of the two segments flanking an adjacency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phasing {
    AA,
    AB,
    BA,
    BB,
    AU,
    UA,
    BU,
    UB,
    UU,
}

impl Phasing {
    pub const ALL: [Phasing; 9] = [
        Phasing::AA,
        Phasing::AB,
        Phasing::BA,
        Phasing::BB,
        Phasing::AU,
        Phasing::UA,
        Phasing::BU,
        Phasing::UB,
        Phasing::UU,
    ];
    pub fn from_haplotypes(first: Haplotype, second: Haplotype) -> Self {
        use Haplotype::*;
        match (first, second) {
            (A, A) => Phasing::AA,
            (A, B) => Phasing::AB,
            (B, A) => Phasing::BA,
            (B, B) => Phasing::BB,
            (A, Unknown) => Phasing::AU,
            (Unknown, A) => Phasing::UA,
            (B, Unknown) => Phasing::BU,
            (Unknown, B) => Phasing::UB,
            (Unknown, Unknown) => Phasing::UU,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unsupported mutation type {0:?}")]
pub struct UnsupportedMutationType(pub String);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum MutationType {
    Reversal,
    Duplication,
    Deletion,
    Translocation,
}

impl MutationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MutationType::Reversal => "REVERSAL",
            MutationType::Duplication => "DUPLICATION",
            MutationType::Deletion => "DELETION",
            MutationType::Translocation => "TRANSLOCATION",
        }
    }
}

impl std::fmt::Display for MutationType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MutationType {
    type Err = UnsupportedMutationType;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "REVERSAL" => Ok(MutationType::Reversal),
            "DUPLICATION" => Ok(MutationType::Duplication),
            "DELETION" => Ok(MutationType::Deletion),
            "TRANSLOCATION" => Ok(MutationType::Translocation),
            _ => Err(UnsupportedMutationType(s.to_string())),
        }
    }
}

impl TryFrom<String> for MutationType {
    type Error = UnsupportedMutationType;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MutationType> for String {
    fn from(mutation_type: MutationType) -> String {
        mutation_type.as_str().to_string()
    }
}

/// A rearrangement of the segments `[start_index, end_index)` in one chromosome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentRange {
    pub chromosome_index: usize,
    pub start_index: usize,
    pub end_index: usize,
    /// The extremities flanking the start and the end breakpoints.
    /// `None` if the breakpoint is at a chromosome end.
    pub positions: [Option<Position>; 4],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translocation {
    pub chromosome1_index: usize,
    pub chromosome2_index: usize,
    pub chromosome1_split: usize,
    pub chromosome2_split: usize,
    /// How the arms are re-joined. See [Chromosome::translocate_segments].
    pub cc: bool,
    pub positions: [Option<Position>; 4],
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mutation {
    Reversal(SegmentRange),
    Duplication(SegmentRange),
    Deletion(SegmentRange),
    Translocation(Translocation),
}

impl Mutation {
    pub fn mutation_type(&self) -> MutationType {
        match self {
            Mutation::Reversal(_) => MutationType::Reversal,
            Mutation::Duplication(_) => MutationType::Duplication,
            Mutation::Deletion(_) => MutationType::Deletion,
            Mutation::Translocation(_) => MutationType::Translocation,
        }
    }
    /// Breakpoint extremities touched by this mutation, chromosome ends excluded.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let positions = match self {
            Mutation::Reversal(range) | Mutation::Duplication(range) | Mutation::Deletion(range) => {
                &range.positions
            }
            Mutation::Translocation(transl) => &transl.positions,
        };
        positions.iter().filter_map(|p| *p)
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Mutation::Reversal(r) | Mutation::Duplication(r) | Mutation::Deletion(r) => write!(
                f,
                "{}\t{}\t{}\t{}",
                self.mutation_type(),
                r.chromosome_index,
                r.start_index,
                r.end_index
            ),
            Mutation::Translocation(t) => write!(
                f,
                "{}\t{}:{}\t{}:{}\t{}",
                self.mutation_type(),
                t.chromosome1_index,
                t.chromosome1_split,
                t.chromosome2_index,
                t.chromosome2_split,
                t.cc
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn chromosome(label: u32, len: u64, haplotype: Haplotype) -> Chromosome {
        (0..len)
            .map(|i| Segment::new(label, i, i + 1, haplotype))
            .collect::<Vec<_>>()
            .into()
    }
    #[test]
    fn reverse_twice() {
        let chr = chromosome(1, 6, Haplotype::A);
        let rev = chr.reverse_segments(1, 4);
        assert_ne!(rev, chr);
        assert_eq!(rev[1], chr[3].reversed());
        assert_eq!(rev[3], chr[1].reversed());
        assert_eq!(rev[0], chr[0]);
        assert_eq!(rev.reverse_segments(1, 4), chr);
    }
    #[test]
    fn duplicate_and_delete() {
        let chr = chromosome(1, 5, Haplotype::A);
        let dup = chr.duplicate_segments(1, 3);
        let ids: Vec<_> = dup.iter().map(|s| s.start.coordinate).collect();
        assert_eq!(ids, vec![0, 1, 2, 1, 2, 3, 4]);
        let del = chr.delete_segments(1, 3);
        let ids: Vec<_> = del.iter().map(|s| s.start.coordinate).collect();
        assert_eq!(ids, vec![0, 3, 4]);
        assert_eq!(chr.delete_segments(0, 5).len(), 0);
    }
    #[test]
    fn translocation_conserves() {
        let chr1 = chromosome(1, 4, Haplotype::A);
        let chr2 = chromosome(2, 7, Haplotype::B);
        for cc in [true, false] {
            for i in 0..=chr1.len() {
                for j in 0..=chr2.len() {
                    let (c1, c2) = chr1.translocate_segments(&chr2, i, j, cc);
                    assert_eq!(c1.len() + c2.len(), 11);
                }
            }
        }
        let (c1, c2) = chr1.translocate_segments(&chr2, 2, 3, true);
        assert_eq!(c1[1], chr1[1]);
        assert_eq!(c1[2], chr2[3]);
        assert_eq!(c2[3], chr1[2]);
        let (c1, c2) = chr1.translocate_segments(&chr2, 2, 3, false);
        assert_eq!(c1[2], chr2[2].reversed());
        assert_eq!(c1.len(), 5);
        assert_eq!(c2[0], chr1[3].reversed());
        assert_eq!(c2[2], chr2[3]);
    }
    #[test]
    fn canonical_id() {
        let seg = Segment::new(3, 10, 11, Haplotype::B);
        assert!(!seg.is_reversed());
        let rev = seg.reversed();
        assert!(rev.is_reversed());
        assert_ne!(rev.id(), seg.id());
        assert_eq!(rev.canonical_id(), seg.id());
        assert_eq!(rev.reversed(), seg);
    }
    #[test]
    fn most_common() {
        let chr1 = chromosome(1, 4, Haplotype::A);
        let chr2 = chromosome(2, 3, Haplotype::B);
        let (mixed, _) = chr1.translocate_segments(&chr2, 1, 0, true);
        assert_eq!(mixed.most_common_chromosome(), Some(2));
        assert_eq!(Chromosome::default().most_common_chromosome(), None);
        let (tie, _) = chr1.translocate_segments(&chr2, 2, 1, true);
        assert_eq!(tie.most_common_chromosome(), Some(1));
    }
    #[test]
    fn adjacency_is_normalized() {
        let p = Position::new(1, 5, Strand::Forward);
        let q = Position::new(1, 2, Strand::Reverse);
        let adj1 = Adjacency::new(p, q, AdjacencyType::Novel);
        let adj2 = Adjacency::new(q, p, AdjacencyType::Novel);
        assert_eq!(adj1.idx(), adj2.idx());
        assert_eq!(adj1.position1, q);
    }
    #[test]
    fn phasing_table() {
        use Haplotype::*;
        assert_eq!(Phasing::from_haplotypes(A, B), Phasing::AB);
        assert_eq!(Phasing::from_haplotypes(B, A), Phasing::BA);
        assert_eq!(Phasing::from_haplotypes(Unknown, Unknown), Phasing::UU);
        assert_eq!(Phasing::from_haplotypes(Unknown, B), Phasing::UB);
    }
    #[test]
    fn mutation_type_names() {
        assert_eq!("reversal".parse(), Ok(MutationType::Reversal));
        assert_eq!("TRANSLOCATION".parse(), Ok(MutationType::Translocation));
        assert!("INSERTION".parse::<MutationType>().is_err());
        let json = serde_json::to_string(&MutationType::Deletion).unwrap();
        assert_eq!(json, "\"DELETION\"");
        assert!(serde_json::from_str::<MutationType>("\"FOO\"").is_err());
    }
    #[test]
    fn mutation_positions() {
        let p = Position::new(1, 1, Strand::Forward);
        let mutation = Mutation::Deletion(SegmentRange {
            chromosome_index: 0,
            start_index: 0,
            end_index: 1,
            positions: [None, Some(p), Some(p), None],
        });
        assert_eq!(mutation.positions().count(), 2);
        assert_eq!(mutation.mutation_type(), MutationType::Deletion);
    }
}
