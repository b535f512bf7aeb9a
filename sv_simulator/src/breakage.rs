//! Where a new breakpoint can be placed.
use definitions::{Chromosome, Mutation, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Extremities already used as a breakpoint in a simulation.
/// It only grows as the simulation proceeds. Each simulation should own its instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutatedExtremities {
    positions: HashSet<Position>,
}

impl MutatedExtremities {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn contains(&self, position: &Position) -> bool {
        self.positions.contains(position)
    }
    /// Register all the breakpoint extremities of the mutation.
    pub fn record(&mut self, mutation: &Mutation) {
        self.positions.extend(mutation.positions());
    }
    pub fn len(&self) -> usize {
        self.positions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl std::iter::FromIterator<Position> for MutatedExtremities {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let positions = iter.into_iter().collect();
        Self { positions }
    }
}

/// Return the indices in `[0, chromosome.len()]` where the chromosome can be broken.
/// The index `i` is the junction between the `i-1`-th and the `i`-th segments.
/// The junction is available if none of its extremities has been mutated.
pub fn breakage_indexes(chromosome: &Chromosome, extremities: &MutatedExtremities) -> Vec<usize> {
    let segments = chromosome.segments();
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return vec![],
    };
    let mut indexes = Vec::with_capacity(segments.len() + 1);
    if !extremities.contains(&first.start) {
        indexes.push(0);
    }
    let internal = segments
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            !extremities.contains(&pair[0].end) && !extremities.contains(&pair[1].start)
        })
        .map(|(i, _)| i + 1);
    indexes.extend(internal);
    if !extremities.contains(&last.end) {
        indexes.push(segments.len());
    }
    indexes
}

/// Remove the chromosome ends (0 and `len`) from the breakage indices.
pub fn strip_termini(mut indexes: Vec<usize>, len: usize) -> Vec<usize> {
    if indexes.last() == Some(&len) {
        indexes.pop();
    }
    if indexes.first() == Some(&0) {
        indexes.remove(0);
    }
    indexes
}

/// The pair of extremities flanking the junction at `index`.
/// The left one is `None` at the start of the chromosome, and the right one is `None` at the end.
pub fn boundary_positions(
    chromosome: &Chromosome,
    index: usize,
) -> (Option<Position>, Option<Position>) {
    let segments = chromosome.segments();
    let left = index
        .checked_sub(1)
        .and_then(|i| segments.get(i))
        .map(|s| s.end);
    let right = segments.get(index).map(|s| s.start);
    (left, right)
}
