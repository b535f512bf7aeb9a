//! Parameters of the mutation process.
use crate::error::{Result, SimulationError};
use definitions::MutationType;
use rand::distributions::WeightedIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const MAX_ATTEMPTS: usize = 10_000;
const PROB_TOLERANCE: f64 = 0.000_001;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReversalPolicy {
    /// If false, a reversal never touches a chromosome end.
    pub arm_reversal: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicationPolicy {
    pub arm_duplication: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletionPolicy {
    pub arm_deletion: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslocationPolicy {
    /// If true, the first chromosome may contribute an empty arm.
    pub chr1_empty_arm: bool,
    pub chr2_empty_arm: bool,
    /// If true, the two homologs of a chromosome may exchange their arms.
    pub homozygous: bool,
}

/// The configuration of the mutation process.
/// This struct is read-only during a simulation.
/// The breakpoints used so far live in [MutatedExtremities](crate::breakage::MutatedExtremities).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MutationConfig {
    pub mutation_types: Vec<MutationType>,
    /// The probability of each type in `mutation_types`, in the same order.
    pub mutation_probs: Vec<f64>,
    pub reversal: ReversalPolicy,
    pub duplication: DuplicationPolicy,
    pub deletion: DeletionPolicy,
    pub translocation: TranslocationPolicy,
    /// How many times a generator resamples chromosomes before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    MAX_ATTEMPTS
}

impl std::default::Default for MutationConfig {
    fn default() -> Self {
        Self {
            mutation_types: vec![
                MutationType::Reversal,
                MutationType::Duplication,
                MutationType::Deletion,
                MutationType::Translocation,
            ],
            mutation_probs: vec![0.1, 0.425, 0.425, 0.05],
            reversal: ReversalPolicy {
                arm_reversal: false,
            },
            duplication: DuplicationPolicy {
                arm_duplication: true,
            },
            deletion: DeletionPolicy {
                arm_deletion: false,
            },
            translocation: TranslocationPolicy {
                chr1_empty_arm: false,
                chr2_empty_arm: false,
                homozygous: false,
            },
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl MutationConfig {
    /// Only one type of mutation would occur.
    pub fn with_single_type(mutation_type: MutationType) -> Self {
        Self {
            mutation_types: vec![mutation_type],
            mutation_probs: vec![1f64],
            ..Self::default()
        }
    }
    pub fn validate(&self) -> Result<()> {
        if self.mutation_types.is_empty() {
            return Err(SimulationError::configuration("no mutation type is enabled"));
        }
        if self.mutation_types.len() != self.mutation_probs.len() {
            return Err(SimulationError::configuration(format!(
                "{} mutation types but {} probabilities",
                self.mutation_types.len(),
                self.mutation_probs.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.mutation_types.iter().find(|t| !seen.insert(**t)) {
            return Err(SimulationError::configuration(format!(
                "{} is listed more than once",
                dup
            )));
        }
        if let Some(p) = self
            .mutation_probs
            .iter()
            .find(|p| !p.is_finite() || **p < 0f64)
        {
            return Err(SimulationError::configuration(format!(
                "invalid probability {}",
                p
            )));
        }
        let total: f64 = self.mutation_probs.iter().sum();
        if (total - 1f64).abs() > PROB_TOLERANCE {
            return Err(SimulationError::configuration(format!(
                "probabilities sum up to {}, not 1",
                total
            )));
        }
        if self.max_attempts == 0 {
            return Err(SimulationError::configuration("max_attempts should be positive"));
        }
        Ok(())
    }
    /// The categorical distribution over `mutation_types`.
    pub fn type_distribution(&self) -> Result<WeightedIndex<f64>> {
        WeightedIndex::new(&self.mutation_probs)
            .map_err(|why| SimulationError::configuration(format!("{}", why)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn default_is_valid() {
        let config = MutationConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.type_distribution().is_ok());
        assert!(!config.reversal.arm_reversal);
        assert!(config.duplication.arm_duplication);
    }
    #[test]
    fn invalid_configs() {
        let mut config = MutationConfig::default();
        config.mutation_probs.pop();
        assert!(matches!(
            config.validate(),
            Err(SimulationError::Configuration(_))
        ));
        let mut config = MutationConfig::default();
        config.mutation_probs = vec![0.5, 0.5, 0.5, -0.5];
        assert!(config.validate().is_err());
        let mut config = MutationConfig::default();
        config.mutation_probs = vec![0.2, 0.2, 0.2, 0.2];
        assert!(config.validate().is_err());
        let mut config = MutationConfig::with_single_type(MutationType::Deletion);
        assert!(config.validate().is_ok());
        config.max_attempts = 0;
        assert!(config.validate().is_err());
        let mut config = MutationConfig::default();
        config.mutation_types.clear();
        config.mutation_probs.clear();
        assert!(config.validate().is_err());
        let mut config = MutationConfig::with_single_type(MutationType::Deletion);
        config.mutation_types.push(MutationType::Deletion);
        config.mutation_probs = vec![0.5, 0.5];
        assert!(config.validate().is_err());
        config.mutation_types[1] = MutationType::Reversal;
        assert!(config.validate().is_ok());
    }
    #[test]
    fn serde_roundtrip() {
        let config = MutationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"TRANSLOCATION\""));
        let back: MutationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
