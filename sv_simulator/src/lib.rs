//! Simulation of structural-variant histories on diploid genomes,
//! and the copy-number evidence derived from them.
pub mod apply;
pub mod breakage;
pub mod chromosome_generator;
pub mod config;
pub mod error;
pub mod evidence;
pub mod generate;
pub mod history;
pub mod manager;
#[macro_use]
extern crate log;

pub use breakage::MutatedExtremities;
pub use config::MutationConfig;
pub use error::{Result, SimulationError};
pub use history::{generate_mutated_genome, History};
