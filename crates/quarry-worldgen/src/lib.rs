//! Chunk configuration and the seeded terrain generation pipeline.
//!
//! A chunk is produced in strictly sequential passes over one exclusively
//! owned grid: height-field synthesis, layer stratification with ore
//! seeding, cave carving, structure placement with foundation backfill.
//! All randomness flows from a single seeded stream, so a fixed seed
//! reproduces the whole chunk, report included.
#![forbid(unsafe_code)]

pub mod config;
mod generation;
pub mod report;

pub use config::{CaveParams, ChunkConfig, ConfigError, Layer, OreRule, TerrainParams};
pub use generation::{ChunkGeneration, generate, generate_seeded};
pub use report::{ChunkReport, OreEntry, OreLedger, PlacedStructure};
