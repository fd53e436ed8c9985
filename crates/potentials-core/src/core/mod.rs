//! # Core Module
//!
//! The building blocks for working with interatomic-potential records and
//! turning them into LAMMPS input.
//!
//! ## Architecture
//!
//! - **Documents** ([`document`]) - The tagged record tree and its JSON and XML serialisations
//! - **Records** ([`models`]) - Validated potential models, their atoms, terms and builder
//! - **Command Generation** ([`lammps`]) - `pair_info` and the data/restart script wrappers
//! - **Reference Data** ([`utils`]) - Standard atomic masses and number formatting
//! - **Errors** ([`error`]) - The validation and generation error taxonomy
//!
//! Everything here is synchronous and free of shared mutable state: models are
//! immutable after construction and generation never modifies them.

pub mod document;
pub mod error;
pub mod lammps;
pub mod models;
pub mod utils;
