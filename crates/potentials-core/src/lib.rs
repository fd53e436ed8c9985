//! # Potentials Library
//!
//! Interatomic-potential records and LAMMPS command generation.
//!
//! A potential's LAMMPS implementation is stored as a `potential-LAMMPS`
//! record document. This library parses and validates such records, builds
//! new ones, and renders them as the LAMMPS commands that define the
//! potential for a given set of atom types.
//!
//! - **[`core::document`]** reads and writes JSON and XML record documents.
//! - **[`core::models`]** holds the validated [`PotentialModel`] and its builder.
//! - **[`core::lammps`]** generates `mass`, `pair_style`, `pair_coeff` and
//!   related command lines.
//!
//! ```ignore
//! use potentials::{CommandGenerator, PotentialModel, SymbolRequest};
//!
//! let model = PotentialModel::from_path("potential_LAMMPS.json")?;
//! let commands = CommandGenerator::new(&model)
//!     .with_pot_dir("potentials/Cu")
//!     .pair_info(["Cu"], None)?;
//! ```

pub mod core;

pub use crate::core::document::Format;
pub use crate::core::document::traits::DocumentError;
pub use crate::core::error::PotentialError;
pub use crate::core::lammps::generator::CommandGenerator;
pub use crate::core::models::builder::{CoeffScheme, PairInteraction, PotentialBuilder};
pub use crate::core::models::potential::{Metadata, PotentialModel, SymbolRequest};
