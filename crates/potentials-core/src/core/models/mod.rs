//! # Models Module
//!
//! In-memory representation of LAMMPS potential implementation records.
//!
//! A [`potential::PotentialModel`] is the validated, immutable form of one
//! `potential-LAMMPS` record. It is produced either by parsing a record
//! document or by assembling one with the [`builder::PotentialBuilder`].
//!
//! - [`atom`] - Atom-model particle types (symbol, element, mass, charge)
//! - [`term`] - Command-line terms and pair_coeff rules
//! - [`status`] - Publication status of an implementation
//! - [`artifact`] - Downloadable parameter files
//! - [`potential`] - The model, its parser and symbol lookups
//! - [`builder`] - Field-by-field model construction

pub mod artifact;
pub mod atom;
pub mod builder;
pub mod potential;
pub mod status;
pub mod term;
