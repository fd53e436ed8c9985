//! # LAMMPS Module
//!
//! Turns a [`PotentialModel`](crate::core::models::potential::PotentialModel)
//! into LAMMPS input commands.
//!
//! [`generator::CommandGenerator`] renders the `mass`, `pair_style`,
//! `pair_coeff` and extra command lines for a chosen list of atom-model
//! symbols, handling wildcard, many-body and pairwise coefficient rules as
//! well as OpenKIM models. The [`script`] wrappers add the commands that read
//! a data or restart file ahead of them.

pub mod generator;
pub mod script;
