use super::generator::CommandGenerator;
use crate::core::error::PotentialError;
use crate::core::models::potential::SymbolRequest;
use std::path::Path;

impl CommandGenerator<'_> {
    /// Generates a script preamble that reads an atom data file and then
    /// defines the potential.
    ///
    /// Emits `units`, `atom_style`, a blank line, `boundary` (`p` for
    /// periodic directions, `m` otherwise) and `read_data`, another blank
    /// line, then the output of [`pair_info`](Self::pair_info).
    pub fn pair_data_info(
        &self,
        data_file: impl AsRef<Path>,
        pbc: [bool; 3],
        symbols: impl Into<SymbolRequest>,
        masses: Option<&[Option<f64>]>,
    ) -> Result<String, PotentialError> {
        let pair_info = self.pair_info(symbols, masses)?;
        let flags = pbc.map(|periodic| if periodic { "p" } else { "m" });
        Ok(format!(
            "units {}\natom_style {}\n\nboundary {} {} {}\nread_data {}\n\n{pair_info}",
            self.units(),
            self.atom_style(),
            flags[0],
            flags[1],
            flags[2],
            data_file.as_ref().display(),
        ))
    }

    /// Generates a script preamble that reads a restart file and then
    /// defines the potential.
    pub fn pair_restart_info(
        &self,
        restart_file: impl AsRef<Path>,
        symbols: impl Into<SymbolRequest>,
        masses: Option<&[Option<f64>]>,
    ) -> Result<String, PotentialError> {
        let pair_info = self.pair_info(symbols, masses)?;
        Ok(format!(
            "read_restart {}\n\n{pair_info}",
            restart_file.as_ref().display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::builder::{CoeffScheme, PotentialBuilder};
    use crate::core::models::potential::PotentialModel;

    fn model() -> PotentialModel {
        PotentialBuilder::new()
            .id("2009--Example--Cu--LAMMPS--ipr1")
            .pair_style("eam/alloy")
            .elements(["Cu"])
            .scheme(CoeffScheme::ParamFile { file: "Cu.eam.alloy".into() })
            .build()
            .unwrap()
    }

    #[test]
    fn pair_data_info_prefixes_system_setup() {
        let model = model();
        let info = CommandGenerator::new(&model)
            .pair_data_info("init.dat", [true, true, false], SymbolRequest::all(), None)
            .unwrap();
        assert_eq!(
            info,
            "units metal\natom_style atomic\n\nboundary p p m\nread_data init.dat\n\n\
             mass 1 63.546\n\npair_style eam/alloy\npair_coeff * * Cu.eam.alloy Cu\n"
        );
    }

    #[test]
    fn pair_data_info_honours_units_and_atom_style_overrides() {
        let model = model();
        let info = CommandGenerator::new(&model)
            .with_units("real")
            .with_atom_style("charge")
            .pair_data_info("init.dat", [false; 3], "Cu", None)
            .unwrap();
        assert!(info.starts_with("units real\natom_style charge\n\nboundary m m m\n"));
    }

    #[test]
    fn pair_restart_info_prefixes_read_restart() {
        let model = model();
        let info = CommandGenerator::new(&model)
            .pair_restart_info("run.restart", ["Cu", "Cu"], Some(&[None, Some(65.0)]))
            .unwrap();
        assert!(info.starts_with("read_restart run.restart\n\nmass 1 63.546\nmass 2 65.0\n\n"));
    }

    #[test]
    fn wrappers_propagate_generation_errors() {
        let model = model();
        let generator = CommandGenerator::new(&model);
        assert!(generator.pair_restart_info("r", ["Ag"], None).is_err());
        assert!(matches!(
            generator.pair_data_info("d", [true; 3], ["Cu"], Some(&[])),
            Err(PotentialError::LengthMismatch { .. })
        ));
    }
}
