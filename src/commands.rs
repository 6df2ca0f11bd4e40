/*
cadbend, bend insertion and crossover shift correction for cadnano2 DNA bundles.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! The batch jobs run by each command.
//!
//! A job reads its input, performs every operation in memory and only writes its output once all
//! operations have succeeded.

use super::cli::{BendArgs, Commands, PlotArgs, ShiftCorrectArgs};
use cadbend_design::design_operations::{
    apply_bends, shift_edits_off_crossovers, ErrOperation, Gradients,
};
use cadbend_design::grid::{GeometryError, LatticeGeometry};
use cadbend_design::{Bundle, LoadBundleError, Parameters, SaveBundleError};
use cadbend_exports::{BendPicture, ExportError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("could not read {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid content in {}: {source}", path.display())]
    ConfigFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Load(#[from] LoadBundleError),
    #[error(transparent)]
    Save(#[from] SaveBundleError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Operation(#[from] ErrOperation),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub fn run(command: &Commands, parameters: &Parameters) -> Result<(), CliError> {
    match command {
        Commands::Bend(args) => bend(args, parameters),
        Commands::ShiftCorrect(args) => shift_correct(args),
        Commands::Plot(args) => plot(args, parameters),
    }
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let json_str = std::fs::read_to_string(path).map_err(|source| CliError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json_str).map_err(|source| CliError::ConfigFormat {
        path: path.to_path_buf(),
        source,
    })
}

/// The parameters read from `path`, or the default parameters.
pub fn load_parameters(path: Option<&Path>) -> Result<Parameters, CliError> {
    let parameters = match path {
        Some(path) => read_json_file(path)?,
        None => Parameters::DEFAULT,
    };
    log::info!("DNA parameters:\n{}", parameters.formated_string());
    Ok(parameters)
}

/// Read a json object mapping helix numbers to edit counts, e.g. `{"0": 12, "2": -12}`.
pub fn load_edit_table(path: &Path) -> Result<BTreeMap<isize, isize>, CliError> {
    read_json_file(path)
}

fn bend(args: &BendArgs, parameters: &Parameters) -> Result<(), CliError> {
    let mut bundle = Bundle::from_file(&args.input)?;

    let gradients = if let Some(path) = args.edits.as_ref() {
        let table = load_edit_table(path)?;
        Gradients::from_edit_table(&bundle, &table)?
    } else {
        let geometry = LatticeGeometry::from_bundle(&bundle, args.lattice, parameters)?;
        geometry.gradients(args.angle, args.axis, parameters)
    };
    log::debug!("Edits per helix:\n{}", gradients.formated_string(&bundle));

    let report = apply_bends(&mut bundle, &gradients, args.length, &args.starts)?;
    log::info!(
        "{} insertions and {} deletions written",
        report.insertions,
        report.deletions
    );

    if args.no_shift_correct {
        log::warn!("Edits are not moved off crossover planes");
    } else {
        shift_edits_off_crossovers(&mut bundle)?;
    }

    bundle.write_to_file(&args.output)?;
    Ok(())
}

fn shift_correct(args: &ShiftCorrectArgs) -> Result<(), CliError> {
    let mut bundle = Bundle::from_file(&args.input)?;
    shift_edits_off_crossovers(&mut bundle)?;
    bundle.write_to_file(&args.output)?;
    Ok(())
}

fn plot(args: &PlotArgs, parameters: &Parameters) -> Result<(), CliError> {
    let bundle = Bundle::from_file(&args.input)?;
    let geometry = LatticeGeometry::from_bundle(&bundle, args.lattice, parameters)?;
    let gradients = geometry.gradients(args.angle, args.axis, parameters);
    let picture = BendPicture {
        bundle: &bundle,
        geometry: &geometry,
        gradients: &gradients,
        axis: Some(args.axis),
        parameters,
    };
    picture.export(&args.output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use cadbend_design::{Connection, EditState, Helix};
    use clap::Parser;

    /// A square four helix bundle of length 128 whose helices 0 and 1 are joined by a staple
    /// crossover at position 40.
    fn write_bundle(dir: &Path) -> PathBuf {
        let mut vstrands: Vec<Helix> = [(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1)]
            .iter()
            .map(|(num, row, col)| Helix::new(*num, *row, *col, 128))
            .collect();
        vstrands[0].stap[40] = Connection(0, 41, 1, 40);
        vstrands[1].stap[40] = Connection(0, 40, 1, 39);
        let mut bundle = Bundle::new(vstrands);
        bundle
            .other
            .insert("name".to_string(), serde_json::json!("4hb.json"));
        let path = dir.join("4hb.json");
        bundle.write_to_file(&path).unwrap();
        path
    }

    fn run_args(args: &[&str]) -> Result<(), CliError> {
        let cli = Cli::try_parse_from(args).unwrap();
        let parameters = load_parameters(cli.parameters.as_deref())?;
        run(&cli.command, &parameters)
    }

    #[test]
    fn bend_writes_shift_corrected_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let output = dir.path().join("bent.json");
        run_args(&[
            "cadbend",
            "bend",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "sq",
            "180",
            "21",
            "20",
        ])
        .unwrap();

        let bent = Bundle::from_file(&output).unwrap();
        assert_eq!(bent.other["name"], "4hb.json");
        // distribute(21, 20, 12) ends the section on 40, which sits on the crossover plane.
        for h_id in 0..4 {
            assert_eq!(bent.vstrands[h_id].edit_state(40), EditState::Neutral);
            let expected = if h_id < 2 {
                EditState::Inserted(1)
            } else {
                EditState::Deleted
            };
            assert_eq!(bent.vstrands[h_id].edit_state(20), expected);
            assert_eq!(bent.vstrands[h_id].edit_state(41), expected);
        }
        assert_eq!(bent.edits().len(), 48);
    }

    #[test]
    fn bend_without_shift_correction() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let output = dir.path().join("bent.json");
        run_args(&[
            "cadbend",
            "bend",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "sq",
            "180",
            "21",
            "20",
            "--no-shift-correct",
        ])
        .unwrap();
        let bent = Bundle::from_file(&output).unwrap();
        assert_eq!(bent.vstrands[0].edit_state(40), EditState::Inserted(1));
        assert_eq!(bent.vstrands[3].edit_state(40), EditState::Deleted);
    }

    #[test]
    fn bend_with_edit_table_and_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let output = dir.path().join("bent.json");
        let edits = dir.path().join("edits.json");
        std::fs::write(&edits, r#"{"1": 2, "3": -1}"#).unwrap();
        let parameters = dir.path().join("parameters.json");
        std::fs::write(&parameters, r#"{"z_step": 0.332}"#).unwrap();
        run_args(&[
            "cadbend",
            "--parameters",
            parameters.to_str().unwrap(),
            "bend",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "hc",
            "0",
            "30",
            "60",
            "--edits",
            edits.to_str().unwrap(),
        ])
        .unwrap();
        let bent = Bundle::from_file(&output).unwrap();
        assert_eq!(
            bent.edits(),
            vec![
                (1, 70, EditState::Inserted(1)),
                (1, 80, EditState::Inserted(1)),
                (3, 75, EditState::Deleted),
            ]
        );
    }

    #[test]
    fn failed_bend_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let output = dir.path().join("bent.json");
        let result = run_args(&[
            "cadbend",
            "bend",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "sq",
            "180",
            "90",
            "100",
        ]);
        assert!(matches!(
            result,
            Err(CliError::Operation(
                ErrOperation::BendSectionOutOfBounds { .. }
            ))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let input = dir.path().join("missing.json");
        let result = run_args(&[
            "cadbend",
            "shift-correct",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ]);
        assert!(matches!(
            result,
            Err(CliError::Load(LoadBundleError::IOError(_)))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn bad_parameters_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let parameters = dir.path().join("parameters.json");
        std::fs::write(&parameters, "{z_step: 1}").unwrap();
        assert!(matches!(
            load_parameters(Some(&parameters)),
            Err(CliError::ConfigFormat { .. })
        ));
    }

    #[test]
    fn shift_correct_moves_edits() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let mut bundle = Bundle::from_file(&input).unwrap();
        cadbend_design::edits::delete_base(&mut bundle, 2, 40).unwrap();
        bundle.write_to_file(&input).unwrap();
        let output = dir.path().join("corrected.json");
        run_args(&[
            "cadbend",
            "shift-correct",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ])
        .unwrap();
        let corrected = Bundle::from_file(&output).unwrap();
        assert_eq!(corrected.edits(), vec![(2, 41, EditState::Deleted)]);
    }

    #[test]
    fn plot_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_bundle(dir.path());
        let output = dir.path().join("lattice.svg");
        run_args(&[
            "cadbend",
            "plot",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            "sq",
            "--angle",
            "180",
        ])
        .unwrap();
        let svg = std::fs::read_to_string(&output).unwrap();
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("1 (+12)"));
    }
}
