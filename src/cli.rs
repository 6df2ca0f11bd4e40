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

//! Command line arguments.

use cadbend_design::grid::{Axis, LatticeType};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Bend cadnano2 bundles by inserting and deleting bases, keeping the edits off crossover planes.
#[derive(Parser, Debug)]
#[command(name = "cadbend", author, version, about, long_about = None)]
pub struct Cli {
    /// Print more information (-v for progress, -vv for every edit moved)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Json file overriding the DNA geometric parameters (z_step, helix_radius,
    /// inter_helix_gap)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub parameters: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add the insertions and deletions that bend a bundle
    Bend(BendArgs),
    /// Move insertions and deletions off crossover planes
    ShiftCorrect(ShiftCorrectArgs),
    /// Draw the helices of a bundle and the edits each of them receives in a bend
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
pub struct BendArgs {
    /// Cadnano2 json file of the bundle
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// File to which the bent bundle is written
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Lattice of the bundle: `hc` (honeycomb) or `sq` (square)
    pub lattice: LatticeType,

    /// Bend angle, in degrees
    #[arg(allow_negative_numbers = true, value_parser = parse_angle)]
    pub angle: f64,

    /// Number of nucleotides over which the edits of a bend are spread
    pub length: usize,

    /// First position of each bend
    #[arg(required = true, allow_negative_numbers = true)]
    pub starts: Vec<isize>,

    /// Axis along which the distance of the helices to the bend plane is measured
    #[arg(long, default_value = "y")]
    pub axis: Axis,

    /// Json object mapping helix numbers to edit counts, used instead of the counts computed
    /// from the lattice
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub edits: Option<PathBuf>,

    /// Keep the edits on crossover planes
    #[arg(long)]
    pub no_shift_correct: bool,
}

#[derive(Args, Debug)]
pub struct ShiftCorrectArgs {
    /// Cadnano2 json file of the bundle
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// File to which the corrected bundle is written
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Cadnano2 json file of the bundle
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Svg file to write
    #[arg(value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Lattice of the bundle: `hc` (honeycomb) or `sq` (square)
    pub lattice: LatticeType,

    /// Bend angle, in degrees, used to compute the edit counts shown on the plot
    #[arg(long, default_value_t = 0., allow_negative_numbers = true, value_parser = parse_angle)]
    pub angle: f64,

    /// Axis of the bend plane
    #[arg(long, default_value = "y")]
    pub axis: Axis,
}

/// An angle in degrees. `inf` and `NaN` are rejected.
fn parse_angle(s: &str) -> Result<f64, String> {
    let angle: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if angle.is_finite() {
        Ok(angle)
    } else {
        Err(format!("the angle must be a finite number, got `{}`", s))
    }
}
