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

//! Positions of the helices of a bundle in the plane orthogonal to their axes.
//!
//! The position of each helix is obtained by walking the lattice from the first helix of the
//! bundle, which is placed at the origin. The walk only follows the four lattice neighbours of
//! each helix, so every helix of the bundle must be reachable from the first one.

use super::design_operations::Gradients;
use super::{Bundle, Parameters};
use ahash::AHashMap;
use std::collections::VecDeque;
use std::str::FromStr;
use ultraviolet::DVec2;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// The four lattice neighbours of a helix, in the order in which they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeDirection {
    /// `(0, +1)`
    NextColumn = 0,
    /// `(0, -1)`
    PreviousColumn = 1,
    /// `(+1, 0)`
    NextRow = 2,
    /// `(-1, 0)`
    PreviousRow = 3,
}

impl LatticeDirection {
    pub const ALL: [Self; 4] = [
        Self::NextColumn,
        Self::PreviousColumn,
        Self::NextRow,
        Self::PreviousRow,
    ];

    /// The `(row, column)` translation to the neighbour.
    pub fn coord_offset(self) -> (isize, isize) {
        match self {
            Self::NextColumn => (0, 1),
            Self::PreviousColumn => (0, -1),
            Self::NextRow => (1, 0),
            Self::PreviousRow => (-1, 0),
        }
    }
}

// Offsets are in lattice units (see `Parameters::lattice_unit`). The x axis follows the columns
// and the y axis goes up when the row index decreases.
const SQUARE_OFFSETS: [(f64, f64); 4] = [(2., 0.), (-2., 0.), (0., -2.), (0., 2.)];

/// Indexed by the parity of `row + col`.
const HONEYCOMB_OFFSETS: [[(f64, f64); 4]; 2] = [
    [(SQRT_3, -1.), (-SQRT_3, -1.), (0., -4.), (0., 2.)],
    [(SQRT_3, 1.), (-SQRT_3, 1.), (0., -2.), (0., 4.)],
];

pub trait LatticeDivision {
    /// Maps a translation between two neighbouring vertices of the lattice to a translation in
    /// the plane, in lattice units.
    fn neighbour_offset(&self, row: isize, col: isize, direction: LatticeDirection) -> DVec2;
}

#[derive(Debug, Clone, Copy)]
pub struct SquareLattice;

impl LatticeDivision for SquareLattice {
    fn neighbour_offset(&self, _row: isize, _col: isize, direction: LatticeDirection) -> DVec2 {
        let (x, y) = SQUARE_OFFSETS[direction as usize];
        DVec2::new(x, y)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HoneyComb;

impl LatticeDivision for HoneyComb {
    fn neighbour_offset(&self, row: isize, col: isize, direction: LatticeDirection) -> DVec2 {
        let parity = (row + col).rem_euclid(2) as usize;
        let (x, y) = HONEYCOMB_OFFSETS[parity][direction as usize];
        DVec2::new(x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeType {
    Square,
    Honeycomb,
}

impl LatticeDivision for LatticeType {
    fn neighbour_offset(&self, row: isize, col: isize, direction: LatticeDirection) -> DVec2 {
        match self {
            Self::Square => SquareLattice.neighbour_offset(row, col, direction),
            Self::Honeycomb => HoneyComb.neighbour_offset(row, col, direction),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown lattice type `{0}`, expected `hc` or `sq`")]
pub struct LatticeTypeError(pub String);

impl FromStr for LatticeType {
    type Err = LatticeTypeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hc" | "honeycomb" => Ok(Self::Honeycomb),
            "sq" | "square" => Ok(Self::Square),
            other => Err(LatticeTypeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for LatticeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Square => write!(f, "sq"),
            Self::Honeycomb => write!(f, "hc"),
        }
    }
}

/// The axis of the plane along which the distance of a helix to the bend axis is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn coord(self, point: DVec2) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown axis `{0}`, expected `x` or `y`")]
pub struct AxisError(pub String);

impl FromStr for Axis {
    type Err = AxisError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            other => Err(AxisError(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("the bundle has no helix")]
    EmptyBundle,
    #[error("helices {unreached:?} are not connected to helix {root} on the lattice")]
    DisconnectedLattice { root: isize, unreached: Vec<isize> },
}

/// The positions of the helices of a bundle, indexed like the helices of the bundle.
#[derive(Debug, Clone)]
pub struct LatticeGeometry {
    pub lattice: LatticeType,
    positions: Vec<DVec2>,
}

impl LatticeGeometry {
    pub fn from_bundle(
        bundle: &Bundle,
        lattice: LatticeType,
        parameters: &Parameters,
    ) -> Result<Self, GeometryError> {
        if bundle.vstrands.is_empty() {
            return Err(GeometryError::EmptyBundle);
        }
        let coord_to_helix: AHashMap<(isize, isize), usize> = bundle
            .vstrands
            .iter()
            .enumerate()
            .map(|(h_id, h)| (h.lattice_coord(), h_id))
            .collect();
        let unit = parameters.lattice_unit();

        let mut positions: Vec<Option<DVec2>> = vec![None; bundle.vstrands.len()];
        positions[0] = Some(DVec2::zero());
        let mut to_do = VecDeque::from(vec![0]);
        while let Some(h_id) = to_do.pop_front() {
            let (row, col) = bundle.vstrands[h_id].lattice_coord();
            let origin = if let Some(origin) = positions[h_id] {
                origin
            } else {
                continue;
            };
            for direction in LatticeDirection::ALL.iter() {
                let (d_row, d_col) = direction.coord_offset();
                if let Some(n_id) = coord_to_helix.get(&(row + d_row, col + d_col)) {
                    if positions[*n_id].is_none() {
                        let offset = lattice.neighbour_offset(row, col, *direction);
                        positions[*n_id] = Some(origin + offset * unit);
                        to_do.push_back(*n_id);
                    }
                }
            }
        }

        let unreached: Vec<isize> = positions
            .iter()
            .zip(bundle.vstrands.iter())
            .filter(|(p, _)| p.is_none())
            .map(|(_, h)| h.num)
            .collect();
        if !unreached.is_empty() {
            return Err(GeometryError::DisconnectedLattice {
                root: bundle.vstrands[0].num,
                unreached,
            });
        }

        Ok(Self {
            lattice,
            positions: positions.into_iter().flatten().collect(),
        })
    }

    pub fn positions(&self) -> &[DVec2] {
        self.positions.as_slice()
    }

    pub fn position(&self, helix: usize) -> Option<DVec2> {
        self.positions.get(helix).cloned()
    }

    /// The mean coordinate of the helices along `axis`.
    pub fn normal_plane(&self, axis: Axis) -> f64 {
        let sum: f64 = self.positions.iter().map(|p| axis.coord(*p)).sum();
        sum / self.positions.len() as f64
    }

    /// The signed number of edits that each helix needs for the bundle to bend by `angle`
    /// degrees. Helices on the positive side of the normal plane get insertions, the others get
    /// deletions.
    pub fn gradients(&self, angle: f64, axis: Axis, parameters: &Parameters) -> Gradients {
        let plane = self.normal_plane(axis);
        let angle = angle.to_radians();
        let values = self
            .positions
            .iter()
            .map(|p| (angle * (axis.coord(*p) - plane) / parameters.z_step).round_ties_even())
            .map(|g| g as isize)
            .collect();
        Gradients::new(values)
    }
}
