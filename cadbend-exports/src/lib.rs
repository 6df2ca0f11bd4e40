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

//! Exports the lattice geometry computed for a bend to an svg picture.
//!
//! Each helix is drawn as a disk at its position in the plane orthogonal to the helix axes,
//! labelled with its number and its gradient. Helices receiving insertions, deletions and no
//! edits are drawn in different colors. The normal plane of the bend is drawn as a dashed line.

use cadbend_design::design_operations::Gradients;
use cadbend_design::grid::{Axis, LatticeGeometry};
use cadbend_design::{Bundle, Parameters};
use std::path::{Path, PathBuf};
use svg::node::element::{Circle, Group, Line, Text};
use svg::Document;

const INSERTION_COLOR: &str = "#e5604f";
const DELETION_COLOR: &str = "#4f8fe5";
const NEUTRAL_COLOR: &str = "#cccccc";
const STROKE_COLOR: &str = "#333333";
/// Number of svg units per nanometer.
const SCALE: f64 = 20.;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("could not write svg file: {0}")]
    IOError(#[from] std::io::Error),
}

/// The description of the bend that is drawn on top of the helices.
#[derive(Debug, Clone)]
pub struct BendPicture<'a> {
    pub bundle: &'a Bundle,
    pub geometry: &'a LatticeGeometry,
    pub gradients: &'a Gradients,
    /// If some, the normal plane along this axis is drawn.
    pub axis: Option<Axis>,
    pub parameters: &'a Parameters,
}

impl<'a> BendPicture<'a> {
    /// Position in svg coordinates. The y axis of svg pictures points down.
    fn svg_position(&self, helix: usize) -> Option<(f64, f64)> {
        self.geometry
            .position(helix)
            .map(|p| (p.x * SCALE, -p.y * SCALE))
    }

    /// `(min_x, min_y, width, height)` of the picture.
    fn view_box(&self) -> (f64, f64, f64, f64) {
        let margin = 2. * self.parameters.lattice_unit() * SCALE;
        let mut min = (f64::INFINITY, f64::INFINITY);
        let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for h_id in 0..self.bundle.nb_helices() {
            if let Some((x, y)) = self.svg_position(h_id) {
                min = (min.0.min(x), min.1.min(y));
                max = (max.0.max(x), max.1.max(y));
            }
        }
        if min.0 > max.0 {
            return (-margin, -margin, 2. * margin, 2. * margin);
        }
        (
            min.0 - margin,
            min.1 - margin,
            max.0 - min.0 + 2. * margin,
            max.1 - min.1 + 2. * margin,
        )
    }

    fn helix_group(&self, helix: usize) -> Option<Group> {
        let (x, y) = self.svg_position(helix)?;
        let num = self.bundle.vstrands.get(helix)?.num;
        let gradient = self.gradients.get(helix);
        let color = if gradient > 0 {
            INSERTION_COLOR
        } else if gradient < 0 {
            DELETION_COLOR
        } else {
            NEUTRAL_COLOR
        };
        let disk = Circle::new()
            .set("cx", x)
            .set("cy", y)
            .set("r", self.parameters.helix_radius * SCALE)
            .set("fill", color)
            .set("stroke", STROKE_COLOR);
        let label = Text::new()
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-size", 0.5 * self.parameters.helix_radius * SCALE)
            .add(svg::node::Text::new(format!("{} ({:+})", num, gradient)));
        Some(Group::new().add(disk).add(label))
    }

    fn normal_plane_line(&self, axis: Axis) -> Line {
        let (min_x, min_y, width, height) = self.view_box();
        let plane = self.geometry.normal_plane(axis) * SCALE;
        let line = match axis {
            Axis::X => Line::new()
                .set("x1", plane)
                .set("y1", min_y)
                .set("x2", plane)
                .set("y2", min_y + height),
            Axis::Y => Line::new()
                .set("x1", min_x)
                .set("y1", -plane)
                .set("x2", min_x + width)
                .set("y2", -plane),
        };
        line.set("stroke", STROKE_COLOR)
            .set("stroke-dasharray", "4 4")
    }

    pub fn to_document(&self) -> Document {
        let mut document = Document::new().set("viewBox", self.view_box());
        if let Some(axis) = self.axis {
            document = document.add(self.normal_plane_line(axis));
        }
        for h_id in 0..self.bundle.nb_helices() {
            if let Some(group) = self.helix_group(h_id) {
                document = document.add(group);
            }
        }
        document
    }

    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, ExportError> {
        svg::save(path.as_ref(), &self.to_document())?;
        log::info!("Lattice plot written to {}", path.as_ref().to_string_lossy());
        Ok(path.as_ref().to_path_buf())
    }
}
