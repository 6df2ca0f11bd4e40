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

//! DNA geometric parameters used to lay out a bundle and to turn a bend angle into edits.

/// DNA geometric parameters.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Distance between two consecutive bases along the axis of a
    /// helix, in nanometers.
    pub z_step: f64,
    /// Radius of a helix, in nanometers.
    pub helix_radius: f64,
    /// Gap between two neighbouring helices.
    pub inter_helix_gap: f64,
}

impl Parameters {
    /// Default values for the parameters of DNA. The axial rise is the B-form value, the helix
    /// radius and gap are the ones used to lay out ENSnano grids.
    pub const DEFAULT: Parameters = Parameters {
        z_step: 0.34,
        helix_radius: 1.,
        // From Paul's paper.
        inter_helix_gap: 0.65,
    };

    /// Half of the distance between the axes of two neighbouring helices.
    ///
    /// All lattice offsets are expressed as multiples of this length.
    pub fn lattice_unit(&self) -> f64 {
        self.inter_helix_gap / 2. + self.helix_radius
    }

    pub fn formated_string(&self) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        writeln!(&mut ret, "  Z step: {:.3} nm", self.z_step).unwrap_or_default();
        writeln!(&mut ret, "  Helix radius: {:.2} nm", self.helix_radius).unwrap_or_default();
        writeln!(
            &mut ret,
            "  Inter helix gap: {:.2} nm",
            self.inter_helix_gap
        )
        .unwrap_or_default();
        ret
    }
}

impl std::default::Default for Parameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
