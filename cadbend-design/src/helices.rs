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

use super::edits::EditState;
use serde_json::{Map, Value};

/// Value of a connection field meaning "not connected".
pub const NO_HELIX: isize = -1;

/// The connectivity of one nucleotide of a cadnano helix.
///
/// Serialized as the 4-integer array `[prev_num, prev_pos, next_num, next_pos]` of the cadnano2
/// format. `prev_num` and `next_num` are the numbers of the helices holding the 5' and 3'
/// neighbours of the nucleotide, or `-1` if there is no such neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection(pub isize, pub isize, pub isize, pub isize);

impl Connection {
    pub const NONE: Connection = Connection(NO_HELIX, NO_HELIX, NO_HELIX, NO_HELIX);

    /// Number of the helix holding the 5' neighbour.
    pub fn prime5_helix(&self) -> isize {
        self.0
    }

    /// Number of the helix holding the 3' neighbour.
    pub fn prime3_helix(&self) -> isize {
        self.2
    }

    /// True if one of the neighbours of the nucleotide lies on an helix other than `own_num`.
    pub fn leaves_helix(&self, own_num: isize) -> bool {
        [self.prime5_helix(), self.prime3_helix()]
            .iter()
            .any(|n| *n != NO_HELIX && *n != own_num)
    }
}

/// A cadnano virtual helix (a `vstrand` of the cadnano2 format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Helix {
    /// Identifier of the helix. It is not related to the position of the helix in the bundle.
    pub num: isize,
    pub row: isize,
    pub col: isize,
    pub scaf: Vec<Connection>,
    pub stap: Vec<Connection>,
    /// `-1` marks a deletion.
    pub skip: Vec<isize>,
    /// A positive value marks that many insertions.
    #[serde(rename = "loop")]
    pub loop_: Vec<isize>,
    /// Fields of the cadnano helix that are not used by the bending tools (colors, scaffold and
    /// staple loops, ...). They are written back untouched.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Helix {
    /// A helix of length `len` with no strand and no edit.
    pub fn new(num: isize, row: isize, col: isize, len: usize) -> Self {
        Self {
            num,
            row,
            col,
            scaf: vec![Connection::NONE; len],
            stap: vec![Connection::NONE; len],
            skip: vec![0; len],
            loop_: vec![0; len],
            other: Map::new(),
        }
    }

    pub fn lattice_coord(&self) -> (isize, isize) {
        (self.row, self.col)
    }

    /// The number of positions at which all of `scaf`, `stap`, `skip` and `loop` are defined.
    pub fn len(&self) -> usize {
        self.scaf
            .len()
            .min(self.stap.len())
            .min(self.skip.len())
            .min(self.loop_.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the helix is joined to another helix at position `pos`, by its scaffold or by
    /// its staple.
    pub fn has_crossover_at(&self, pos: usize) -> bool {
        let scaf = self.scaf.get(pos).filter(|c| c.leaves_helix(self.num));
        let stap = self.stap.get(pos).filter(|c| c.leaves_helix(self.num));
        scaf.is_some() || stap.is_some()
    }

    /// The edit state of position `pos`. Panics if `pos >= self.len()`.
    pub fn edit_state(&self, pos: usize) -> EditState {
        EditState::from_skip_loop(self.skip[pos], self.loop_[pos])
    }

    /// Overwrite both the skip and the loop value of position `pos`.
    pub(super) fn set_edit_state(&mut self, pos: usize, state: EditState) {
        let (skip, loop_) = state.to_skip_loop();
        self.skip[pos] = skip;
        self.loop_[pos] = loop_;
    }
}
