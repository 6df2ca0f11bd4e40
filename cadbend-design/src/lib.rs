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

//! This module defines the in-memory representation of a cadnano2 bundle and the operations used
//! to bend it.
//!
//! A `Bundle` is read from a cadnano2 json file, modified in place by the operations of
//! `design_operations` and written back in the same format. Helices are addressed by their index
//! in the bundle; `Bundle::helix_index` maps helix numbers to indices.
use std::path::Path;

#[macro_use]
extern crate serde_derive;
extern crate serde;

use ahash::{AHashMap, AHashSet};
use serde_json::{Map, Value};

pub use ultraviolet;

mod helices;
pub use helices::*;
pub mod edits;
pub use edits::EditState;
mod distribution;
pub use distribution::distribute;
pub mod grid;
pub mod crossovers;
pub mod design_operations;

mod parameters;
pub use parameters::*;

#[cfg(test)]
mod tests;

/// A cadnano2 design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// The helices of the bundle. The position of a helix in this vector is its index.
    pub vstrands: Vec<Helix>,
    /// Top level fields of the document other than `vstrands` (e.g. `name`).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadBundleError {
    #[error("could not read bundle: {0}")]
    IOError(#[from] std::io::Error),
    #[error("not a cadnano2 document: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("the bundle has no helix")]
    EmptyBundle,
    #[error("field `{field}` of helix {num} has length {actual}, expected {expected}")]
    InconsistentLength {
        num: isize,
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("helix number {0} is used more than once")]
    DuplicateHelixNumber(isize),
    #[error("lattice position ({row}, {col}) is used by more than one helix")]
    DuplicateLatticeCoord { row: isize, col: isize },
}

#[derive(Debug, thiserror::Error)]
pub enum SaveBundleError {
    #[error("could not write bundle: {0}")]
    IOError(#[from] std::io::Error),
    #[error("could not serialize bundle: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Bundle {
    pub fn new(vstrands: Vec<Helix>) -> Self {
        Self {
            vstrands,
            other: Map::new(),
        }
    }

    /// Parse a cadnano2 document and check that it is a well formed bundle.
    pub fn from_json_str(json: &str) -> Result<Self, LoadBundleError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.check_consistency()?;
        log::info!(
            "Read bundle of {} helices, length {}",
            bundle.nb_helices(),
            bundle.len()
        );
        Ok(bundle)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadBundleError> {
        let json_str = std::fs::read_to_string(path)?;
        Self::from_json_str(&json_str)
    }

    /// Serialize the bundle without any whitespace between tokens.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveBundleError> {
        let json_str = self.to_json_string()?;
        std::fs::write(path.as_ref(), json_str)?;
        log::info!("Written data to {}", path.as_ref().to_string_lossy());
        Ok(())
    }

    /// Check that all helices have the same length, and that helix numbers and lattice
    /// positions are unique.
    pub fn check_consistency(&self) -> Result<(), LoadBundleError> {
        let expected = self
            .vstrands
            .first()
            .ok_or(LoadBundleError::EmptyBundle)?
            .len();
        let mut numbers = AHashSet::new();
        let mut coords = AHashSet::new();
        for h in self.vstrands.iter() {
            let fields = [
                ("scaf", h.scaf.len()),
                ("stap", h.stap.len()),
                ("skip", h.skip.len()),
                ("loop", h.loop_.len()),
            ];
            for (field, actual) in fields {
                if actual != expected {
                    return Err(LoadBundleError::InconsistentLength {
                        num: h.num,
                        field,
                        expected,
                        actual,
                    });
                }
            }
            if !numbers.insert(h.num) {
                return Err(LoadBundleError::DuplicateHelixNumber(h.num));
            }
            if !coords.insert(h.lattice_coord()) {
                return Err(LoadBundleError::DuplicateLatticeCoord {
                    row: h.row,
                    col: h.col,
                });
            }
        }
        Ok(())
    }

    /// The number of positions of each helix of the bundle.
    pub fn len(&self) -> usize {
        self.vstrands.first().map(Helix::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nb_helices(&self) -> usize {
        self.vstrands.len()
    }

    pub fn num_to_index(&self) -> AHashMap<isize, usize> {
        self.vstrands
            .iter()
            .enumerate()
            .map(|(i, h)| (h.num, i))
            .collect()
    }

    /// The index of the helix whose number is `num`.
    pub fn helix_index(&self, num: isize) -> Option<usize> {
        self.vstrands.iter().position(|h| h.num == num)
    }

    /// All the edited positions of the bundle as `(helix index, position, edit)`, sorted by
    /// helix index then by position.
    pub fn edits(&self) -> Vec<(usize, usize, EditState)> {
        let mut ret = Vec::new();
        for (h_id, h) in self.vstrands.iter().enumerate() {
            for pos in 0..h.len() {
                let state = h.edit_state(pos);
                if state.is_edit() {
                    ret.push((h_id, pos, state));
                }
            }
        }
        ret
    }
}
