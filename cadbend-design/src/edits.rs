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

//! Insertions and deletions on the positions of a bundle.
//!
//! A position is always in exactly one `EditState`. The functions of this module overwrite both
//! the `skip` and the `loop` value of the edited position so that a position never carries an
//! insertion and a deletion at the same time.

use super::design_operations::ErrOperation;
use super::Bundle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Neutral,
    /// `skip = -1`
    Deleted,
    /// `loop = n`, `n > 0`
    Inserted(usize),
}

impl EditState {
    pub(super) fn from_skip_loop(skip: isize, loop_: isize) -> Self {
        if skip < 0 {
            Self::Deleted
        } else if loop_ > 0 {
            Self::Inserted(loop_ as usize)
        } else {
            Self::Neutral
        }
    }

    pub(super) fn to_skip_loop(self) -> (isize, isize) {
        match self {
            Self::Neutral => (0, 0),
            Self::Deleted => (-1, 0),
            Self::Inserted(n) => (0, n as isize),
        }
    }

    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// Add one insertion at position `pos` of the helix at index `helix`.
pub fn insert_base(bundle: &mut Bundle, helix: usize, pos: isize) -> Result<(), ErrOperation> {
    set_edit(bundle, helix, pos, EditState::Inserted(1))
}

/// Add a deletion at position `pos` of the helix at index `helix`.
pub fn delete_base(bundle: &mut Bundle, helix: usize, pos: isize) -> Result<(), ErrOperation> {
    set_edit(bundle, helix, pos, EditState::Deleted)
}

/// Remove any insertion or deletion at position `pos` of the helix at index `helix`.
pub fn reset_base(bundle: &mut Bundle, helix: usize, pos: isize) -> Result<(), ErrOperation> {
    set_edit(bundle, helix, pos, EditState::Neutral)
}

pub fn set_edit(
    bundle: &mut Bundle,
    helix: usize,
    pos: isize,
    state: EditState,
) -> Result<(), ErrOperation> {
    let pos = checked_position(bundle, helix, pos)?;
    let helix_ref = bundle
        .vstrands
        .get_mut(helix)
        .ok_or(ErrOperation::HelixDoesNotExists(helix))?;
    helix_ref.set_edit_state(pos, state);
    Ok(())
}

/// Return `pos` as an index in the helix at index `helix` or an error if it is not a position
/// of that helix.
pub fn checked_position(bundle: &Bundle, helix: usize, pos: isize) -> Result<usize, ErrOperation> {
    let len = bundle
        .vstrands
        .get(helix)
        .ok_or(ErrOperation::HelixDoesNotExists(helix))?
        .len();
    if pos >= 0 && (pos as usize) < len {
        Ok(pos as usize)
    } else {
        Err(ErrOperation::PositionOutOfBounds {
            helix,
            position: pos,
            length: len,
        })
    }
}
