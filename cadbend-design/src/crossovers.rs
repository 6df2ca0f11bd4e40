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

//! Crossover planes and the relocation of the edits that sit on them.
//!
//! A crossover plane is a position of the bundle at which at least one helix is joined to another
//! helix. An insertion or a deletion on such a position is structurally invalid, so the edits
//! found on crossover planes are moved by one position, away from the crossover.

use super::design_operations::ErrOperation;
use super::edits::{self, EditState};
use super::{Bundle, Helix};

/// Direction in which an edit on a crossover plane is moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    Left,
    Right,
}

impl ShiftDirection {
    fn apply(self, pos: usize) -> isize {
        match self {
            Self::Left => pos as isize - 1,
            Self::Right => pos as isize + 1,
        }
    }
}

/// True if a helix of the bundle is joined to another helix at position `pos`.
///
/// Positions outside of the bundle are never crossover planes.
pub fn is_crossover_plane(bundle: &Bundle, pos: isize) -> bool {
    if pos < 0 {
        return false;
    }
    bundle
        .vstrands
        .iter()
        .any(|h| h.has_crossover_at(pos as usize))
}

/// The direction in which an edit on the crossover plane at `pos` must be moved.
///
/// The edit goes to the left if the next position is also a crossover plane and to the right
/// otherwise. Whether the destination already carries an edit is not taken into account.
pub fn shift_direction(bundle: &Bundle, pos: isize) -> ShiftDirection {
    if is_crossover_plane(bundle, pos + 1) {
        ShiftDirection::Left
    } else {
        ShiftDirection::Right
    }
}

/// An edit moved by `shift_edits_off_crossovers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftedEdit {
    pub helix: usize,
    pub from: usize,
    pub to: usize,
    pub edit: EditState,
}

/// Move the edits that sit on crossover planes by one position.
///
/// Positions are visited from left to right, and for each position the helices are visited in
/// the order of the bundle. Helices shorter than the longest one are only visited up to their own
/// length. This is a single pass: an edit moved to the left is not visited
/// again, even if it lands on another crossover plane.
///
/// Returns an error, and stops, if an edit would leave the bundle or land on a position that
/// already carries an edit. Edits moved before the error are not moved back.
pub fn shift_edits_off_crossovers(bundle: &mut Bundle) -> Result<Vec<ShiftedEdit>, ErrOperation> {
    log::info!("Number of strands = {}", bundle.nb_helices());
    let mut ret = Vec::new();
    let max_len = bundle.vstrands.iter().map(Helix::len).max().unwrap_or(0);
    for pos in 0..max_len {
        for h_id in 0..bundle.nb_helices() {
            if pos >= bundle.vstrands[h_id].len() {
                continue;
            }
            let edit = bundle.vstrands[h_id].edit_state(pos);
            if !edit.is_edit() || !is_crossover_plane(bundle, pos as isize) {
                continue;
            }
            let direction = shift_direction(bundle, pos as isize);
            let to = direction.apply(pos);
            let dest = edits::checked_position(bundle, h_id, to).map_err(|_| {
                ErrOperation::ShiftOutOfBounds {
                    helix: h_id,
                    from: pos,
                    to,
                }
            })?;
            let existing = bundle.vstrands[h_id].edit_state(dest);
            if existing.is_edit() {
                return Err(ErrOperation::ShiftCollision {
                    helix: h_id,
                    from: pos,
                    to: dest,
                    existing,
                });
            }
            log::debug!(
                "Shifting edit of helix {} away from a crossover plane @ {} -> {}",
                bundle.vstrands[h_id].num,
                pos,
                dest
            );
            edits::reset_base(bundle, h_id, pos as isize)?;
            edits::set_edit(bundle, h_id, to, edit)?;
            ret.push(ShiftedEdit {
                helix: h_id,
                from: pos,
                to: dest,
                edit,
            });
        }
    }
    log::info!("Moved {} edits off crossover planes", ret.len());
    Ok(ret)
}
