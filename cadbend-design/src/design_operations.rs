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

//! This modules defines operations that can be performed on a bundle to modify it.
//! The functions that apply these operations take a mutable reference to the bundle that they are
//! modifying and may return an `ErrOperation` if the operation could not be applied.
//!
//! Operations check every position they are about to write before writing the first one, so a
//! bundle on which an operation failed is left unchanged, except for `shift_edits_off_crossovers`
//! whose moves depend on the previous ones (see `crossovers`).

use super::edits::{self, checked_position, EditState};
use super::{distribute, Bundle};
use std::collections::BTreeMap;

pub use super::crossovers::{shift_edits_off_crossovers, ShiftedEdit};

/// An error that occured when trying to apply an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrOperation {
    #[error("there is no helix at index {0}")]
    HelixDoesNotExists(usize),
    #[error("there is no helix with number {0}")]
    UnknownHelixNumber(isize),
    #[error("position {position} is outside of helix {helix} (length {length})")]
    PositionOutOfBounds {
        helix: usize,
        position: isize,
        length: usize,
    },
    #[error("a bend section must contain at least one nucleotide")]
    EmptyBendSection,
    #[error("bend section [{start}, {end}] does not fit in a bundle of length {length}")]
    BendSectionOutOfBounds {
        start: isize,
        end: isize,
        length: usize,
    },
    #[error(
        "helix {helix} needs {gradient} edits, more than the {length} positions of the bend section"
    )]
    GradientTooLarge {
        helix: usize,
        gradient: isize,
        length: usize,
    },
    #[error(
        "edit of helix {helix} at {from} sits on a crossover plane and cannot be moved to {to}, \
         outside of the bundle"
    )]
    ShiftOutOfBounds { helix: usize, from: usize, to: isize },
    #[error(
        "edit of helix {helix} at {from} sits on a crossover plane and cannot be moved to {to} \
         which already carries an edit ({existing:?})"
    )]
    ShiftCollision {
        helix: usize,
        from: usize,
        to: usize,
        existing: EditState,
    },
}

/// The signed number of edits of each helix of a bundle, indexed like the helices of the bundle.
/// A positive value means insertions, a negative value deletions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gradients(Vec<isize>);

impl Gradients {
    pub fn new(values: Vec<isize>) -> Self {
        Self(values)
    }

    /// No edit on any of the `nb_helices` helices.
    pub fn zeros(nb_helices: usize) -> Self {
        Self(vec![0; nb_helices])
    }

    /// Build gradients from a table mapping helix numbers to edit counts. Helices that are not in
    /// the table receive no edit.
    pub fn from_edit_table(
        bundle: &Bundle,
        table: &BTreeMap<isize, isize>,
    ) -> Result<Self, ErrOperation> {
        let num_to_index = bundle.num_to_index();
        let mut values = vec![0; bundle.nb_helices()];
        for (num, count) in table.iter() {
            let h_id = num_to_index
                .get(num)
                .ok_or(ErrOperation::UnknownHelixNumber(*num))?;
            values[*h_id] = *count;
        }
        Ok(Self(values))
    }

    /// The gradient of the helix at index `helix`, 0 if there is no such helix.
    pub fn get(&self, helix: usize) -> isize {
        self.0.get(helix).cloned().unwrap_or(0)
    }

    pub fn values(&self) -> &[isize] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, isize)> + '_ {
        self.0.iter().cloned().enumerate()
    }

    pub fn formated_string(&self, bundle: &Bundle) -> String {
        use std::fmt::Write;
        let mut ret = String::new();
        for (h_id, gradient) in self.iter() {
            let num = bundle.vstrands.get(h_id).map(|h| h.num).unwrap_or(-1);
            writeln!(&mut ret, "  Helix {}: {:+}", num, gradient).unwrap_or_default();
        }
        ret
    }
}

/// The section of the bundle over which the edits of a bend are spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BendSection {
    pub start: isize,
    pub length: usize,
}

impl BendSection {
    /// Last position of the section. Saturates instead of overflowing.
    pub fn end(&self) -> isize {
        let length = isize::try_from(self.length).unwrap_or(isize::MAX);
        self.start.saturating_add(length - 1)
    }

    fn check_bounds(&self, bundle: &Bundle) -> Result<(), ErrOperation> {
        if self.length == 0 {
            return Err(ErrOperation::EmptyBendSection);
        }
        if self.start < 0 || self.end() >= bundle.len() as isize {
            return Err(ErrOperation::BendSectionOutOfBounds {
                start: self.start,
                end: self.end(),
                length: bundle.len(),
            });
        }
        Ok(())
    }
}

/// The number of edits written by a bend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BendReport {
    pub insertions: usize,
    pub deletions: usize,
}

impl std::ops::AddAssign for BendReport {
    fn add_assign(&mut self, other: Self) {
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

/// Spread the edits given by `gradients` over `section`.
///
/// Each helix with a non-zero gradient receives `|gradient|` edits at the positions given by
/// `distribute`. Edits already present at these positions are overwritten.
pub fn apply_bend(
    bundle: &mut Bundle,
    gradients: &Gradients,
    section: BendSection,
) -> Result<BendReport, ErrOperation> {
    section.check_bounds(bundle)?;

    let mut to_write = Vec::new();
    for (h_id, gradient) in gradients.iter().filter(|(_, g)| *g != 0) {
        if gradient.unsigned_abs() > section.length {
            return Err(ErrOperation::GradientTooLarge {
                helix: h_id,
                gradient,
                length: section.length,
            });
        }
        let state = if gradient > 0 {
            EditState::Inserted(1)
        } else {
            EditState::Deleted
        };
        for pos in distribute(section.length, section.start, gradient) {
            to_write.push((h_id, checked_position(bundle, h_id, pos)?, state));
        }
    }

    let mut report = BendReport::default();
    for (h_id, pos, state) in to_write {
        edits::set_edit(bundle, h_id, pos as isize, state)?;
        if let EditState::Deleted = state {
            report.deletions += 1;
        } else {
            report.insertions += 1;
        }
    }
    log::info!(
        "Bend section [{}, {}]: {} insertions, {} deletions",
        section.start,
        section.end(),
        report.insertions,
        report.deletions
    );
    Ok(report)
}

/// Apply the same bend at each start position of `starts`, one after the other.
pub fn apply_bends(
    bundle: &mut Bundle,
    gradients: &Gradients,
    length: usize,
    starts: &[isize],
) -> Result<BendReport, ErrOperation> {
    let sections: Vec<BendSection> = starts
        .iter()
        .map(|start| BendSection {
            start: *start,
            length,
        })
        .collect();
    for section in sections.iter() {
        section.check_bounds(bundle)?;
    }
    let mut report = BendReport::default();
    for section in sections {
        report += apply_bend(bundle, gradients, section)?;
    }
    Ok(report)
}
