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

/// Select `|x|` positions spread over the section of `n` nucleotides starting at `i`.
///
/// * One position is put in the middle of the section.
/// * Two positions are put at one third and two thirds of the section.
/// * With three positions or more, the two ends of the section come first, followed by the
///   positions dividing the section in `|x| - 1` intervals.
///
/// The sign of `x` is ignored. The positions are not checked against the length of the bundle.
pub fn distribute(n: usize, i: isize, x: isize) -> Vec<isize> {
    let x = x.unsigned_abs();
    let len = n as f64;
    let start = i as f64;
    match x {
        0 => Vec::new(),
        1 => vec![(start + len / 2.) as isize],
        2 => vec![(start + len / 3.) as isize, (start + 2. * len / 3.) as isize],
        _ => {
            let mut ret = Vec::with_capacity(x);
            ret.push(i);
            ret.push(i + n as isize - 1);
            let step = len / (x - 1) as f64;
            for k in 1..(x - 1) {
                ret.push((start + k as f64 * step) as isize);
            }
            ret
        }
    }
}
