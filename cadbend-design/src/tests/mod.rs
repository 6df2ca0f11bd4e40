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

use super::design_operations::*;
use super::grid::*;
use super::*;
use serde_json::{json, Value};

const BUNDLE_LENGTH: usize = 512;

/// A cadnano2 document with a square four helix bundle. The scaffold runs along each helix, and
/// the staples of helices 0 and 1 are joined by crossovers at each position of `xovers`.
fn four_helix_document(xovers: &[usize]) -> Value {
    let mut vstrands = Vec::new();
    for (num, row, col) in [(0, 0, 0), (1, 0, 1), (2, 1, 0), (3, 1, 1)] {
        let scaf: Vec<Value> = (0..BUNDLE_LENGTH as isize)
            .map(|p| json!([num, p - 1, num, p + 1]))
            .collect();
        let mut stap: Vec<Value> = (0..BUNDLE_LENGTH)
            .map(|_| json!([-1, -1, -1, -1]))
            .collect();
        for x in xovers.iter() {
            if num == 0 {
                stap[*x] = json!([0, *x as isize + 1, 1, *x]);
            } else if num == 1 {
                stap[*x] = json!([0, *x, 1, *x as isize - 1]);
            }
        }
        vstrands.push(json!({
            "stap_colors": [[34, 13369344]],
            "num": num,
            "scafLoop": [],
            "stap": stap,
            "stapLoop": [],
            "col": col,
            "skip": vec![0; BUNDLE_LENGTH],
            "scaf": scaf,
            "row": row,
            "loop": vec![0; BUNDLE_LENGTH],
        }));
    }
    json!({
        "name": "4hb-512.json",
        "vstrands": vstrands,
    })
}

fn four_helix_bundle(xovers: &[usize]) -> Bundle {
    Bundle::from_json_str(&four_helix_document(xovers).to_string()).unwrap()
}

#[test]
fn round_trip_without_edits() {
    let document = four_helix_document(&[100, 200]);
    let mut bundle = Bundle::from_json_str(&document.to_string()).unwrap();
    apply_bend(
        &mut bundle,
        &Gradients::zeros(4),
        BendSection {
            start: 211,
            length: 90,
        },
    )
    .unwrap();
    let output = bundle.to_json_string().unwrap();
    let reread: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(reread, document);
}

#[test]
fn output_is_compact() {
    let bundle = four_helix_bundle(&[]);
    let output = bundle.to_json_string().unwrap();
    assert!(!output.contains(", "));
    assert!(!output.contains(": "));
    assert!(!output.contains('\n'));
    assert!(output.starts_with(r#"{"vstrands":[{"num":0,"row":0,"col":0,"scaf":[[0,-1,0,1],"#));
    assert!(output.contains(r#""stap_colors":[[34,13369344]],"scafLoop":[],"stapLoop":[]}"#));
    assert!(output.ends_with(r#""name":"4hb-512.json"}"#));
}

#[test]
fn four_helix_bend() {
    let mut bundle = four_helix_bundle(&[]);
    let original = bundle.clone();
    let mut table = std::collections::BTreeMap::new();
    table.insert(0, 12);
    table.insert(1, 12);
    table.insert(2, -12);
    table.insert(3, -12);
    let gradients = Gradients::from_edit_table(&bundle, &table).unwrap();
    let report = apply_bends(&mut bundle, &gradients, 90, &[211]).unwrap();
    assert_eq!(
        report,
        BendReport {
            insertions: 24,
            deletions: 24
        }
    );

    let mut positions = distribute(90, 211, 12);
    positions.sort();
    assert_eq!(positions.len(), 12);
    for (h_id, helix) in bundle.vstrands.iter().enumerate() {
        for pos in 0..BUNDLE_LENGTH {
            let expected = if positions.contains(&(pos as isize)) {
                if h_id < 2 {
                    EditState::Inserted(1)
                } else {
                    EditState::Deleted
                }
            } else {
                EditState::Neutral
            };
            assert_eq!(helix.edit_state(pos), expected);
        }
        assert_eq!(helix.scaf, original.vstrands[h_id].scaf);
        assert_eq!(helix.stap, original.vstrands[h_id].stap);
        assert_eq!(helix.other, original.vstrands[h_id].other);
    }
    assert_eq!(bundle.other, original.other);
}

#[test]
fn geometry_gives_the_four_helix_gradients() {
    let bundle = four_helix_bundle(&[]);
    let p = Parameters::DEFAULT;
    let geometry = LatticeGeometry::from_bundle(&bundle, LatticeType::Square, &p).unwrap();
    let gradients = geometry.gradients(180., Axis::Y, &p);
    let mut table = std::collections::BTreeMap::new();
    for (num, count) in [(0, 12), (1, 12), (2, -12), (3, -12)] {
        table.insert(num, count);
    }
    assert_eq!(
        gradients,
        Gradients::from_edit_table(&bundle, &table).unwrap()
    );
}

#[test]
fn bend_then_shift_correct() {
    // 211 and 300 are the two ends of the bend section, 219 is the first interior position.
    let mut bundle = four_helix_bundle(&[211, 219, 220, 300]);
    let p = Parameters::DEFAULT;
    let geometry = LatticeGeometry::from_bundle(&bundle, LatticeType::Square, &p).unwrap();
    let gradients = geometry.gradients(180., Axis::Y, &p);
    apply_bends(&mut bundle, &gradients, 90, &[211]).unwrap();
    let moved = shift_edits_off_crossovers(&mut bundle).unwrap();

    // Four helices on each of the three edited planes.
    assert_eq!(moved.len(), 12);
    for shifted in moved.iter() {
        let expected_to = match shifted.from {
            211 => 212,
            219 => 218,
            300 => 301,
            other => panic!("unexpected move from {}", other),
        };
        assert_eq!(shifted.to, expected_to);
    }
    for (h_id, pos, edit) in bundle.edits() {
        assert!(!crossovers::is_crossover_plane(&bundle, pos as isize));
        if h_id < 2 {
            assert_eq!(edit, EditState::Inserted(1));
        } else {
            assert_eq!(edit, EditState::Deleted);
        }
    }
    assert_eq!(bundle.edits().len(), 48);
}

#[test]
fn malformed_documents_are_rejected() {
    let mut document = four_helix_document(&[]);
    document["vstrands"][2]["skip"] = json!([0, 0, 0]);
    assert!(matches!(
        Bundle::from_json_str(&document.to_string()),
        Err(LoadBundleError::InconsistentLength {
            num: 2,
            field: "skip",
            expected: BUNDLE_LENGTH,
            actual: 3
        })
    ));

    let mut document = four_helix_document(&[]);
    document["vstrands"][3]["num"] = json!(1);
    assert!(matches!(
        Bundle::from_json_str(&document.to_string()),
        Err(LoadBundleError::DuplicateHelixNumber(1))
    ));

    let mut document = four_helix_document(&[]);
    document["vstrands"][3]["row"] = json!(0);
    document["vstrands"][3]["col"] = json!(0);
    assert!(matches!(
        Bundle::from_json_str(&document.to_string()),
        Err(LoadBundleError::DuplicateLatticeCoord { row: 0, col: 0 })
    ));

    let mut document = four_helix_document(&[]);
    document["vstrands"][0]
        .as_object_mut()
        .unwrap()
        .remove("loop");
    assert!(matches!(
        Bundle::from_json_str(&document.to_string()),
        Err(LoadBundleError::JsonError(_))
    ));

    assert!(matches!(
        Bundle::from_json_str(r#"{"vstrands":[]}"#),
        Err(LoadBundleError::EmptyBundle)
    ));
}

#[test]
fn original_is_kept_by_cloning() {
    let template = four_helix_bundle(&[]);
    let mut bent = template.clone();
    apply_bends(&mut bent, &Gradients::new(vec![3, 3, -3, -3]), 90, &[0]).unwrap();
    assert!(template.edits().is_empty());
    assert_eq!(bent.edits().len(), 12);
}

#[test]
fn unbounded_angle_is_an_error() {
    let mut bundle = four_helix_bundle(&[]);
    let original = bundle.clone();
    let p = Parameters::DEFAULT;
    let geometry = LatticeGeometry::from_bundle(&bundle, LatticeType::Square, &p).unwrap();
    let gradients = geometry.gradients(f64::INFINITY, Axis::Y, &p);
    assert!(matches!(
        apply_bends(&mut bundle, &gradients, 90, &[211]),
        Err(ErrOperation::GradientTooLarge { helix: 0, .. })
    ));
    assert_eq!(bundle, original);
}
