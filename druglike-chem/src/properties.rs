//! Molecular weight and formula.

use std::collections::BTreeMap;

use crate::element::{element_by_number, isotope_mass};
use crate::molecule::Molecule;

const HYDROGEN_WEIGHT: f64 = 1.008;

/// Average molecular weight, including attached hydrogens.
///
/// Unlabelled atoms contribute their standard atomic weight; an isotope
/// label switches to that isotope's exact mass, or to the mass number when
/// the isotope is not tabulated.
pub fn molecular_weight(mol: &Molecule) -> f64 {
    let mut mw = 0.0;
    for atom in &mol.atoms {
        match atom.isotope {
            Some(mass_number) => {
                mw += isotope_mass(atom.atomic_number, mass_number).unwrap_or(f64::from(mass_number));
            }
            None => {
                if let Some(elem) = element_by_number(atom.atomic_number) {
                    mw += elem.atomic_weight;
                }
            }
        }
        mw += atom.hydrogens as f64 * HYDROGEN_WEIGHT;
    }
    mw
}

/// Generate the molecular formula in Hill system order (C first, then H, then alphabetical).
///
/// Without carbon every element, hydrogen included, is listed alphabetically.
pub fn molecular_formula(mol: &Molecule) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for atom in &mol.atoms {
        if let Some(elem) = element_by_number(atom.atomic_number) {
            *counts.entry(elem.symbol).or_insert(0) += 1;
        }
        if atom.hydrogens > 0 {
            *counts.entry("H").or_insert(0) += atom.hydrogens as usize;
        }
    }

    let mut formula = String::new();
    let mut push = |symbol: &str, count: usize| {
        formula.push_str(symbol);
        if count > 1 {
            formula.push_str(&count.to_string());
        }
    };

    if let Some(c_count) = counts.remove("C") {
        push("C", c_count);
        if let Some(h_count) = counts.remove("H") {
            push("H", h_count);
        }
    }

    // BTreeMap iterates alphabetically
    for (symbol, count) in &counts {
        push(*symbol, *count);
    }

    formula
}
