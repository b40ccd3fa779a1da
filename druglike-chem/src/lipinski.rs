//! Lipinski descriptors: hydrogen-bond donors and acceptors, strict
//! rotatable-bond count, and the Rule of Five.

use serde::Serialize;

use crate::molecule::{BondOrder, Molecule};
use crate::ring::RingInfo;

/// Count hydrogen-bond donors.
///
/// Donors are N-H with valence 3, protonated N-H with valence 4, neutral
/// O-H and S-H, and neutral aromatic N-H.
pub fn num_h_donors(mol: &Molecule) -> usize {
    (0..mol.atom_count()).filter(|&i| is_donor(mol, i)).count()
}

fn is_donor(mol: &Molecule, i: usize) -> bool {
    let atom = &mol.atoms[i];
    let h = atom.hydrogens;
    match (atom.atomic_number, atom.is_aromatic) {
        (7, false) => {
            let v = mol.valence(i);
            h > 0 && (v == 3 || (atom.formal_charge == 1 && v == 4))
        }
        (8 | 16, false) => h == 1 && atom.formal_charge == 0,
        (7, true) => h == 1 && atom.formal_charge == 0,
        _ => false,
    }
}

/// Count hydrogen-bond acceptors.
pub fn num_h_acceptors(mol: &Molecule) -> usize {
    let info = RingInfo::new(mol);
    (0..mol.atom_count())
        .filter(|&i| is_acceptor(mol, &info, i))
        .count()
}

fn is_acceptor(mol: &Molecule, info: &RingInfo, i: usize) -> bool {
    let atom = &mol.atoms[i];
    match (atom.atomic_number, atom.is_aromatic) {
        (8 | 16, false) => {
            if atom.formal_charge < 0 {
                return true;
            }
            match (atom.hydrogens, mol.valence(i)) {
                (0, 2) => true,
                // Hydroxyl and thiol count unless attached to an acid-like center.
                (1, 2) => mol.bonds_of(i).any(|(n, b)| {
                    b.order == BondOrder::Single && !has_double_to_onps(mol, info, n, false)
                }),
                _ => false,
            }
        }
        (7, false) => mol.valence(i) == 3 && !amide_like_nitrogen(mol, info, i),
        (7, true) => atom.hydrogens == 0 && atom.formal_charge == 0,
        (8 | 16, true) => atom.formal_charge == 0,
        (9, _) => true,
        _ => false,
    }
}

/// Whether atom `i` has a double bond to aliphatic O, N, P or S (optionally
/// only counting non-ring double bonds).
fn has_double_to_onps(mol: &Molecule, info: &RingInfo, i: usize, non_ring_only: bool) -> bool {
    mol.adjacency[i].iter().any(|&(n, bi)| {
        let partner = &mol.atoms[n];
        mol.bonds[bi].order == BondOrder::Double
            && !partner.is_aromatic
            && matches!(partner.atomic_number, 7 | 8 | 15 | 16)
            && !(non_ring_only && info.bond_in_ring[bi])
    })
}

/// N singly bonded to an atom carrying a non-ring double bond to O, N, P or S.
fn amide_like_nitrogen(mol: &Molecule, info: &RingInfo, i: usize) -> bool {
    mol.bonds_of(i)
        .any(|(n, b)| b.order == BondOrder::Single && has_double_to_onps(mol, info, n, true))
}

/// Count rotatable bonds using the strict definition.
///
/// A rotatable bond is a non-ring single bond between two non-terminal
/// atoms, neither of which carries a triple bond or is a CF3, CCl3, CBr3
/// or t-butyl center. Bonds out of amide, ester, thioamide and amidinium
/// carbons are excluded.
pub fn num_rotatable_bonds(mol: &Molecule) -> usize {
    let info = RingInfo::new(mol);
    rotatable_bonds(mol, &info).len()
}

/// Indices of the rotatable bonds.
pub fn rotatable_bonds(mol: &Molecule, info: &RingInfo) -> Vec<usize> {
    mol.bonds
        .iter()
        .enumerate()
        .filter(|&(bi, bond)| {
            if info.bond_in_ring[bi] {
                return false;
            }
            if !matches!(bond.order, BondOrder::Single | BondOrder::Aromatic) {
                return false;
            }
            let (a, b) = (bond.atom1, bond.atom2);
            (first_end_ok(mol, info, a) && end_ok(mol, b))
                || (first_end_ok(mol, info, b) && end_ok(mol, a))
        })
        .map(|(bi, _)| bi)
        .collect()
}

fn end_ok(mol: &Molecule, i: usize) -> bool {
    !mol.has_bond_order(i, BondOrder::Triple)
        && mol.degree(i) != 1
        && !is_trihalomethyl(mol, i)
        && !is_tert_butyl_center(mol, i)
}

fn first_end_ok(mol: &Molecule, info: &RingInfo, i: usize) -> bool {
    end_ok(mol, i) && !is_amide_like(mol, info, i)
}

fn is_aliphatic_carbon(mol: &Molecule, i: usize) -> bool {
    mol.atoms[i].atomic_number == 6 && !mol.atoms[i].is_aromatic
}

fn is_trihalomethyl(mol: &Molecule, i: usize) -> bool {
    if !is_aliphatic_carbon(mol, i) {
        return false;
    }
    [9u8, 17, 35].iter().any(|&halogen| {
        mol.neighbors(i)
            .filter(|&n| mol.atoms[n].atomic_number == halogen)
            .count()
            >= 3
    })
}

fn is_tert_butyl_center(mol: &Molecule, i: usize) -> bool {
    is_aliphatic_carbon(mol, i)
        && mol
            .neighbors(i)
            .filter(|&n| is_aliphatic_carbon(mol, n) && mol.atoms[n].hydrogens == 3)
            .count()
            >= 3
}

/// Aliphatic three-connected carbon doubly bonded to aliphatic N, O or S.
fn is_acyl_carbon(mol: &Molecule, i: usize) -> bool {
    is_aliphatic_carbon(mol, i)
        && mol.degree(i) == 3
        && mol.double_bonded(i).any(|n| {
            let a = &mol.atoms[n];
            !a.is_aromatic && matches!(a.atomic_number, 7 | 8 | 16)
        })
}

/// Aliphatic three-connected carbon doubly bonded to a cationic aliphatic N.
fn is_amidinium_carbon(mol: &Molecule, i: usize) -> bool {
    is_aliphatic_carbon(mol, i)
        && mol.degree(i) == 3
        && mol.double_bonded(i).any(|n| {
            let a = &mol.atoms[n];
            !a.is_aromatic && a.atomic_number == 7 && a.formal_charge == 1
        })
}

/// Any N, or aliphatic O, or aliphatic non-terminal S.
fn is_acyl_partner(mol: &Molecule, i: usize) -> bool {
    let a = &mol.atoms[i];
    match a.atomic_number {
        7 => true,
        8 => !a.is_aromatic,
        16 => !a.is_aromatic && mol.degree(i) != 1,
        _ => false,
    }
}

/// Non-ring single-bond neighbors of `i`.
fn acyclic_single_neighbors<'a>(
    mol: &'a Molecule,
    info: &'a RingInfo,
    i: usize,
) -> impl Iterator<Item = usize> + 'a {
    mol.adjacency[i]
        .iter()
        .filter(move |&&(_, bi)| mol.bonds[bi].order == BondOrder::Single && !info.bond_in_ring[bi])
        .map(|&(n, _)| n)
}

/// Either side of an amide/ester/thioester/amidine linkage.
fn is_amide_like(mol: &Molecule, info: &RingInfo, i: usize) -> bool {
    if is_acyl_carbon(mol, i) && acyclic_single_neighbors(mol, info, i).any(|n| is_acyl_partner(mol, n)) {
        return true;
    }
    if is_acyl_partner(mol, i) && acyclic_single_neighbors(mol, info, i).any(|n| is_acyl_carbon(mol, n)) {
        return true;
    }
    let non_terminal_n = |n: usize| mol.atoms[n].atomic_number == 7 && mol.degree(n) != 1;
    if is_amidinium_carbon(mol, i) && acyclic_single_neighbors(mol, info, i).any(non_terminal_n) {
        return true;
    }
    non_terminal_n(i) && acyclic_single_neighbors(mol, info, i).any(|n| is_amidinium_carbon(mol, n))
}

/// Lipinski's Rule of Five, one flag per clause.
///
/// A compound passes only when every clause holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleOfFive {
    /// Molecular weight below 500.
    pub mol_wt_ok: bool,
    /// LogP below 5.
    pub log_p_ok: bool,
    /// At most 5 hydrogen-bond donors.
    pub donors_ok: bool,
    /// At most 10 hydrogen-bond acceptors.
    pub acceptors_ok: bool,
}

impl RuleOfFive {
    pub fn evaluate(mol_wt: f64, log_p: f64, donors: usize, acceptors: usize) -> Self {
        RuleOfFive {
            mol_wt_ok: mol_wt < 500.0,
            log_p_ok: log_p < 5.0,
            donors_ok: donors <= 5,
            acceptors_ok: acceptors <= 10,
        }
    }

    pub fn passed(&self) -> bool {
        self.mol_wt_ok && self.log_p_ok && self.donors_ok && self.acceptors_ok
    }

    /// Number of clauses that fail.
    pub fn violations(&self) -> usize {
        [self.mol_wt_ok, self.log_p_ok, self.donors_ok, self.acceptors_ok]
            .iter()
            .filter(|ok| !**ok)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    fn counts(smiles: &str) -> (usize, usize, usize) {
        let mol = parse_smiles(smiles).unwrap();
        (num_h_donors(&mol), num_h_acceptors(&mol), num_rotatable_bonds(&mol))
    }

    #[test]
    fn aspirin_counts() {
        assert_eq!(counts("CC(=O)OC1=CC=CC=C1C(=O)O"), (1, 3, 2));
    }

    #[test]
    fn caffeine_acceptors() {
        assert_eq!(counts("Cn1cnc2c1c(=O)n(c(=O)n2C)C"), (0, 6, 0));
    }

    #[test]
    fn ibuprofen_rotatable_bonds() {
        assert_eq!(counts("CC(C)CC1=CC=C(C=C1)C(C)C(=O)O").2, 4);
    }

    #[test]
    fn donors() {
        assert_eq!(counts("CCO").0, 1);
        assert_eq!(counts("CN").0, 1);
        assert_eq!(counts("[NH4+]").0, 1);
        assert_eq!(counts("c1cc[nH]c1").0, 1);
        assert_eq!(counts("CS").0, 1);
        assert_eq!(counts("COC").0, 0);
        assert_eq!(counts("CC(=O)[O-]").0, 0);
    }

    #[test]
    fn acceptors() {
        assert_eq!(counts("COC").1, 1);
        assert_eq!(counts("c1ccncc1").1, 1);
        assert_eq!(counts("c1cc[nH]c1").1, 0);
        assert_eq!(counts("CC#N").1, 1);
        assert_eq!(counts("Fc1ccccc1").1, 1);
        // Amide nitrogen is not an acceptor; its carbonyl oxygen is.
        assert_eq!(counts("CC(=O)N").1, 1);
        // Carboxylic OH is not an acceptor.
        assert_eq!(counts("CC(=O)O").1, 1);
    }

    #[test]
    fn rotatable_bond_exclusions() {
        // Terminal bonds never rotate.
        assert_eq!(counts("CCC").2, 0);
        assert_eq!(counts("CCCC").2, 1);
        // Ring bonds.
        assert_eq!(counts("C1CCCCC1").2, 0);
        // Next to a triple bond.
        assert_eq!(counts("CC#CCC").2, 0);
        // CF3 and t-butyl groups.
        assert_eq!(counts("FC(F)(F)CCC").2, 1);
        assert_eq!(counts("CC(C)(C)CCC").2, 1);
        // Amide C-N bond.
        assert_eq!(counts("CCC(=O)NCC").2, 2);
    }

    #[test]
    fn rule_of_five_each_clause() {
        assert!(RuleOfFive::evaluate(499.9, 4.9, 5, 10).passed());
        let cases = [
            RuleOfFive::evaluate(500.0, 1.0, 0, 0),
            RuleOfFive::evaluate(100.0, 5.0, 0, 0),
            RuleOfFive::evaluate(100.0, 1.0, 6, 0),
            RuleOfFive::evaluate(100.0, 1.0, 0, 11),
        ];
        for rule in cases {
            assert!(!rule.passed());
            assert_eq!(rule.violations(), 1);
        }
    }
}
