//! Aromaticity perception and validation of lowercase (aromatic) input.
//!
//! Rings written in Kekulé form are promoted to aromatic when their pi
//! electron count satisfies Hückel's 4n+2 rule; rings written with
//! lowercase atoms are checked for a valid Kekulé structure.

use druglike_core::{DruglikeError, Result};

use crate::element::element_by_number;
use crate::molecule::{BondOrder, Molecule};
use crate::ring::RingInfo;

/// Search steps allowed for the Kekulé matching before the input is rejected.
const KEKULE_STEP_LIMIT: usize = 100_000;

/// Validate aromatic input and promote Hückel-aromatic Kekulé rings in place.
pub fn perceive(mol: &mut Molecule) -> Result<()> {
    let info = RingInfo::new(mol);

    for (i, atom) in mol.atoms.iter().enumerate() {
        if atom.is_aromatic && !info.atom_in_ring[i] {
            return Err(DruglikeError::Parse(format!("non-ring atom {i} marked aromatic")));
        }
    }
    // Implicit bonds between aromatic atoms of different rings (biphenyl) are single.
    for (bi, bond) in mol.bonds.iter_mut().enumerate() {
        if bond.order == BondOrder::Aromatic && !info.bond_in_ring[bi] {
            bond.order = BondOrder::Single;
            bond.is_aromatic = false;
        }
    }
    check_kekulizable(mol)?;

    let ring_bonds: Vec<Vec<usize>> = info
        .rings
        .iter()
        .map(|ring| ring_bond_indices(mol, ring))
        .collect();

    loop {
        let mut changed = false;
        for (ring, bonds) in info.rings.iter().zip(&ring_bonds) {
            if bonds.len() != ring.len() {
                continue;
            }
            if bonds.iter().all(|&bi| mol.bonds[bi].order == BondOrder::Aromatic) {
                continue;
            }
            let Some(electrons) = pi_electrons(mol, ring, bonds) else {
                continue;
            };
            if electrons % 4 == 2 {
                for &a in ring {
                    mol.atoms[a].is_aromatic = true;
                }
                for &bi in bonds {
                    mol.bonds[bi].order = BondOrder::Aromatic;
                    mol.bonds[bi].is_aromatic = true;
                }
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    Ok(())
}

/// Bond indices joining consecutive ring atoms (including the closing pair).
fn ring_bond_indices(mol: &Molecule, ring: &[usize]) -> Vec<usize> {
    let n = ring.len();
    (0..n)
        .filter_map(|k| {
            let (a, b) = (ring[k], ring[(k + 1) % n]);
            mol.adjacency[a]
                .iter()
                .find(|&&(nbr, _)| nbr == b)
                .map(|&(_, bi)| bi)
        })
        .collect()
}

/// Pi electrons contributed to a ring, or `None` if any atom breaks conjugation.
fn pi_electrons(mol: &Molecule, ring: &[usize], ring_bonds: &[usize]) -> Option<usize> {
    let mut total = 0;
    for &a in ring {
        let atom = &mol.atoms[a];
        if mol.has_bond_order(a, BondOrder::Triple) {
            return None;
        }

        let mut endocyclic_double = false;
        let mut exocyclic_double: Option<usize> = None;
        for &(nbr, bi) in &mol.adjacency[a] {
            if mol.bonds[bi].order != BondOrder::Double {
                continue;
            }
            if ring_bonds.contains(&bi) {
                endocyclic_double = true;
            } else {
                exocyclic_double = Some(nbr);
            }
        }

        let sigma = mol.total_degree(a);
        let contribution = if endocyclic_double {
            1
        } else if let Some(partner) = exocyclic_double {
            // C=O, C=N, C=S pull their electrons out of the ring.
            let partner_el = mol.atoms[partner].atomic_number;
            if atom.atomic_number == 6 && matches!(partner_el, 7 | 8 | 16) {
                0
            } else {
                return None;
            }
        } else if atom.is_aromatic {
            1
        } else {
            match (atom.atomic_number, atom.formal_charge, sigma) {
                (7 | 15, 0, 3) => 2,
                (7, -1, 2) => 2,
                (8 | 16 | 34, 0, 2) => 2,
                (6, -1, 3) => 2,
                (6, 1, 3) => 0,
                (5, 0, 3) => 0,
                _ => return None,
            }
        };
        total += contribution;
    }
    Some(total)
}

/// Reject aromatic systems that admit no alternating single/double assignment.
fn check_kekulizable(mol: &Molecule) -> Result<()> {
    check_kekulizable_within(mol, KEKULE_STEP_LIMIT)
}

fn check_kekulizable_within(mol: &Molecule, step_limit: usize) -> Result<()> {
    let n = mol.atom_count();
    let needs_double: Vec<bool> = (0..n).map(|i| needs_pi_bond(mol, i)).collect();
    if !needs_double.iter().any(|&x| x) {
        return Ok(());
    }

    // Candidate partners: neighbors across aromatic bonds that also need one.
    let partners: Vec<Vec<usize>> = (0..n)
        .map(|i| {
            if !needs_double[i] {
                return Vec::new();
            }
            mol.bonds_of(i)
                .filter(|(nbr, b)| b.order == BondOrder::Aromatic && needs_double[*nbr])
                .map(|(nbr, _)| nbr)
                .collect()
        })
        .collect();

    let mut matched = vec![false; n];
    let mut steps = 0usize;
    let label = if mol.name.is_empty() { "molecule" } else { &mol.name };
    match perfect_match(&needs_double, &partners, &mut matched, &mut steps, step_limit) {
        Some(true) => Ok(()),
        Some(false) => Err(DruglikeError::Parse(format!("can't kekulize aromatic system in '{label}'"))),
        None => Err(DruglikeError::Parse(format!(
            "aromatic system in '{label}' exceeds the Kekulé step limit of {step_limit}"
        ))),
    }
}

/// Whether an aromatic atom still needs one double bond inside its ring system.
fn needs_pi_bond(mol: &Molecule, i: usize) -> bool {
    let atom = &mol.atoms[i];
    if !atom.is_aromatic {
        return false;
    }
    if mol.has_bond_order(i, BondOrder::Double) {
        return false;
    }
    let Some(base) = element_by_number(atom.atomic_number)
        .and_then(|e| e.valences.first().copied())
        .map(|v| v as i32)
    else {
        return false;
    };
    let charge = atom.formal_charge as i32;
    let target = match atom.atomic_number {
        // Carbon and boron lose a bond for any charge; the heteroatoms gain
        // one per positive charge (n+ behaves like neutral carbon).
        5 | 6 => base - charge.abs(),
        _ => base + charge,
    };
    let sigma = mol.total_degree(i) as i32;
    target - sigma == 1
}

/// Backtracking perfect matching over the atoms that need a pi bond.
///
/// Picks the most constrained unmatched atom first, which solves fused
/// ring systems without meaningful backtracking. `None` once more than
/// `limit` steps have been taken.
fn perfect_match(
    needs: &[bool],
    partners: &[Vec<usize>],
    matched: &mut [bool],
    steps: &mut usize,
    limit: usize,
) -> Option<bool> {
    *steps += 1;
    if *steps > limit {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for i in 0..needs.len() {
        if !needs[i] || matched[i] {
            continue;
        }
        let options = partners[i].iter().filter(|&&p| !matched[p]).count();
        if best.map_or(true, |(_, n)| options < n) {
            best = Some((i, options));
        }
    }

    let Some((atom, options)) = best else {
        return Some(true);
    };
    if options == 0 {
        return Some(false);
    }

    matched[atom] = true;
    for k in 0..partners[atom].len() {
        let p = partners[atom][k];
        if matched[p] {
            continue;
        }
        matched[p] = true;
        if perfect_match(needs, partners, matched, steps, limit)? {
            return Some(true);
        }
        matched[p] = false;
    }
    matched[atom] = false;
    Some(false)
}

#[cfg(test)]
mod tests {
    use super::check_kekulizable_within;
    use crate::molecule::BondOrder;
    use crate::smiles::parse_smiles;

    fn aromatic_atoms(smiles: &str) -> usize {
        parse_smiles(smiles)
            .unwrap()
            .atoms
            .iter()
            .filter(|a| a.is_aromatic)
            .count()
    }

    #[test]
    fn kekule_benzene_becomes_aromatic() {
        let mol = parse_smiles("C1=CC=CC=C1").unwrap();
        assert!(mol.atoms.iter().all(|a| a.is_aromatic));
        assert!(mol.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn five_membered_heteroaromatics() {
        assert_eq!(aromatic_atoms("C1=CNC=C1"), 5); // pyrrole
        assert_eq!(aromatic_atoms("C1=COC=C1"), 5); // furan
        assert_eq!(aromatic_atoms("C1=CSC=C1"), 5); // thiophene
        assert_eq!(aromatic_atoms("c1cc[nH]c1"), 5);
        assert_eq!(aromatic_atoms("c1ccsc1"), 5);
    }

    #[test]
    fn fused_rings_are_perceived_across_iterations() {
        // Naphthalene written in Kekulé form.
        assert_eq!(aromatic_atoms("C1=CC=C2C=CC=CC2=C1"), 10);
    }

    #[test]
    fn non_aromatic_rings_stay_aliphatic() {
        assert_eq!(aromatic_atoms("C1CCCCC1"), 0); // cyclohexane
        assert_eq!(aromatic_atoms("C1=CCC=C1"), 0); // cyclopentadiene
        assert_eq!(aromatic_atoms("C1=CC=CC=CC=C1"), 0); // cyclooctatetraene
        assert_eq!(aromatic_atoms("O=C1C=CC(=O)C=C1"), 0); // benzoquinone
    }

    #[test]
    fn pyridone_and_caffeine_rings() {
        assert_eq!(aromatic_atoms("O=C1C=CC=CN1"), 6);
        // Caffeine: both rings aromatic, nine ring atoms.
        assert_eq!(aromatic_atoms("Cn1cnc2c1c(=O)n(c(=O)n2C)C"), 9);
    }

    #[test]
    fn lowercase_and_kekule_spellings_agree() {
        let a = parse_smiles("Cc1ccncc1").unwrap();
        let b = parse_smiles("CC1=CC=NC=C1").unwrap();
        assert_eq!(a.atoms, b.atoms);
        let orders = |m: &crate::molecule::Molecule| {
            let mut v: Vec<_> = m
                .bonds
                .iter()
                .map(|b| (b.atom1.min(b.atom2), b.atom1.max(b.atom2), b.order))
                .collect();
            v.sort_by_key(|&(x, y, _)| (x, y));
            v
        };
        assert_eq!(orders(&a), orders(&b));
    }

    #[test]
    fn link_between_aromatic_rings_is_single() {
        let mol = parse_smiles("c1ccccc1c1ccccc1").unwrap();
        let link = mol.get_bond(5, 6).unwrap();
        assert_eq!(link.order, BondOrder::Single);
        assert_eq!(mol.atoms.iter().filter(|a| a.is_aromatic).count(), 12);
    }

    #[test]
    fn unkekulizable_input_is_rejected() {
        for bad in ["c1cccc1", "c1ccnc1", "c1ccccc1c"] {
            assert!(parse_smiles(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn step_limit_rejects_instead_of_accepting() {
        let mol = parse_smiles("c1ccc2ccccc2c1").unwrap();
        assert!(check_kekulizable_within(&mol, 1_000).is_ok());
        let err = check_kekulizable_within(&mol, 1).unwrap_err();
        assert!(err.to_string().contains("step limit"), "{err}");
    }

    #[test]
    fn charged_aromatic_atoms() {
        // Pyridinium and N-methylpyridinium.
        assert!(parse_smiles("c1cc[nH+]cc1").is_ok());
        assert!(parse_smiles("C[n+]1ccccc1").is_ok());
        // Cyclopentadienyl anion.
        assert!(parse_smiles("[cH-]1cccc1").is_ok());
    }
}
