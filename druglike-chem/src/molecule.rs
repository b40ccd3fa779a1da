//! Molecular graph representation.

use druglike_core::{Annotated, Summarizable};
use serde::Serialize;

/// Tetrahedral chirality at a stereocenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Chirality {
    /// No chirality specified.
    #[default]
    None,
    /// Counterclockwise (`@` in SMILES).
    CounterClockwise,
    /// Clockwise (`@@` in SMILES).
    Clockwise,
}

/// Bond order classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Numeric bond order for valence calculations.
    pub fn as_f64(self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }
}

/// An atom in a molecular graph.
///
/// Hydrogens are never graph nodes once parsing is complete: both the
/// implicit hydrogens of organic-subset atoms and the `H` count of bracket
/// atoms end up in `hydrogens`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MolAtom {
    pub atomic_number: u8,
    pub formal_charge: i8,
    pub isotope: Option<u16>,
    pub is_aromatic: bool,
    pub hydrogens: u8,
    /// Written as a bracket atom, so `hydrogens` is fixed by the input.
    pub bracket: bool,
    pub chirality: Chirality,
}

impl MolAtom {
    /// Organic-subset atom with hydrogens still to be assigned.
    pub fn organic(atomic_number: u8, is_aromatic: bool) -> Self {
        MolAtom {
            atomic_number,
            formal_charge: 0,
            isotope: None,
            is_aromatic,
            hydrogens: 0,
            bracket: false,
            chirality: Chirality::None,
        }
    }
}

/// A bond between two atoms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Bond {
    pub atom1: usize,
    pub atom2: usize,
    pub order: BondOrder,
    pub is_aromatic: bool,
}

impl Bond {
    /// The atom at the other end of this bond from `atom`.
    pub fn partner(&self, atom: usize) -> usize {
        if self.atom1 == atom {
            self.atom2
        } else {
            self.atom1
        }
    }
}

/// A molecular graph with atoms, bonds, and adjacency information.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Molecule {
    pub name: String,
    pub atoms: Vec<MolAtom>,
    pub bonds: Vec<Bond>,
    /// adjacency[atom_idx] = Vec<(neighbor_atom_idx, bond_idx)>
    #[serde(skip)]
    pub adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    /// Create a new molecule, building the adjacency list from atoms and bonds.
    pub fn new(name: String, atoms: Vec<MolAtom>, bonds: Vec<Bond>) -> Self {
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bi, bond) in bonds.iter().enumerate() {
            adjacency[bond.atom1].push((bond.atom2, bi));
            adjacency[bond.atom2].push((bond.atom1, bi));
        }
        Molecule { name, atoms, bonds, adjacency }
    }

    /// Number of atoms in the graph (hydrogens are folded into their parents).
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Number of bonds.
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Number of non-hydrogen atoms.
    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.atomic_number != 1).count()
    }

    /// Neighbor atom indices for a given atom.
    pub fn neighbors(&self, atom_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[atom_idx].iter().map(|&(n, _)| n)
    }

    /// `(neighbor, bond)` pairs for a given atom.
    pub fn bonds_of(&self, atom_idx: usize) -> impl Iterator<Item = (usize, &Bond)> + '_ {
        self.adjacency[atom_idx]
            .iter()
            .map(move |&(n, bi)| (n, &self.bonds[bi]))
    }

    /// Graph degree of an atom (number of explicit bonds, the SMARTS `D`).
    pub fn degree(&self, atom_idx: usize) -> usize {
        self.adjacency[atom_idx].len()
    }

    /// Degree including attached hydrogens (the SMARTS `X`).
    pub fn total_degree(&self, atom_idx: usize) -> usize {
        self.degree(atom_idx) + self.atoms[atom_idx].hydrogens as usize
    }

    /// Sum of bond orders to heavy neighbors, rounded to an integer.
    pub fn bond_order_sum(&self, atom_idx: usize) -> usize {
        let v: f64 = self.bonds_of(atom_idx).map(|(_, b)| b.order.as_f64()).sum();
        v.round() as usize
    }

    /// Total valence including hydrogens (the SMARTS `v`).
    pub fn valence(&self, atom_idx: usize) -> usize {
        self.bond_order_sum(atom_idx) + self.atoms[atom_idx].hydrogens as usize
    }

    /// Find the bond between two atoms, if any.
    pub fn get_bond(&self, a1: usize, a2: usize) -> Option<&Bond> {
        self.adjacency[a1]
            .iter()
            .find(|&&(n, _)| n == a2)
            .map(|&(_, bi)| &self.bonds[bi])
    }

    /// Whether the atom carries any bond of the given order.
    pub fn has_bond_order(&self, atom_idx: usize, order: BondOrder) -> bool {
        self.bonds_of(atom_idx).any(|(_, b)| b.order == order)
    }

    /// Neighbors reached through a double bond.
    pub fn double_bonded(&self, atom_idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.bonds_of(atom_idx)
            .filter(|(_, b)| b.order == BondOrder::Double)
            .map(|(n, _)| n)
    }

    /// Total hydrogen count (attached H plus any explicit H atoms left in the graph).
    pub fn total_hydrogen_count(&self) -> usize {
        let explicit = self.atoms.iter().filter(|a| a.atomic_number == 1).count();
        let attached: usize = self.atoms.iter().map(|a| a.hydrogens as usize).sum();
        explicit + attached
    }
}

impl Annotated for Molecule {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Summarizable for Molecule {
    fn summary(&self) -> String {
        format!(
            "{}: {} atoms, {} bonds",
            if self.name.is_empty() { "Molecule" } else { &self.name },
            self.atom_count(),
            self.bond_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon(hydrogens: u8) -> MolAtom {
        MolAtom { hydrogens, ..MolAtom::organic(6, false) }
    }

    fn make_water() -> Molecule {
        let oxygen = MolAtom { hydrogens: 2, ..MolAtom::organic(8, false) };
        Molecule::new("water".into(), vec![oxygen], vec![])
    }

    fn make_ethene() -> Molecule {
        let bonds = vec![Bond { atom1: 0, atom2: 1, order: BondOrder::Double, is_aromatic: false }];
        Molecule::new("ethene".into(), vec![carbon(2), carbon(2)], bonds)
    }

    #[test]
    fn construction_and_adjacency() {
        let mol = make_ethene();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.neighbors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(mol.bonds[0].partner(1), 0);
    }

    #[test]
    fn degree_and_valence() {
        let mol = make_ethene();
        assert_eq!(mol.degree(0), 1);
        assert_eq!(mol.total_degree(0), 3);
        assert_eq!(mol.valence(0), 4);
        assert!(mol.has_bond_order(0, BondOrder::Double));
        assert_eq!(mol.double_bonded(1).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn hydrogen_counts() {
        let mol = make_water();
        assert_eq!(mol.heavy_atom_count(), 1);
        assert_eq!(mol.total_hydrogen_count(), 2);
    }

    #[test]
    fn summary_mentions_counts() {
        let mol = make_ethene();
        assert_eq!(mol.summary(), "ethene: 2 atoms, 1 bonds");
        assert!(mol.get_bond(0, 1).is_some());
    }
}
