//! Wildman-Crippen logP.
//!
//! Every heavy atom is assigned one of the published atom types (first
//! matching rule wins), and every hydrogen is typed by the atom it is
//! attached to. The logP estimate is the sum of the per-type contributions.
//!
//! Reference: S. A. Wildman and G. M. Crippen, *J. Chem. Inf. Comput. Sci.*
//! 39, 868-873 (1999).

use crate::molecule::{BondOrder, Molecule};

/// The atom type assigned to one atom and its logP contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrippenContribution {
    pub label: &'static str,
    pub log_p: f64,
}

const fn ty(label: &'static str, log_p: f64) -> CrippenContribution {
    CrippenContribution { label, log_p }
}

const H1: CrippenContribution = ty("H1", 0.1230);
const H2: CrippenContribution = ty("H2", -0.2677);
const H3: CrippenContribution = ty("H3", 0.2142);
const H4: CrippenContribution = ty("H4", 0.2980);
const HS: CrippenContribution = ty("HS", 0.1125);

const CS: CrippenContribution = ty("CS", 0.08129);
const NS: CrippenContribution = ty("NS", -0.4806);
const OS: CrippenContribution = ty("OS", -0.1188);
const IONIC: CrippenContribution = ty("Hal", -2.996);
const UNTYPED: CrippenContribution = ty("", 0.0);

/// Wildman-Crippen logP of a molecule.
pub fn crippen_log_p(mol: &Molecule) -> f64 {
    let mut log_p = 0.0;
    for i in 0..mol.atom_count() {
        if mol.atoms[i].atomic_number == 1 {
            log_p += explicit_hydrogen_type(mol, i).log_p;
            continue;
        }
        log_p += atom_type(mol, i).log_p;
        let h = mol.atoms[i].hydrogens;
        if h > 0 {
            log_p += h as f64 * hydrogen_type(mol, i).log_p;
        }
    }
    log_p
}

/// Per-atom types for every atom in the molecule (hydrogens attached to an
/// atom are not included; see [`hydrogen_type`]).
pub fn atom_types(mol: &Molecule) -> Vec<CrippenContribution> {
    (0..mol.atom_count())
        .map(|i| {
            if mol.atoms[i].atomic_number == 1 {
                explicit_hydrogen_type(mol, i)
            } else {
                atom_type(mol, i)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Nbr {
    idx: usize,
    el: u8,
    aromatic: bool,
    order: BondOrder,
}

impl Nbr {
    /// Reached through an unmarked SMARTS bond (single or aromatic).
    fn plain(&self) -> bool {
        matches!(self.order, BondOrder::Single | BondOrder::Aromatic)
    }

    fn aliphatic_heavy(&self) -> bool {
        !self.aromatic && self.el != 1
    }

    fn aliphatic(&self, el: u8) -> bool {
        !self.aromatic && self.el == el
    }
}

fn nbrs(mol: &Molecule, i: usize) -> Vec<Nbr> {
    mol.bonds_of(i)
        .map(|(n, b)| Nbr {
            idx: n,
            el: mol.atoms[n].atomic_number,
            aromatic: mol.atoms[n].is_aromatic,
            order: b.order,
        })
        .collect()
}

/// N, O, P, S written aliphatic, or any halogen.
fn is_listed_hetero(n: &Nbr) -> bool {
    match n.el {
        7 | 8 | 15 | 16 => !n.aromatic,
        9 | 17 | 35 | 53 => true,
        _ => false,
    }
}

/// Whether two distinct neighbors satisfy `first` and `second` respectively.
fn has_pair(ns: &[Nbr], first: impl Fn(&Nbr) -> bool, second: impl Fn(&Nbr) -> bool) -> bool {
    ns.iter().enumerate().any(|(i, a)| {
        first(a) && ns.iter().enumerate().any(|(j, b)| i != j && second(b))
    })
}

/// Type of a heavy atom.
pub fn atom_type(mol: &Molecule, i: usize) -> CrippenContribution {
    let atom = &mol.atoms[i];
    let ns = nbrs(mol, i);
    match atom.atomic_number {
        6 if atom.is_aromatic => aromatic_carbon(mol, i, &ns),
        6 => aliphatic_carbon(mol, i, &ns),
        7 => nitrogen(mol, i, &ns),
        8 => oxygen(mol, i, &ns),
        9 | 17 | 35 | 53 if atom.formal_charge != 0 => IONIC,
        9 => ty("F", 0.4202),
        17 => ty("Cl", 0.6895),
        35 => ty("Br", 0.8456),
        53 => ty("I", 0.8857),
        3 | 11 | 19 | 37 | 55 if atom.formal_charge > 0 => IONIC,
        15 => ty("P", 0.8612),
        16 if atom.is_aromatic => ty("S3", 0.6237),
        16 if atom.formal_charge == 0 => ty("S1", 0.6482),
        16 => ty("S2", -0.0024),
        _ => UNTYPED,
    }
}

fn aliphatic_carbon(mol: &Molecule, i: usize, ns: &[Nbr]) -> CrippenContribution {
    let h = mol.atoms[i].hydrogens;
    let x = mol.total_degree(i);

    let c_plain = ns.iter().filter(|n| n.plain() && n.aliphatic(6)).count();
    let het_plain = ns.iter().filter(|n| n.plain() && is_listed_hetero(n)).count();
    let aliph_plain = ns.iter().filter(|n| n.plain() && n.aliphatic_heavy()).count();
    let arom = ns.iter().filter(|n| n.plain() && n.aromatic).count();
    let double_c = ns
        .iter()
        .filter(|n| n.order == BondOrder::Double && n.aliphatic(6))
        .count();

    if (h == 4 && ns.is_empty()) || (h == 3 && c_plain >= 1) || (h == 2 && c_plain >= 2) {
        return ty("C1", 0.1441);
    }
    if (h == 1 && c_plain >= 3) || c_plain >= 4 {
        return ty("C2", 0.0);
    }
    if het_plain >= 1 && ((h == 3) || (h == 2 && x == 4 && aliph_plain >= 2)) {
        return ty("C3", -0.2035);
    }
    if het_plain >= 1 && x == 4 && ((h == 1 && aliph_plain >= 3) || (h == 0 && aliph_plain >= 4)) {
        return ty("C4", -0.2051);
    }
    if ns
        .iter()
        .any(|n| n.order == BondOrder::Double && n.aliphatic_heavy() && n.el != 6)
    {
        return ty("C5", -0.2783);
    }
    if double_c >= 1
        && ((h == 2)
            || (h == 1 && aliph_plain >= 1)
            || (h == 0 && aliph_plain >= 2)
            || double_c >= 2)
    {
        return ty("C6", 0.1551);
    }
    if x == 2
        && ns
            .iter()
            .any(|n| n.order == BondOrder::Triple && n.aliphatic_heavy())
    {
        return ty("C7", 0.0017);
    }
    if h == 3 && ns.iter().any(|n| n.plain() && n.aromatic && n.el == 6) {
        return ty("C8", 0.08452);
    }
    if h == 3 && arom >= 1 {
        return ty("C9", -0.1444);
    }
    if x == 4 && arom >= 1 {
        match h {
            2 => return ty("C10", -0.0516),
            1 => return ty("C11", 0.1193),
            0 => return ty("C12", -0.0967),
            _ => {}
        }
    }
    if double_c >= 1 {
        let aromatic_pair = has_pair(
            ns,
            |n| n.plain() && n.aromatic && n.el == 6,
            |n| n.plain() && n.aromatic,
        );
        if (arom >= 1 && aliph_plain >= 1) || aromatic_pair || (h == 1 && arom >= 1) {
            return ty("C26", 0.264);
        }
    }
    if ns
        .iter()
        .any(|n| n.order == BondOrder::Double && n.aromatic && n.el == 6)
    {
        return ty("C26", 0.264);
    }
    if x == 4
        && ns
            .iter()
            .any(|n| n.plain() && n.aliphatic_heavy() && !is_listed_hetero(n) && n.el != 6)
    {
        return ty("C27", 0.2148);
    }
    CS
}

fn aromatic_carbon(mol: &Molecule, i: usize, ns: &[Nbr]) -> CrippenContribution {
    let h = mol.atoms[i].hydrogens;

    if h == 0
        && ns.iter().any(|n| {
            n.order == BondOrder::Single
                && n.aliphatic_heavy()
                && !matches!(n.el, 6 | 7 | 8 | 16 | 9 | 17 | 35 | 53)
        })
    {
        return ty("C13", -0.5443);
    }
    for n in ns.iter().filter(|n| n.plain()) {
        match n.el {
            9 => return ty("C14", 0.0),
            17 => return ty("C15", 0.2450),
            35 => return ty("C16", 0.1980),
            53 => return ty("C17", 0.0),
            _ => {}
        }
    }
    if h == 1 {
        return ty("C18", 0.1581);
    }

    let ring_nbrs = ns
        .iter()
        .filter(|n| n.order == BondOrder::Aromatic && n.aromatic)
        .count();
    if ring_nbrs >= 3 {
        return ty("C19", 0.2955);
    }
    if ring_nbrs >= 2 {
        let single = |pred: &dyn Fn(&Nbr) -> bool| {
            ns.iter().any(|n| n.order == BondOrder::Single && pred(n))
        };
        if single(&|n| n.aromatic) {
            return ty("C20", 0.2713);
        }
        if single(&|n| n.aliphatic(6)) {
            return ty("C21", 0.1360);
        }
        if single(&|n| n.aliphatic(7)) {
            return ty("C22", 0.4619);
        }
        if single(&|n| n.aliphatic(8)) {
            return ty("C23", 0.5437);
        }
        if single(&|n| n.aliphatic(16)) {
            return ty("C24", 0.1893);
        }
        if ns.iter().any(|n| {
            n.order == BondOrder::Double && !n.aromatic && matches!(n.el, 6 | 7 | 8)
        }) {
            return ty("C25", -0.8186);
        }
    }
    CS
}

fn nitrogen(mol: &Molecule, i: usize, ns: &[Nbr]) -> CrippenContribution {
    let atom = &mol.atoms[i];
    let charge = atom.formal_charge;
    if atom.is_aromatic {
        return match charge {
            0 => ty("N11", -0.3239),
            c if c > 0 => ty("N12", -1.119),
            _ => NS,
        };
    }

    let h = atom.hydrogens;
    let aliph_plain = ns.iter().filter(|n| n.plain() && n.aliphatic_heavy()).count();
    let heavy_plain = ns.iter().filter(|n| n.plain() && n.el != 1).count();
    let arom = ns.iter().filter(|n| n.plain() && n.aromatic).count();
    let double_heavy = ns.iter().any(|n| n.order == BondOrder::Double && n.el != 1);
    let triple_aliph = ns
        .iter()
        .any(|n| n.order == BondOrder::Triple && n.aliphatic_heavy());

    if charge == 0 {
        if h == 2 && aliph_plain >= 1 {
            return ty("N1", -1.019);
        }
        if h == 1 && aliph_plain >= 2 {
            return ty("N2", -0.7096);
        }
        if h == 2 && arom >= 1 {
            return ty("N3", -1.027);
        }
        if h == 1 && arom >= 1 && heavy_plain >= 2 {
            return ty("N4", -0.5188);
        }
        if h == 1 && double_heavy {
            return ty("N5", 0.08387);
        }
        if double_heavy && heavy_plain >= 1 {
            return ty("N6", 0.1836);
        }
        if aliph_plain >= 3 {
            return ty("N7", -0.3187);
        }
        if arom >= 1 && ((heavy_plain >= 3 && aliph_plain >= 1) || arom >= 3) {
            return ty("N8", -0.4458);
        }
        if triple_aliph {
            return ty("N9", 0.01508);
        }
        return NS;
    }

    if charge > 0 {
        if (1..=3).contains(&h) {
            return ty("N10", -1.95);
        }
        if h == 0 {
            let double_aliph = ns
                .iter()
                .filter(|n| n.order == BondOrder::Double && n.aliphatic_heavy())
                .count();
            let doubles: Vec<&Nbr> = ns.iter().filter(|n| n.order == BondOrder::Double).collect();
            let cumulated = doubles.iter().any(|n| n.el == 6) && doubles.iter().any(|n| n.el == 7);
            if aliph_plain >= 4 || (double_aliph >= 1 && aliph_plain >= 1 && heavy_plain >= 2) || cumulated {
                return ty("N13", -0.3396);
            }
        }
        if triple_aliph {
            return ty("N14", 0.2887);
        }
        let azide = ns.iter().any(|n| {
            n.order == BondOrder::Double && n.el == 7 && mol.atoms[n.idx].formal_charge < 0
        });
        if azide {
            return ty("N14", 0.2887);
        }
        return NS;
    }

    ty("N14", 0.2887)
}

fn oxygen(mol: &Molecule, i: usize, ns: &[Nbr]) -> CrippenContribution {
    let atom = &mol.atoms[i];
    if atom.is_aromatic {
        return ty("O1", 0.1552);
    }
    let h = atom.hydrogens;
    if h == 1 || h == 2 {
        return ty("O2", -0.2893);
    }

    let aliph_plain = ns.iter().filter(|n| n.plain() && n.aliphatic_heavy()).count();
    let heavy_plain = ns.iter().filter(|n| n.plain() && n.el != 1).count();
    if aliph_plain >= 2 {
        return ty("O3", -0.0684);
    }
    if ns.iter().any(|n| n.plain() && n.aromatic) && heavy_plain >= 2 {
        return ty("O4", -0.4195);
    }

    let double_to = |el: u8| ns.iter().any(|n| n.order == BondOrder::Double && n.el == el);
    let anion = atom.formal_charge < 0 && mol.total_degree(i) == 1;
    let single_to = |el: u8| ns.iter().any(|n| n.order == BondOrder::Single && n.el == el);

    if double_to(7) || double_to(8) || (anion && single_to(7)) {
        return ty("O5", 0.0335);
    }
    if double_to(16) || (anion && single_to(16)) {
        return ty("O6", -0.3339);
    }
    if atom.formal_charge < 0 {
        let carboxylate = ns.iter().any(|n| {
            n.order == BondOrder::Single
                && n.aliphatic(6)
                && mol
                    .bonds_of(n.idx)
                    .any(|(m, b)| m != i && b.order == BondOrder::Double && mol.atoms[m].atomic_number == 8)
        });
        if carboxylate {
            return ty("O12", -1.326);
        }
        return ty("O7", -1.189);
    }
    if double_to(15) {
        return ty("O7", -1.189);
    }

    let Some(partner) = ns.iter().find(|n| n.order == BondOrder::Double && n.el == 6) else {
        return OS;
    };
    if partner.aromatic {
        return ty("O8", 0.1788);
    }
    carbonyl_oxygen(mol, partner.idx, i)
}

/// Types O9-O11: the oxygen of an aliphatic C=O, classified by the carbon's other substituents.
fn carbonyl_oxygen(mol: &Molecule, carbon: usize, oxygen: usize) -> CrippenContribution {
    let ch = mol.atoms[carbon].hydrogens;
    let all = nbrs(mol, carbon);
    let others: Vec<Nbr> = all
        .iter()
        .filter(|n| n.idx != oxygen && n.plain())
        .copied()
        .collect();

    let has = |pred: &dyn Fn(&Nbr) -> bool| others.iter().any(|n| pred(n));
    let other_double_o = all
        .iter()
        .any(|n| n.idx != oxygen && n.order == BondOrder::Double && n.el == 8);

    let aliphatic_ketone = has_pair(&others, |n| n.aliphatic(6), |n| n.aliphatic_heavy());
    if (ch == 1 && has(&|n| n.aliphatic(6)))
        || aliphatic_ketone
        || (ch == 1 && has(&|n| n.aliphatic(7) || n.aliphatic(8)))
        || ch == 2
        || (mol.total_degree(carbon) == 2 && other_double_o)
    {
        return ty("O9", -0.1526);
    }

    let aromatic_ketone = has_pair(&others, |n| n.el == 6, |n| n.aromatic)
        || has_pair(&others, |n| n.aromatic && n.el == 6, |n| n.aliphatic_heavy());
    if (ch == 1 && has(&|n| n.aromatic && n.el == 6)) || aromatic_ketone {
        return ty("O10", 0.1129);
    }

    if has_pair(&others, |n| n.el != 6 && n.el != 1, |n| n.el != 6 && n.el != 1) {
        return ty("O11", 0.4833);
    }
    OS
}

/// Type shared by every hydrogen attached to heavy atom `parent`.
pub fn hydrogen_type(mol: &Molecule, parent: usize) -> CrippenContribution {
    let p = &mol.atoms[parent];
    match p.atomic_number {
        1 | 6 => H1,
        7 => H3,
        8 => hydroxyl_hydrogen(mol, parent),
        _ => H2,
    }
}

fn hydroxyl_hydrogen(mol: &Molecule, oxygen: usize) -> CrippenContribution {
    let ns = nbrs(mol, oxygen);
    // Other hydrogens on the same oxygen count as neighbors too (water).
    let sibling_h = mol.atoms[oxygen].hydrogens > 1;

    let alkyl = ns
        .iter()
        .any(|n| n.aliphatic(6) && mol.total_degree(n.idx) == 4);
    let aryl = ns.iter().any(|n| n.aromatic && n.el == 6);
    let unusual = ns.iter().any(|n| !matches!(n.el, 6 | 7 | 8 | 16));
    if alkyl || aryl || unusual || sibling_h {
        return H2;
    }
    if ns.iter().any(|n| n.el == 7) {
        return H3;
    }

    let acid_like = ns.iter().any(|n| {
        n.aliphatic(6)
            && mol.bonds_of(n.idx).any(|(m, b)| {
                b.order == BondOrder::Double && matches!(mol.atoms[m].atomic_number, 6 | 7 | 8 | 16)
            })
    });
    let peroxy = ns.iter().any(|n| n.aliphatic(8) || n.aliphatic(16));
    if acid_like || peroxy {
        return H4;
    }
    HS
}

fn explicit_hydrogen_type(mol: &Molecule, i: usize) -> CrippenContribution {
    match mol.neighbors(i).next() {
        Some(parent) if mol.atoms[parent].atomic_number == 1 => H1,
        Some(parent) => hydrogen_type(mol, parent),
        None => HS,
    }
}
