//! SMILES string parser.
//!
//! Parsing runs in four passes: tokenise atoms and bonds into a raw graph,
//! assign implicit hydrogens from the default valences, fold explicit `[H]`
//! atoms into their parents, then perceive aromaticity so Kekulé and
//! lowercase spellings of the same ring produce the same graph.

use std::collections::{BTreeMap, HashSet};

use druglike_core::{DruglikeError, Result};

use crate::aromaticity;
use crate::element::{element_by_number, element_by_symbol};
use crate::molecule::{Bond, BondOrder, Chirality, MolAtom, Molecule};

/// Parse a SMILES string into a `Molecule`.
pub fn parse_smiles(smiles: &str) -> Result<Molecule> {
    parse_smiles_named(smiles, "")
}

/// Parse a SMILES string into a `Molecule` with a given name.
pub fn parse_smiles_named(smiles: &str, name: &str) -> Result<Molecule> {
    let trimmed = smiles.trim();
    if trimmed.is_empty() {
        return Err(DruglikeError::Parse("empty SMILES".into()));
    }
    let mut parser = SmilesParser::new(trimmed);
    parser.parse()?;
    parser.finish()?;
    parser.assign_hydrogens()?;
    let (atoms, bonds) = fold_explicit_hydrogens(parser.atoms, parser.bonds);
    let mut mol = Molecule::new(name.to_string(), atoms, bonds);
    aromaticity::perceive(&mut mol)?;
    Ok(mol)
}

fn parse_err(msg: impl Into<String>) -> DruglikeError {
    DruglikeError::Parse(msg.into())
}

struct SmilesParser<'a> {
    input: &'a [u8],
    pos: usize,
    atoms: Vec<MolAtom>,
    bonds: Vec<Bond>,
    /// Bonded atom pairs, smaller index first.
    bonded: HashSet<(usize, usize)>,
    /// ring_closures[digit] = (atom_idx, Option<BondOrder>)
    ring_closures: BTreeMap<u16, (usize, Option<BondOrder>)>,
    /// Stack of atom indices for branch handling
    stack: Vec<usize>,
    /// Index of the previous atom (for bonding)
    prev_atom: Option<usize>,
    /// Pending bond order for the next bond
    pending_bond: Option<BondOrder>,
}

impl<'a> SmilesParser<'a> {
    fn new(input: &'a str) -> Self {
        SmilesParser {
            input: input.as_bytes(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            bonded: HashSet::new(),
            ring_closures: BTreeMap::new(),
            stack: Vec::new(),
            prev_atom: None,
            pending_bond: None,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.input.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn set_pending_bond(&mut self, order: BondOrder) -> Result<()> {
        if self.pending_bond.is_some() {
            return Err(parse_err(format!("two bond symbols in a row at position {}", self.pos)));
        }
        self.advance();
        self.pending_bond = Some(order);
        Ok(())
    }

    fn parse(&mut self) -> Result<()> {
        while let Some(ch) = self.peek() {
            match ch {
                b'(' => {
                    let prev = self.prev_atom.ok_or_else(|| {
                        parse_err(format!("branch without preceding atom at position {}", self.pos))
                    })?;
                    self.advance();
                    self.stack.push(prev);
                }
                b')' => {
                    if self.pending_bond.is_some() {
                        return Err(parse_err(format!("dangling bond before ')' at position {}", self.pos)));
                    }
                    self.advance();
                    let prev = self.stack.pop().ok_or_else(|| {
                        parse_err(format!("unmatched ')' at position {}", self.pos - 1))
                    })?;
                    self.prev_atom = Some(prev);
                }
                b'-' => self.set_pending_bond(BondOrder::Single)?,
                b'=' => self.set_pending_bond(BondOrder::Double)?,
                b'#' => self.set_pending_bond(BondOrder::Triple)?,
                b':' => self.set_pending_bond(BondOrder::Aromatic)?,
                b'/' | b'\\' => {
                    // Cis/trans markers carry no information the descriptors use.
                    self.advance();
                }
                b'%' => {
                    self.advance();
                    let ring_num = self.parse_two_digit_ring()?;
                    self.handle_ring_closure(ring_num)?;
                }
                b'[' => self.parse_bracket_atom()?,
                b'0'..=b'9' => {
                    self.advance();
                    self.handle_ring_closure((ch - b'0') as u16)?;
                }
                b'.' => {
                    if self.pending_bond.is_some() {
                        return Err(parse_err("bond symbol before '.'"));
                    }
                    self.advance();
                    self.prev_atom = None;
                }
                _ if is_organic_atom_start(ch) => self.parse_organic_atom()?,
                _ => {
                    return Err(parse_err(format!(
                        "unexpected character '{}' at position {}",
                        ch as char, self.pos
                    )));
                }
            }
        }
        Ok(())
    }

    fn parse_organic_atom(&mut self) -> Result<()> {
        let Some(ch) = self.advance() else {
            return Err(parse_err("unexpected end of SMILES"));
        };
        let is_aromatic = ch.is_ascii_lowercase();

        let symbol = match ch {
            b'B' if self.peek() == Some(b'r') => {
                self.advance();
                "Br"
            }
            b'C' if self.peek() == Some(b'l') => {
                self.advance();
                "Cl"
            }
            b'B' | b'b' => "B",
            b'C' | b'c' => "C",
            b'N' | b'n' => "N",
            b'O' | b'o' => "O",
            b'P' | b'p' => "P",
            b'S' | b's' => "S",
            b'F' => "F",
            b'I' => "I",
            _ => {
                return Err(parse_err(format!("unknown organic atom '{}'", ch as char)));
            }
        };

        let elem = element_by_symbol(symbol)
            .ok_or_else(|| parse_err(format!("unknown element '{symbol}'")))?;
        self.push_atom(MolAtom::organic(elem.atomic_number, is_aromatic))
    }

    fn parse_bracket_atom(&mut self) -> Result<()> {
        let start = self.pos;
        self.advance(); // consume '['

        let isotope = self
            .parse_optional_number()
            .map(|n| u16::try_from(n).map_err(|_| parse_err(format!("isotope {n} out of range"))))
            .transpose()?;

        let ch = self
            .advance()
            .ok_or_else(|| parse_err("unexpected end of SMILES in bracket atom"))?;
        if !ch.is_ascii_alphabetic() {
            return Err(parse_err(format!(
                "expected element symbol in bracket atom at position {}",
                self.pos - 1
            )));
        }
        let is_aromatic = ch.is_ascii_lowercase();
        let upper = ch.to_ascii_uppercase() as char;

        // Aromatic two-letter symbols are limited to se/as; uppercase ones are
        // taken whenever the two-letter element exists.
        let symbol = match self.peek() {
            Some(next) if next.is_ascii_lowercase() => {
                let two_letter = format!("{}{}", upper, next as char);
                let allowed = !is_aromatic || matches!(two_letter.as_str(), "Se" | "As");
                if allowed && element_by_symbol(&two_letter).is_some() {
                    self.advance();
                    two_letter
                } else {
                    upper.to_string()
                }
            }
            _ => upper.to_string(),
        };

        let elem = element_by_symbol(&symbol).ok_or_else(|| {
            // Name every letter written, not just the one-letter fallback.
            let written: String = std::iter::once(ch as char)
                .chain(
                    self.input[self.pos..]
                        .iter()
                        .take_while(|c| c.is_ascii_lowercase())
                        .map(|&c| c as char),
                )
                .collect();
            parse_err(format!("unknown element '{written}'"))
        })?;
        if is_aromatic && !matches!(elem.atomic_number, 5 | 6 | 7 | 8 | 15 | 16 | 33 | 34) {
            return Err(parse_err(format!("element '{symbol}' cannot be aromatic")));
        }

        let chirality = match self.count_repeated(b'@') {
            0 => Chirality::None,
            1 => Chirality::CounterClockwise,
            _ => Chirality::Clockwise,
        };

        let mut hydrogens = 0u8;
        if self.peek() == Some(b'H') {
            self.advance();
            hydrogens = match self.peek() {
                Some(d) if d.is_ascii_digit() => {
                    self.advance();
                    d - b'0'
                }
                _ => 1,
            };
        }

        let formal_charge = self.parse_charge()?;

        // Atom class (`:n`) is an annotation only.
        if self.peek() == Some(b':') {
            self.advance();
            if self.parse_optional_number().is_none() {
                return Err(parse_err("expected atom class number after ':'"));
            }
        }

        if self.advance() != Some(b']') {
            return Err(parse_err(format!("unclosed bracket atom starting at position {start}")));
        }

        let atom = MolAtom {
            atomic_number: elem.atomic_number,
            formal_charge,
            isotope,
            is_aromatic,
            hydrogens,
            bracket: true,
            chirality,
        };
        self.push_atom(atom)
    }

    fn parse_charge(&mut self) -> Result<i8> {
        let sign: i8 = match self.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Ok(0),
        };
        let symbol = if sign > 0 { b'+' } else { b'-' };
        let repeats = self.count_repeated(symbol);
        if repeats > 1 {
            let magnitude = i8::try_from(repeats)
                .ok()
                .filter(|&m| m <= 7)
                .ok_or_else(|| parse_err(format!("charge {repeats} out of range")))?;
            return Ok(sign * magnitude);
        }
        match self.peek() {
            Some(d) if d.is_ascii_digit() => {
                self.advance();
                let magnitude = (d - b'0') as i8;
                if magnitude > 7 {
                    return Err(parse_err(format!("charge {magnitude} out of range")));
                }
                Ok(sign * magnitude)
            }
            _ => Ok(sign),
        }
    }

    fn count_repeated(&mut self, symbol: u8) -> usize {
        let mut n = 0;
        while self.peek() == Some(symbol) {
            self.advance();
            n += 1;
        }
        n
    }

    fn parse_optional_number(&mut self) -> Option<u32> {
        let mut n: u32 = 0;
        let mut found = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.advance();
                n = n.saturating_mul(10).saturating_add((ch - b'0') as u32);
                found = true;
            } else {
                break;
            }
        }
        if found { Some(n) } else { None }
    }

    fn parse_two_digit_ring(&mut self) -> Result<u16> {
        let d1 = self.advance().ok_or_else(|| parse_err("expected digit after '%'"))?;
        let d2 = self
            .advance()
            .ok_or_else(|| parse_err("expected second digit after '%'"))?;
        if !d1.is_ascii_digit() || !d2.is_ascii_digit() {
            return Err(parse_err("invalid ring closure number after '%'"));
        }
        Ok((d1 - b'0') as u16 * 10 + (d2 - b'0') as u16)
    }

    fn push_atom(&mut self, atom: MolAtom) -> Result<()> {
        let atom_idx = self.atoms.len();
        self.atoms.push(atom);
        self.add_bond_to_prev(atom_idx)?;
        self.prev_atom = Some(atom_idx);
        Ok(())
    }

    fn default_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].is_aromatic && self.atoms[b].is_aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }

    fn push_bond(&mut self, atom1: usize, atom2: usize, order: BondOrder) -> Result<()> {
        if atom1 == atom2 {
            return Err(parse_err(format!("atom {atom1} bonded to itself")));
        }
        if !self.bonded.insert((atom1.min(atom2), atom1.max(atom2))) {
            return Err(parse_err(format!("duplicate bond between atoms {atom1} and {atom2}")));
        }
        self.bonds.push(Bond {
            atom1,
            atom2,
            order,
            is_aromatic: order == BondOrder::Aromatic,
        });
        Ok(())
    }

    fn handle_ring_closure(&mut self, ring_num: u16) -> Result<()> {
        let current = self
            .prev_atom
            .ok_or_else(|| parse_err("ring closure without preceding atom"))?;

        if let Some((open_atom, open_bond)) = self.ring_closures.remove(&ring_num) {
            let closing = self.pending_bond.take();
            let order = match (open_bond, closing) {
                (Some(a), Some(b)) if a != b => {
                    return Err(parse_err(format!("conflicting bond orders on ring closure {ring_num}")));
                }
                (Some(a), _) | (None, Some(a)) => a,
                (None, None) => self.default_order(open_atom, current),
            };
            self.push_bond(open_atom, current, order)
        } else {
            self.ring_closures
                .insert(ring_num, (current, self.pending_bond.take()));
            Ok(())
        }
    }

    fn add_bond_to_prev(&mut self, atom_idx: usize) -> Result<()> {
        match self.prev_atom {
            Some(prev) => {
                let order = self
                    .pending_bond
                    .take()
                    .unwrap_or_else(|| self.default_order(prev, atom_idx));
                self.push_bond(prev, atom_idx, order)
            }
            None if self.pending_bond.is_some() => {
                Err(parse_err("bond symbol without preceding atom"))
            }
            None => Ok(()),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.pending_bond.is_some() {
            return Err(parse_err("SMILES ends with a dangling bond"));
        }
        if !self.ring_closures.is_empty() {
            let open: Vec<_> = self.ring_closures.keys().collect();
            return Err(parse_err(format!("unmatched ring closure(s): {open:?}")));
        }
        if !self.stack.is_empty() {
            return Err(parse_err(format!("{} unmatched '(' in SMILES", self.stack.len())));
        }
        if self.atoms.is_empty() {
            return Err(parse_err("SMILES contains no atoms"));
        }
        Ok(())
    }

    /// Fill in implicit hydrogens for organic-subset atoms and reject
    /// atoms whose written bonds exceed every allowed valence.
    fn assign_hydrogens(&mut self) -> Result<()> {
        // Per atom: aromatic bond count and summed order of the other bonds.
        let mut aromatic_counts = vec![0usize; self.atoms.len()];
        let mut order_sums = vec![0.0f64; self.atoms.len()];
        for bond in &self.bonds {
            for end in [bond.atom1, bond.atom2] {
                if bond.order == BondOrder::Aromatic {
                    aromatic_counts[end] += 1;
                } else {
                    order_sums[end] += bond.order.as_f64();
                }
            }
        }

        for i in 0..self.atoms.len() {
            if self.atoms[i].bracket {
                continue;
            }
            let atomic_number = self.atoms[i].atomic_number;
            let elem = element_by_number(atomic_number)
                .ok_or_else(|| parse_err(format!("unknown atomic number {atomic_number}")))?;

            let (aromatic_bonds, other_orders) = (aromatic_counts[i], order_sums[i]);

            let hydrogens = if self.atoms[i].is_aromatic {
                // One valence electron sits in the pi system; aromatic bonds
                // each consume a single sigma slot.
                let target = elem.valences.first().copied().unwrap_or(0) as usize;
                let used = aromatic_bonds + other_orders.round() as usize;
                target.saturating_sub(1).saturating_sub(used)
            } else {
                let explicit = (aromatic_bonds as f64 * 1.5 + other_orders).round() as usize;
                let valence = elem.fitting_valence(explicit).ok_or_else(|| {
                    parse_err(format!(
                        "explicit valence {explicit} for {} (atom {i}) exceeds the permitted maximum",
                        elem.symbol
                    ))
                })?;
                valence - explicit
            };
            self.atoms[i].hydrogens = hydrogens as u8;
        }
        Ok(())
    }
}

/// Remove plain `[H]` atoms bonded to a heavy atom and count them on the parent instead.
fn fold_explicit_hydrogens(mut atoms: Vec<MolAtom>, bonds: Vec<Bond>) -> (Vec<MolAtom>, Vec<Bond>) {
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); atoms.len()];
    for (bi, b) in bonds.iter().enumerate() {
        incident[b.atom1].push(bi);
        incident[b.atom2].push(bi);
    }

    let foldable: Vec<Option<usize>> = (0..atoms.len())
        .map(|i| {
            let a = &atoms[i];
            if a.atomic_number != 1 || a.isotope.is_some() || a.formal_charge != 0 || a.hydrogens != 0 {
                return None;
            }
            match incident[i].as_slice() {
                &[bi] if bonds[bi].order == BondOrder::Single => {
                    let b = &bonds[bi];
                    let parent = b.partner(i);
                    (atoms[parent].atomic_number != 1).then_some(parent)
                }
                _ => None,
            }
        })
        .collect();

    if foldable.iter().all(Option::is_none) {
        return (atoms, bonds);
    }

    for parent in foldable.iter().flatten() {
        atoms[*parent].hydrogens = atoms[*parent].hydrogens.saturating_add(1);
    }

    let mut remap = vec![usize::MAX; atoms.len()];
    let mut kept = Vec::with_capacity(atoms.len());
    for (i, atom) in atoms.into_iter().enumerate() {
        if foldable[i].is_none() {
            remap[i] = kept.len();
            kept.push(atom);
        }
    }
    let bonds = bonds
        .into_iter()
        .filter(|b| foldable[b.atom1].is_none() && foldable[b.atom2].is_none())
        .map(|b| Bond { atom1: remap[b.atom1], atom2: remap[b.atom2], ..b })
        .collect();
    (kept, bonds)
}

fn is_organic_atom_start(ch: u8) -> bool {
    matches!(
        ch,
        b'B' | b'C' | b'N' | b'O' | b'P' | b'S' | b'F' | b'I'
            | b'b' | b'c' | b'n' | b'o' | b'p' | b's'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_methane() {
        let mol = parse_smiles("C").unwrap();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.atoms[0].atomic_number, 6);
        assert_eq!(mol.atoms[0].hydrogens, 4);
    }

    #[test]
    fn parse_ethanol() {
        let mol = parse_smiles("CCO").unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.bond_count(), 2);
        assert_eq!(mol.atoms[0].hydrogens, 3);
        assert_eq!(mol.atoms[1].hydrogens, 2);
        assert_eq!(mol.atoms[2].hydrogens, 1);
    }

    #[test]
    fn parse_benzene() {
        let mol = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(mol.atom_count(), 6);
        assert_eq!(mol.bond_count(), 6);
        for atom in &mol.atoms {
            assert!(atom.is_aromatic);
            assert_eq!(atom.hydrogens, 1);
        }
    }

    #[test]
    fn kekule_benzene_matches_aromatic_form() {
        let kekule = parse_smiles("C1=CC=CC=C1").unwrap();
        let aromatic = parse_smiles("c1ccccc1").unwrap();
        assert_eq!(kekule.atoms, aromatic.atoms);
        assert!(kekule.bonds.iter().all(|b| b.order == BondOrder::Aromatic));
    }

    #[test]
    fn parse_branching() {
        let mol = parse_smiles("CC(C)C").unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.bond_count(), 3);
        assert_eq!(mol.degree(1), 3);
    }

    #[test]
    fn parse_double_and_triple_bonds() {
        let mol = parse_smiles("C=C").unwrap();
        assert_eq!(mol.bonds[0].order, BondOrder::Double);
        assert_eq!(mol.atoms[0].hydrogens, 2);

        let mol = parse_smiles("CC#N").unwrap();
        assert_eq!(mol.bonds[1].order, BondOrder::Triple);
        assert_eq!(mol.atoms[2].hydrogens, 0);
    }

    #[test]
    fn hypervalent_sulfur_gets_no_hydrogens() {
        // Dimethyl sulfone: S uses valence 6.
        let mol = parse_smiles("CS(=O)(=O)C").unwrap();
        assert_eq!(mol.atoms[1].hydrogens, 0);
        // Nitro nitrogen written neutral with valence 5.
        let mol = parse_smiles("CN(=O)=O").unwrap();
        assert_eq!(mol.atoms[1].hydrogens, 0);
    }

    #[test]
    fn parse_bracket_atoms() {
        let mol = parse_smiles("[NH4+]").unwrap();
        assert_eq!(mol.atoms[0].atomic_number, 7);
        assert_eq!(mol.atoms[0].formal_charge, 1);
        assert_eq!(mol.atoms[0].hydrogens, 4);

        // Bracket atoms keep exactly the hydrogens written.
        let mol = parse_smiles("[CH2]").unwrap();
        assert_eq!(mol.atoms[0].hydrogens, 2);

        let mol = parse_smiles("[13CH4]").unwrap();
        assert_eq!(mol.atoms[0].isotope, Some(13));

        let mol = parse_smiles("[O-2]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, -2);

        let mol = parse_smiles("[Fe+++]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, 3);
    }

    #[test]
    fn parse_chirality_and_stereo_bonds() {
        let mol = parse_smiles("N[C@@H](C)C(=O)O").unwrap();
        assert_eq!(mol.atoms[1].chirality, Chirality::Clockwise);
        assert_eq!(mol.atoms[1].hydrogens, 1);

        let mol = parse_smiles("F/C=C/F").unwrap();
        assert_eq!(mol.atom_count(), 4);
    }

    #[test]
    fn aromatic_nh_keeps_its_hydrogen() {
        let mol = parse_smiles("c1cc[nH]c1").unwrap();
        let n = mol.atoms.iter().find(|a| a.atomic_number == 7).unwrap();
        assert!(n.is_aromatic);
        assert_eq!(n.hydrogens, 1);
    }

    #[test]
    fn explicit_hydrogens_fold_into_parent() {
        let mol = parse_smiles("[H]C([H])([H])[H]").unwrap();
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(mol.atoms[0].hydrogens, 4);

        let mol = parse_smiles("[H][H]").unwrap();
        assert_eq!(mol.atom_count(), 2);
    }

    #[test]
    fn parse_two_digit_ring_closure() {
        let mol = parse_smiles("C%10CCCCCCCCC%10").unwrap();
        assert_eq!(mol.atom_count(), 10);
        assert_eq!(mol.bond_count(), 10);
    }

    #[test]
    fn disconnected_fragments() {
        let mol = parse_smiles("[Na+].[Cl-]").unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn invalid_smiles_error() {
        for bad in [
            "", "   ", "C(", "C)", "C1CC", "[", "[C", "not-a-smiles", "C==C", "C=", "(C)",
            "C1C1", "c1cccc1", "c", "C(C)(C)(C)(C)C", "[Xx]", "[cl]", "[C++++++++]", "[N+12]", "[70000C]",
        ] {
            assert!(parse_smiles(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn long_charge_runs_are_errors_not_overflows() {
        for run in [8usize, 127, 128, 200] {
            for sign in ["+", "-"] {
                let smiles = format!("[C{}]", sign.repeat(run));
                let err = parse_smiles(&smiles).unwrap_err();
                assert!(err.to_string().contains("out of range"), "{smiles}: {err}");
            }
        }
        let mol = parse_smiles("[Fe-------]").unwrap();
        assert_eq!(mol.atoms[0].formal_charge, -7);
    }

    #[test]
    fn unknown_bracket_element_names_every_letter() {
        let err = parse_smiles("[Zz+3]").unwrap_err();
        assert!(err.to_string().contains("'Zz'"), "{err}");
    }

    #[test]
    fn heavy_elements_in_brackets() {
        let mol = parse_smiles("[Gd+3]").unwrap();
        assert_eq!(mol.atoms[0].atomic_number, 64);
        assert_eq!(mol.atoms[0].formal_charge, 3);
        for (smiles, z) in [("[Lu]", 71), ("[Tl+]", 81), ("[Pb+2]", 82), ("[W]", 74), ("[U]", 92)] {
            assert_eq!(parse_smiles(smiles).unwrap().atoms[0].atomic_number, z, "{smiles}");
        }
    }

    #[test]
    fn long_chain_parses() {
        let chain = "C".repeat(20_000);
        let mol = parse_smiles(&chain).unwrap();
        assert_eq!(mol.atom_count(), 20_000);
        assert_eq!(mol.bond_count(), 19_999);
        assert_eq!(mol.atoms[0].hydrogens, 3);
        assert_eq!(mol.atoms[10_000].hydrogens, 2);
    }

    #[test]
    fn duplicate_bonds_are_rejected() {
        let err = parse_smiles("C12CC12").unwrap_err();
        assert!(err.to_string().contains("duplicate bond"), "{err}");
    }

    #[test]
    fn error_message_names_the_offending_character() {
        let err = parse_smiles("CC$C").unwrap_err();
        assert!(err.to_string().contains("'$'"), "{err}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::properties::molecular_formula;
    use proptest::prelude::*;

    /// Strategy for valid simple SMILES: chains of aliphatic organic-subset atoms
    fn simple_smiles() -> impl Strategy<Value = String> {
        let atoms = prop_oneof![Just("C"), Just("N"), Just("O"), Just("S"), Just("Cl")];
        proptest::collection::vec(atoms, 1..=20).prop_map(|parts| parts.join(""))
    }

    proptest! {
        #[test]
        fn parse_smiles_does_not_panic(s in "\\PC{0,100}") {
            let _ = parse_smiles(&s);
        }

        #[test]
        fn parse_is_deterministic(smi in simple_smiles()) {
            let first = parse_smiles(&smi);
            let second = parse_smiles(&smi);
            match (first, second) {
                (Ok(a), Ok(b)) => {
                    prop_assert_eq!(&a, &b);
                    prop_assert_eq!(molecular_formula(&a), molecular_formula(&b));
                }
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "parse outcome differs between calls"),
            }
        }

        #[test]
        fn atom_count_positive_on_success(smi in simple_smiles()) {
            if let Ok(mol) = parse_smiles(&smi) {
                prop_assert!(mol.atom_count() > 0);
            }
        }
    }
}
