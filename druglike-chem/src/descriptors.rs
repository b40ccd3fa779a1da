//! The descriptor engine: SMILES in, five drug-likeness descriptors out.

use serde::Serialize;

use druglike_core::{Annotated, Result, Summarizable};

use crate::compound::Compound;
use crate::crippen::crippen_log_p;
use crate::lipinski::{num_h_acceptors, num_h_donors, num_rotatable_bonds, RuleOfFive};
use crate::molecule::Molecule;
use crate::properties::{molecular_formula, molecular_weight};
use crate::smiles::{parse_smiles, parse_smiles_named};

/// The five physicochemical descriptors of one molecule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Descriptors {
    pub mol_wt: f64,
    pub log_p: f64,
    pub num_h_donors: usize,
    pub num_h_acceptors: usize,
    pub num_rotatable_bonds: usize,
}

impl Descriptors {
    /// Compute descriptors for an already parsed molecule.
    pub fn from_molecule(mol: &Molecule) -> Self {
        Descriptors {
            mol_wt: molecular_weight(mol),
            log_p: crippen_log_p(mol),
            num_h_donors: num_h_donors(mol),
            num_h_acceptors: num_h_acceptors(mol),
            num_rotatable_bonds: num_rotatable_bonds(mol),
        }
    }

    pub fn rule_of_five(&self) -> RuleOfFive {
        RuleOfFive::evaluate(self.mol_wt, self.log_p, self.num_h_donors, self.num_h_acceptors)
    }

    /// Whether all four Rule of Five clauses hold. Rotatable bonds play no part.
    pub fn lipinski_passed(&self) -> bool {
        self.rule_of_five().passed()
    }
}

impl Summarizable for Descriptors {
    fn summary(&self) -> String {
        format!(
            "MolWt={:.2} LogP={:.2} HBD={} HBA={} RotB={}",
            self.mol_wt, self.log_p, self.num_h_donors, self.num_h_acceptors, self.num_rotatable_bonds
        )
    }
}

/// A compound that parsed successfully, with its molecule and descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptorRecord {
    pub name: String,
    pub smiles: String,
    /// Kept for depiction.
    pub molecule: Molecule,
    pub descriptors: Descriptors,
    /// Hill-order molecular formula.
    pub formula: String,
}

impl DescriptorRecord {
    pub fn lipinski_passed(&self) -> bool {
        self.descriptors.lipinski_passed()
    }
}

impl Annotated for DescriptorRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Summarizable for DescriptorRecord {
    fn summary(&self) -> String {
        format!("{} ({}): {}", self.name, self.formula, self.descriptors.summary())
    }
}

/// Parse a SMILES string and compute its descriptors.
pub fn compute(smiles: &str) -> Result<Descriptors> {
    let mol = parse_smiles(smiles)?;
    Ok(Descriptors::from_molecule(&mol))
}

/// Build the full record for a compound, or the parse error that rejects it.
pub fn compute_compound(compound: &Compound) -> Result<DescriptorRecord> {
    let molecule = parse_smiles_named(&compound.smiles, &compound.name)?;
    let descriptors = Descriptors::from_molecule(&molecule);
    let formula = molecular_formula(&molecule);
    Ok(DescriptorRecord {
        name: compound.name.clone(),
        smiles: compound.smiles.clone(),
        molecule,
        descriptors,
        formula,
    })
}
