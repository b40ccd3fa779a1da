//! Drug-likeness chemistry for the druglike explorer.
//!
//! Provides molecular graph representation, SMILES parsing with aromaticity
//! perception, ring detection, Wildman-Crippen logP, and the Lipinski
//! descriptor set.
//!
//! # Example
//!
//! ```
//! use druglike_chem::{compute, parse_smiles, molecular_formula};
//!
//! let aspirin = parse_smiles("CC(=O)OC1=CC=CC=C1C(=O)O").unwrap();
//! assert_eq!(molecular_formula(&aspirin), "C9H8O4");
//!
//! let d = compute("CC(=O)OC1=CC=CC=C1C(=O)O").unwrap();
//! assert_eq!(d.num_h_donors, 1);
//! assert!(d.lipinski_passed());
//! ```

pub mod aromaticity;
pub mod compound;
pub mod crippen;
pub mod descriptors;
pub mod element;
pub mod lipinski;
pub mod molecule;
pub mod properties;
pub mod ring;
pub mod smiles;

pub use compound::{default_compounds, Compound};
pub use crippen::crippen_log_p;
pub use descriptors::{compute, compute_compound, DescriptorRecord, Descriptors};
pub use element::{element_by_number, element_by_symbol, isotope_mass, Element};
pub use lipinski::{num_h_acceptors, num_h_donors, num_rotatable_bonds, RuleOfFive};
pub use molecule::{Bond, BondOrder, Chirality, MolAtom, Molecule};
pub use properties::{molecular_formula, molecular_weight};
pub use ring::{find_sssr, RingInfo};
pub use smiles::{parse_smiles, parse_smiles_named};
