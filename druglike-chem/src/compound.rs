//! Input compounds: a display name and a SMILES string.

use serde::{Deserialize, Serialize};

use druglike_core::Annotated;

/// A named compound awaiting descriptor computation.
///
/// Field names serialize as the `Name` and `SMILES` CSV columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Compound {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SMILES")]
    pub smiles: String,
}

impl Compound {
    pub fn new(name: impl Into<String>, smiles: impl Into<String>) -> Self {
        Compound { name: name.into(), smiles: smiles.into() }
    }
}

impl Annotated for Compound {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Sample compounds used when nothing has been uploaded.
pub fn default_compounds() -> Vec<Compound> {
    vec![
        Compound::new("Aspirin", "CC(=O)OC1=CC=CC=C1C(=O)O"),
        Compound::new("Caffeine", "Cn1cnc2c1c(=O)n(c(=O)n2C)C"),
        Compound::new("Ibuprofen", "CC(C)CC1=CC=C(C=C1)C(C)C(=O)O"),
        Compound::new("Palmitic acid", "CCCCCCCCCCCCCCCC(=O)O"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smiles::parse_smiles;

    #[test]
    fn defaults_all_parse() {
        let defaults = default_compounds();
        assert_eq!(defaults.len(), 4);
        for c in &defaults {
            assert!(parse_smiles(&c.smiles).is_ok(), "{}", c.name);
        }
        assert_eq!(defaults[0].name(), "Aspirin");
    }
}
