//! Dataset building: compounds in, descriptor records out, in input order.

use druglike_chem::{compute_compound, Compound, DescriptorRecord};
use druglike_core::{DruglikeError, Result, Summarizable};
use serde::Serialize;
use tracing::debug;

/// A compound left out of a dataset because its SMILES did not parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedInput {
    /// Position in the input list.
    pub index: usize,
    pub name: String,
    pub smiles: String,
    pub reason: String,
}

/// Descriptor records for the compounds that parsed, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<DescriptorRecord>,
    skipped: Vec<SkippedInput>,
}

impl Dataset {
    /// Compute descriptors for every compound. Failures are dropped from the
    /// records and listed in [`Dataset::skipped`].
    pub fn build(compounds: &[Compound]) -> Self {
        let mut records = Vec::with_capacity(compounds.len());
        let mut skipped = Vec::new();

        for (index, compound) in compounds.iter().enumerate() {
            match compute_compound(compound) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!(index, name = %compound.name, smiles = %compound.smiles, error = %e, "skipping compound");
                    skipped.push(SkippedInput {
                        index,
                        name: compound.name.clone(),
                        smiles: compound.smiles.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Dataset { records, skipped }
    }

    /// The records for which `predicate` holds, in the same order.
    /// Skipped inputs carry over unchanged.
    pub fn filter(&self, predicate: impl Fn(&DescriptorRecord) -> bool) -> Dataset {
        Dataset {
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
            skipped: self.skipped.clone(),
        }
    }

    /// Records passing all four Rule of Five clauses.
    pub fn lipinski_only(&self) -> Dataset {
        self.filter(DescriptorRecord::lipinski_passed)
    }

    /// The first `n` records, for `1 <= n <= len`.
    pub fn preview(&self, n: usize) -> Result<&[DescriptorRecord]> {
        if n == 0 || n > self.records.len() {
            return Err(DruglikeError::InvalidInput(format!(
                "preview size {n} outside 1..={}",
                self.records.len()
            )));
        }
        Ok(&self.records[..n])
    }

    /// Preview size clamped into the valid range; zero only when the dataset is empty.
    pub fn clamp_preview(&self, n: usize) -> usize {
        n.clamp(1.min(self.records.len()), self.records.len())
    }

    pub fn records(&self) -> &[DescriptorRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedInput] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DescriptorRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DescriptorRecord;
    type IntoIter = std::slice::Iter<'a, DescriptorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Summarizable for Dataset {
    fn summary(&self) -> String {
        let passed = self.records.iter().filter(|r| r.lipinski_passed()).count();
        format!(
            "{} compounds, {} pass Lipinski, {} skipped",
            self.records.len(),
            passed,
            self.skipped.len()
        )
    }
}
