//! Compound lookup: the client trait and the records it returns.

use std::collections::HashMap;
use std::fmt;

use druglike_core::Result;
use serde::{Deserialize, Serialize};

/// A compound resolved from a name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupHit {
    pub chembl_id: String,
    pub smiles: String,
}

/// Measured activity types kept from bioactivity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    IC50,
    EC50,
    Ki,
}

impl ActivityType {
    /// Parse a ChEMBL `standard_type`; other types are not kept.
    pub fn from_standard_type(s: &str) -> Option<Self> {
        match s {
            "IC50" => Some(ActivityType::IC50),
            "EC50" => Some(ActivityType::EC50),
            "Ki" => Some(ActivityType::Ki),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::IC50 => "IC50",
            ActivityType::EC50 => "EC50",
            ActivityType::Ki => "Ki",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bioactivity measurement against a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Target preferred name, or its ChEMBL id when unnamed.
    pub target: String,
    pub activity_type: ActivityType,
    /// Value and units, e.g. `"1200.0 nM"`.
    pub value: String,
}

/// Resolves compound names and fetches their bioactivity.
///
/// `Ok(None)` and an empty activity list mean "nothing found"; `Err` is
/// reserved for transport and decoding failures.
pub trait LookupClient {
    /// First hit for a compound name.
    fn search(&self, name: &str) -> Result<Option<LookupHit>>;

    /// Bioactivity records for a ChEMBL molecule id.
    fn fetch_activities(&self, chembl_id: &str) -> Result<Vec<Activity>>;
}

/// In-memory lookup table, for offline use and tests.
///
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MemoryLookup {
    hits: HashMap<String, LookupHit>,
    activities: HashMap<String, Vec<Activity>>,
}

impl MemoryLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compound(mut self, name: &str, hit: LookupHit) -> Self {
        self.hits.insert(name.to_lowercase(), hit);
        self
    }

    pub fn with_activities(mut self, chembl_id: &str, activities: Vec<Activity>) -> Self {
        self.activities.insert(chembl_id.to_string(), activities);
        self
    }
}

impl LookupClient for MemoryLookup {
    fn search(&self, name: &str) -> Result<Option<LookupHit>> {
        Ok(self.hits.get(&name.trim().to_lowercase()).cloned())
    }

    fn fetch_activities(&self, chembl_id: &str) -> Result<Vec<Activity>> {
        Ok(self.activities.get(chembl_id).cloned().unwrap_or_default())
    }
}
