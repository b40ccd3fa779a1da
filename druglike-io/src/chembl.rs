//! ChEMBL REST API: URL builders, response parsers, and a blocking client.
//!
//! Endpoint: https://www.ebi.ac.uk/chembl/api/data
//!
//! The URL builders and parsers are pure; the HTTP client lives behind the
//! `http` feature.

use druglike_core::{DruglikeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lookup::{Activity, ActivityType, LookupHit};

/// Default ChEMBL API root.
pub const CHEMBL_API_URL: &str = "https://www.ebi.ac.uk/chembl/api/data";

/// Connection and paging settings for ChEMBL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemblConfig {
    pub base_url: String,
    /// Hits requested per name search; only the first is used.
    pub search_limit: usize,
    /// Activity records requested per molecule.
    pub activity_limit: usize,
    /// Activity rows shown to the user.
    pub activity_display: usize,
    pub timeout_secs: u64,
}

impl Default for ChemblConfig {
    fn default() -> Self {
        Self {
            base_url: CHEMBL_API_URL.to_string(),
            search_limit: 1,
            activity_limit: 1000,
            activity_display: 10,
            timeout_secs: 30,
        }
    }
}

/// Percent-encode a query string value (everything but RFC 3986 unreserved characters).
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// URL builder for the ChEMBL data API.
#[derive(Debug, Clone)]
pub struct ChemblUrl {
    base: String,
}

impl Default for ChemblUrl {
    fn default() -> Self {
        Self::new(CHEMBL_API_URL)
    }
}

impl ChemblUrl {
    pub fn new(base: &str) -> Self {
        Self { base: base.trim_end_matches('/').to_string() }
    }

    /// Build a molecule name-search URL.
    ///
    /// ```
    /// use druglike_io::chembl::ChemblUrl;
    /// let url = ChemblUrl::default().molecule_search("aspirin", 1);
    /// assert_eq!(url, "https://www.ebi.ac.uk/chembl/api/data/molecule/search.json?q=aspirin&limit=1");
    /// ```
    pub fn molecule_search(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/molecule/search.json?q={}&limit={}",
            self.base,
            percent_encode(query),
            limit,
        )
    }

    /// Build an activity listing URL for one molecule.
    pub fn activities(&self, chembl_id: &str, limit: usize) -> String {
        format!(
            "{}/activity.json?molecule_chembl_id={}&limit={}",
            self.base,
            percent_encode(chembl_id),
            limit,
        )
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    molecules: Vec<MoleculeEntry>,
}

#[derive(Deserialize)]
struct MoleculeEntry {
    molecule_chembl_id: Option<String>,
    molecule_structures: Option<MoleculeStructures>,
}

#[derive(Deserialize)]
struct MoleculeStructures {
    canonical_smiles: Option<String>,
}

#[derive(Deserialize)]
struct ActivityResponse {
    #[serde(default)]
    activities: Vec<ActivityEntry>,
}

#[derive(Deserialize)]
struct ActivityEntry {
    standard_type: Option<String>,
    #[serde(default)]
    standard_value: Value,
    standard_units: Option<String>,
    target_chembl_id: Option<String>,
    target: Option<TargetEntry>,
    target_pref_name: Option<String>,
}

#[derive(Deserialize)]
struct TargetEntry {
    pref_name: Option<String>,
}

fn decode<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| DruglikeError::Parse(format!("ChEMBL {what} response: {e}")))
}

/// Parse a molecule search response, returning the first hit with a SMILES.
///
/// A first molecule without a structure or id counts as no hit.
pub fn parse_search_response(json: &str) -> Result<Option<LookupHit>> {
    let response: SearchResponse = decode(json, "search")?;
    let Some(first) = response.molecules.into_iter().next() else {
        return Ok(None);
    };
    let smiles = first
        .molecule_structures
        .and_then(|s| s.canonical_smiles)
        .filter(|s| !s.is_empty());
    Ok(match (first.molecule_chembl_id, smiles) {
        (Some(chembl_id), Some(smiles)) => Some(LookupHit { chembl_id, smiles }),
        _ => None,
    })
}

/// Render `standard_value`, which ChEMBL sends as a string; zero and empty values count as absent.
fn standard_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse an activity listing, keeping IC50/EC50/Ki rows that carry a value and units.
pub fn parse_activities_response(json: &str) -> Result<Vec<Activity>> {
    let response: ActivityResponse = decode(json, "activity")?;
    let activities = response
        .activities
        .into_iter()
        .filter_map(|a| {
            let activity_type = ActivityType::from_standard_type(a.standard_type.as_deref()?)?;
            let value = standard_value(&a.standard_value)?;
            let units = a.standard_units.filter(|u| !u.is_empty())?;
            let target = a
                .target
                .and_then(|t| t.pref_name)
                .or(a.target_pref_name)
                .filter(|t| !t.is_empty())
                .or(a.target_chembl_id)
                .unwrap_or_default();
            Some(Activity { target, activity_type, value: format!("{value} {units}") })
        })
        .collect();
    Ok(activities)
}

#[cfg(feature = "http")]
pub use client::HttpChemblClient;

#[cfg(feature = "http")]
mod client {
    use std::time::Duration;

    use druglike_core::{DruglikeError, Result};
    use reqwest::blocking::Client;
    use tracing::{debug, instrument};

    use super::{parse_activities_response, parse_search_response, ChemblConfig, ChemblUrl};
    use crate::lookup::{Activity, LookupClient, LookupHit};

    /// Blocking ChEMBL client. No caching and no retries.
    pub struct HttpChemblClient {
        client: Client,
        urls: ChemblUrl,
        search_limit: usize,
        activity_limit: usize,
    }

    impl HttpChemblClient {
        pub fn new(config: &ChemblConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .user_agent(concat!("druglike/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| DruglikeError::Lookup(format!("building HTTP client: {e}")))?;
            Ok(Self {
                client,
                urls: ChemblUrl::new(&config.base_url),
                search_limit: config.search_limit.max(1),
                activity_limit: config.activity_limit,
            })
        }

        /// GET a URL; a non-success status yields `None`.
        fn get_text(&self, url: &str) -> Result<Option<String>> {
            let resp = self
                .client
                .get(url)
                .send()
                .map_err(|e| DruglikeError::Lookup(format!("GET {url}: {e}")))?;
            let status = resp.status();
            if !status.is_success() {
                debug!(%status, url, "ChEMBL returned non-success status");
                return Ok(None);
            }
            let body = resp
                .text()
                .map_err(|e| DruglikeError::Lookup(format!("reading {url}: {e}")))?;
            Ok(Some(body))
        }
    }

    impl LookupClient for HttpChemblClient {
        #[instrument(skip(self))]
        fn search(&self, name: &str) -> Result<Option<LookupHit>> {
            let url = self.urls.molecule_search(name, self.search_limit);
            debug!(url = %url, "Searching ChEMBL molecules");
            match self.get_text(&url)? {
                Some(body) => parse_search_response(&body),
                None => Ok(None),
            }
        }

        #[instrument(skip(self))]
        fn fetch_activities(&self, chembl_id: &str) -> Result<Vec<Activity>> {
            let url = self.urls.activities(chembl_id, self.activity_limit);
            debug!(url = %url, "Fetching ChEMBL activities");
            match self.get_text(&url)? {
                Some(body) => parse_activities_response(&body),
                None => Ok(Vec::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_query() {
        let url = ChemblUrl::default().molecule_search("acetylsalicylic acid", 1);
        assert_eq!(
            url,
            "https://www.ebi.ac.uk/chembl/api/data/molecule/search.json?q=acetylsalicylic%20acid&limit=1"
        );
        let url = ChemblUrl::new("http://localhost:8080/").molecule_search("a&b=c", 5);
        assert_eq!(url, "http://localhost:8080/molecule/search.json?q=a%26b%3Dc&limit=5");
    }

    #[test]
    fn activities_url() {
        let url = ChemblUrl::default().activities("CHEMBL25", 1000);
        assert_eq!(
            url,
            "https://www.ebi.ac.uk/chembl/api/data/activity.json?molecule_chembl_id=CHEMBL25&limit=1000"
        );
    }

    #[test]
    fn parse_search_first_hit() {
        let json = r#"{
            "molecules": [
                {"molecule_chembl_id": "CHEMBL25",
                 "molecule_structures": {"canonical_smiles": "CC(=O)Oc1ccccc1C(=O)O"}},
                {"molecule_chembl_id": "CHEMBL2", "molecule_structures": null}
            ],
            "page_meta": {"limit": 1}
        }"#;
        let hit = parse_search_response(json).unwrap().unwrap();
        assert_eq!(hit.chembl_id, "CHEMBL25");
        assert_eq!(hit.smiles, "CC(=O)Oc1ccccc1C(=O)O");
    }

    #[test]
    fn parse_search_without_structure_is_no_hit() {
        let json = r#"{"molecules": [{"molecule_chembl_id": "CHEMBL1", "molecule_structures": null}]}"#;
        assert_eq!(parse_search_response(json).unwrap(), None);
        assert_eq!(parse_search_response(r#"{"molecules": []}"#).unwrap(), None);
    }

    #[test]
    fn parse_search_rejects_garbage() {
        assert!(matches!(parse_search_response("<html>"), Err(DruglikeError::Parse(_))));
    }

    #[test]
    fn parse_activities_filters_and_formats() {
        let json = r#"{"activities": [
            {"standard_type": "IC50", "standard_value": "1200.0", "standard_units": "nM",
             "target_chembl_id": "CHEMBL204", "target_pref_name": "Thrombin"},
            {"standard_type": "Ki", "standard_value": "3.5", "standard_units": "nM",
             "target_chembl_id": "CHEMBL220", "target_pref_name": null},
            {"standard_type": "Kd", "standard_value": "10", "standard_units": "nM",
             "target_chembl_id": "CHEMBL1"},
            {"standard_type": "EC50", "standard_value": null, "standard_units": "nM",
             "target_chembl_id": "CHEMBL2"},
            {"standard_type": "EC50", "standard_value": "7", "standard_units": null,
             "target_chembl_id": "CHEMBL3"},
            {"standard_type": "EC50", "standard_value": 42, "standard_units": "uM",
             "target": {"pref_name": "Cyclooxygenase-1"}, "target_chembl_id": "CHEMBL221"}
        ]}"#;
        let acts = parse_activities_response(json).unwrap();
        assert_eq!(acts.len(), 3);
        assert_eq!(acts[0].target, "Thrombin");
        assert_eq!(acts[0].activity_type, ActivityType::IC50);
        assert_eq!(acts[0].value, "1200.0 nM");
        assert_eq!(acts[1].target, "CHEMBL220");
        assert_eq!(acts[2].target, "Cyclooxygenase-1");
        assert_eq!(acts[2].value, "42 uM");
    }

    #[test]
    fn parse_activities_empty() {
        assert!(parse_activities_response(r#"{"activities": []}"#).unwrap().is_empty());
        assert!(parse_activities_response(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn config_defaults() {
        let c = ChemblConfig::default();
        assert_eq!(c.base_url, CHEMBL_API_URL);
        assert_eq!((c.search_limit, c.activity_limit, c.activity_display), (1, 1000, 10));
    }
}
