//! Session state and the pass that recomputes everything from it.
//!
//! A pass is one full recomputation: lookup, optional add, base compounds,
//! dataset, filter, preview, views. The session goes in by value and comes
//! back out, so nothing is shared between passes except what it carries.

use std::path::PathBuf;

use druglike_chem::{default_compounds, parse_smiles_named, Compound, Molecule};
use druglike_core::{DruglikeError, Result, Summarizable};
use druglike_io::csv::{read_compounds, read_compounds_path};
use druglike_io::{Activity, LookupClient, LookupHit};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ExplorerConfig, UploadPolicy};
use crate::dataset::Dataset;
use crate::views::Views;

pub const DEFAULTS_NOTICE: &str = "Using default sample data (Aspirin, Caffeine, Ibuprofen)";
pub const NOT_FOUND_NOTICE: &str = "No compound found.";
pub const NO_ACTIVITY_NOTICE: &str = "No activity data found.";
pub const ADDED_NOTICE: &str = "Added to dataset!";
pub const NOTHING_TO_ADD_NOTICE: &str = "Nothing to add: look up a compound first.";

/// State carried from one pass to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    added: Vec<Compound>,
    last_hit: Option<LookupHit>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compounds added from lookups, in the order they were added.
    pub fn added(&self) -> &[Compound] {
        &self.added
    }

    /// The most recent successful lookup.
    pub fn last_hit(&self) -> Option<&LookupHit> {
        self.last_hit.as_ref()
    }
}

/// A compound table supplied for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upload {
    Path(PathBuf),
    /// CSV text already in memory.
    Csv(String),
}

impl Upload {
    fn read(&self) -> Result<Vec<Compound>> {
        match self {
            Upload::Path(path) => read_compounds_path(path),
            Upload::Csv(text) => read_compounds(text.as_bytes()),
        }
    }
}

/// What the user asked for in this pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassRequest {
    pub upload: Option<Upload>,
    /// Compound name to look up.
    pub lookup: Option<String>,
    /// Append the looked-up compound to the session.
    pub add: bool,
    pub lipinski_only: bool,
    /// Molecules to depict; the configured default when `None`.
    pub preview: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Warning, message: message.into() }
    }
}

/// The result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupView {
    pub hit: LookupHit,
    /// `None` when the returned SMILES does not parse.
    pub molecule: Option<Molecule>,
    /// The first `activity_display` activities.
    pub activities: Vec<Activity>,
    /// Activities returned before truncation.
    pub activity_total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassOutput {
    pub notices: Vec<Notice>,
    pub lookup: Option<LookupView>,
    /// The displayed dataset, after any Lipinski filter.
    pub dataset: Dataset,
    /// Molecules depicted in the grid.
    pub preview: usize,
    pub views: Views,
}

/// Run one pass.
///
/// The returned session is the input session when the pass fails.
pub fn run_pass(
    session: Session,
    request: &PassRequest,
    client: &dyn LookupClient,
    config: &ExplorerConfig,
) -> (Session, Result<PassOutput>) {
    let mut next = session.clone();
    match pass(&mut next, request, client, config) {
        Ok(output) => (next, Ok(output)),
        Err(e) => (session, Err(e)),
    }
}

fn pass(
    session: &mut Session,
    request: &PassRequest,
    client: &dyn LookupClient,
    config: &ExplorerConfig,
) -> Result<PassOutput> {
    let mut notices = Vec::new();

    let base = base_compounds(request.upload.as_ref(), config.upload.policy, &mut notices)?;

    let name = request.lookup.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let lookup = match name {
        Some(name) => lookup(name, client, config, &mut notices),
        None => None,
    };
    if let Some(view) = &lookup {
        session.last_hit = Some(view.hit.clone());
    }

    if request.add {
        // With a name in this pass, only its own hit may be added.
        let target = match name {
            Some(_) => lookup.as_ref().map(|view| view.hit.clone()),
            None => session.last_hit.clone(),
        };
        match target {
            Some(hit) => {
                info!(chembl_id = %hit.chembl_id, "added compound to session");
                session.added.push(Compound::new(hit.chembl_id, hit.smiles));
                notices.push(Notice::success(ADDED_NOTICE));
            }
            None => notices.push(Notice::warning(NOTHING_TO_ADD_NOTICE)),
        }
    }

    let compounds: Vec<Compound> = base.into_iter().chain(session.added.iter().cloned()).collect();
    let mut dataset = Dataset::build(&compounds);
    if request.lipinski_only {
        dataset = dataset.lipinski_only();
    }

    let preview = dataset.clamp_preview(request.preview.unwrap_or(config.view.default_preview));
    let views = Views::build(&dataset, preview, &config.view);
    debug!(summary = %dataset.summary(), preview, "pass complete");

    Ok(PassOutput { notices, lookup, dataset, preview, views })
}

fn base_compounds(
    upload: Option<&Upload>,
    policy: UploadPolicy,
    notices: &mut Vec<Notice>,
) -> Result<Vec<Compound>> {
    let Some(upload) = upload else {
        notices.push(Notice::info(DEFAULTS_NOTICE));
        return Ok(default_compounds());
    };
    match upload.read() {
        Ok(compounds) => Ok(compounds),
        Err(e @ (DruglikeError::MissingColumns(_) | DruglikeError::Parse(_)))
            if policy == UploadPolicy::FallBackToDefaults =>
        {
            warn!(error = %e, "malformed upload, using default compounds");
            notices.push(Notice::warning(format!("Upload ignored ({e}).")));
            notices.push(Notice::info(DEFAULTS_NOTICE));
            Ok(default_compounds())
        }
        Err(e) => Err(e),
    }
}

fn lookup(
    name: &str,
    client: &dyn LookupClient,
    config: &ExplorerConfig,
    notices: &mut Vec<Notice>,
) -> Option<LookupView> {
    let hit = match client.search(name) {
        Ok(Some(hit)) => hit,
        Ok(None) => {
            notices.push(Notice::warning(NOT_FOUND_NOTICE));
            return None;
        }
        Err(e) => {
            warn!(name, error = %e, "compound search failed");
            notices.push(Notice::warning(NOT_FOUND_NOTICE));
            return None;
        }
    };
    notices.push(Notice::success(format!("Found: {}", hit.chembl_id)));

    let mut activities = client.fetch_activities(&hit.chembl_id).unwrap_or_else(|e| {
        warn!(chembl_id = %hit.chembl_id, error = %e, "activity fetch failed");
        Vec::new()
    });
    let activity_total = activities.len();
    if activities.is_empty() {
        notices.push(Notice::info(NO_ACTIVITY_NOTICE));
    }
    activities.truncate(config.chembl.activity_display);

    let molecule = parse_smiles_named(&hit.smiles, &hit.chembl_id).ok();
    Some(LookupView { hit, molecule, activities, activity_total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use druglike_io::{ActivityType, MemoryLookup};

    const ASPIRIN: &str = "CC(=O)OC1=CC=CC=C1C(=O)O";

    fn aspirin_client() -> MemoryLookup {
        let hit = LookupHit { chembl_id: "CHEMBL25".into(), smiles: "CC(=O)Oc1ccccc1C(=O)O".into() };
        let activities = (0..12)
            .map(|i| Activity {
                target: format!("Target {i}"),
                activity_type: ActivityType::IC50,
                value: format!("{}.0 nM", 100 * (i + 1)),
            })
            .collect();
        MemoryLookup::new()
            .with_compound("aspirin", hit)
            .with_activities("CHEMBL25", activities)
    }

    fn messages(output: &PassOutput) -> Vec<&str> {
        output.notices.iter().map(|n| n.message.as_str()).collect()
    }

    #[test]
    fn empty_request_uses_defaults() {
        let (session, output) =
            run_pass(Session::new(), &PassRequest::default(), &MemoryLookup::new(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert_eq!(session, Session::new());
        assert_eq!(messages(&output), [DEFAULTS_NOTICE]);
        assert_eq!(output.dataset.len(), 4);
        assert_eq!(output.preview, 4);
        assert!(output.lookup.is_none());
    }

    #[test]
    fn lookup_truncates_activities() {
        let request = PassRequest { lookup: Some("Aspirin".into()), ..Default::default() };
        let (session, output) =
            run_pass(Session::new(), &request, &aspirin_client(), &ExplorerConfig::default());
        let output = output.unwrap();
        let view = output.lookup.unwrap();
        assert_eq!(view.activities.len(), 10);
        assert_eq!(view.activity_total, 12);
        assert!(view.molecule.is_some());
        assert!(output.notices.contains(&Notice::success("Found: CHEMBL25")));
        assert_eq!(session.last_hit().map(|h| h.chembl_id.as_str()), Some("CHEMBL25"));
        assert!(session.added().is_empty());
    }

    #[test]
    fn hit_without_activities_says_so() {
        let client = MemoryLookup::new().with_compound(
            "ethanol",
            LookupHit { chembl_id: "CHEMBL545".into(), smiles: "CCO".into() },
        );
        let request = PassRequest { lookup: Some("ethanol".into()), ..Default::default() };
        let (_, output) = run_pass(Session::new(), &request, &client, &ExplorerConfig::default());
        assert!(messages(&output.unwrap()).contains(&NO_ACTIVITY_NOTICE));
    }

    #[test]
    fn unknown_name_warns_without_mutation() {
        let request = PassRequest { lookup: Some("unobtainium".into()), add: true, ..Default::default() };
        let (session, output) =
            run_pass(Session::new(), &request, &aspirin_client(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert!(output.notices.contains(&Notice::warning(NOT_FOUND_NOTICE)));
        assert!(output.notices.contains(&Notice::warning(NOTHING_TO_ADD_NOTICE)));
        assert!(session.added().is_empty());
        assert_eq!(output.dataset.len(), 4);
    }

    #[test]
    fn failed_lookup_does_not_add_a_stale_hit() {
        let config = ExplorerConfig::default();
        let client = aspirin_client();
        let found = PassRequest { lookup: Some("aspirin".into()), ..Default::default() };
        let (session, _) = run_pass(Session::new(), &found, &client, &config);

        let missing = PassRequest { lookup: Some("unobtainium".into()), add: true, ..Default::default() };
        let (session, output) = run_pass(session, &missing, &client, &config);
        assert!(session.added().is_empty());
        assert!(output.unwrap().notices.contains(&Notice::warning(NOTHING_TO_ADD_NOTICE)));
    }

    #[test]
    fn blank_lookup_is_ignored() {
        let request = PassRequest { lookup: Some("   ".into()), ..Default::default() };
        let (_, output) = run_pass(Session::new(), &request, &aspirin_client(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert!(output.lookup.is_none());
        assert_eq!(messages(&output), [DEFAULTS_NOTICE]);
    }

    #[test]
    fn add_appends_last() {
        let request = PassRequest { lookup: Some("aspirin".into()), add: true, ..Default::default() };
        let (session, output) =
            run_pass(Session::new(), &request, &aspirin_client(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert_eq!(session.added(), [Compound::new("CHEMBL25", "CC(=O)Oc1ccccc1C(=O)O")]);
        assert_eq!(output.dataset.len(), 5);
        assert_eq!(output.dataset.records()[4].name, "CHEMBL25");
        assert!(output.notices.contains(&Notice::success(ADDED_NOTICE)));
    }

    #[test]
    fn add_uses_the_last_hit_from_an_earlier_pass() {
        let config = ExplorerConfig::default();
        let client = aspirin_client();
        let looked_up = PassRequest { lookup: Some("aspirin".into()), ..Default::default() };
        let (session, _) = run_pass(Session::new(), &looked_up, &client, &config);

        let add = PassRequest { add: true, ..Default::default() };
        let (session, output) = run_pass(session, &add, &client, &config);
        assert_eq!(session.added().len(), 1);
        assert_eq!(output.unwrap().dataset.len(), 5);
    }

    #[test]
    fn upload_replaces_defaults() {
        let csv = format!("Name,SMILES\nAspirin,{ASPIRIN}\nEthanol,CCO\n");
        let request = PassRequest { upload: Some(Upload::Csv(csv)), ..Default::default() };
        let (_, output) = run_pass(Session::new(), &request, &MemoryLookup::new(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert!(output.notices.is_empty());
        assert_eq!(output.dataset.len(), 2);
        assert_eq!(output.preview, 2, "preview clamps to the dataset");
    }

    #[test]
    fn filter_and_preview_apply() {
        let request = PassRequest { lipinski_only: true, preview: Some(1), ..Default::default() };
        let (_, output) = run_pass(Session::new(), &request, &MemoryLookup::new(), &ExplorerConfig::default());
        let output = output.unwrap();
        assert_eq!(output.dataset.len(), 3);
        assert_eq!(output.preview, 1);
        assert_eq!(output.views.grid.cells.len(), 1);
        assert_eq!(output.views.table.len(), 3);
    }
}
