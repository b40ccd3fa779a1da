//! Input/output for the druglike explorer.
//!
//! - **CSV** — compound tables in, descriptor tables out
//! - **Lookup** — the `LookupClient` trait and an in-memory implementation
//! - **ChEMBL** — URL builders and response parsers, plus a blocking HTTP
//!   client via the `http` feature (enabled by default)

pub mod chembl;
pub mod csv;
pub mod lookup;

pub use chembl::{ChemblConfig, ChemblUrl};
#[cfg(feature = "http")]
pub use chembl::HttpChemblClient;
pub use lookup::{Activity, ActivityType, LookupClient, LookupHit, MemoryLookup};
