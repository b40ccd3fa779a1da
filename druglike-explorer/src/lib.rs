//! Drug-likeness explorer.
//!
//! Builds a descriptor dataset from uploaded or default compounds, filters it
//! by Lipinski's Rule of Five, looks compounds up in ChEMBL and prepares the
//! views a front end shows. Each user action runs one [`session::run_pass`].
//!
//! ```
//! use druglike_explorer::{run_pass, ExplorerConfig, PassRequest, Session};
//! use druglike_io::MemoryLookup;
//!
//! let request = PassRequest { lipinski_only: true, ..Default::default() };
//! let (_session, output) =
//!     run_pass(Session::new(), &request, &MemoryLookup::new(), &ExplorerConfig::default());
//! let output = output.unwrap();
//! assert!(output.dataset.iter().all(|r| r.lipinski_passed()));
//! ```

pub mod config;
pub mod dataset;
pub mod render;
pub mod session;
pub mod shell;
pub mod views;

pub use config::{ExplorerConfig, UploadConfig, UploadPolicy, ViewConfig};
pub use dataset::{Dataset, SkippedInput};
pub use session::{
    run_pass, LookupView, Notice, NoticeLevel, PassOutput, PassRequest, Session, Upload,
};
pub use shell::{download_path, Shell, ShellCommand};
pub use views::Views;
