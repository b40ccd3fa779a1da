//! Line-oriented interactive session: each command updates the request and
//! runs one pass.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use druglike_core::{DruglikeError, Result};
use druglike_io::csv::{write_dataset_path, DOWNLOAD_FILE_NAME};
use druglike_io::LookupClient;
use tracing::info;

use crate::config::ExplorerConfig;
use crate::render;
use crate::session::{run_pass, PassOutput, PassRequest, Session, Upload};

pub const HELP: &str = "\
commands:
  lookup <name>     look up a compound by name (no name clears the lookup)
  add               add the looked-up compound to the dataset
  upload <path>     use compounds from a CSV file with Name and SMILES columns
  defaults          go back to the default compounds
  filter on|off     show only compounds passing Lipinski's Rule of Five
  preview <n>       number of molecules to depict
  show              recompute and show everything
  download [path]   write the displayed dataset as CSV
  help              this text
  quit              leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Lookup(Option<String>),
    Add,
    Upload(PathBuf),
    Defaults,
    Filter(bool),
    Preview(usize),
    Show,
    Download(Option<PathBuf>),
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = DruglikeError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let invalid = |msg: String| Err(DruglikeError::InvalidInput(msg));

        match word.to_ascii_lowercase().as_str() {
            "lookup" => Ok(ShellCommand::Lookup((!rest.is_empty()).then(|| rest.to_string()))),
            "add" => Ok(ShellCommand::Add),
            "upload" if rest.is_empty() => invalid("upload needs a file path".into()),
            "upload" => Ok(ShellCommand::Upload(PathBuf::from(rest))),
            "defaults" => Ok(ShellCommand::Defaults),
            "filter" => match rest.to_ascii_lowercase().as_str() {
                "on" => Ok(ShellCommand::Filter(true)),
                "off" => Ok(ShellCommand::Filter(false)),
                _ => invalid(format!("filter expects on or off, got '{rest}'")),
            },
            "preview" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(ShellCommand::Preview(n)),
                _ => invalid(format!("preview expects a positive number, got '{rest}'")),
            },
            "show" => Ok(ShellCommand::Show),
            "download" => Ok(ShellCommand::Download((!rest.is_empty()).then(|| PathBuf::from(rest)))),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => invalid(format!("unknown command '{word}', try 'help'")),
        }
    }
}

/// Where a download goes: the default file name, or inside a directory.
pub fn download_path(path: Option<&Path>) -> PathBuf {
    match path {
        None => PathBuf::from(DOWNLOAD_FILE_NAME),
        Some(p) if p.is_dir() => p.join(DOWNLOAD_FILE_NAME),
        Some(p) => p.to_path_buf(),
    }
}

/// Shell state between commands.
pub struct Shell<'a> {
    client: &'a dyn LookupClient,
    config: &'a ExplorerConfig,
    json: bool,
    session: Session,
    request: PassRequest,
    last: Option<PassOutput>,
}

impl<'a> Shell<'a> {
    pub fn new(client: &'a dyn LookupClient, config: &'a ExplorerConfig, json: bool) -> Self {
        let request = PassRequest {
            lipinski_only: config.view.lipinski_only,
            ..PassRequest::default()
        };
        Shell { client, config, json, session: Session::new(), request, last: None }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Output of the last successful pass.
    pub fn last_output(&self) -> Option<&PassOutput> {
        self.last.as_ref()
    }

    /// Run one pass with the current request and print it. A failed pass
    /// restores `fallback` as the request.
    fn pass(&mut self, out: &mut dyn Write, fallback: PassRequest) -> Result<()> {
        let session = std::mem::take(&mut self.session);
        let (session, result) = run_pass(session, &self.request, self.client, self.config);
        self.session = session;
        self.request.add = false;

        match result {
            Ok(output) => {
                if self.json {
                    let text = serde_json::to_string_pretty(&output)
                        .map_err(|e| DruglikeError::Other(e.to_string()))?;
                    writeln!(out, "{text}")?;
                } else {
                    write!(out, "{}", render::pass(&output))?;
                }
                self.last = Some(output);
            }
            Err(e) => {
                writeln!(out, "error: {e}")?;
                self.request = fallback;
            }
        }
        Ok(())
    }

    /// Apply one command. Returns `false` when the session should end.
    pub fn execute(&mut self, command: ShellCommand, out: &mut dyn Write) -> Result<bool> {
        let previous = self.request.clone();
        match command {
            ShellCommand::Quit => return Ok(false),
            ShellCommand::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            ShellCommand::Download(path) => {
                let path = download_path(path.as_deref());
                match &self.last {
                    Some(output) => match write_dataset_path(&path, &output.dataset) {
                        Ok(()) => {
                            info!(path = %path.display(), rows = output.dataset.len(), "dataset written");
                            writeln!(out, "wrote {} rows to {}", output.dataset.len(), path.display())?;
                        }
                        Err(e) => writeln!(out, "error: {e}")?,
                    },
                    None => writeln!(out, "error: nothing to download yet")?,
                }
                return Ok(true);
            }
            ShellCommand::Lookup(name) => self.request.lookup = name,
            ShellCommand::Add => self.request.add = true,
            ShellCommand::Upload(path) => self.request.upload = Some(Upload::Path(path)),
            ShellCommand::Defaults => self.request.upload = None,
            ShellCommand::Filter(on) => self.request.lipinski_only = on,
            ShellCommand::Preview(n) => self.request.preview = Some(n),
            ShellCommand::Show => {}
        }
        self.pass(out, previous)?;
        Ok(true)
    }

    /// Read commands until `quit` or end of input. Bad commands and failed
    /// passes are reported and the session carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let initial = self.request.clone();
        self.pass(out, initial)?;
        write!(out, "> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                match trimmed.parse::<ShellCommand>() {
                    Ok(command) => {
                        if !self.execute(command, out)? {
                            break;
                        }
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }
}
