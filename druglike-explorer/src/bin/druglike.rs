use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use druglike_core::Summarizable;
use druglike_explorer::{
    download_path, render, run_pass, ExplorerConfig, PassRequest, Session, Shell, Upload,
};
use druglike_io::csv::write_dataset_path;
use druglike_io::{LookupClient, MemoryLookup};

#[derive(Parser)]
#[command(name = "druglike")]
#[command(about = "Drug-likeness explorer: descriptors, Lipinski filtering and ChEMBL lookup", long_about = None)]
struct Cli {
    /// Config TOML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print pass output as JSON
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    json: bool,

    /// Skip ChEMBL; lookups find nothing
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one pass and exit
    Run {
        /// CSV file with Name and SMILES columns (default compounds otherwise)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Compound name to look up in ChEMBL
        #[arg(short, long)]
        lookup: Option<String>,

        /// Add the looked-up compound to the dataset
        #[arg(long, action = ArgAction::SetTrue, requires = "lookup")]
        add: bool,

        /// Keep only compounds passing the Rule of Five
        #[arg(long, action = ArgAction::SetTrue)]
        lipinski_only: bool,

        /// Molecules to depict
        #[arg(short, long)]
        preview: Option<usize>,

        /// Write the displayed dataset as CSV (file or directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Interactive session, one pass per command
    Shell,
}

fn lookup_client(config: &ExplorerConfig, offline: bool) -> Result<Box<dyn LookupClient>> {
    if offline {
        return Ok(Box::new(MemoryLookup::new()));
    }
    #[cfg(feature = "http")]
    {
        let client = druglike_io::HttpChemblClient::new(&config.chembl)
            .context("failed to build ChEMBL client")?;
        Ok(Box::new(client))
    }
    #[cfg(not(feature = "http"))]
    {
        let _ = config;
        tracing::warn!("built without the http feature, lookups are offline");
        Ok(Box::new(MemoryLookup::new()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("druglike=info,warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ExplorerConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let client = lookup_client(&config, cli.offline)?;

    match cli.command {
        Command::Run { input, lookup, add, lipinski_only, preview, output } => {
            let request = PassRequest {
                upload: input.map(Upload::Path),
                lookup,
                add,
                lipinski_only: lipinski_only || config.view.lipinski_only,
                preview,
            };
            let (_session, result) = run_pass(Session::new(), &request, client.as_ref(), &config);
            let pass = result.context("pass failed")?;
            info!(summary = %pass.dataset.summary(), "pass finished");

            let mut stdout = io::stdout().lock();
            if cli.json {
                serde_json::to_writer_pretty(&mut stdout, &pass)?;
                writeln!(stdout)?;
            } else {
                write!(stdout, "{}", render::pass(&pass))?;
            }

            if let Some(output) = output {
                let path = download_path(Some(&output));
                write_dataset_path(&path, &pass.dataset)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), rows = pass.dataset.len(), "dataset written");
            }
        }
        Command::Shell => {
            let stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            Shell::new(client.as_ref(), &config, cli.json).run(stdin, &mut stdout)?;
        }
    }

    Ok(())
}
