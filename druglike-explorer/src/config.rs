//! Explorer configuration.
//! Read from a TOML file given with `--config`; every section is optional.

use std::path::Path;

use druglike_core::{DruglikeError, Result};
use druglike_io::ChemblConfig;
use serde::{Deserialize, Serialize};

/// Environment variable that replaces `chembl.base_url`.
pub const CHEMBL_URL_ENV: &str = "DRUGLIKE_CHEMBL_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub chembl: ChemblConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

/// What a pass does with an upload that lacks `Name` or `SMILES`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPolicy {
    /// Fail the pass with the missing columns and leave the session as it was.
    #[default]
    Fail,
    /// Use the default compounds and warn.
    FallBackToDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default)]
    pub policy: UploadPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_mols_per_row")]
    pub mols_per_row: usize,
    /// Edge length in pixels of one grid cell.
    #[serde(default = "default_sub_image_size")]
    pub sub_image_size: u32,
    #[serde(default = "default_preview")]
    pub default_preview: usize,
    #[serde(default)]
    pub lipinski_only: bool,
}

fn default_mols_per_row() -> usize { 4 }
fn default_sub_image_size() -> u32 { 200 }
fn default_preview() -> usize { 4 }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mols_per_row: default_mols_per_row(),
            sub_image_size: default_sub_image_size(),
            default_preview: default_preview(),
            lipinski_only: false,
        }
    }
}

impl ExplorerConfig {
    /// Load from a TOML file, then apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DruglikeError::Config(format!("{}: {}", path.display(), e)))?;
        let mut config = Self::from_toml_str(&text)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from the given file, or use defaults when there is none.
    /// Environment overrides apply either way.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let mut config = Self::default();
                config.apply_env_overrides(|key| std::env::var(key).ok());
                Ok(config)
            }
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| DruglikeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable source (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(CHEMBL_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.chembl.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.view.mols_per_row == 0 {
            return Err(DruglikeError::Config("view.mols_per_row must be at least 1".into()));
        }
        if self.view.default_preview == 0 {
            return Err(DruglikeError::Config("view.default_preview must be at least 1".into()));
        }
        if self.chembl.activity_display == 0 {
            return Err(DruglikeError::Config("chembl.activity_display must be at least 1".into()));
        }
        Ok(())
    }
}
