//! Configuration: deployment environment, optional TOML file, CLI overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

/// Deployment environment; selects the default data service URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
  #[default]
  Development,
  Production,
}

impl Environment {
  pub fn default_api_url(self) -> &'static str {
    match self {
      Self::Development => "http://localhost:8000",
      Self::Production => "http://api:8000",
    }
  }
}

/// Shape of the optional TOML config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
  #[serde(default)]
  pub api_url:  String,
  pub env:      Option<Environment>,
  pub log_file: Option<PathBuf>,
}

impl ConfigFile {
  /// Read and parse `path`, or return an empty config when there is none.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// Effective settings after layering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub api_url:  String,
  pub env:      Environment,
  pub log_file: Option<PathBuf>,
}

impl Settings {
  /// CLI flags override the config file, which overrides the environment's
  /// defaults.
  pub fn resolve(
    url: Option<String>,
    env: Option<Environment>,
    log_file: Option<PathBuf>,
    file: ConfigFile,
  ) -> Self {
    let env = env.or(file.env).unwrap_or_default();
    let api_url = url
      .filter(|u| !u.is_empty())
      .or_else(|| (!file.api_url.is_empty()).then(|| file.api_url.clone()))
      .unwrap_or_else(|| env.default_api_url().to_string());
    Self {
      api_url,
      env,
      log_file: log_file.or(file.log_file),
    }
  }
}
