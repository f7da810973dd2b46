use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::parser::Dialect;

pub const DEFAULT_OUTPUT: &str = "testcases.csv";
const CONFIG_FILE: &str = "tccsv";
const ENV_PREFIX: &str = "TCCSV";

/// Defaults, then an optional `tccsv.toml`, then `TCCSV_*` environment variables.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub dialect: Dialect,
    pub output: PathBuf,
    pub out_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX)),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        builder
            .set_default("dialect", "markdown")?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("out_dir", ".")?
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
