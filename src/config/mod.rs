use crate::utils::error::Result;
use clap::Parser;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "bikeshare-explorer")]
#[command(about = "Interactive explorer for bikeshare trip data")]
pub struct CliConfig {
    /// Directory holding the built-in city CSV files.
    #[arg(long, default_value = "./data")]
    pub data_dir: PathBuf,

    /// Optional TOML file overriding the city -> CSV mapping.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Run a single non-interactive session for this city.
    #[arg(long)]
    pub city: Option<String>,

    #[arg(long, default_value = "all")]
    pub month: String,

    #[arg(long, default_value = "all")]
    pub day: String,

    /// Emit reports as JSON (non-interactive mode only).
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn data_catalog(&self) -> Result<DataCatalog> {
        match &self.catalog {
            Some(path) => DataCatalog::from_toml_file(path),
            None => Ok(DataCatalog::builtin(&self.data_dir)),
        }
    }
}

/// Injected city -> CSV file mapping.
///
/// A value, not a module-global, so tests can point cities at fixture files.
#[derive(Debug, Clone, Deserialize)]
pub struct DataCatalog {
    cities: BTreeMap<String, PathBuf>,
}

impl DataCatalog {
    /// The three-city layout the public datasets ship with, rooted at
    /// `data_dir`.
    pub fn builtin(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self::from_entries([
            ("chicago", dir.join("chicago.csv")),
            ("new york city", dir.join("new_york_city.csv")),
            ("washington", dir.join("washington.csv")),
        ])
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PathBuf)>,
        S: Into<String>,
    {
        Self {
            cities: entries
                .into_iter()
                .map(|(city, path)| (city.into(), path))
                .collect(),
        }
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let catalog: DataCatalog = toml::from_str(&raw)?;
        Ok(catalog)
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    pub fn path_for(&self, city: &str) -> Option<&Path> {
        self.cities.get(city).map(PathBuf::as_path)
    }

    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.cities.keys().map(String::as_str)
    }
}
