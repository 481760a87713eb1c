use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub metadata: MetadataDefaults,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let cfg: Config = toml::from_str(&raw).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub input_dir: String,
    pub output_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            input_dir: ".".into(),
            output_dir: "output".into(),
        }
    }
}

/// Placeholder values stamped on every record before any enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataDefaults {
    pub author: String,
    pub date: String,
    /// Use the input file's modification date instead of `date`.
    pub date_from_mtime: bool,
}
impl Default for MetadataDefaults {
    fn default() -> Self {
        Self {
            author: "Unknown".into(),
            date: "2023-10-01".into(),
            date_from_mtime: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    /// Appended to the input stem: `<stem><suffix>.json`.
    pub suffix: String,
    pub indent: usize,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            suffix: "_normalized".into(),
            indent: 4,
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
