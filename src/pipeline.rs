use crate::{
    config::Config,
    error::{Error, Result},
    extract::{Extracted, Extractor, NativeExtractor},
    format::FileType,
    record::{normalize, Metadata, Record},
    util::{ensure_dir, file_date, file_name, file_stem, write_file},
};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct Pipeline<E: Extractor> {
    cfg: Config,
    extractor: E,
}

impl Pipeline<NativeExtractor> {
    pub fn native(cfg: &Config) -> Self {
        Self::new(cfg, NativeExtractor)
    }
}

impl<E: Extractor> Pipeline<E> {
    pub fn new(cfg: &Config, extractor: E) -> Self {
        Self {
            cfg: cfg.clone(),
            extractor,
        }
    }

    /// Detects the format from the extension and runs its extractor.
    pub fn extract(&self, path: &Path) -> Result<(FileType, Extracted)> {
        let kind = FileType::from_path(path).ok_or_else(|| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        debug!("extracting {} as {kind}", path.display());
        let extracted = self.extractor.extract(kind, path)?;
        Ok((kind, extracted))
    }

    /// Extracts and normalizes a single document. Every error propagates.
    pub fn process_one(&self, path: &Path) -> Result<Record> {
        let (kind, extracted) = self.extract(path)?;
        let content = extracted.into_content()?;
        let metadata = self.default_metadata(path)?;
        Ok(normalize(kind, content, metadata))
    }

    /// Processes every supported file directly inside `input_dir`, writing one
    /// JSON record per file into `output_dir`. A file that fails is logged and
    /// skipped. Returns the names of the files that were written.
    pub fn process_folder(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<String>> {
        ensure_dir(output_dir)?;

        let mut inputs = Vec::new();
        let entries = std::fs::read_dir(input_dir).map_err(|e| Error::io(input_dir, e))?;
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!("skipping unreadable entry in {}: {err}", input_dir.display());
                    continue;
                }
            };
            if path.is_file() && FileType::from_path(&path).is_some() {
                inputs.push(path);
            }
        }
        inputs.sort();

        info!(
            "found {} supported file(s) in {}",
            inputs.len(),
            input_dir.display()
        );

        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut processed = Vec::new();

        for path in &inputs {
            let name = file_name(path);
            info!("processing {name}");

            let dest = self.output_path(path, output_dir, &claimed);
            match self.process_and_write(path, &dest) {
                Ok(()) => {
                    info!("saved {}", dest.display());
                    claimed.insert(dest);
                    processed.push(name);
                }
                Err(err) => {
                    warn!("error processing {name}: {err}");
                }
            }
        }

        info!(
            "processed {}/{} file(s) into {}",
            processed.len(),
            inputs.len(),
            output_dir.display()
        );

        Ok(processed)
    }

    fn process_and_write(&self, path: &Path, dest: &Path) -> Result<()> {
        let record = self.process_one(path)?;
        let json = record.to_json_pretty(self.cfg.output.indent)?;
        write_file(dest, &json)
    }

    /// `<stem><suffix>.json`, or `<stem>_<ext><suffix>.json` when an earlier
    /// file in the same batch already wrote the plain name.
    fn output_path(&self, input: &Path, output_dir: &Path, claimed: &HashSet<PathBuf>) -> PathBuf {
        let stem = file_stem(input);
        let suffix = &self.cfg.output.suffix;
        let plain = output_dir.join(format!("{stem}{suffix}.json"));
        if !claimed.contains(&plain) {
            return plain;
        }

        let ext = input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let alt = output_dir.join(format!("{stem}_{ext}{suffix}.json"));
        warn!(
            "{} already written in this run; writing {} to {}",
            plain.display(),
            file_name(input),
            alt.display()
        );
        alt
    }

    fn default_metadata(&self, path: &Path) -> Result<Metadata> {
        let defaults = &self.cfg.metadata;
        let date = if defaults.date_from_mtime {
            file_date(path)?
        } else {
            defaults.date.clone()
        };
        Ok(Metadata {
            author: Some(defaults.author.clone()),
            date: Some(date),
            source: Some(file_name(path)),
        })
    }
}

/// [`Pipeline::process_one`] with default configuration.
pub fn process_one(path: &Path) -> Result<Record> {
    Pipeline::native(&Config::default()).process_one(path)
}

/// [`Pipeline::process_folder`] with default configuration.
pub fn process_folder(input_dir: &Path, output_dir: &Path) -> Result<Vec<String>> {
    Pipeline::native(&Config::default()).process_folder(input_dir, output_dir)
}
