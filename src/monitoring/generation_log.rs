use crate::error::Result;
use crate::shared_data::GenerationStats;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Appends one record to a CSV file, writing the header only into an empty file.
fn log_to_csv<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    let file = OpenOptions::new().append(true).create(true).open(path)?;
    let is_empty = file.metadata()?.len() == 0;
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(is_empty)
        .from_writer(file);
    wtr.serialize(record)?;
    wtr.flush()?;
    Ok(())
}

/// Per-generation statistics for one run, one CSV row per generation.
#[derive(Debug, Clone)]
pub struct GenerationLog {
    path: PathBuf,
}

impl GenerationLog {
    /// Starts a fresh log at `path`, truncating any previous run.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        File::create(path.as_ref())?;
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn append(&self, stats: &GenerationStats) -> Result<()> {
        log_to_csv(&self.path, stats)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record back from a log file.
    pub fn read_all<P: AsRef<Path>>(path: P) -> Result<Vec<GenerationStats>> {
        let file = File::open(path)?;
        let mut rdr = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for result in rdr.deserialize() {
            let record: GenerationStats = result?;
            records.push(record);
        }
        Ok(records)
    }
}
