//! Export of projections to `.csv` files
//!
//! Files are written to a temporary file next to the target and renamed into
//! place, so a failed export never leaves a truncated file behind and
//! concurrent exports to the same name never interleave.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tempfile::NamedTempFile;
use tracing::{debug, error, info};

use crate::error::{Result, ScrapeError};
use crate::extractors::AttributeRow;

/// Default directory for exported files
pub const DEFAULT_OUTPUT_DIR: &str = "files";

/// Extension appended to every export file name
pub const EXPORT_EXTENSION: &str = "csv";

/// How exported content is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Quoting {
    /// Values joined with commas as-is. Commas inside values are not escaped.
    #[default]
    Plain,
    /// RFC 4180 records: fields holding commas, quotes or newlines are quoted
    Rfc4180,
}

/// Writes export files into one output directory
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    quoting: Quoting,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, quoting: Quoting) -> Self {
        Self {
            output_dir: output_dir.into(),
            quoting,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn quoting(&self) -> Quoting {
        self.quoting
    }

    /// `<output_dir>/<filename>.csv`
    pub fn target_path(&self, filename: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", filename, EXPORT_EXTENSION))
    }

    /// Export raw HTML or extracted text.
    ///
    /// With [`Quoting::Rfc4180`] every line becomes a one-field record.
    pub fn export_text(&self, filename: &str, text: &str) -> Result<PathBuf> {
        let path = self.target_path(filename);
        let content = match self.quoting {
            Quoting::Plain => text.to_string(),
            Quoting::Rfc4180 => {
                render_records(text.lines().map(|line| vec![line]))
                    .map_err(|source| write_failed(&path, source))?
            }
        };
        self.write(&path, &content)
    }

    /// Export attribute rows, one per line.
    pub fn export_rows(&self, filename: &str, rows: &[AttributeRow]) -> Result<PathBuf> {
        let path = self.target_path(filename);
        let content = match self.quoting {
            Quoting::Plain => rows
                .iter()
                .map(AttributeRow::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            Quoting::Rfc4180 => render_records(rows.iter().map(|row| row.values().collect()))
                .map_err(|source| write_failed(&path, source))?,
        };
        self.write(&path, &content)
    }

    fn write(&self, path: &Path, content: &str) -> Result<PathBuf> {
        debug!(path = %path.display(), bytes = content.len(), "writing export");

        fs::create_dir_all(&self.output_dir).map_err(|source| write_failed(path, source))?;

        let mut tmp =
            NamedTempFile::new_in(&self.output_dir).map_err(|source| write_failed(path, source))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| write_failed(path, source))?;
        tmp.persist(path)
            .map_err(|e| write_failed(path, e.error))?;

        info!(path = %path.display(), "export written");
        Ok(path.to_path_buf())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, Quoting::default())
    }
}

fn render_records<'a, I>(records: I) -> io::Result<String>
where
    I: IntoIterator<Item = Vec<&'a str>>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(vec![]);
    for record in records {
        writer.write_record(&record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_failed(path: &Path, source: io::Error) -> ScrapeError {
    error!(path = %path.display(), error = %source, "export failed");
    ScrapeError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}
