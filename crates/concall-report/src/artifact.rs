//! Local report artifacts

use crate::error::ReportError;
use crate::format::report_text;
use concall_domain::Record;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Longest filename stem taken from a subject name
pub const MAX_FILENAME_STEM: usize = 50;

/// Same-millisecond collisions tried before giving up
const MAX_COLLISION_SUFFIX: u32 = 1_000;

/// Turn a subject name into a filename stem
///
/// Every non-alphanumeric ASCII character becomes `_`, runs of `_` collapse
/// to one, the result is cut to [`MAX_FILENAME_STEM`] characters and stripped
/// of leading/trailing `_`. A name with nothing usable becomes `"subject"`.
///
/// # Examples
///
/// ```
/// use concall_report::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Acme Corp. (India) Ltd"), "Acme_Corp_India_Ltd");
/// assert_eq!(sanitize_filename("***"), "subject");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }

    let stem: String = stem.chars().take(MAX_FILENAME_STEM).collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() {
        "subject".to_string()
    } else {
        stem.to_string()
    }
}

/// Writes one text artifact per record
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer targeting `output_dir` (created on first write)
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the record's report and return where it went
    ///
    /// Files are named `<sanitized>_analysis_<unix-millis>.txt` and never
    /// overwrite an existing file: a collision adds a `-<n>` suffix.
    pub fn persist(&self, record: &Record) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir)?;

        let stem = format!(
            "{}_analysis_{}",
            sanitize_filename(&record.company_name),
            chrono::Utc::now().timestamp_millis()
        );
        let text = report_text(record);

        for n in 0..=MAX_COLLISION_SUFFIX {
            let name = if n == 0 {
                format!("{}.txt", stem)
            } else {
                format!("{}-{}.txt", stem, n)
            };
            let path = self.output_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_artifact(&path, file, text.as_bytes(), File::sync_all)?;
                    info!("Formatted analysis saved: {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(ReportError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free artifact name for {}", stem),
        )))
    }
}

/// Write and sync a freshly created artifact, removing it if either step fails
fn write_artifact<W: Write>(
    path: &Path,
    mut out: W,
    bytes: &[u8],
    sync: impl FnOnce(&W) -> io::Result<()>,
) -> io::Result<()> {
    let written = out.write_all(bytes).and_then(|()| sync(&out));
    drop(out);

    if written.is_err() {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove partial artifact {}: {}", path.display(), e);
        }
    }
    written
}
