//! Client-side export of a note as a downloadable text or markdown file.

use crate::error::ExportError;
use crate::models::Note;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Md,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Md => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Md => "text/markdown",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "txt" => Ok(ExportFormat::Txt),
            "md" => Ok(ExportFormat::Md),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl ExportedFile {
    /// Write the file into `dir`, returning the full path.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.content)?;
        log::info!("Exported {} ({})", path.display(), self.mime_type);
        Ok(path)
    }
}

/// `<title>` with every character outside `[A-Za-z0-9]` replaced by `_`,
/// lowercased, plus the format's extension.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}.{}", stem, format.extension())
}

pub fn export_note(note: &Note, format: ExportFormat) -> ExportedFile {
    ExportedFile {
        filename: export_filename(&note.title, format),
        mime_type: format.mime_type(),
        content: note.content.clone(),
    }
}
