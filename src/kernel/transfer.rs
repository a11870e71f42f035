//! Project import/export as a zip archive holding `project.json`.

use std::io::{Cursor, Read, Write};

use super::state::Project;

pub const MANIFEST_NAME: &str = "project.json";

#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    Zip(zip::result::ZipError),
    Json(serde_json::Error),
    MissingManifest,
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferError::Io(e) => write!(f, "IO error: {}", e),
            TransferError::Zip(e) => write!(f, "Zip error: {}", e),
            TransferError::Json(e) => write!(f, "Invalid project file: {}", e),
            TransferError::MissingManifest => write!(f, "Archive has no {}", MANIFEST_NAME),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<std::io::Error> for TransferError {
    fn from(e: std::io::Error) -> Self {
        TransferError::Io(e)
    }
}

impl From<zip::result::ZipError> for TransferError {
    fn from(e: zip::result::ZipError) -> Self {
        TransferError::Zip(e)
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(e: serde_json::Error) -> Self {
        TransferError::Json(e)
    }
}

pub fn export_project(project: &Project) -> Result<Vec<u8>, TransferError> {
    let manifest = serde_json::to_vec_pretty(project)?;
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(MANIFEST_NAME, zip::write::SimpleFileOptions::default())?;
    writer.write_all(&manifest)?;
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

pub fn import_project(bytes: &[u8]) -> Result<Project, TransferError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = match archive.by_name(MANIFEST_NAME) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Err(TransferError::MissingManifest),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/transfer.rs"]
mod tests;
