//! Blob registries: in-process (`blob:` urls) and directory-backed (`file://` urls).

use crate::kernel::services::ports::{
    BlobError, BlobRegistry, BlobUrl, CONTENT_TYPE_CSS, CONTENT_TYPE_HTML, CONTENT_TYPE_JS,
};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const BLOB_ORIGIN: &str = "mocode";

#[derive(Debug, Clone)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
pub struct MemoryBlobRegistry {
    blobs: Mutex<FxHashMap<BlobUrl, Blob>>,
}

impl MemoryBlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, url: &BlobUrl) -> Option<Blob> {
        self.blobs.lock().ok()?.get(url).cloned()
    }

    pub fn resolve_text(&self, url: &BlobUrl) -> Option<String> {
        self.resolve(url)
            .map(|blob| String::from_utf8_lossy(&blob.bytes).into_owned())
    }
}

impl BlobRegistry for MemoryBlobRegistry {
    fn create(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobUrl, BlobError> {
        let url = BlobUrl::new(format!("blob:{}/{}", BLOB_ORIGIN, uuid::Uuid::new_v4()));
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| BlobError::Unsupported("registry poisoned".to_string()))?;
        blobs.insert(
            url.clone(),
            Blob {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(url)
    }

    fn revoke(&self, url: &BlobUrl) -> bool {
        match self.blobs.lock() {
            Ok(mut blobs) => blobs.remove(url).is_some(),
            Err(_) => false,
        }
    }

    fn live_count(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }
}

/// Writes each blob to its own file so a browser can open the document
/// straight from disk.
pub struct DirBlobRegistry {
    dir: PathBuf,
    files: Mutex<FxHashMap<BlobUrl, PathBuf>>,
}

impl DirBlobRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            files: Mutex::new(FxHashMap::default()),
        }
    }

    /// Removes preview files that no live url owns, such as renders an
    /// earlier process released. Returns how many files were removed.
    pub fn sweep(&self) -> std::io::Result<usize> {
        let live: Vec<PathBuf> = match self.files.lock() {
            Ok(files) => files.values().cloned().collect(),
            Err(_) => return Ok(0),
        };
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if !is_blob_file(&path) || live.contains(&path) {
                continue;
            }
            std::fs::remove_file(&path)?;
            removed += 1;
        }
        if removed > 0 {
            tracing::debug!(dir = %self.dir.display(), removed, "swept stale preview files");
        }
        Ok(removed)
    }

    pub fn path_of(&self, url: &BlobUrl) -> Option<PathBuf> {
        self.files.lock().ok()?.get(url).cloned()
    }
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        CONTENT_TYPE_CSS => Some("css"),
        CONTENT_TYPE_JS => Some("js"),
        CONTENT_TYPE_HTML => Some("html"),
        _ => None,
    }
}

fn is_blob_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "css" | "js" | "html"))
}

impl BlobRegistry for DirBlobRegistry {
    fn create(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobUrl, BlobError> {
        let ext = extension_for(content_type)
            .ok_or_else(|| BlobError::Unsupported(content_type.to_string()))?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}.{}", uuid::Uuid::new_v4(), ext));
        std::fs::write(&path, bytes)?;

        let url = BlobUrl::new(format!("file://{}", path.display()));
        let mut files = self
            .files
            .lock()
            .map_err(|_| BlobError::Unsupported("registry poisoned".to_string()))?;
        files.insert(url.clone(), path);
        Ok(url)
    }

    fn revoke(&self, url: &BlobUrl) -> bool {
        let path = match self.files.lock() {
            Ok(mut files) => files.remove(url),
            Err(_) => None,
        };
        let Some(path) = path else {
            return false;
        };
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "failed to remove blob file");
        }
        true
    }

    fn live_count(&self) -> usize {
        self.files.lock().map(|f| f.len()).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/blob.rs"]
mod tests;
