use std::fmt;
use std::io;

pub const CONTENT_TYPE_CSS: &str = "text/css";
pub const CONTENT_TYPE_JS: &str = "text/javascript";
pub const CONTENT_TYPE_HTML: &str = "text/html";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobUrl(String);

impl BlobUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub enum BlobError {
    Io(io::Error),
    Unsupported(String),
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::Io(e) => write!(f, "IO error: {}", e),
            BlobError::Unsupported(ty) => write!(f, "Unsupported content type: {}", ty),
        }
    }
}

impl std::error::Error for BlobError {}

impl From<io::Error> for BlobError {
    fn from(e: io::Error) -> Self {
        BlobError::Io(e)
    }
}

/// Process-local, revocable URLs for generated byte blobs.
pub trait BlobRegistry: Send + Sync {
    fn create(&self, bytes: Vec<u8>, content_type: &str) -> Result<BlobUrl, BlobError>;

    /// Returns `false` when the url was unknown or already revoked.
    fn revoke(&self, url: &BlobUrl) -> bool;

    fn live_count(&self) -> usize;
}
