use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::blob::BlobUrl;

slotmap::new_key_type! {
    pub struct ListenerId;
}

/// Raw message posted by a preview document to the host.
///
/// `generation` identifies the render that produced the document; `data` is
/// the posted payload, untouched.
#[derive(Debug, Clone)]
pub struct SurfaceMessage {
    pub generation: u64,
    pub data: serde_json::Value,
}

#[derive(Debug)]
pub enum SurfaceError {
    Detached,
    Navigation(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Detached => write!(f, "Execution surface detached"),
            SurfaceError::Navigation(msg) => write!(f, "Navigation failed: {}", msg),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// Isolated execution context a preview document is loaded into.
pub trait ExecutionSurface {
    /// Full (re)navigation to `url`; messages posted by the loaded document
    /// carry `generation`.
    fn navigate(&mut self, url: &BlobUrl, generation: u64) -> Result<(), SurfaceError>;

    fn install_error_hook(&mut self, script: &str) -> Result<(), SurfaceError>;

    fn add_listener(&mut self, generation: u64) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId) -> bool;

    fn listener_count(&self) -> usize;
}

#[derive(Clone)]
pub struct SurfaceSender {
    tx: Sender<SurfaceMessage>,
}

pub struct SurfaceReceiver {
    rx: Receiver<SurfaceMessage>,
}

pub fn surface_channel() -> (SurfaceSender, SurfaceReceiver) {
    let (tx, rx) = mpsc::channel();
    (SurfaceSender { tx }, SurfaceReceiver { rx })
}

impl SurfaceSender {
    pub fn post(
        &self,
        generation: u64,
        data: serde_json::Value,
    ) -> Result<(), mpsc::SendError<SurfaceMessage>> {
        self.tx.send(SurfaceMessage { generation, data })
    }
}

impl SurfaceReceiver {
    pub fn try_recv(&mut self) -> Result<SurfaceMessage, TryRecvError> {
        self.rx.try_recv()
    }
}
