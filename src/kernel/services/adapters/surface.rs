use crate::kernel::services::ports::{
    BlobUrl, ExecutionSurface, ListenerId, SurfaceError, SurfaceSender,
};
use slotmap::SlotMap;

/// Headless surface: records navigations and hook installs and lets the
/// embedding post messages on behalf of the loaded document.
pub struct RecordingSurface {
    sender: SurfaceSender,
    listeners: SlotMap<ListenerId, u64>,
    navigations: Vec<(BlobUrl, u64)>,
    hooks: Vec<String>,
}

impl RecordingSurface {
    pub fn new(sender: SurfaceSender) -> Self {
        Self {
            sender,
            listeners: SlotMap::with_key(),
            navigations: Vec::new(),
            hooks: Vec::new(),
        }
    }

    pub fn navigations(&self) -> &[(BlobUrl, u64)] {
        &self.navigations
    }

    pub fn current(&self) -> Option<&(BlobUrl, u64)> {
        self.navigations.last()
    }

    /// Error hook scripts in install order, one per navigation.
    pub fn installed_hooks(&self) -> &[String] {
        &self.hooks
    }

    /// Posts `data` as the currently loaded document.
    pub fn post(&self, data: serde_json::Value) -> Result<(), SurfaceError> {
        let (_, generation) = self.current().ok_or(SurfaceError::Detached)?;
        self.post_from(*generation, data)
    }

    /// Posts `data` as the document of an arbitrary render generation.
    pub fn post_from(&self, generation: u64, data: serde_json::Value) -> Result<(), SurfaceError> {
        self.sender
            .post(generation, data)
            .map_err(|_| SurfaceError::Detached)
    }
}

impl ExecutionSurface for RecordingSurface {
    fn navigate(&mut self, url: &BlobUrl, generation: u64) -> Result<(), SurfaceError> {
        self.navigations.push((url.clone(), generation));
        Ok(())
    }

    fn install_error_hook(&mut self, script: &str) -> Result<(), SurfaceError> {
        self.hooks.push(script.to_string());
        Ok(())
    }

    fn add_listener(&mut self, generation: u64) -> ListenerId {
        self.listeners.insert(generation)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
