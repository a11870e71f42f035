use std::sync::Arc;

use super::document::{build_document, guard_script, ERROR_HOOK_SCRIPT};
use super::protocol::parse_message;
use crate::kernel::code::Diagnostic;
use crate::kernel::services::ports::{
    BlobError, BlobRegistry, BlobUrl, ExecutionSurface, ListenerId, SurfaceError, SurfaceMessage,
    CONTENT_TYPE_CSS, CONTENT_TYPE_HTML, CONTENT_TYPE_JS,
};
use crate::kernel::state::PreviewSource;

#[derive(Debug)]
pub enum PreviewError {
    Blob(BlobError),
    Surface(SurfaceError),
}

impl std::fmt::Display for PreviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewError::Blob(e) => write!(f, "Blob error: {}", e),
            PreviewError::Surface(e) => write!(f, "Surface error: {}", e),
        }
    }
}

impl std::error::Error for PreviewError {}

impl From<BlobError> for PreviewError {
    fn from(e: BlobError) -> Self {
        PreviewError::Blob(e)
    }
}

impl From<SurfaceError> for PreviewError {
    fn from(e: SurfaceError) -> Self {
        PreviewError::Surface(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTicket {
    pub generation: u64,
    pub document: BlobUrl,
}

/// Blob urls owned by one render; revoked when the scope is dropped.
struct RenderScope<B: BlobRegistry> {
    registry: Arc<B>,
    urls: Vec<BlobUrl>,
}

impl<B: BlobRegistry> RenderScope<B> {
    fn new(registry: Arc<B>) -> Self {
        Self {
            registry,
            urls: Vec::with_capacity(3),
        }
    }

    fn create(&mut self, bytes: Vec<u8>, content_type: &str) -> Result<BlobUrl, BlobError> {
        let url = self.registry.create(bytes, content_type)?;
        self.urls.push(url.clone());
        Ok(url)
    }

    /// Gives up ownership without revoking.
    fn keep(mut self) -> Vec<BlobUrl> {
        std::mem::take(&mut self.urls)
    }
}

impl<B: BlobRegistry> Drop for RenderScope<B> {
    fn drop(&mut self) {
        for url in self.urls.drain(..) {
            self.registry.revoke(&url);
        }
    }
}

struct ActiveRender<B: BlobRegistry> {
    ticket: RenderTicket,
    listener: ListenerId,
    scope: RenderScope<B>,
}

/// Renders `{html, css, js}` into an execution surface and relays the
/// diagnostics its document posts back.
///
/// Every render is a full reload: the previous render's listener is detached
/// and its blobs revoked before anything new is created, so at most one
/// listener is active and messages from older documents are dropped.
pub struct PreviewSandbox<B: BlobRegistry, S: ExecutionSurface> {
    registry: Arc<B>,
    surface: S,
    generation: u64,
    active: Option<ActiveRender<B>>,
}

impl<B: BlobRegistry, S: ExecutionSurface> PreviewSandbox<B, S> {
    pub fn new(registry: Arc<B>, surface: S) -> Self {
        Self {
            registry,
            surface,
            generation: 0,
            active: None,
        }
    }

    pub fn registry(&self) -> &Arc<B> {
        &self.registry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn active(&self) -> Option<&RenderTicket> {
        self.active.as_ref().map(|active| &active.ticket)
    }

    pub fn render(&mut self, source: &PreviewSource) -> Result<RenderTicket, PreviewError> {
        self.teardown();
        self.generation += 1;
        let generation = self.generation;

        let mut scope = RenderScope::new(Arc::clone(&self.registry));
        let css_url = scope.create(source.css.clone().into_bytes(), CONTENT_TYPE_CSS)?;
        let js_url = scope.create(guard_script(&source.js).into_bytes(), CONTENT_TYPE_JS)?;
        let document = build_document(&source.html, css_url.as_str(), js_url.as_str());
        let document_url = scope.create(document.into_bytes(), CONTENT_TYPE_HTML)?;

        self.surface.navigate(&document_url, generation)?;
        self.surface.install_error_hook(ERROR_HOOK_SCRIPT)?;
        let listener = self.surface.add_listener(generation);

        let ticket = RenderTicket {
            generation,
            document: document_url,
        };
        tracing::debug!(generation, document = %ticket.document, "preview rendered");
        self.active = Some(ActiveRender {
            ticket: ticket.clone(),
            listener,
            scope,
        });
        Ok(ticket)
    }

    /// Detaches the listener and revokes the blobs of the active render.
    pub fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            self.surface.remove_listener(active.listener);
            drop(active.scope);
        }
    }

    /// Detaches the listener but leaves the active render's blobs alive,
    /// handing them to the caller.
    pub fn release(&mut self) -> Option<(RenderTicket, Vec<BlobUrl>)> {
        let active = self.active.take()?;
        self.surface.remove_listener(active.listener);
        Some((active.ticket, active.scope.keep()))
    }

    /// Host-side listener: converts a posted message into a diagnostic.
    ///
    /// Returns `None` for messages outside the protocol and for messages from
    /// documents other than the active one.
    pub fn receive(&self, message: &SurfaceMessage) -> Option<Diagnostic> {
        let Some(active) = self.active.as_ref() else {
            tracing::debug!(generation = message.generation, "no active preview, dropping message");
            return None;
        };
        if active.ticket.generation != message.generation {
            tracing::debug!(
                generation = message.generation,
                active = active.ticket.generation,
                "dropping message from stale preview"
            );
            return None;
        }
        parse_message(&message.data)
    }
}

impl<B: BlobRegistry, S: ExecutionSurface> Drop for PreviewSandbox<B, S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/kernel/preview/sandbox.rs"]
mod tests;
