//! Service ports: traits + data contracts.

pub mod blob;
pub mod settings;
pub mod store;
pub mod surface;

pub use blob::{BlobError, BlobRegistry, BlobUrl, CONTENT_TYPE_CSS, CONTENT_TYPE_HTML, CONTENT_TYPE_JS};
pub use settings::{Settings, DEFAULT_PROJECT_NAME};
pub use store::{KeyValueStore, Result as StoreResult, StoreError};
pub use surface::{
    surface_channel, ExecutionSurface, ListenerId, SurfaceError, SurfaceMessage, SurfaceReceiver,
    SurfaceSender,
};
