//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod blob;
pub mod paths;
pub mod persistence;
pub mod settings;
pub mod store;
pub mod surface;

pub use blob::{Blob, DirBlobRegistry, MemoryBlobRegistry};
pub use paths::{
    ensure_log_dir, ensure_preview_dir, ensure_store_dir, get_log_dir, get_preview_dir,
    get_settings_path, get_store_dir,
};
pub use persistence::{PersistMessage, PersistenceService};
pub use settings::{ensure_settings_file, load_settings, load_settings_from, write_default_settings};
pub use store::{FileStore, MemoryStore};
pub use surface::RecordingSurface;
