//! Embedding layer: wires the kernel to persistence and the preview.

mod session;

pub use session::{Session, SessionError};
