use super::state::{PersistedState, PreviewSource};

#[derive(Debug, Clone)]
pub enum Effect {
    Persist(PersistedState),
    RenderPreview(PreviewSource),
}
