use super::{Action, AppState, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }
}

/// Pure reducer: `(state, action) -> state`.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    state.apply(action);
    state
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        if let Action::Code(code) = &action {
            tracing::trace!(kind = ?code.kind(), "code action");
        }
        let prev_source = self.state.preview_source();
        if !self.state.apply(action) {
            return DispatchResult::unchanged();
        }

        let mut effects = vec![Effect::Persist(self.state.persisted())];
        let source = self.state.preview_source();
        if source != prev_source {
            effects.push(Effect::RenderPreview(source));
        }

        DispatchResult {
            effects,
            state_changed: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
