//! Host-side editor facade.
//!
//! The [`Editor`] owns the live state and the services the pure reducer must
//! not touch: id generation, the clock, the pointer-move throttle and the
//! auto-save schedule. Every action goes through [`Editor::dispatch`].

use crate::action::Action;
use crate::config::EditorConfig;
use crate::constants::{DEFAULT_AUTOSAVE_KEY, DEFAULT_HISTORY_LIMIT};
use crate::format::{self, AutoSaveManager, FormatError, SnapshotStore};
use crate::ids::{Clock, IdGenerator};
use crate::reducer::{Env, dispatch};
use crate::state::AnnotationState;
use crate::throttle::MoveThrottle;

pub struct Editor {
    state: AnnotationState,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    throttle: MoveThrottle,
    auto_save: AutoSaveManager,
    history_limit: usize,
    storage_key: String,
    /// Time of the last processed action.
    last_action_at: Option<u64>,
}

impl Editor {
    /// Create an editor with default limits.
    pub fn new(state: AnnotationState, ids: Box<dyn IdGenerator>, clock: Box<dyn Clock>) -> Self {
        Self {
            state,
            ids,
            clock,
            throttle: MoveThrottle::default(),
            auto_save: AutoSaveManager::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            storage_key: DEFAULT_AUTOSAVE_KEY.to_string(),
            last_action_at: None,
        }
    }

    /// Create an editor using the limits and auto-save policy of `config`.
    pub fn from_config(
        config: &EditorConfig,
        state: AnnotationState,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            throttle: MoveThrottle::new(config.preferences.move_throttle_ms),
            auto_save: config.auto_save.manager(),
            history_limit: config.preferences.history_limit,
            storage_key: config.auto_save.storage_key.clone(),
            ..Self::new(state, ids, clock)
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_auto_save(mut self, auto_save: AutoSaveManager) -> Self {
        self.auto_save = auto_save;
        self
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn into_state(self) -> AnnotationState {
        self.state
    }

    /// Swap in another document, e.g. a recovered snapshot.
    pub fn replace_state(&mut self, state: AnnotationState) {
        self.state = state;
        self.throttle.reset();
        self.auto_save.reset();
        log::debug!("Editor state replaced");
    }

    pub fn last_action_at(&self) -> Option<u64> {
        self.last_action_at
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.auto_save.is_dirty()
    }

    /// Apply one action. Returns true when the state changed.
    ///
    /// Pointer moves inside the throttle window are dropped. Pointer
    /// coordinates are clamped into the allowed area first, when one is set.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let now = self.clock.now_ms();
        if matches!(action, Action::MouseMove { .. }) && !self.throttle.accept(now) {
            return false;
        }

        let action = match (action.pointer(), self.state.allowed_area.as_ref()) {
            (Some((x, y)), Some(area)) => {
                let clamped = area.clamp(crate::geometry::Point::new(x, y));
                action.with_pointer(clamped.x, clamped.y)
            }
            _ => action,
        };

        let mut env = Env::new(&mut *self.ids, &*self.clock, self.history_limit);
        let next = dispatch(&self.state, &action, &mut env);
        self.last_action_at = Some(now);

        if next == self.state {
            return false;
        }
        self.state = next;
        self.auto_save.mark_dirty(now);
        true
    }

    /// Parse and apply an action in its JSON form.
    ///
    /// Malformed actions, including unknown `type`s, leave the state unchanged.
    pub fn dispatch_json(&mut self, raw: &str) -> bool {
        match Action::from_json(raw) {
            Ok(action) => self.dispatch(action),
            Err(e) => {
                log::warn!("Ignoring malformed action: {}", e);
                false
            }
        }
    }

    /// Write the snapshot if the auto-save policy says one is due.
    ///
    /// Returns true when a snapshot was written.
    pub fn poll_auto_save(&mut self, store: &mut dyn SnapshotStore) -> bool {
        let now = self.clock.now_ms();
        if !self.auto_save.should_save(now) {
            return false;
        }

        match format::save(store, &self.storage_key, &self.state) {
            Ok(()) => {
                log::info!(
                    "Auto-saved '{}' ({} images)",
                    self.storage_key,
                    self.state.images.len()
                );
                self.auto_save.mark_saved(now);
                true
            }
            Err(e) => {
                log::error!("Auto-save failed: {}", e);
                self.auto_save.mark_save_failed(now);
                false
            }
        }
    }

    /// Write the snapshot right away.
    pub fn save_now(&mut self, store: &mut dyn SnapshotStore) -> Result<(), FormatError> {
        format::save(store, &self.storage_key, &self.state)?;
        self.auto_save.mark_saved(self.clock.now_ms());
        Ok(())
    }
}
