//! Snapshot-based undo history.
//!
//! Each entry holds the complete document as it was before a significant
//! edit. Restoring replaces the whole state with the newest snapshot; there is
//! no inverse-operation replay.

use std::sync::Arc;

use crate::action::Action;
use crate::reducer::Env;
use crate::state::AnnotationState;

/// One undo step.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Milliseconds since the Unix epoch when the entry was recorded.
    pub time: u64,
    /// Human-readable description, e.g. "Delete Region".
    pub name: String,
    /// The state before the edit, with an empty history.
    pub state: Arc<AnnotationState>,
}

/// Record `state` as it is right now under `name`.
///
/// Handlers call this before mutating, so the snapshot is the pre-edit state.
/// The stack keeps at most `env.history_limit` entries; the oldest are dropped.
pub fn save_to_history(state: &mut AnnotationState, name: impl Into<String>, env: &Env<'_>) {
    let entry = HistoryEntry {
        time: env.now_ms(),
        name: name.into(),
        state: Arc::new(state.without_history()),
    };
    push_entry(state, entry, env.history_limit);
}

fn push_entry(state: &mut AnnotationState, entry: HistoryEntry, limit: usize) {
    log::debug!("📝 History: pushed '{}'", entry.name);
    state.history.insert(0, entry);
    if state.history.len() > limit {
        state.history.truncate(limit);
        log::trace!("History capped at {} entries", limit);
    }
}

/// Drop the newest entry if it carries `name`.
///
/// Used when a freshly created region turns out degenerate and is discarded,
/// so the aborted creation does not leave an empty undo step behind.
pub fn discard_latest(state: &mut AnnotationState, name: &str) {
    if state.history.first().is_some_and(|entry| entry.name == name) {
        state.history.remove(0);
        log::debug!("🗑️ History: dropped '{}'", name);
    }
}

/// Replace the state with the newest snapshot.
///
/// The restored state gets the remaining (one shorter) history. With an empty
/// history the state is returned unchanged.
pub fn restore_history(state: AnnotationState) -> AnnotationState {
    let mut history = state.history;
    if history.is_empty() {
        return AnnotationState { history, ..state };
    }
    let entry = history.remove(0);
    log::debug!("⏪ History: restored '{}'", entry.name);
    let mut restored = Arc::unwrap_or_clone(entry.state);
    restored.history = history;
    restored
}

/// Wrap a reducer with snapshotting.
///
/// `RESTORE_HISTORY` is answered here. For actions on the history allow-list
/// (see [`Action::history_name`]) the pre-action state is pushed, but only when
/// the reducer actually changed something.
pub fn with_history<R>(
    state: &AnnotationState,
    action: &Action,
    env: &mut Env<'_>,
    reducer: R,
) -> AnnotationState
where
    R: Fn(AnnotationState, &Action, &mut Env<'_>) -> AnnotationState,
{
    if matches!(action, Action::RestoreHistory) {
        return restore_history(state.clone());
    }

    let mut next = reducer(state.clone(), action, env);

    if let Some(name) = action.history_name() {
        if next != *state {
            let entry = HistoryEntry {
                time: env.now_ms(),
                name: name.to_string(),
                state: Arc::new(state.without_history()),
            };
            push_entry(&mut next, entry, env.history_limit);
        }
    }

    next
}
