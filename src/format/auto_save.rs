//! Auto-save scheduling with debouncing.
//!
//! The manager never reads the clock itself; the host passes the current time
//! (milliseconds since the Unix epoch) so scheduling stays deterministic.

use std::time::Duration;

/// Decides when the persistence snapshot should be written.
///
/// Two rules keep saves infrequent:
/// 1. **Debounce delay**: after a change, wait this long for more changes
///    before saving.
/// 2. **Minimum interval**: never save more often than this, even if changes
///    keep coming in.
#[derive(Debug, Clone)]
pub struct AutoSaveManager {
    /// Minimum time between saves.
    save_interval: Duration,

    /// Quiet time required after the last change.
    debounce_delay: Duration,

    /// Time of last save attempt.
    last_save_ms: Option<u64>,

    /// Time of last change that needs saving.
    last_change_ms: Option<u64>,

    enabled: bool,

    /// Whether there are unsaved changes.
    dirty: bool,
}

impl AutoSaveManager {
    /// Default minimum interval between saves (60 seconds).
    pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(60);

    /// Default debounce delay (5 seconds).
    pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_secs(5);

    pub fn new() -> Self {
        Self {
            save_interval: Self::DEFAULT_SAVE_INTERVAL,
            debounce_delay: Self::DEFAULT_DEBOUNCE_DELAY,
            last_save_ms: None,
            last_change_ms: None,
            enabled: true,
            dirty: false,
        }
    }

    /// Create a disabled auto-save manager.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    pub fn with_save_interval(mut self, interval: Duration) -> Self {
        self.save_interval = interval;
        self
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Record a change at `now_ms` that needs saving.
    pub fn mark_dirty(&mut self, now_ms: u64) {
        self.dirty = true;
        self.last_change_ms = Some(now_ms);
        log::trace!("Auto-save: marked dirty");
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check if a save is due at `now_ms`.
    ///
    /// True when enabled, dirty, quiet for the debounce delay and (after the
    /// first save) the minimum interval has passed.
    pub fn should_save(&self, now_ms: u64) -> bool {
        if !self.enabled || !self.dirty {
            return false;
        }

        let Some(last_change) = self.last_change_ms else {
            return false;
        };
        if elapsed(last_change, now_ms) < self.debounce_delay {
            return false;
        }

        if let Some(last_save) = self.last_save_ms {
            if elapsed(last_save, now_ms) < self.save_interval {
                return false;
            }
        }

        true
    }

    /// Mark that a save completed successfully.
    pub fn mark_saved(&mut self, now_ms: u64) {
        self.last_save_ms = Some(now_ms);
        self.dirty = false;
        self.last_change_ms = None;
        log::debug!("💾 Auto-save: saved");
    }

    /// Mark that a save failed. Stays dirty; the next attempt waits a full interval.
    pub fn mark_save_failed(&mut self, now_ms: u64) {
        self.last_save_ms = Some(now_ms);
        log::warn!("Auto-save: save failed, will retry");
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        log::debug!("Auto-save: enabled = {}", enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Reset all timing state.
    pub fn reset(&mut self) {
        self.last_save_ms = None;
        self.last_change_ms = None;
        self.dirty = false;
    }
}

impl Default for AutoSaveManager {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed(since_ms: u64, now_ms: u64) -> Duration {
    Duration::from_millis(now_ms.saturating_sub(since_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let manager = AutoSaveManager::new();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save(0));
        assert!(manager.is_enabled());
    }

    #[test]
    fn test_mark_saved() {
        let mut manager = AutoSaveManager::new();
        manager.mark_dirty(0);
        assert!(manager.is_dirty());

        manager.mark_saved(10);
        assert!(!manager.is_dirty());
        assert!(!manager.should_save(1_000_000));
    }

    #[test]
    fn test_disabled() {
        let mut manager = AutoSaveManager::disabled();
        manager.mark_dirty(0);
        assert!(!manager.should_save(1_000_000));
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::from_secs(5))
            .with_save_interval(Duration::ZERO);

        manager.mark_dirty(1_000);
        assert!(!manager.should_save(1_000));
        assert!(!manager.should_save(5_999));

        manager.mark_dirty(4_000);
        assert!(!manager.should_save(6_000));
        assert!(manager.should_save(9_000));
    }

    #[test]
    fn test_interval_limits_save_rate() {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::ZERO)
            .with_save_interval(Duration::from_secs(60));

        manager.mark_dirty(0);
        assert!(manager.should_save(0));
        manager.mark_saved(0);

        manager.mark_dirty(1_000);
        assert!(!manager.should_save(30_000));
        assert!(manager.should_save(60_000));
    }

    #[test]
    fn test_failed_save_stays_dirty() {
        let mut manager = AutoSaveManager::new()
            .with_debounce_delay(Duration::ZERO)
            .with_save_interval(Duration::from_secs(60));

        manager.mark_dirty(0);
        manager.mark_save_failed(0);
        assert!(manager.is_dirty());
        assert!(!manager.should_save(59_999));
        assert!(manager.should_save(60_000));
    }

    #[test]
    fn test_reset() {
        let mut manager = AutoSaveManager::new().with_debounce_delay(Duration::ZERO);
        manager.mark_dirty(0);
        manager.reset();
        assert!(!manager.is_dirty());
        assert!(!manager.should_save(100));
    }
}
