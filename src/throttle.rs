//! Pointer-move rate limiting.
//!
//! Moves arriving within the window of the last accepted one are dropped.
//! Nothing is queued or coalesced; the next move after the window wins.

use crate::constants::DEFAULT_MOVE_THROTTLE_MS;

/// Time-based drop filter for `MOUSE_MOVE` actions.
#[derive(Debug, Clone)]
pub struct MoveThrottle {
    /// Minimum spacing between accepted moves.
    interval_ms: u64,
    /// Time of the last accepted move.
    last_accepted: Option<u64>,
}

impl MoveThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Decide whether a move at `now_ms` should be processed.
    ///
    /// Accepting a move restarts the window.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted {
            if now_ms.saturating_sub(last) < self.interval_ms {
                log::trace!("Move dropped ({}ms since last)", now_ms.saturating_sub(last));
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        true
    }

    /// Forget the last accepted move, so the next one always passes.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

impl Default for MoveThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_THROTTLE_MS)
    }
}
