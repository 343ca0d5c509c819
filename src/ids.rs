//! Injectable id generation and time sources.
//!
//! The reducer never reads the wall clock or invents ids on its own; the host
//! hands it an [`IdGenerator`] and a [`Clock`] so tests stay deterministic.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{SystemTime, UNIX_EPOCH};

/// Source of process-wide unique ids for regions, devices and breakouts.
pub trait IdGenerator {
    /// Produce a fresh id. Never returns the same value twice.
    fn generate(&mut self) -> String;
}

/// Ids of the form `<prefix><counter>`.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    /// Create a generator with a fixed prefix, counting from 1.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Create a generator whose prefix is derived from the current time,
    /// so ids stay unique across sessions that share a snapshot.
    pub fn from_time() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        Self::new(format!("{}-", to_base36(millis)))
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::from_time()
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Millisecond time source.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Wall clock, works on native and wasm targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
