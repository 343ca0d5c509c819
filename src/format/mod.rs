//! Persistence of the annotation document.
//!
//! The document is saved as a [`PersistedState`] snapshot: a camelCase JSON
//! projection of the state without history or gesture state. Snapshots live
//! in a [`SnapshotStore`] under a key; [`recover`] restores the previous
//! session at startup and drops snapshots that can no longer be read.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use edat::format::{recover, MemoryStore, Recovery};
//!
//! let mut store = MemoryStore::new();
//! match recover(&mut store, "edat-autosave", initial)? {
//!     Recovery::Recovered(state) => editor.replace_state(*state),
//!     Recovery::Discarded(e) => log::warn!("Previous session lost: {}", e),
//!     Recovery::Empty => {}
//! }
//! ```

mod auto_save;
mod error;
mod snapshot;
mod store;

pub use auto_save::AutoSaveManager;
pub use error::FormatError;
pub use snapshot::{PersistedImage, PersistedState};
#[cfg(not(target_arch = "wasm32"))]
pub use store::FileStore;
pub use store::{MemoryStore, Recovery, SnapshotStore, recover, save};
