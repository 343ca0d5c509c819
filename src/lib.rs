//! EDAT - Engineering Drawing Annotation Tool
//!
//! The annotation core of an editor for engineering drawings: regions drawn on
//! drawing sheets, classified by device and category, measured against scale
//! regions, grouped into breakouts, with snapshot undo.
//!
//! Every UI event is an [`Action`]; [`reducer::dispatch`] turns the current
//! [`AnnotationState`] and an action into the next state. The [`Editor`]
//! facade adds the host services (ids, clock, move throttle, auto-save).

pub mod action;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod editor;
pub mod format;
pub mod geometry;
pub mod handlers;
pub mod history;
pub mod ids;
pub mod measurement;
pub mod mode;
pub mod model;
pub mod reducer;
pub mod resolver;
pub mod state;
pub mod throttle;

pub use action::Action;
pub use config::EditorConfig;
pub use editor::Editor;
pub use state::AnnotationState;
