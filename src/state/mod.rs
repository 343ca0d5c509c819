//! Annotation state tree.

mod annotation_state;

pub use annotation_state::AnnotationState;
