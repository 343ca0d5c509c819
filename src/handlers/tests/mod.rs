//! Scenario tests for the reducer.
//!
//! Each test drives a state through `dispatch` with deterministic ids and a
//! manual clock, the way the host does.

mod breakout_tests;
mod eraser_tests;
mod history_tests;
mod image_tests;

use crate::action::Action;
use crate::constants::DEFAULT_HISTORY_LIMIT;
use crate::ids::{ManualClock, SequentialIds};
use crate::model::{Image, Region, Shape, Tool};
use crate::reducer::{Env, dispatch};
use crate::state::AnnotationState;

/// A state plus the capabilities needed to dispatch against it.
pub(super) struct Harness {
    pub state: AnnotationState,
    ids: SequentialIds,
    clock: ManualClock,
    history_limit: usize,
}

impl Harness {
    pub fn new(state: AnnotationState) -> Self {
        Self {
            state,
            ids: SequentialIds::new("id"),
            clock: ManualClock::new(1_700_000_000_000),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn dispatch(&mut self, action: Action) -> &AnnotationState {
        let mut env = Env::new(&mut self.ids, &self.clock, self.history_limit);
        self.state = dispatch(&self.state, &action, &mut env);
        self.clock.advance(20);
        &self.state
    }

    pub fn tool(&mut self, tool: Tool) {
        self.dispatch(Action::SelectTool {
            selected_tool: tool,
        });
    }

    pub fn down(&mut self, x: f64, y: f64) {
        self.dispatch(Action::MouseDown { x, y });
    }

    pub fn mv(&mut self, x: f64, y: f64) {
        self.dispatch(Action::MouseMove { x, y });
    }

    pub fn up(&mut self, x: f64, y: f64) {
        self.dispatch(Action::MouseUp { x, y });
    }

    /// Press and release at the same position.
    pub fn click(&mut self, x: f64, y: f64) {
        self.down(x, y);
        self.up(x, y);
    }

    pub fn regions(&self) -> &[Region] {
        self.state
            .active_image()
            .map(|i| i.regions.as_slice())
            .unwrap_or(&[])
    }

    pub fn region(&self, id: &str) -> &Region {
        self.state
            .region(id)
            .unwrap_or_else(|| panic!("region '{}' missing", id))
    }

    pub fn history_names(&self) -> Vec<&str> {
        self.state.history.iter().map(|e| e.name.as_str()).collect()
    }
}

/// One 1000x1000 sheet with no regions.
pub(super) fn blank_sheet() -> AnnotationState {
    AnnotationState::new(vec![Image::new("sheet-1.png", "Sheet 1").with_pixel_size(1000, 1000)])
}

/// A sheet holding the given regions.
pub(super) fn sheet_with(regions: Vec<Region>) -> AnnotationState {
    AnnotationState::new(vec![
        Image::new("sheet-1.png", "Sheet 1")
            .with_pixel_size(1000, 1000)
            .with_regions(regions),
    ])
}

pub(super) fn point(id: &str, x: f64, y: f64) -> Region {
    Region::new(id, Shape::Point { x, y })
}

pub(super) fn bbox(id: &str, x: f64, y: f64, w: f64, h: f64) -> Region {
    Region::new(id, Shape::Box { x, y, w, h })
}

pub(super) fn line(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Region {
    Region::new(
        id,
        Shape::Line {
            x1,
            y1,
            x2,
            y2,
            length_ft: None,
        },
    )
}

pub(super) fn scale(id: &str, x1: f64, y1: f64, x2: f64, y2: f64, feet: &str) -> Region {
    Region::new(id, Shape::Scale { x1, y1, x2, y2 }).with_cls(feet)
}

pub(super) fn length_ft(region: &Region) -> Option<f64> {
    match region.shape {
        Shape::Line { length_ft, .. } => length_ft,
        _ => None,
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
