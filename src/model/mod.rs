//! Data models for the annotation document.

mod breakout;
mod device;
mod image;
mod keypoints;
mod region;
mod tool;

pub use breakout::Breakout;
pub use device::Device;
pub use image::{Image, PixelSize};
pub use keypoints::{KeypointsDefinition, Landmark};
pub use region::{ExpandingPoint, Region, RegionId, Shape};
pub use tool::Tool;
