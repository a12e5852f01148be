pub mod curve;
pub mod transform;

pub use curve::{PathSample, smooth_polyline};
pub use transform::{PixelPos, Transform, WorldPoint};
