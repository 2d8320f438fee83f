mod shape;
mod segment;
mod polygon;

pub use self::shape::{Shape, ShapeGeometry, ShapeKind, DrawStyle};
pub use self::segment::Segment;
pub use self::polygon::{Polygon, moment_for_box};
