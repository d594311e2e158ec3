//! Pure 2D math used by the batchers: fan triangulation, pivot rotation and
//! circle tessellation. No state, no GPU access.

mod circle;
mod rotate;
mod triangulate;

pub use circle::circle_points;
pub use rotate::{rotate_point_around_pivot, rotate_points};
pub use triangulate::{polygon_area, triangulate_convex, Triangle};
