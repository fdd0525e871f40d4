//! Map building: group friends by coordinate, then render markers.

pub mod group;
pub mod render;

pub use group::group_by_coordinate;
pub use render::{RenderMode, render_map, write_page};
