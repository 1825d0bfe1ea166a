pub mod box_shape;
pub mod plane;

pub use box_shape::create_box;
pub use plane::{PlaneOptions, create_plane};
