//! Bounding volumes and the view frustum used for culling.

pub mod box3;
pub mod frustum;
pub mod plane;
pub mod sphere;

pub use box3::Box3;
pub use frustum::Frustum;
pub use plane::Plane;
pub use sphere::Sphere;
