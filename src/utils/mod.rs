pub mod frame_clock;
pub mod orbit_controls;

pub use frame_clock::{FrameClock, FrameTime};
pub use orbit_controls::OrbitControls;
