pub mod geom;
pub mod input;
pub mod locomotion;
pub mod rng;
pub mod time;

pub use geom::Rect;
pub use glam::Vec2;
pub use input::{Action, InputSnapshot, InputSource, InputState};
pub use locomotion::Locomotion;
pub use rng::SimRng;
pub use time::{FrameClock, REFERENCE_HZ};
