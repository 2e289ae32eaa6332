pub mod camera;
pub mod color;
pub mod draw_list;
pub mod raster;
pub mod target;

pub use camera::Camera2D;
pub use color::Rgba;
pub use draw_list::{DrawCmd, DrawList};
pub use raster::RasterTarget;
pub use target::RenderTarget;
