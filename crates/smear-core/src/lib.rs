pub mod animator;
pub mod backend;
pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod kernel;
pub mod params;
pub mod raster;
pub mod tracker;
pub mod uniforms;

// Shaders bundled as string constants
pub static SMEAR_WGSL: &str = include_str!("../shaders/smear.wgsl");
pub static RIPPLE_WGSL: &str = include_str!("../shaders/ripple.wgsl");

pub use animator::*;
pub use backend::*;
pub use color::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use kernel::*;
pub use params::*;
pub use raster::*;
pub use tracker::*;
pub use uniforms::*;
