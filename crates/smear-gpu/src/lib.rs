mod backend;
mod helpers;
mod select;
mod targets;

pub use backend::GpuBackend;
pub use select::select_backend;
