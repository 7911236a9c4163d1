pub mod renderer;

pub use renderer::{CameraView, Renderer};
