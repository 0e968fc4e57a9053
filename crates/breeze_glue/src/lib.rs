pub mod app;
mod camera;
pub mod graphics;
pub mod primitives;

pub use app::{App, FrameContext};
pub use graphics::Graphics;
pub use primitives::{PathBuilder, PrimitiveBatch};
