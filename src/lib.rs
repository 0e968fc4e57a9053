//! An animated desk fan: a spinning blade wheel under a wire grille, three speed selectors
//! & a sliding power switch.
//!
//! The fan itself lives in [`widget`] and paints onto any [`widget::Canvas`]. With the
//! `app` feature it can be dropped into a window:
//!
//! ```no_run
//! use breeze::{app::{App, FrameContext}, widget::FanWidget};
//!
//! let mut fan = FanWidget::default();
//! App::new()
//!     .title("Desk Fan")
//!     .run(move |FrameContext { gfx, timer, .. }| {
//!         let size = gfx.screen_size();
//!         fan.resize(size.x, size.y, gfx.scale_factor());
//!         fan.update(timer.frame_duration());
//!         fan.paint(gfx);
//!     })
//!     .ok();
//! ```

pub mod widget {
    pub use breeze_widget::*;
}

#[cfg(feature = "app")]
pub mod app {
    pub use breeze_app::{AppError, BoxError};
    pub use breeze_glue::{App, FrameContext, Graphics};
}

#[cfg(feature = "app")]
pub mod input {
    pub use breeze_app::input::{Input, KeyCode, MouseButton};
}

#[cfg(feature = "render")]
pub mod render {
    pub use breeze_render::{GeometryBatch, RenderError, Renderer, Vertex};
}
