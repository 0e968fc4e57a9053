use std::sync::Arc;

use breeze_app::{
    AppConfig, AppError, AppHandler, AppRunner, Window, input::Input, time::FrameTimer,
};
use breeze_render::Renderer;
use log::trace;

use crate::{graphics::Graphics, primitives::PrimitiveBatch};

/// Everything the per-frame update closure gets to work with
pub struct FrameContext<'a, 'g> {
    pub gfx: &'a mut Graphics<'g>,
    pub input: &'a Input,
    pub timer: &'a FrameTimer,
}

type UpdateFn = dyn FnMut(&mut FrameContext);

pub struct App {
    update: Option<Box<UpdateFn>>,
    config: AppConfig,
    on_quit: Option<Box<dyn FnMut()>>,
    vsync: bool,
    batch: PrimitiveBatch,
    scale_factor: f32,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new [`App`]
    pub fn new() -> Self {
        Self {
            update: None,
            config: AppConfig::default(),
            on_quit: None,
            vsync: true,
            batch: PrimitiveBatch::default(),
            scale_factor: 1.0,
        }
    }

    /// Set application title
    pub fn title(mut self, title: &str) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set window size (width, height in pixels)
    pub fn screen_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = Some(width);
        self.config.height = Some(height);
        self
    }

    /// Enable or disable window resizing (defaults to true)
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    /// Enable or disable vsync
    pub fn vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Sets a closure to call when the app is quitting
    pub fn on_quit(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_quit = Some(Box::new(f));
        self
    }

    /// Run the app with a per-frame update closure
    ///
    /// Blocks until the window closes on native targets
    pub fn run(mut self, update: impl FnMut(&mut FrameContext) + 'static) -> Result<(), AppError> {
        self.update = Some(Box::new(update));
        let config = std::mem::take(&mut self.config);
        AppRunner::new(self, config).run()
    }
}

impl AppHandler<Renderer> for App {
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<Renderer, AppError> {
        let size = window.inner_size();
        Renderer::new(size.width, size.height, window)
            .await
            .map_err(|e| AppError::Resource(Box::new(e)))
    }

    fn on_ready(&mut self, _window: &Window, renderer: &mut Renderer) {
        renderer.set_vsync(self.vsync);
    }

    fn frame(
        &mut self,
        _window: &Window,
        renderer: &mut Renderer,
        input: &Input,
        timer: &FrameTimer,
    ) -> Result<(), AppError> {
        let Some(update) = &mut self.update else {
            return Ok(());
        };
        let Some(mut frame) = renderer
            .begin_frame()
            .map_err(|e| AppError::Frame(Box::new(e)))?
        else {
            return Ok(());
        };

        let (width, height) = (
            renderer.surface_config().width,
            renderer.surface_config().height,
        );
        self.batch.reset();
        {
            let mut gfx = Graphics::new(renderer, &mut self.batch, width, height, self.scale_factor);
            update(&mut FrameContext {
                gfx: &mut gfx,
                input,
                timer,
            });
            gfx.flush();
        }
        trace!(
            "frame {}: {} vertices",
            timer.frame,
            self.batch.vertex_count()
        );

        {
            let mut r_pass = renderer.begin_render_pass(&mut frame.encoder, &frame.view);
            for batch in self.batch.iter_mut() {
                renderer.draw_batch(&mut r_pass, batch);
            }
        }

        renderer.end_frame(frame);
        Ok(())
    }

    fn resize(&mut self, w: u32, h: u32, scale_factor: f32, renderer: &mut Renderer) {
        renderer.resize(w, h);
        self.scale_factor = scale_factor;
    }

    fn on_quit(&mut self) {
        if let Some(f) = &mut self.on_quit {
            f();
        }
    }
}
