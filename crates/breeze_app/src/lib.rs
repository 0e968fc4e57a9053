mod coordinate_converter;
pub mod input;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
use crate::coordinate_converter::create_desktop_converter;
use crate::{coordinate_converter::CoordinateConverter, input::Input, time::FrameTimer};
use log::{debug, error};
use std::{error::Error, sync::Arc};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    error::{EventLoopError, OsError},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::WindowId,
};
pub use winit::{event::WindowEvent, window::Window};

/// Boxed error from a handler's resource or frame code
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors that end the event loop
#[derive(Error, Debug)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] OsError),
    #[error("failed to create resource: {0}")]
    Resource(#[source] BoxError),
    #[error("frame failed: {0}")]
    Frame(#[source] BoxError),
}

pub struct AppConfig {
    pub title: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub resizable: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Breeze".to_string(),
            width: None,
            height: None,
            resizable: true,
        }
    }
}

/// Trait defining application behavior
///
/// Implement this for your app logic. Hooks are called during window creation,
/// every frame, on resize, & before quitting
#[allow(async_fn_in_trait)]
pub trait AppHandler<R> {
    /// Called for every WindowEvent before default input handling
    fn on_window_event(&mut self, _window: &Window, _event: &WindowEvent) {}
    /// Called once the window exists; should create & return the resource
    async fn with_resource(&mut self, window: Arc<Window>) -> Result<R, AppError>;
    /// Called after the resource is initialized & window is ready
    fn on_ready(&mut self, _window: &Window, _resource: &mut R) {}
    /// Called every frame; an error stops the event loop
    fn frame(
        &mut self,
        _window: &Window,
        _resource: &mut R,
        _input: &Input,
        _timer: &FrameTimer,
    ) -> Result<(), AppError> {
        Ok(())
    }
    /// Called on window resize, with the new physical size & scale factor
    fn resize(&mut self, _w: u32, _h: u32, _scale_factor: f32, _resource: &mut R) {}
    /// Called when the window is requested to close
    fn on_quit(&mut self) {}
}

/// Generic application entry point
///
/// Manages window creation, input, event loop, & delegating hooks
/// to your `AppHandler`
/// Use `AppRunner::new()` to construct it, then call `.run()` to start the loop
pub struct AppRunner<R: 'static, H: AppHandler<R> + 'static> {
    handler: Option<H>,
    resource: Option<R>,
    window: Option<Arc<Window>>,
    proxy: Option<EventLoopProxy<(R, H)>>,
    input: Input,
    timer: FrameTimer,
    config: AppConfig,
    coordinate_converter: Option<CoordinateConverter>,
    error: Option<AppError>,
}

impl<R, H: AppHandler<R> + 'static> AppRunner<R, H> {
    /// Creates a new runner with the given handler & configuration
    pub fn new(handler: H, config: AppConfig) -> Self {
        Self {
            handler: Some(handler),
            resource: None,
            window: None,
            proxy: None,
            input: Input::default(),
            timer: FrameTimer::default(),
            config,
            coordinate_converter: None,
            error: None,
        }
    }

    /// Starts the app & runs the event loop until the window closes or a hook fails
    pub fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::<(R, H)>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        self.proxy = Some(event_loop.create_proxy());

        init_logging();

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(self);
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            event_loop.run_app(&mut self)?;
            if let Some(err) = self.error.take() {
                return Err(err);
            }
        }
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        use winit::dpi::PhysicalSize;

        #[allow(unused_mut)]
        let mut attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_resizable(self.config.resizable);

        if let (Some(width), Some(height)) = (self.config.width, self.config.height) {
            attrs = attrs.with_inner_size(PhysicalSize::new(width, height));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            attrs = attrs.with_append(true);
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            attrs = attrs.with_visible(false);
        }

        attrs
    }

    fn update_converter(&mut self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(web_window) = web_sys::window() {
            self.coordinate_converter =
                Some(wasm_helpers::create_coordinate_converter(&web_window));
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(window) = self.window.as_ref() {
            let size = window.inner_size();
            self.coordinate_converter = Some(create_desktop_converter(
                (size.width as f32, size.height as f32),
                window.scale_factor() as f32,
            ));
        }
    }

    fn notify_resize(&mut self) {
        if let (Some(w), Some(r), Some(handler)) = (
            self.window.as_ref(),
            self.resource.as_mut(),
            self.handler.as_mut(),
        ) {
            let size = w.inner_size();
            let scale_factor = w.scale_factor() as f32;
            debug!("resize {}x{} @{scale_factor}", size.width, size.height);
            handler.resize(size.width, size.height, scale_factor, r);
        }
    }
}

#[doc(hidden)]
impl<R, H: AppHandler<R> + 'static> ApplicationHandler<(R, H)> for AppRunner<R, H> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // initializes the resource async (wasm) or sync (native), once
        let Some(proxy) = self.proxy.take() else {
            return;
        };
        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(err) => return self.fail(event_loop, err.into()),
        };
        self.window = Some(window.clone());
        let Some(mut handler) = self.handler.take() else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        {
            // Wait for DOM and canvas to be ready before initializing
            wasm_bindgen_futures::spawn_local(async move {
                match handler.with_resource(window).await {
                    Ok(resource) => _ = proxy.send_event((resource, handler)),
                    Err(err) => error!("{err}"),
                }
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            match pollster::block_on(handler.with_resource(window)) {
                Ok(resource) => _ = proxy.send_event((resource, handler)),
                Err(err) => self.fail(event_loop, err),
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        if let (Some(handler), Some(window)) = (&mut self.handler, &self.window) {
            handler.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(handler) = &mut self.handler {
                    handler.on_quit();
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let result = match (
                    self.window.as_ref(),
                    self.resource.as_mut(),
                    self.handler.as_mut(),
                ) {
                    (Some(w), Some(r), Some(handler)) => {
                        let result = handler.frame(w, r, &self.input, &self.timer);
                        self.timer.update();
                        self.input.end_frame();
                        result
                    }
                    _ => Ok(()),
                };
                if let Err(err) = result {
                    return self.fail(event_loop, err);
                }
                if let Some(w) = self.window.as_ref() {
                    w.request_redraw();
                }
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                // touch conversion depends on both size & DPI
                self.update_converter();
                self.notify_resize();
            }
            WindowEvent::KeyboardInput { event, .. } => self.input.keyboard(event),
            WindowEvent::MouseInput { button, state, .. } => self.input.mouse(button, state),
            WindowEvent::CursorMoved { position, .. } => self.input.cursor(position),
            WindowEvent::Touch(touch) => {
                let converter = self.coordinate_converter.unwrap_or_default();
                self.input.touch(touch, converter);
            }
            _ => {}
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, (resource, handler): (R, H)) {
        self.resource = Some(resource);
        self.handler = Some(handler);
        self.update_converter();

        let result = match (&mut self.resource, &mut self.handler, &self.window) {
            (Some(r), Some(h), Some(w)) => {
                h.on_ready(w, r);
                let size = w.inner_size();
                h.resize(size.width, size.height, w.scale_factor() as f32, r);

                let result = h.frame(w, r, &self.input, &self.timer);
                #[cfg(not(target_arch = "wasm32"))]
                w.set_visible(true);
                w.request_redraw();
                result
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }
}

/// Installs the logger once; later calls are no-ops
///
/// Defaults to `error`, overridable with `RUST_LOG` on native targets
fn init_logging() {
    #[cfg(all(feature = "log", target_arch = "wasm32"))]
    {
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));
        let _ = console_log::init_with_level(log::Level::Error);
    }
    #[cfg(all(feature = "log", not(target_arch = "wasm32")))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"))
            .try_init();
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_helpers {
    use super::coordinate_converter::{CoordinateConverter, DisplayInfo};
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlCanvasElement, Window};

    /// Extract canvas information from the DOM
    pub fn get_canvas_info(window: &Window) -> Option<DisplayInfo> {
        let document = window.document()?;
        let canvas = document.query_selector("canvas").ok()??;
        let canvas: HtmlCanvasElement = canvas.dyn_into().ok()?;

        Some(DisplayInfo {
            logical_width: canvas.client_width() as f32,
            logical_height: canvas.client_height() as f32,
            buffer_width: canvas.width() as f32,
            buffer_height: canvas.height() as f32,
        })
    }

    /// Create a CoordinateConverter by inspecting the DOM
    pub fn create_coordinate_converter(window: &Window) -> CoordinateConverter {
        let scale_factor = window.device_pixel_ratio() as f32;
        get_canvas_info(window)
            .map(|info| CoordinateConverter::new(info, scale_factor))
            .unwrap_or_default()
    }
}
