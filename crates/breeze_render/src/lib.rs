pub mod geometry_batch;
pub mod pipeline;
pub mod vertex;

pub use geometry_batch::GeometryBatch;
pub use vertex::Vertex;
pub use wgpu::RenderPass;

use log::{debug, warn};
use thiserror::Error;
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, Buffer, BufferUsages, Color, CommandEncoder,
    CreateSurfaceError, Device, DeviceDescriptor, LoadOp, Operations, PresentMode, Queue,
    RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterError, RequestAdapterOptions,
    RequestDeviceError, StoreOp, Surface, SurfaceConfiguration, SurfaceError, SurfaceTarget,
    SurfaceTexture, TextureView, WindowHandle,
    util::{BufferInitDescriptor, DeviceExt, new_instance_with_webgpu_detection},
};

use crate::pipeline::Pipelines;

/// Errors raised while bringing up or driving the GPU surface
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] CreateSurfaceError),
    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
    #[error("out of GPU memory")]
    OutOfMemory,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

struct RenderTarget {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

struct Gpu {
    device: Device,
    queue: Queue,
}

/// A surface texture being drawn this frame
pub struct Frame {
    pub view: TextureView,
    pub encoder: CommandEncoder,
    surface_texture: SurfaceTexture,
}

/// Low-level GPU renderer built on `wgpu`
///
/// Owns the surface, the flat-color pipeline & the camera uniform
pub struct Renderer {
    gpu: Gpu,
    target: RenderTarget,
    pipelines: Pipelines,
    camera_bind_group: BindGroup,
    camera_buffer: Buffer,
    clear_color: Color,
}

impl Renderer {
    /// Creates a new `Renderer` with a configured surface & pipeline
    ///
    /// Initializes `wgpu`, sets up an alpha-blended triangle pipeline & the camera uniform
    pub async fn new(
        inner_width: u32,
        inner_height: u32,
        window: impl Into<SurfaceTarget<'static>> + WindowHandle,
    ) -> Result<Renderer, RenderError> {
        let instance = new_instance_with_webgpu_detection(&Default::default()).await;
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&RequestAdapterOptions {
                // Force find adapter that can present to this surface
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;
        debug!("using adapter {:?}", adapter.get_info().name);
        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                #[cfg(target_arch = "wasm32")]
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let mut surface_cfg = surface
            .get_default_config(&adapter, inner_width.max(1), inner_height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;
        surface_cfg.present_mode = PresentMode::AutoVsync;
        surface.configure(&device, &surface_cfg);

        let camera_buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&CameraUniform {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            }),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });

        let pipelines = Pipelines::new(&device, surface_cfg.format);
        let camera_bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &pipelines.camera_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Ok(Renderer {
            gpu: Gpu { device, queue },
            target: RenderTarget {
                surface,
                config: surface_cfg,
            },
            pipelines,
            camera_bind_group,
            camera_buffer,
            clear_color: Color::BLACK,
        })
    }

    pub fn surface_config(&self) -> &SurfaceConfiguration {
        &self.target.config
    }

    fn reconfigure(&self) {
        self.target
            .surface
            .configure(&self.gpu.device, &self.target.config);
    }

    /// Begins a new frame, returning the surface view and command encoder
    ///
    /// `Ok(None)` means the surface wasn't ready & this frame should be skipped
    pub fn begin_frame(&mut self) -> Result<Option<Frame>, RenderError> {
        let surface_texture = match self.target.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(err @ (SurfaceError::Lost | SurfaceError::Outdated)) => {
                warn!("surface {err}, reconfiguring");
                self.reconfigure();
                return Ok(None);
            }
            Err(err) => {
                warn!("skipping frame: {err}");
                return Ok(None);
            }
        };

        let view = surface_texture.texture.create_view(&Default::default());
        let encoder = self.gpu.device.create_command_encoder(&Default::default());

        Ok(Some(Frame {
            view,
            encoder,
            surface_texture,
        }))
    }

    /// Ends the frame by submitting commands and presenting
    pub fn end_frame(&mut self, frame: Frame) {
        self.gpu.queue.submit(Some(frame.encoder.finish()));
        frame.surface_texture.present();
    }

    /// Uploads & draws a geometry batch within an existing render pass, then clears it
    pub fn draw_batch(&self, r_pass: &mut RenderPass<'_>, batch: &mut GeometryBatch) {
        if batch.is_empty() {
            return;
        }
        batch.upload(&self.gpu.device, &self.gpu.queue);

        r_pass.set_pipeline(&self.pipelines.primitive);
        r_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        batch.draw(r_pass);
        batch.clear();
    }

    pub fn begin_render_pass<'a>(
        &'a self,
        encoder: &'a mut CommandEncoder,
        view: &'a TextureView,
    ) -> RenderPass<'a> {
        encoder.begin_render_pass(&RenderPassDescriptor {
            label: Some("Primitive Pass"),
            color_attachments: &[Some(RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: Operations {
                    load: LoadOp::Clear(self.clear_color),
                    store: StoreOp::Store,
                },
            })],
            ..Default::default()
        })
    }

    /// Resizes the surface; zero-sized requests (minimized windows) are ignored
    pub fn resize(&mut self, w: u32, h: u32) {
        if w == 0 || h == 0 {
            return;
        }
        (self.target.config.width, self.target.config.height) = (w, h);
        self.reconfigure();
    }

    /// Enables/disables V‑Sync by changing the surface present mode
    ///
    /// `vsync = true` → [`PresentMode::Fifo`] (V‑Sync ON)
    /// `vsync = false` → [`PresentMode::AutoNoVsync`] (V‑Sync OFF)
    ///
    /// Reconfigures the surface immediately
    pub fn set_vsync(&mut self, on: bool) {
        self.target.config.present_mode = if on {
            PresentMode::Fifo
        } else {
            PresentMode::AutoNoVsync
        };
        self.reconfigure();
    }

    /// Sets the clear color from linear RGBA
    pub fn set_clear_color(&mut self, color: [f64; 4]) {
        self.clear_color = Color {
            r: color[0],
            g: color[1],
            b: color[2],
            a: color[3],
        };
    }

    /// Uploads the given view-projection matrix to the GPU for use in vertex transforms
    pub fn upload_camera_matrix(&mut self, view_proj: [[f32; 4]; 4]) {
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&CameraUniform { view_proj }),
        );
    }
}
