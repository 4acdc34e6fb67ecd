use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Present mode (swap behavior).
    ///
    /// FIFO is vsync-locked and broadly supported; it also paces the frame
    /// loop, so no manual frame delay is needed anywhere.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference for the surface.
    ///
    /// If unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: wgpu::CompositeAlphaMode,

    /// Required wgpu features.
    ///
    /// Favor an empty set for portability unless a feature is strictly necessary.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Device/Queue
/// - negotiates and configures the Surface (swapchain)
/// - acquires frames and provides an encoder + view for rendering
///
/// The adapter is transient: it is consumed for device creation and the
/// capability query inside [`Gpu::new`] and not retained.
pub struct Gpu<'w> {
    // Field order is release order: fields drop in declaration order, so the
    // queue is released before the device, then the surface and instance.
    /// Command queue.
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; architecture must ensure the
    /// window outlives the `Gpu` instance.
    surface: wgpu::Surface<'w>,

    /// wgpu instance used to create the adapter and surface.
    instance: wgpu::Instance,

    /// Active surface configuration, including the negotiated format.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the
/// surface texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers block on
    /// this future once at startup (`pollster::block_on`). Every failure here
    /// is a startup failure: the error carries an operation-specific message
    /// and the caller is expected to end the process.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        // Use all backends to allow wgpu to select the optimal platform backend.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Surface lifetime is tied to `window` via `'w`.
        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tiamat device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        // Format-count check must precede any configure call.
        let surface_caps = surface.get_capabilities(&adapter);
        let format = select_surface_format(&surface_caps.formats)
            .context("surface reports no supported formats")?;

        let alpha_mode = if surface_caps.alpha_modes.contains(&init.alpha_mode) {
            init.alpha_mode
        } else {
            surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        log::info!(
            "configuring surface: {:?}, {}x{}, {:?}",
            format,
            config.width,
            config.height,
            config.present_mode
        );
        surface.configure(&device, &config);

        // `adapter` drops here; it is not part of the long-lived context.
        Ok(Gpu {
            queue,
            device,
            surface,
            instance,
            config,
            size,
        })
    }

    /// Returns the negotiated surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface after a resize.
    ///
    /// wgpu does not support configuring a surface with a 0x0 size; in that
    /// case only internal state is updated and configuration is deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            self.size = new_size;
            return;
        }

        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Acquires the next surface texture and creates an encoder.
    ///
    /// Runs non-blocking device housekeeping first (completed async work is
    /// released here). The view covers the whole texture: 2D, one mip level,
    /// one array layer.
    pub fn begin_frame(&self) -> std::result::Result<GpuFrame, SurfaceError> {
        if let Err(e) = self.device.poll(wgpu::PollType::Poll) {
            log::warn!("device housekeeping poll failed: {e}");
        }

        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor {
                label: Some("surface texture view"),
                dimension: Some(wgpu::TextureViewDimension::D2),
                base_mip_level: 0,
                mip_level_count: Some(1),
                base_array_layer: 0,
                array_layer_count: Some(1),
                ..Default::default()
            });

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tiamat frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Converts a `SurfaceError` into a higher-level action.
    ///
    /// Lost/outdated surfaces (resize races, compositor changes) are
    /// reconfigured in place instead of ending the process.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(&self.device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
            SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

/// Selects the surface format: the first format the surface reports.
///
/// Capability order is the adapter's preference order, so index zero is the
/// deterministic choice. Returns `None` when the list is empty, which callers
/// must treat as fatal before any configure call.
fn select_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_selection_takes_the_first_reported() {
        let formats = [
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            select_surface_format(&formats),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn format_selection_is_order_sensitive() {
        let reordered = [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8Unorm,
        ];
        assert_eq!(
            select_surface_format(&reordered),
            Some(wgpu::TextureFormat::Rgba8Unorm)
        );
    }

    #[test]
    fn empty_capability_list_yields_no_format() {
        assert_eq!(select_surface_format(&[]), None);
    }
}
