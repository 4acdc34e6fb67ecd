use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::lifecycle::{Lifecycle, LifecycleEvent, Phase, Step};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "tiamat".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the application to completion.
    ///
    /// The event loop drives init once, frames repeatedly, and teardown
    /// exactly once; any startup failure exits the loop with an error logged.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        if let Some(e) = state.startup_error.take() {
            return Err(e);
        }

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    window_id: Option<WindowId>,
    lifecycle: Lifecycle,
    startup_error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            window_id: None,
            lifecycle: Lifecycle::new(),
            startup_error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        log::info!("window created: \"{}\"", self.config.title);

        let gpu_init = self.gpu_init.clone();

        // GPU acquisition is async under wgpu; block on it once at startup.
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        self.window_id = Some(entry.with_window(|w| w.id()));
        self.entry = Some(entry);
        self.lifecycle.initialized();

        log::info!("application initialized");
        Ok(())
    }

    /// Releases the GPU context and window exactly once.
    fn shutdown(&mut self) {
        if !self.lifecycle.begin_shutdown() {
            return;
        }

        if let Some(entry) = self.entry.take() {
            // Ouroboros drops the GPU context (queue, device, surface,
            // instance) before the window it borrows.
            drop(entry);
            log::info!("shutdown complete");
        }
        self.window_id = None;
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.lifecycle.phase() != Phase::Uninitialized {
            return;
        }

        if let Err(e) = self.initialize(event_loop) {
            log::error!("startup failed: {e:#}");
            self.startup_error = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.phase() == Phase::Terminating {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; FIFO presentation paces the loop.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.window_id != Some(window_id) {
            return;
        }

        // Quit requests and key presses end the application.
        if self.lifecycle.on_event(classify_window_event(&event)) == Step::Shutdown {
            self.shutdown();
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            if self.lifecycle.on_event(LifecycleEvent::Quit) == Step::Shutdown {
                self.shutdown();
                event_loop.exit();
            }
            return;
        }

        match &event {
            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                let mut control = AppControl::Continue;

                // Split borrows to avoid `self` capture inside `ouroboros` closures.
                let (app, entry) = (&mut self.app, self.entry.as_mut());

                if let Some(entry) = entry {
                    entry.with_mut(|fields| {
                        let mut ctx = FrameCtx {
                            window: WindowCtx {
                                id: window_id,
                                window: fields.window,
                            },
                            gpu: fields.gpu,
                        };

                        control = app.on_frame(&mut ctx);
                    });
                }

                // A fatal frame is terminal for the whole application.
                if control == AppControl::Exit
                    && self.lifecycle.on_frame_failure() == Step::Shutdown
                {
                    self.shutdown();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shutdown();
    }
}

/// Maps a winit event onto the lifecycle vocabulary.
///
/// Close requests and any key press (no key-specific logic, no repeats
/// filtered) request termination; everything else is ignored.
fn classify_window_event(event: &WindowEvent) -> LifecycleEvent {
    match event {
        WindowEvent::CloseRequested => LifecycleEvent::Quit,

        WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
            LifecycleEvent::KeyDown
        }

        _ => LifecycleEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn close_requested_is_quit() {
        assert_eq!(
            classify_window_event(&WindowEvent::CloseRequested),
            LifecycleEvent::Quit
        );
    }

    #[test]
    fn unrelated_events_are_ignored() {
        assert_eq!(
            classify_window_event(&WindowEvent::Focused(true)),
            LifecycleEvent::Other
        );
        assert_eq!(
            classify_window_event(&WindowEvent::Moved(PhysicalPosition::new(10, 20))),
            LifecycleEvent::Other
        );
    }
}
