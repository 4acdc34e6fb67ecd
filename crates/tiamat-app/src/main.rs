use anyhow::Result;
use winit::dpi::LogicalSize;

use tiamat_engine::core::{App, AppControl, FrameCtx};
use tiamat_engine::device::GpuInit;
use tiamat_engine::logging::init_logging;
use tiamat_engine::paint::Color;
use tiamat_engine::window::{Runtime, RuntimeConfig};

const WINDOW_TITLE: &str = "Tiamat";
const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 600.0;

/// Purple, the canonical "the swapchain works" color.
const CLEAR_COLOR: Color = Color::rgb(0.5, 0.0, 0.5);

/// Clears the window to a solid color every frame. Nothing is drawn.
struct ClearApp;

impl App for ClearApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        ctx.clear(CLEAR_COLOR)
    }
}

fn main() -> Result<()> {
    init_logging("info");

    let config = RuntimeConfig {
        title: WINDOW_TITLE.to_string(),
        initial_size: LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
    };

    Runtime::run(config, GpuInit::default(), ClearApp)
}
