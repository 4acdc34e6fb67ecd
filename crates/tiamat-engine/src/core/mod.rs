//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform
//! loop) and the application: a per-frame context plus a small callback
//! contract, without leaking runtime internals into user code.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
