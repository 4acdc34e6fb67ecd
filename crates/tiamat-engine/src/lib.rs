//! Tiamat engine crate.
//!
//! This crate owns the platform + GPU runtime pieces behind the presentation
//! bootstrap: window/event loop, device + surface management, and the
//! application lifecycle state machine.

pub mod core;
pub mod device;
pub mod lifecycle;
pub mod window;

pub mod logging;
pub mod paint;
