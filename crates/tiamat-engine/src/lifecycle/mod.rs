//! Application lifecycle state machine.
//!
//! The runtime delegates every phase transition to this module so that the
//! quit/teardown rules stay testable without a window or a GPU:
//! `Uninitialized → Running → Terminating`, with teardown running exactly once.

mod machine;

pub use machine::{Lifecycle, LifecycleEvent, Phase, Step};
