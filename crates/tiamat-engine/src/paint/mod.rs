//! Color type for clear values.

mod color;

pub use color::Color;
