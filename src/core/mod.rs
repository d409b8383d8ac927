// Shared value types used across the engine and game layers

pub mod color;
pub mod math;

pub use color::Color;
pub use math::{filled_width, Rect};
