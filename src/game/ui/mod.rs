// Menu widgets drawn from the asset cache

pub mod button;

pub use button::Button;
