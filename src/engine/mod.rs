// Engine modules: assets, host boundary, renderer

pub mod assets;
pub mod host;
pub mod renderer;
