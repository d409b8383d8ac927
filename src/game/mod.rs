// Game-side code: loading screen, menu and widgets

pub mod loading;
pub mod menu;
pub mod ui;
