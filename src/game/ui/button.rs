// Clickable image button

use crate::core::{Color, Rect};
use crate::engine::assets::{AssetCache, AssetError};
use crate::engine::host::Display;
use glam::IVec2;

/// Font family used for every button label
pub const LABEL_FAMILY: &str = "Arial";

/// A sprite with a declared hit area and an optional text label
///
/// The hit area comes from `set_size`, not from the image, so a button can
/// react to a region larger or smaller than what it draws.
pub struct Button<H: Display> {
    sprite: H::Sprite,
    position: IVec2,
    width: i32,
    height: i32,
    label: String,
    label_size: u32,
    /// Screen position of the label
    label_offset: IVec2,
    selected: bool,
}

impl<H: Display> Button<H> {
    /// Create a button showing the cached image `image_name`
    pub fn new(host: &mut H, cache: &AssetCache<H>, image_name: &str) -> Result<Self, AssetError> {
        let image = cache.image(image_name)?;
        let sprite = host.create_sprite(image);

        Ok(Self {
            sprite,
            position: IVec2::ZERO,
            width: 0,
            height: 0,
            label: String::new(),
            label_size: 0,
            label_offset: IVec2::ZERO,
            selected: false,
        })
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = IVec2::new(x, y);
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_label(&mut self, text: impl Into<String>, size: u32) {
        self.label = text.into();
        self.label_size = size;
    }

    pub fn set_label_offset(&mut self, x: i32, y: i32) {
        self.label_offset = IVec2::new(x, y);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Declared hit area
    pub fn area(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Check whether `point` falls inside the hit area
    pub fn hit_test(&self, point: IVec2) -> bool {
        self.area().contains(point)
    }

    pub fn draw(&self, host: &mut H) {
        host.draw_sprite(&self.sprite, self.position);
        if !self.label.is_empty() {
            host.draw_label(
                &self.label,
                Color::BLACK,
                LABEL_FAMILY,
                self.label_size,
                self.label_offset.x,
                self.label_offset.y,
            );
        }
    }

    /// Free the button's sprite
    pub fn release(self, host: &mut H) {
        host.free_sprite(self.sprite);
    }
}
