// RGBA colour value

use serde::{Deserialize, Serialize};

fn opaque() -> u8 {
    255
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Opaque colour from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether the RGB components match, ignoring alpha
    pub fn same_rgb(self, pixel: [u8; 4]) -> bool {
        self.r == pixel[0] && self.g == pixel[1] && self.b == pixel[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r": 255, "g": 0, "b": 255}"#).unwrap();
        assert_eq!(color, Color::rgb(255, 0, 255));
        assert_eq!(color.a, 255);
    }

    #[test]
    fn test_same_rgb_ignores_alpha() {
        assert!(Color::rgb(1, 2, 3).same_rgb([1, 2, 3, 0]));
        assert!(!Color::rgb(1, 2, 3).same_rgb([1, 2, 4, 255]));
    }
}
