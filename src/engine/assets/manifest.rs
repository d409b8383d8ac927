// Declarative asset manifest and the fixed load-phase order

use super::{AssetError, AssetKind};
use crate::core::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One bulk-load step of the loading sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadPhase {
    Fonts,
    Images,
    Sounds,
    Music,
}

impl LoadPhase {
    /// Phases in the order they must be loaded
    pub const ORDER: [LoadPhase; 4] = [
        LoadPhase::Fonts,
        LoadPhase::Images,
        LoadPhase::Sounds,
        LoadPhase::Music,
    ];

    /// Asset kind populated by this phase
    pub fn kind(&self) -> AssetKind {
        match self {
            LoadPhase::Fonts => AssetKind::Font,
            LoadPhase::Images => AssetKind::Image,
            LoadPhase::Sounds => AssetKind::Sound,
            LoadPhase::Music => AssetKind::Music,
        }
    }

    /// Progress message shown while this phase loads
    pub fn message(&self) -> &'static str {
        match self {
            LoadPhase::Fonts => "Loading fonts...",
            LoadPhase::Images => "Loading images...",
            LoadPhase::Sounds => "Loading sounds...",
            LoadPhase::Music => "Loading music...",
        }
    }
}

/// A font to load at a fixed point size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontEntry {
    pub name: String,
    pub file: String,
    pub size: u32,
}

/// An image, optionally with one colour keyed out as transparent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<Color>,
}

/// A sound effect or music track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioEntry {
    pub name: String,
    pub file: String,
}

/// Static list of every gameplay asset, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub fonts: Vec<FontEntry>,
    pub images: Vec<ImageEntry>,
    pub sounds: Vec<AudioEntry>,
    pub music: Vec<AudioEntry>,
}

fn font(name: &str, file: &str, size: u32) -> FontEntry {
    FontEntry {
        name: name.to_string(),
        file: file.to_string(),
        size,
    }
}

fn image(name: impl Into<String>, file: impl Into<String>) -> ImageEntry {
    ImageEntry {
        name: name.into(),
        file: file.into(),
        transparent: None,
    }
}

fn audio(name: &str, file: &str) -> AudioEntry {
    AudioEntry {
        name: name.to_string(),
        file: file.to_string(),
    }
}

impl Manifest {
    /// The manifest shipped with the game
    pub fn standard() -> Self {
        let fonts = vec![
            font("ArialLarge", "arial.ttf", 85),
            font("Courier", "cour.ttf", 18),
            font("CourierSmall", "cour.ttf", 14),
            font("Menu", "ffaccess.ttf", 8),
            font("Time", "ffaccess.ttf", 15),
        ];

        let mut images = vec![
            // Backgrounds
            image("Menu", "main_page.jpg"),
            image("Discovery", "discover.jpg"),
            image("Deploy", "deploy.jpg"),
            image("Instructions", "instructions.jpg"),
            // Splashscreens
            image("YouLose", "youlose.jpg"),
            image("YouWin", "youwin.jpg"),
            // Deployment
            image("LeftRightButton", "deploy_dir_button_horiz.png"),
            image("UpDownButton", "deploy_dir_button_vert.png"),
            image("SelectedShip", "deploy_button_hl.png"),
            image("PlayButton", "deploy_play_button.png"),
            image("RandomButton", "deploy_randomize_button.png"),
        ];
        for i in 1..=5 {
            images.push(image(
                format!("ShipLR{i}"),
                format!("ship_deploy_horiz_{i}.png"),
            ));
            images.push(image(
                format!("ShipUD{i}"),
                format!("ship_deploy_vert_{i}.png"),
            ));
        }
        images.push(image("Explosion", "explosion.png"));
        images.push(image("Splash", "splash.png"));

        let sounds = vec![
            audio("Error", "error.wav"),
            audio("Hit", "hit.wav"),
            audio("Sink", "sink.wav"),
            audio("Siren", "siren.wav"),
            audio("Miss", "watershot.wav"),
            audio("Winner", "winner.wav"),
            audio("Lose", "lose.wav"),
            audio("Lose1", "Lose1.wav"),
            audio("Lose2", "Lose2.wav"),
            audio("Start1", "Start1.wav"),
            audio("Start2", "Start2.wav"),
            audio("Start3", "Start3.wav"),
            audio("Win1", "Win1.wav"),
            audio("Destroy1", "Destroy1.wav"),
            audio("Destroy2", "Destroy2.wav"),
            audio("Destroy3", "HitT1.wav"),
            audio("Destroy4", "HitT2.wav"),
        ];

        let music = vec![
            audio("Background1", "Halo.mp3"),
            audio("Background2", "unreal.mp3"),
            audio("Background3", "shortie.mp3"),
            audio("Background4", "deepblue.mp3"),
        ];

        Self {
            fonts,
            images,
            sounds,
            music,
        }
    }

    /// Parse a manifest from JSON text
    pub fn from_json(text: &str) -> Result<Self, AssetError> {
        serde_json::from_str(text).map_err(|e| AssetError::InvalidManifest(e.to_string()))
    }

    /// Load a manifest from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Number of entries loaded by a phase
    pub fn entry_count(&self, phase: LoadPhase) -> usize {
        match phase {
            LoadPhase::Fonts => self.fonts.len(),
            LoadPhase::Images => self.images.len(),
            LoadPhase::Sounds => self.sounds.len(),
            LoadPhase::Music => self.music.len(),
        }
    }

    /// Names registered by a phase, in manifest order
    #[cfg(test)]
    pub fn names(&self, phase: LoadPhase) -> Vec<&str> {
        match phase {
            LoadPhase::Fonts => self.fonts.iter().map(|e| e.name.as_str()).collect(),
            LoadPhase::Images => self.images.iter().map(|e| e.name.as_str()).collect(),
            LoadPhase::Sounds => self.sounds.iter().map(|e| e.name.as_str()).collect(),
            LoadPhase::Music => self.music.iter().map(|e| e.name.as_str()).collect(),
        }
    }

    /// Total number of entries across all phases
    pub fn len(&self) -> usize {
        LoadPhase::ORDER.iter().map(|p| self.entry_count(*p)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_phase_order() {
        let kinds: Vec<AssetKind> = LoadPhase::ORDER.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                AssetKind::Font,
                AssetKind::Image,
                AssetKind::Sound,
                AssetKind::Music
            ]
        );
        assert_eq!(LoadPhase::Images.message(), "Loading images...");
    }

    #[test]
    fn test_standard_manifest_contents() {
        let manifest = Manifest::standard();

        assert_eq!(manifest.entry_count(LoadPhase::Fonts), 5);
        assert_eq!(manifest.entry_count(LoadPhase::Images), 23);
        assert_eq!(manifest.entry_count(LoadPhase::Sounds), 17);
        assert_eq!(manifest.entry_count(LoadPhase::Music), 4);
        assert_eq!(manifest.len(), 49);

        let images = manifest.names(LoadPhase::Images);
        assert!(images.contains(&"ShipLR5"));
        assert!(images.contains(&"ShipUD1"));
        assert!(images.contains(&"PlayButton"));
    }

    #[test]
    fn test_standard_manifest_names_unique_per_phase() {
        let manifest = Manifest::standard();
        for phase in LoadPhase::ORDER {
            let names = manifest.names(phase);
            let unique: HashSet<&str> = names.iter().copied().collect();
            assert_eq!(unique.len(), names.len(), "duplicate name in {:?}", phase);
        }
    }

    #[test]
    fn test_manifest_from_json() {
        let manifest = Manifest::from_json(
            r#"{
                "fonts": [{ "name": "Courier", "file": "cour.ttf", "size": 18 }],
                "images": [
                    { "name": "Menu", "file": "main_page.jpg" },
                    {
                        "name": "Ship",
                        "file": "ship.png",
                        "transparent": { "r": 255, "g": 0, "b": 255 }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.fonts[0].size, 18);
        assert_eq!(manifest.images[0].transparent, None);
        assert_eq!(manifest.images[1].transparent, Some(Color::rgb(255, 0, 255)));
        assert!(manifest.sounds.is_empty());
        assert!(manifest.music.is_empty());
    }

    #[test]
    fn test_manifest_from_json_rejects_garbage() {
        let result = Manifest::from_json(r#"{ "fonts": [{ "name": "NoSize" }] }"#);
        assert!(matches!(result, Err(AssetError::InvalidManifest(_))));
    }

    #[test]
    fn test_manifest_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let text = serde_json::to_string(&Manifest::standard()).unwrap();
        std::fs::write(&path, text).unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest, Manifest::standard());
    }

    #[test]
    fn test_manifest_missing_file() {
        let result = Manifest::from_file("/nonexistent/manifest.json");
        assert!(matches!(result, Err(AssetError::Io(_))));
    }
}
