// Resource path resolution

use std::fmt;
use std::path::{Path, PathBuf};

/// The four asset categories held by the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Image,
    Sound,
    Music,
}

impl AssetKind {
    /// Get the resource directory for this asset kind
    ///
    /// Music and sound effects share one directory.
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetKind::Font => "fonts",
            AssetKind::Image => "images",
            AssetKind::Sound | AssetKind::Music => "sounds",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::Font => "font",
            AssetKind::Image => "image",
            AssetKind::Sound => "sound",
            AssetKind::Music => "music",
        };
        f.write_str(name)
    }
}

/// Maps a resource file name to its location under the resource root
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    base_path: PathBuf,
}

impl ResourceLocator {
    /// Create a new locator rooted at the given directory
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Get the full path for a resource file
    pub fn resolve(&self, kind: AssetKind, file: &str) -> PathBuf {
        self.base_path.join(kind.default_directory()).join(file)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_directories() {
        assert_eq!(AssetKind::Font.default_directory(), "fonts");
        assert_eq!(AssetKind::Image.default_directory(), "images");
        assert_eq!(AssetKind::Sound.default_directory(), "sounds");
        assert_eq!(AssetKind::Music.default_directory(), "sounds");
    }

    #[test]
    fn test_asset_kind_display() {
        assert_eq!(AssetKind::Music.to_string(), "music");
        assert_eq!(AssetKind::Image.to_string(), "image");
    }

    #[test]
    fn test_locator_path_resolution() {
        let locator = ResourceLocator::new("/game/Resources");
        let path = locator.resolve(AssetKind::Image, "deploy.jpg");
        assert_eq!(path, PathBuf::from("/game/Resources/images/deploy.jpg"));

        let path = locator.resolve(AssetKind::Music, "Halo.mp3");
        assert_eq!(path, PathBuf::from("/game/Resources/sounds/Halo.mp3"));
    }

    #[test]
    fn test_locator_resolves_real_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fonts")).unwrap();
        std::fs::write(dir.path().join("fonts/cour.ttf"), b"not really a font").unwrap();

        let locator = ResourceLocator::new(dir.path());
        assert_eq!(locator.base_path(), dir.path());
        assert!(locator.resolve(AssetKind::Font, "cour.ttf").is_file());
        assert!(!locator.resolve(AssetKind::Image, "cour.ttf").is_file());
    }
}
