// Asset management system
//
// Provides the named asset cache, the declarative manifest it is filled
// from, and resource path resolution.

mod cache;
mod loader;
pub mod manifest;

pub use cache::AssetCache;
pub use loader::{AssetKind, ResourceLocator};
pub use manifest::{LoadPhase, Manifest};

use std::path::PathBuf;

/// Asset registration and lookup errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("{kind} `{name}` is already registered")]
    DuplicateRegistration { kind: AssetKind, name: String },

    #[error("{kind} `{name}` is not registered")]
    NotFound { kind: AssetKind, name: String },

    #[error("Failed to load {kind} `{name}` from {}: {reason}", .path.display())]
    LoadFailed {
        kind: AssetKind,
        name: String,
        path: PathBuf,
        reason: String,
    },

    #[error("The loading sequence has already run")]
    SequenceAlreadyRun,

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// Whether the error only makes one manifest entry unusable
    ///
    /// Load failures of gameplay assets are reported and skipped; every other
    /// error is a programming or configuration mistake.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AssetError::LoadFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound {
            kind: AssetKind::Image,
            name: "PlayButton".to_string(),
        };
        assert_eq!(err.to_string(), "image `PlayButton` is not registered");

        let err = AssetError::LoadFailed {
            kind: AssetKind::Sound,
            name: "Hit".to_string(),
            path: PathBuf::from("sounds/hit.wav"),
            reason: "file not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load sound `Hit` from sounds/hit.wav: file not found"
        );
    }

    #[test]
    fn test_only_load_failures_are_recoverable() {
        let load = AssetError::LoadFailed {
            kind: AssetKind::Music,
            name: "Background1".to_string(),
            path: PathBuf::from("sounds/Halo.mp3"),
            reason: "decode error".to_string(),
        };
        let duplicate = AssetError::DuplicateRegistration {
            kind: AssetKind::Font,
            name: "Menu".to_string(),
        };

        assert!(load.is_recoverable());
        assert!(!duplicate.is_recoverable());
        assert!(!AssetError::SequenceAlreadyRun.is_recoverable());
    }
}
