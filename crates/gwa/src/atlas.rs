//! Location of GWA mean wind-speed layers on disk.

use std::path::{Path, PathBuf};

use crate::error::GwaError;

/// File-name pattern of the GWA 2 global mean wind-speed layers.
pub const DEFAULT_PATTERN: &str = "WS_{height:03}m_global_wgs84_mean_trimmed.tif";

/// A directory of GWA mean wind-speed rasters, one per height.
///
/// File names come from a pattern in which `{height}` is replaced by the
/// height in metres and `{height:03}` by the zero-padded height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GwaAtlas {
    dir: PathBuf,
    pattern: String,
}

impl GwaAtlas {
    /// Atlas in `dir` using [`DEFAULT_PATTERN`].
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    /// Replaces the file-name pattern.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Directory holding the layers.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File-name pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Checks that the pattern contains a height placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`GwaError::InvalidPattern`] otherwise.
    pub fn validate(&self) -> Result<(), GwaError> {
        if !self.pattern.contains("{height}") && !self.pattern.contains("{height:03}") {
            return Err(GwaError::InvalidPattern {
                pattern: self.pattern.clone(),
            });
        }
        Ok(())
    }

    /// File name of the layer at `height` metres.
    pub fn file_name(&self, height: u32) -> String {
        self.pattern
            .replace("{height:03}", &format!("{height:03}"))
            .replace("{height}", &height.to_string())
    }

    /// Path of the layer at `height` metres.
    ///
    /// # Errors
    ///
    /// Returns [`GwaError::InvalidPattern`] for a pattern without placeholder
    /// and [`GwaError::MissingLayer`] if the file does not exist.
    pub fn path_for(&self, height: u32) -> Result<PathBuf, GwaError> {
        self.validate()?;
        let path = self.dir.join(self.file_name(height));
        if !path.exists() {
            return Err(GwaError::MissingLayer { height, path });
        }
        Ok(path)
    }
}

/// The pairs of GWA heights used to derive shear and roughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeightPair {
    /// 50 m and 100 m.
    #[default]
    Low,
    /// 100 m and 200 m.
    High,
    /// 50 m and 200 m.
    Wide,
}

impl HeightPair {
    /// `(low, high)` heights in metres.
    pub fn heights(self) -> (u32, u32) {
        match self {
            HeightPair::Low => (50, 100),
            HeightPair::High => (100, 200),
            HeightPair::Wide => (50, 200),
        }
    }
}

impl TryFrom<u8> for HeightPair {
    type Error = GwaError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(HeightPair::Low),
            1 => Ok(HeightPair::High),
            2 => Ok(HeightPair::Wide),
            _ => Err(GwaError::InvalidPair { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pattern_pads_height() {
        let atlas = GwaAtlas::new("/data/gwa");
        assert_eq!(atlas.file_name(50), "WS_050m_global_wgs84_mean_trimmed.tif");
        assert_eq!(atlas.file_name(200), "WS_200m_global_wgs84_mean_trimmed.tif");
    }

    #[test]
    fn plain_placeholder() {
        let atlas = GwaAtlas::new("/data").with_pattern("gwa{height}-like.tif");
        assert_eq!(atlas.file_name(50), "gwa50-like.tif");
    }

    #[test]
    fn pattern_without_placeholder_rejected() {
        let atlas = GwaAtlas::new("/data").with_pattern("gwa.tif");
        assert!(matches!(atlas.validate(), Err(GwaError::InvalidPattern { .. })));
        assert!(atlas.path_for(50).is_err());
    }

    #[test]
    fn missing_layer() {
        let atlas = GwaAtlas::new("/nonexistent/gwa");
        assert!(matches!(
            atlas.path_for(100),
            Err(GwaError::MissingLayer { height: 100, .. })
        ));
    }

    #[test]
    fn pair_ids() {
        assert_eq!(HeightPair::try_from(0).unwrap().heights(), (50, 100));
        assert_eq!(HeightPair::try_from(1).unwrap().heights(), (100, 200));
        assert_eq!(HeightPair::try_from(2).unwrap().heights(), (50, 200));
        assert!(matches!(
            HeightPair::try_from(3),
            Err(GwaError::InvalidPair { id: 3 })
        ));
    }
}
