//! Configuration system
//!
//! Detector tolerances and feature switches, loadable from TOML or RON.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Which candidate axes the separating-axis test examines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SatAxes {
    /// Face normals of both meshes only
    #[default]
    FaceNormals,
    /// Face normals plus cross products of every edge pair across the meshes
    FaceNormalsAndEdgeCrosses,
}

/// Cheap pre-filter run by the detector facade before the exact test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BroadPhase {
    /// Always run the narrow phase
    None,
    /// Axis-aligned bounding box overlap
    #[default]
    Aabb,
    /// Bounding sphere overlap
    Sphere,
}

/// Tolerances and switches for the collision detectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// `|n·v|` below this is treated as motion parallel to a plane
    pub parallel_epsilon: f32,
    /// Smallest moving-entity half-extent accepted for canonical scaling
    pub min_half_extent: f32,
    /// Component tolerance when deduplicating separating axes
    pub axis_dedup_epsilon: f32,
    /// Candidate axis set for the discrete test
    pub sat_axes: SatAxes,
    /// Pre-filter applied by [`crate::CollisionDetector`]
    pub broad_phase: BroadPhase,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            parallel_epsilon: 1e-6,
            min_half_extent: 1e-6,
            axis_dedup_epsilon: 1e-5,
            sat_axes: SatAxes::default(),
            broad_phase: BroadPhase::default(),
        }
    }
}

impl Config for DetectorConfig {}
