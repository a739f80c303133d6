use serde::{Deserialize, Serialize};

use crate::operations::boundary::DEFAULT_ON_SEGMENT_TOLERANCE;

/// All pipeline parameters in one struct.
/// Loadable from JSON; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    // -- Boundary stage --
    /// Distance below which a junction point counts as lying on a merged line.
    pub on_segment_tolerance: f64,

    // -- Graph stage --
    /// What to do when two segments claim the same direction slot of a vertex.
    pub slot_conflict: SlotConflictPolicy,

    // -- Output --
    /// Category id written into every annotation record.
    pub category_id: u32,
    /// Target canvas `(width, height)` recorded in image records.
    pub resolution: (u32, u32),
}

/// Resolution of two segments writing the same direction slot of a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SlotConflictPolicy {
    /// The segment processed last wins.
    #[default]
    KeepLast,
    /// The segment processed first wins.
    KeepFirst,
    /// Fail the image with `GraphError::SlotConflict`.
    Error,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            on_segment_tolerance: DEFAULT_ON_SEGMENT_TOLERANCE,
            slot_conflict: SlotConflictPolicy::KeepLast,
            category_id: 1,
            resolution: (512, 512),
        }
    }
}

impl PipelineConfig {
    /// Loads a config from a JSON file; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an I/O or JSON error if the file cannot be read or parsed.
    pub fn from_json_file(path: &std::path::Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: PipelineConfig =
            serde_json::from_str(r#"{ "slot_conflict": "keep_first", "category_id": 3 }"#).unwrap();
        assert_eq!(cfg.slot_conflict, SlotConflictPolicy::KeepFirst);
        assert_eq!(cfg.category_id, 3);
        assert_eq!(cfg.resolution, (512, 512));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{ "resolution": [256, 128] }"#).unwrap();
        let cfg = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(cfg.resolution, (256, 128));
        assert_eq!(cfg.slot_conflict, SlotConflictPolicy::KeepLast);
    }
}
