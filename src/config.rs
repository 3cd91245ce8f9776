//! Run configuration for both counting zones.
//!
//! Every field has a default, so a JSON file only needs the values that
//! differ from the shipped setup:
//!
//! ```json
//! { "conveyor": { "rotation_deg": 12.5 }, "pallet": { "match_distance": 60 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::integration::BlobParams;
use crate::tracker::{Rect, ZoneConfig, ZoneKind};

/// Everything needed to run one zone: tracking plus detection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    #[serde(flatten)]
    pub tracking: ZoneConfig,
    /// Gray level above which a pixel becomes white before blob detection
    pub binarize_threshold: u8,
    /// RGB value written over pixels outside a rotated zone
    pub mask_fill: u8,
    pub blob: BlobParams,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self::conveyor()
    }
}

impl ZoneSettings {
    /// Box zone on the belt: small blobs, tight matching, rotatable.
    pub fn conveyor() -> Self {
        Self {
            tracking: ZoneConfig::default(),
            binarize_threshold: 127,
            mask_fill: 255,
            blob: BlobParams::default(),
        }
    }

    /// Pallet zone: axis-aligned, larger blobs, looser matching.
    pub fn pallet() -> Self {
        Self {
            tracking: ZoneConfig {
                roi: Rect::new(50, 340, 600, 140),
                rotation_deg: 0.0,
                match_distance: 50.0,
                ..ZoneConfig::default()
            },
            binarize_threshold: 127,
            mask_fill: 255,
            blob: BlobParams {
                min_area: 2000,
                max_area: 20000,
                ..BlobParams::default()
            },
        }
    }

    pub fn validate(&self, zone: ZoneKind) -> Result<(), ConfigError> {
        let tracking = &self.tracking;
        if !tracking.rotation_deg.is_finite() {
            return Err(ConfigError::Rotation {
                zone,
                value: tracking.rotation_deg,
            });
        }
        if !(tracking.match_distance.is_finite() && tracking.match_distance > 0.0) {
            return Err(ConfigError::MatchDistance {
                zone,
                value: tracking.match_distance,
            });
        }
        if tracking.max_track_frames == 0 {
            return Err(ConfigError::TrackFrames { zone });
        }

        let blob = &self.blob;
        if blob.min_area > blob.max_area {
            return Err(ConfigError::AreaRange {
                zone,
                min: blob.min_area,
                max: blob.max_area,
            });
        }
        let ratios = [
            ("min_convexity", blob.min_convexity),
            ("min_inertia_ratio", blob.min_inertia_ratio),
        ];
        for (name, value) in ratios {
            if let Some(value) = value {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::Ratio { zone, name, value });
                }
            }
        }
        Ok(())
    }
}

/// Configuration for a full counting run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub conveyor: ZoneSettings,
    pub pallet: ZoneSettings,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            conveyor: ZoneSettings::conveyor(),
            pallet: ZoneSettings::pallet(),
        }
    }
}

impl CounterConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.conveyor.validate(ZoneKind::Conveyor)?;
        self.pallet.validate(ZoneKind::Pallet)
    }

    pub fn zone(&self, kind: ZoneKind) -> &ZoneSettings {
        match kind {
            ZoneKind::Conveyor => &self.conveyor,
            ZoneKind::Pallet => &self.pallet,
        }
    }
}
