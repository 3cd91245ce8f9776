//! Error types for configuration loading and frame processing.

use std::path::PathBuf;

use crate::tracker::ZoneKind;

/// Errors raised while loading or validating a [`CounterConfig`](crate::CounterConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{zone} zone: rotation must be a finite angle, got {value}")]
    Rotation { zone: ZoneKind, value: f64 },

    #[error("{zone} zone: match distance must be positive and finite, got {value}")]
    MatchDistance { zone: ZoneKind, value: f32 },

    #[error("{zone} zone: max_track_frames must be at least 1")]
    TrackFrames { zone: ZoneKind },

    #[error("{zone} zone: min_area {min} exceeds max_area {max}")]
    AreaRange { zone: ZoneKind, min: u32, max: u32 },

    #[error("{zone} zone: {name} must lie in [0, 1], got {value}")]
    Ratio {
        zone: ZoneKind,
        name: &'static str,
        value: f32,
    },
}

/// A zone's blob detector failed on the current frame.
#[derive(Debug, thiserror::Error)]
#[error("{zone} zone detector failed")]
pub struct PipelineError<E> {
    pub zone: ZoneKind,
    #[source]
    pub source: E,
}
