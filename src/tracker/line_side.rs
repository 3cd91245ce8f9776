use serde::{Deserialize, Serialize};

/// Position of a track relative to its zone's counting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    /// On or before the line (smaller y in the zone's unrotated frame)
    #[default]
    Above,
    /// Past the line
    Below,
}
