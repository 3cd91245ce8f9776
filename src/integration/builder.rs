//! Builder for zone settings.

use crate::config::ZoneSettings;
use crate::tracker::Rect;

/// Builder for [`ZoneSettings`], starting from the conveyor or pallet preset.
#[derive(Debug, Clone, Default)]
pub struct ZoneSettingsBuilder {
    settings: ZoneSettings,
}

impl ZoneSettingsBuilder {
    /// Start from the conveyor preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the pallet preset.
    pub fn pallet() -> Self {
        Self {
            settings: ZoneSettings::pallet(),
        }
    }

    /// Set the zone rectangle in TLWH format (x, y, width, height).
    pub fn roi(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.settings.tracking.roi = Rect::new(x, y, width, height);
        self
    }

    /// Set the zone rotation about its center, in degrees.
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.settings.tracking.rotation_deg = degrees;
        self
    }

    /// Set the association distance in pixels.
    pub fn match_distance(mut self, pixels: f32) -> Self {
        self.settings.tracking.match_distance = pixels;
        self
    }

    pub fn max_track_frames(mut self, frames: u32) -> Self {
        self.settings.tracking.max_track_frames = frames;
        self
    }

    pub fn binarize_threshold(mut self, level: u8) -> Self {
        self.settings.binarize_threshold = level;
        self
    }

    /// Set the accepted blob area range, `min` inclusive, `max` exclusive.
    pub fn area(mut self, min: u32, max: u32) -> Self {
        self.settings.blob.min_area = min;
        self.settings.blob.max_area = max;
        self
    }

    pub fn min_convexity(mut self, ratio: Option<f32>) -> Self {
        self.settings.blob.min_convexity = ratio;
        self
    }

    pub fn min_inertia_ratio(mut self, ratio: Option<f32>) -> Self {
        self.settings.blob.min_inertia_ratio = ratio;
        self
    }

    /// Detect bright blobs on a dark background instead of the reverse.
    pub fn bright_blobs(mut self) -> Self {
        self.settings.blob.blob_color = 255;
        self.settings.mask_fill = 0;
        self
    }

    /// Build the final `ZoneSettings`.
    pub fn build(self) -> ZoneSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_settings_builder() {
        let settings = ZoneSettingsBuilder::new()
            .roi(10, 20, 30, 40)
            .rotation(15.0)
            .match_distance(25.0)
            .area(100, 900)
            .build();

        assert_eq!(settings.tracking.roi, Rect::new(10, 20, 30, 40));
        assert_eq!(settings.tracking.rotation_deg, 15.0);
        assert_eq!(settings.tracking.match_distance, 25.0);
        assert_eq!(settings.blob.min_area, 100);
        assert_eq!(settings.blob.max_area, 900);
        assert_eq!(settings.binarize_threshold, 127);
    }

    #[test]
    fn test_pallet_preset() {
        let settings = ZoneSettingsBuilder::pallet().build();
        assert_eq!(settings, ZoneSettings::pallet());
    }

    #[test]
    fn test_bright_blobs() {
        let settings = ZoneSettingsBuilder::new().bright_blobs().build();
        assert_eq!(settings.blob.blob_color, 255);
        assert_eq!(settings.mask_fill, 0);
    }
}
