use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::data::model::RunBucket;

/// xkcd "light red", used for training runs.
pub const TRAINING_HEX: &str = "#ff474c";
/// xkcd "light blue", used for validation runs.
pub const VALIDATION_HEX: &str = "#95d0fc";
/// xkcd "crimson", used for the mean overlay.
pub const MEAN_HEX: &str = "#8c000f";

/// Parse a `#rrggbb` string into an egui colour.
pub fn hex_color(hex: &str) -> Option<Color32> {
    let rgb: Srgb<u8> = Srgb::from_str(hex).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Series colours: run bucket → Color32
// ---------------------------------------------------------------------------

/// Fixed colours for the two run buckets and the mean curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesColors {
    pub training: Color32,
    pub validation: Color32,
    pub mean: Color32,
}

impl Default for SeriesColors {
    fn default() -> Self {
        SeriesColors {
            training: hex_color(TRAINING_HEX).unwrap_or(Color32::RED),
            validation: hex_color(VALIDATION_HEX).unwrap_or(Color32::LIGHT_BLUE),
            mean: hex_color(MEAN_HEX).unwrap_or(Color32::DARK_RED),
        }
    }
}

impl SeriesColors {
    pub fn for_bucket(&self, bucket: RunBucket) -> Color32 {
        match bucket {
            RunBucket::Training => self.training,
            RunBucket::Validation => self.validation,
        }
    }

    /// Legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        vec![
            (RunBucket::Training.to_string(), self.training),
            (RunBucket::Validation.to_string(), self.validation),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_colors_parse() {
        assert_eq!(hex_color(TRAINING_HEX), Some(Color32::from_rgb(0xff, 0x47, 0x4c)));
        assert_eq!(hex_color(VALIDATION_HEX), Some(Color32::from_rgb(0x95, 0xd0, 0xfc)));
        assert_eq!(hex_color("not a colour"), None);
    }

    #[test]
    fn test_bucket_colors_are_distinct() {
        let colors = SeriesColors::default();
        assert_eq!(
            colors.for_bucket(RunBucket::classify("7.vd.csv")),
            colors.validation
        );
        assert_eq!(colors.for_bucket(RunBucket::classify("7.csv")), colors.training);
        assert_ne!(colors.training, colors.validation);
    }
}
