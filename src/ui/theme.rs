// Stormwatch - ui/theme.rs
//
// Colour scheme, severity colour mapping, condition glyphs, and layout
// constants. No dependencies on app state or business logic.

use crate::core::model::AlertSeverity;
use egui::Color32;

/// Colour for a given alert severity.
pub fn severity_colour(severity: &AlertSeverity) -> Color32 {
    match severity {
        AlertSeverity::Warning => Color32::from_rgb(244, 63, 94), // Rose 500
        AlertSeverity::Watch => Color32::from_rgb(217, 119, 6),   // Amber 600
        AlertSeverity::Advisory => Color32::from_rgb(129, 140, 248), // Indigo 400
    }
}

/// Background highlight colour for an alert card.
pub fn severity_bg_colour(severity: &AlertSeverity) -> Color32 {
    match severity {
        AlertSeverity::Warning => Color32::from_rgba_premultiplied(244, 63, 94, 25),
        AlertSeverity::Watch => Color32::from_rgba_premultiplied(217, 119, 6, 20),
        AlertSeverity::Advisory => Color32::from_rgba_premultiplied(129, 140, 248, 18),
    }
}

/// Glyph for a display condition. Matched on keywords so both the WMO
/// buckets ("Rainy") and OpenWeather's free text ("Rain", "Drizzle") hit.
pub fn condition_glyph(condition: &str) -> &'static str {
    let c = condition.to_lowercase();
    if c.contains("thunder") {
        "\u{26c8}" // ⛈
    } else if c.contains("snow") {
        "\u{2744}" // ❄
    } else if c.contains("rain") || c.contains("drizzle") || c.contains("shower") {
        "\u{1f327}" // 🌧
    } else if c.contains("fog") || c.contains("mist") || c.contains("haze") {
        "\u{1f32b}" // 🌫
    } else if c.contains("partly") {
        "\u{26c5}" // ⛅
    } else if c.contains("clear") || c.contains("sun") {
        "\u{2600}" // ☀
    } else if c.contains("humid") {
        "\u{1f4a7}" // 💧
    } else {
        "\u{2601}" // ☁ (cloud; also the fallback)
    }
}

/// Accent colours.
pub const ACCENT: Color32 = Color32::from_rgb(34, 211, 238); // Cyan 400
pub const ERROR_TEXT: Color32 = Color32::from_rgb(254, 205, 211); // Rose 200
pub const ERROR_BG: Color32 = Color32::from_rgba_premultiplied(136, 19, 55, 60);
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300
pub const MUTED_TEXT: Color32 = Color32::from_rgb(148, 163, 184); // Slate 400
pub const OK_TEXT: Color32 = Color32::from_rgb(134, 239, 172); // Green 300

/// Flood severity accent by index (0 = Low, 1 = Moderate, 2 = High).
pub fn flood_severity_colour(severity_index: u8) -> Color32 {
    match severity_index {
        0 => OK_TEXT,
        1 => WARNING_TEXT,
        _ => Color32::from_rgb(248, 113, 113), // Red 400
    }
}

/// Layout constants.
pub const CONTENT_MAX_WIDTH: f32 = 980.0;
pub const FORECAST_CARD_WIDTH: f32 = 110.0;
pub const ALERT_LIST_MAX_HEIGHT: f32 = 280.0;
pub const BIG_TEMP_SIZE: f32 = 46.0;
pub const SECTION_SPACING: f32 = 14.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_glyph_keywords() {
        assert_eq!(condition_glyph("Thunderstorm"), "\u{26c8}");
        assert_eq!(condition_glyph("Rain"), "\u{1f327}");
        assert_eq!(condition_glyph("Rainy"), "\u{1f327}");
        assert_eq!(condition_glyph("Partly Cloudy"), "\u{26c5}");
        assert_eq!(condition_glyph("Clear"), "\u{2600}");
        assert_eq!(condition_glyph("Humid & Cloudy"), "\u{1f4a7}");
        assert_eq!(condition_glyph("Clouds"), "\u{2601}");
        assert_eq!(condition_glyph("anything else"), "\u{2601}");
    }
}
