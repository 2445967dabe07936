// Stormwatch - core/conditions.rs
//
// WMO weather-code interpretation and derived comfort metrics.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::util::constants;

/// Map a WMO weather interpretation code to a short display condition.
///
/// Open-Meteo reports these codes for both current conditions and daily
/// forecasts. The buckets deliberately collapse the fine-grained codes
/// (drizzle intensities, shower variants) into the handful of conditions
/// the dashboard can render.
pub fn condition_for_wmo_code(code: u8) -> &'static str {
    match code {
        0 => "Clear",
        1..=3 => "Partly Cloudy",
        4..=48 => "Foggy",
        49..=67 => "Rainy",
        68..=77 => "Snowy",
        78..=82 => "Rainy",
        83..=86 => "Snowy",
        87..=99 => "Thunderstorm",
        // Codes past the WMO table (providers occasionally invent them).
        _ => "Cloudy",
    }
}

/// Comfort score shown on the current-conditions card, 0-100.
///
/// Distance from a 24 degC / 50 % RH ideal, with temperature weighted
/// four times as heavily as humidity.
pub fn comfort_score(temperature_c: i32, humidity_pct: i32) -> i32 {
    let penalty = (24 - temperature_c).abs() * 4 + (50 - humidity_pct).abs();
    (100 - penalty.min(100)).clamp(0, 100)
}

/// True when humidity sits inside the stable indoor-comfort band.
pub fn humidity_is_comfortable(humidity_pct: i32) -> bool {
    (constants::HUMIDITY_COMFORT_MIN..=constants::HUMIDITY_COMFORT_MAX).contains(&humidity_pct)
}

/// True when wind is strong enough to warrant a gusty hint.
pub fn wind_is_gusty(wind_kmh: i32) -> bool {
    wind_kmh > constants::GUSTY_WIND_KMH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wmo_code_buckets() {
        assert_eq!(condition_for_wmo_code(0), "Clear");
        assert_eq!(condition_for_wmo_code(2), "Partly Cloudy");
        assert_eq!(condition_for_wmo_code(45), "Foggy");
        assert_eq!(condition_for_wmo_code(61), "Rainy");
        assert_eq!(condition_for_wmo_code(71), "Snowy");
        assert_eq!(condition_for_wmo_code(80), "Rainy"); // rain showers
        assert_eq!(condition_for_wmo_code(85), "Snowy"); // snow showers
        assert_eq!(condition_for_wmo_code(95), "Thunderstorm");
    }

    #[test]
    fn test_comfort_score_ideal_is_100() {
        assert_eq!(comfort_score(24, 50), 100);
    }

    #[test]
    fn test_comfort_score_degrades_with_heat_and_humidity() {
        // 31 degC / 82 % (a monsoon afternoon): 7*4 + 32 = 60 penalty.
        assert_eq!(comfort_score(31, 82), 40);
        // Far outside the envelope the score floors at 0.
        assert_eq!(comfort_score(48, 100), 0);
    }

    #[test]
    fn test_humidity_band() {
        assert!(humidity_is_comfortable(45));
        assert!(!humidity_is_comfortable(82));
        assert!(!humidity_is_comfortable(20));
    }

    #[test]
    fn test_gusty_threshold_is_exclusive() {
        assert!(!wind_is_gusty(25));
        assert!(wind_is_gusty(26));
    }
}
