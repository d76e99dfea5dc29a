//! Weather-code and wind classification.
//!
//! Codes follow the WMO interpretation scheme used by Open-Meteo (0..=99).
//! Not every integer in that range is named; lookups fall back instead of
//! failing.

/// Glyph used when a code falls outside every band.
pub const UNKNOWN_ICON: &str = "❓";

/// Description used for codes missing from [`DESCRIPTIONS`].
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Inclusive upper bounds, checked in ascending order. First match wins.
const ICON_BANDS: &[(i32, &str)] = &[
    (0, "☀️"),
    (3, "⛅"),
    (48, "☁️"),
    (67, "🌧️"),
    (77, "❄️"),
    (86, "🌦️"),
    (99, "⛈️"),
];

const DESCRIPTIONS: &[(i32, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snow fall"),
    (73, "Moderate snow fall"),
    (75, "Heavy snow fall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// 16-point compass rose, clockwise from north.
pub const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Icon glyph for a weather code.
pub fn icon_for(code: i32) -> &'static str {
    if code < 0 {
        return UNKNOWN_ICON;
    }

    ICON_BANDS
        .iter()
        .find(|(upper, _)| code <= *upper)
        .map(|(_, icon)| *icon)
        .unwrap_or(UNKNOWN_ICON)
}

/// Human description for a weather code. Exact match only.
pub fn description_for(code: i32) -> &'static str {
    DESCRIPTIONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, text)| *text)
        .unwrap_or(UNKNOWN_DESCRIPTION)
}

/// Nearest 16-point compass label for a wind bearing in degrees.
///
/// Returns an empty string when the bearing is missing or not finite.
pub fn compass_label(degrees: Option<f64>) -> &'static str {
    let Some(deg) = degrees.filter(|d| d.is_finite()) else {
        return "";
    };

    let index = (deg / 22.5).round().rem_euclid(16.0) as usize;
    DIRECTIONS[index]
}

/// Rough chance-of-rain percentage derived from millimetres of precipitation.
pub fn precipitation_percent(mm: Option<f64>) -> i64 {
    (mm.unwrap_or(0.0) * 10.0).round() as i64
}

pub fn is_high_precipitation(percent: i64) -> bool {
    percent > 50
}
