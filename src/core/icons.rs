//! Pure icon lookups for weather conditions and wind bearings.

use crate::core::WindBearing;

/// Material icon for a condition, as used when no image set is configured.
#[must_use]
pub fn condition_material_icon(condition: &str) -> &'static str {
    match condition {
        "clear-night" => "hass:weather-night",
        "cloudy" => "hass:weather-cloudy",
        "exceptional" => "hass:alert-circle-outline",
        "fog" => "hass:weather-fog",
        "hail" => "hass:weather-hail",
        "lightning" => "hass:weather-lightning",
        "lightning-rainy" => "hass:weather-lightning-rainy",
        "partlycloudy" => "hass:weather-partly-cloudy",
        "pouring" => "hass:weather-pouring",
        "rainy" => "hass:weather-rainy",
        "snowy" => "hass:weather-snowy",
        "snowy-rainy" => "hass:weather-snowy-rainy",
        "sunny" => "hass:weather-sunny",
        "windy" => "hass:weather-windy",
        "windy-variant" => "hass:weather-windy-variant",
        _ => "hass:help-circle-outline",
    }
}

/// Image file stem for a condition in the daytime image set.
#[must_use]
pub fn condition_image_day(condition: &str) -> &'static str {
    match condition {
        "clear-night" => "clear-night",
        "cloudy" => "cloudy",
        "exceptional" => "severe-thunderstorm",
        "fog" => "fog",
        "hail" => "hail",
        "lightning" => "scattered-thunderstorms",
        "lightning-rainy" => "scattered-thunderstorms",
        "partlycloudy" => "cloudy-3-day",
        "pouring" => "rainy-3",
        "rainy" => "rainy-2",
        "snowy" => "snowy-2",
        "snowy-rainy" => "rain-and-snow-mix",
        "sunny" => "clear-day",
        "windy" => "wind",
        "windy-variant" => "wind",
        _ => "cloudy",
    }
}

/// Image file stem for a condition in the night image set.
#[must_use]
pub fn condition_image_night(condition: &str) -> &'static str {
    match condition {
        "partlycloudy" => "cloudy-3-night",
        "rainy" => "rainy-2-night",
        "pouring" => "rainy-3-night",
        "snowy" => "snowy-2-night",
        "lightning" | "lightning-rainy" => "scattered-thunderstorms-night",
        "sunny" => "clear-night",
        other => condition_image_day(other),
    }
}

/// Arrow icons indexed by 45° sector; the last slot is the unknown fallback.
const BEARING_ICONS: [&str; 10] = [
    "arrow-down",
    "arrow-bottom-left",
    "arrow-left",
    "arrow-top-left",
    "arrow-up",
    "arrow-top-right",
    "arrow-right",
    "arrow-bottom-right",
    "arrow-down",
    "circle-outline",
];

/// Sector index in `0..=9` for a wind bearing (9 means unknown).
#[must_use]
pub fn bearing_icon_index(bearing: &WindBearing) -> usize {
    match bearing {
        WindBearing::Degrees(degrees) => {
            let sector = ((degrees + 22.5) / 45.0).trunc();
            if sector.is_finite() && (0.0..9.0).contains(&sector) {
                sector as usize
            } else {
                9
            }
        }
        WindBearing::Cardinal(cardinal) => match cardinal.as_str() {
            "N" => 0,
            "NNE" | "NE" => 1,
            "ENE" | "E" => 2,
            "ESE" | "SE" => 3,
            "SSE" | "S" => 4,
            "SSW" | "SW" => 5,
            "WSW" | "W" => 6,
            "WNW" | "NW" => 7,
            "NNW" => 8,
            _ => 9,
        },
    }
}

/// Arrow icon pointing where the wind blows to.
#[must_use]
pub fn bearing_icon(bearing: &WindBearing) -> &'static str {
    BEARING_ICONS[bearing_icon_index(bearing)]
}

/// Index into a 17-entry cardinal name table (N through NNW, then N again).
#[must_use]
pub fn cardinal_index(degrees: f64) -> Option<usize> {
    let index = ((degrees + 11.25) / 22.5).trunc();
    (index.is_finite() && (0.0..17.0).contains(&index)).then_some(index as usize)
}

#[cfg(test)]
mod tests {
    use super::{bearing_icon, cardinal_index};
    use crate::core::WindBearing;

    #[test]
    fn degrees_and_cardinals_agree() {
        assert_eq!(
            bearing_icon(&WindBearing::Degrees(90.0)),
            bearing_icon(&WindBearing::Cardinal("E".to_owned()))
        );
        assert_eq!(bearing_icon(&WindBearing::Degrees(350.0)), "arrow-down");
        assert_eq!(bearing_icon(&WindBearing::Cardinal("??".to_owned())), "circle-outline");
    }

    #[test]
    fn cardinal_index_wraps_to_north() {
        assert_eq!(cardinal_index(0.0), Some(0));
        assert_eq!(cardinal_index(355.0), Some(16));
        assert_eq!(cardinal_index(f64::NAN), None);
    }
}
