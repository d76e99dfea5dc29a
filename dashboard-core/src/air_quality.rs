//! Air-quality banding for the AQI and PM2.5 badges.
//!
//! Both scales share the same six severity bands but use separate breakpoint
//! tables. A value sitting exactly on a breakpoint belongs to the lower band.

use std::fmt;

/// Severity bands, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AirQualityBand {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AirQualityBand {
    pub fn label(&self) -> &'static str {
        match self {
            AirQualityBand::Good => "Good",
            AirQualityBand::Moderate => "Moderate",
            AirQualityBand::UnhealthyForSensitive => "USG",
            AirQualityBand::Unhealthy => "Unhealthy",
            AirQualityBand::VeryUnhealthy => "Very Unhealthy",
            AirQualityBand::Hazardous => "Hazardous",
        }
    }

    /// Stylesheet class the dashboard attaches to the badge.
    pub fn css_class(&self) -> &'static str {
        match self {
            AirQualityBand::Good => "aqi-good",
            AirQualityBand::Moderate => "aqi-moderate",
            AirQualityBand::UnhealthyForSensitive => "aqi-usg",
            AirQualityBand::Unhealthy => "aqi-unhealthy",
            AirQualityBand::VeryUnhealthy => "aqi-very-unhealthy",
            AirQualityBand::Hazardous => "aqi-hazardous",
        }
    }
}

impl fmt::Display for AirQualityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds for AQI (dimensionless index).
const AQI_BREAKPOINTS: &[(f64, AirQualityBand)] = &[
    (50.0, AirQualityBand::Good),
    (100.0, AirQualityBand::Moderate),
    (150.0, AirQualityBand::UnhealthyForSensitive),
    (200.0, AirQualityBand::Unhealthy),
    (300.0, AirQualityBand::VeryUnhealthy),
];

/// EPA upper bounds for PM2.5 in µg/m³.
const PM25_BREAKPOINTS: &[(f64, AirQualityBand)] = &[
    (12.0, AirQualityBand::Good),
    (35.4, AirQualityBand::Moderate),
    (55.4, AirQualityBand::UnhealthyForSensitive),
    (150.4, AirQualityBand::Unhealthy),
    (250.4, AirQualityBand::VeryUnhealthy),
];

fn classify(value: Option<f64>, breakpoints: &[(f64, AirQualityBand)]) -> Option<AirQualityBand> {
    let v = value.filter(|v| !v.is_nan())?;

    let band = breakpoints
        .iter()
        .find(|(upper, _)| v <= *upper)
        .map(|(_, band)| *band)
        .unwrap_or(AirQualityBand::Hazardous);

    Some(band)
}

/// Band for an AQI reading. `None` when the reading is missing or NaN.
pub fn classify_aqi(value: Option<f64>) -> Option<AirQualityBand> {
    classify(value, AQI_BREAKPOINTS)
}

/// Band for a PM2.5 concentration. `None` when the reading is missing or NaN.
pub fn classify_pm25(value: Option<f64>) -> Option<AirQualityBand> {
    classify(value, PM25_BREAKPOINTS)
}

/// Class list and text for a rendered badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub class: String,
    pub label: String,
}

impl Badge {
    const BASE_CLASS: &'static str = "badge";

    /// A badge with no classification applied.
    pub fn blank() -> Self {
        Self { class: Self::BASE_CLASS.to_string(), label: String::new() }
    }

    pub fn from_band(band: Option<AirQualityBand>) -> Self {
        match band {
            Some(band) => Self {
                class: format!("{} {}", Self::BASE_CLASS, band.css_class()),
                label: band.label().to_string(),
            },
            None => Self::blank(),
        }
    }

    pub fn for_aqi(value: Option<f64>) -> Self {
        Self::from_band(classify_aqi(value))
    }

    pub fn for_pm25(value: Option<f64>) -> Self {
        Self::from_band(classify_pm25(value))
    }

    pub fn is_blank(&self) -> bool {
        self.label.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AirQualityBand::*;

    #[test]
    fn aqi_boundaries_fall_into_lower_band() {
        assert_eq!(classify_aqi(Some(0.0)), Some(Good));
        assert_eq!(classify_aqi(Some(50.0)), Some(Good));
        assert_eq!(classify_aqi(Some(50.01)), Some(Moderate));
        assert_eq!(classify_aqi(Some(100.0)), Some(Moderate));
        assert_eq!(classify_aqi(Some(150.0)), Some(UnhealthyForSensitive));
        assert_eq!(classify_aqi(Some(200.0)), Some(Unhealthy));
        assert_eq!(classify_aqi(Some(300.0)), Some(VeryUnhealthy));
        assert_eq!(classify_aqi(Some(300.01)), Some(Hazardous));
        assert_eq!(classify_aqi(Some(999.0)), Some(Hazardous));
    }

    #[test]
    fn pm25_boundaries_fall_into_lower_band() {
        assert_eq!(classify_pm25(Some(12.0)), Some(Good));
        assert_eq!(classify_pm25(Some(12.1)), Some(Moderate));
        assert_eq!(classify_pm25(Some(35.4)), Some(Moderate));
        assert_eq!(classify_pm25(Some(35.5)), Some(UnhealthyForSensitive));
        assert_eq!(classify_pm25(Some(55.4)), Some(UnhealthyForSensitive));
        assert_eq!(classify_pm25(Some(150.4)), Some(Unhealthy));
        assert_eq!(classify_pm25(Some(250.4)), Some(VeryUnhealthy));
        assert_eq!(classify_pm25(Some(250.41)), Some(Hazardous));
    }

    #[test]
    fn labels_match_dashboard_text() {
        assert_eq!(classify_aqi(Some(50.0)).map(|b| b.label()), Some("Good"));
        assert_eq!(classify_aqi(Some(120.0)).map(|b| b.label()), Some("USG"));
        assert_eq!(classify_aqi(Some(300.0)).map(|b| b.label()), Some("Very Unhealthy"));
        assert_eq!(classify_pm25(Some(251.0)).map(|b| b.label()), Some("Hazardous"));
    }

    #[test]
    fn missing_or_nan_readings_are_not_classified() {
        assert_eq!(classify_aqi(None), None);
        assert_eq!(classify_aqi(Some(f64::NAN)), None);
        assert_eq!(classify_pm25(None), None);
        assert_eq!(classify_pm25(Some(f64::NAN)), None);
    }

    #[test]
    fn badges_carry_class_and_label() {
        let badge = Badge::for_pm25(Some(40.0));
        assert_eq!(badge.class, "badge aqi-usg");
        assert_eq!(badge.label, "USG");

        let blank = Badge::for_aqi(None);
        assert!(blank.is_blank());
        assert_eq!(blank.class, "badge");
    }
}
