//! JSON shapes served by the dashboard backend.
//!
//! Every field is optional so a partial payload still deserializes; the
//! render layer decides what a blank field looks like.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub temp: Option<f64>,
    pub code: Option<i32>,
    pub feels_like: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    pub pressure: Option<f64>,
}

/// One day of the daily forecast. `today` uses the same shape without `date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecast {
    pub date: Option<String>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub code: Option<i32>,
    pub uv_index: Option<f64>,
    pub precipitation: Option<f64>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlySample {
    pub time: String,
    pub temp: Option<f64>,
    pub code: Option<i32>,
    pub precipitation: Option<f64>,
}

/// `/api/weather`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherPayload {
    pub current: Option<CurrentConditions>,
    pub today: Option<DailyForecast>,
    pub tomorrow: Option<DailyForecast>,
    pub forecast: Vec<DailyForecast>,
    pub hourly: Vec<HourlySample>,
}

/// `/api/aqi`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQualityPayload {
    pub aqi: Option<f64>,
    pub pm25: Option<f64>,
}

/// `/api/time`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePayload {
    pub local: Option<String>,
    pub utc: Option<String>,
    /// Gregorian date, `"Mon, 15 Sep"`.
    pub date: Option<String>,
    /// Hebrew date, `"22 Elul 5785"`.
    pub hebrew: Option<String>,
}

/// `/api/next-meeting`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextMeetingPayload {
    pub title: Option<String>,
    /// Pre-formatted countdown, e.g. `"2h 5m"`.
    #[serde(rename = "in")]
    pub starts_in: Option<String>,
    pub start_time: Option<String>,
}

/// One `/api/news` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub source: Option<String>,
    pub published: Option<String>,
    pub summary: Option<String>,
}

/// `/api/red-alert`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedAlertPayload {
    pub status: Option<String>,
    pub last_alert_display: Option<String>,
    pub last_updated: Option<String>,
    pub alerts: Vec<String>,
    pub location_count: Option<u32>,
}

/// Calendar entry as served by `/api/calendar`. `start`/`end` are either an
/// RFC 3339 date-time or a bare `YYYY-MM-DD` for all-day events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarEvent {
    pub title: Option<String>,
    pub location: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `/api/calendar`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaPayload {
    pub today: Vec<CalendarEvent>,
    pub tomorrow: Vec<CalendarEvent>,
}

/// One `/api/emails` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailItem {
    pub id: Option<String>,
    pub account: Option<String>,
    pub subject: Option<String>,
    /// Raw `From` header, `"Name <addr@example.com>"`.
    pub from: Option<String>,
    pub received: Option<String>,
    pub snippet: Option<String>,
}

/// `/api/alerts`: the most recent alert, or an empty object when there is none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatestAlertPayload {
    pub title: Option<String>,
    pub location: Option<String>,
    pub when: Option<String>,
    pub text: Option<String>,
}

impl LatestAlertPayload {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Holiday {
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    /// `Religious`, `National`, `Memorial`, ...
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub days_until: Option<i64>,
    /// `"Tue, 23 Sep 2025"`
    pub formatted_date: Option<String>,
}

/// `/api/holidays/israel`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidaysPayload {
    pub holidays: Vec<Holiday>,
    pub count: Option<u32>,
    pub last_updated: Option<String>,
    pub source: Option<String>,
}

/// A titled instant such as candle lighting or havdalah.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimedEntry {
    pub title: Option<String>,
    pub time: Option<String>,
}

/// `/api/shabbat`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShabbatPayload {
    pub candle: Option<TimedEntry>,
    pub havdalah: Option<TimedEntry>,
    pub parsha: Option<String>,
    pub next_holiday: Option<String>,
    /// Already formatted, `"Sep 23"`.
    pub next_holiday_date: Option<String>,
}

/// Daily halachic times, each an RFC 3339 timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZmanimTimes {
    pub alot_hashachar: Option<String>,
    pub misheyakir: Option<String>,
    pub sunrise: Option<String>,
    pub sof_zman_shma_gra: Option<String>,
    pub sof_zman_tfilla_gra: Option<String>,
    pub chatzot: Option<String>,
    pub mincha_gedola: Option<String>,
    pub mincha_ketana: Option<String>,
    pub plag_hamincha: Option<String>,
    pub sunset: Option<String>,
    pub tzeit_hakochavim: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZmanimShabbat {
    pub parsha: Option<String>,
    pub candle_lighting: Option<TimedEntry>,
    pub havdalah: Option<TimedEntry>,
}

/// `/api/zmanim`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZmanimPayload {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub zmanim: ZmanimTimes,
    pub shabbat: ZmanimShabbat,
    pub location: Option<String>,
}
