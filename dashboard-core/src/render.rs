//! Turns backend payloads into display strings, one view per widget.
//!
//! Views are plain data; attaching them to a page (or printing them, as the
//! CLI does through `Display`) is up to the caller. Missing numbers render as
//! `--`, matching the dashboard's placeholders.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use reqwest::Url;
use std::{collections::HashSet, fmt};

mod calendar;
mod inbox;

pub use calendar::{
    AgendaView, EventLine, HolidayView, HolidaysView, ShabbatView, ZmanimView, agenda_view,
    holidays_view, shabbat_view, zmanim_view,
};
pub use inbox::{EmailLine, InboxView, inbox_view, sender_name};

use crate::{
    air_quality::Badge,
    hourly::{TargetDay, select_day},
    model::{
        AirQualityPayload, DailyForecast, LatestAlertPayload, NewsItem, NextMeetingPayload,
        RedAlertPayload, TimePayload, WeatherPayload,
    },
    time_format::{
        alert_time_label, clock_label, combined_date_label, hour_label, last_updated_label,
        parse_timestamp, time_ago_label, weekday_label,
    },
    weather::{
        UNKNOWN_DESCRIPTION, UNKNOWN_ICON, compass_label, description_for, icon_for,
        is_high_precipitation, precipitation_percent,
    },
};

const PLACEHOLDER: &str = "--";

/// Most headlines the news widget lists.
pub const MAX_NEWS_ITEMS: usize = 10;

/// Nearest integer, halves rounding up (`-2.5` is `-2`).
fn rounded(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => ((v + 0.5).floor() as i64).to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Falsy values (missing or zero) show `fallback`.
fn or_fallback(value: Option<f64>, fallback: &str) -> String {
    match value.filter(|v| *v != 0.0 && v.is_finite()) {
        Some(v) => v.to_string(),
        None => fallback.to_string(),
    }
}

fn icon(code: Option<i32>) -> &'static str {
    code.map(icon_for).unwrap_or(UNKNOWN_ICON)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentView {
    pub temp: String,
    pub icon: &'static str,
    pub description: &'static str,
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub wind_direction: &'static str,
    pub pressure: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub high: String,
    pub low: String,
    pub icon: &'static str,
    pub uv_index: String,
    pub precipitation: String,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastDayView {
    pub header: String,
    pub icon: &'static str,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeatherView {
    pub current: Option<CurrentView>,
    pub today: Option<DayView>,
    pub tomorrow: Option<DayView>,
    pub forecast: Vec<ForecastDayView>,
}

fn day_view<Tz: TimeZone>(day: &DailyForecast, tz: &Tz) -> DayView
where
    Tz::Offset: fmt::Display,
{
    DayView {
        high: rounded(day.max),
        low: rounded(day.min),
        icon: icon(day.code),
        uv_index: or_fallback(day.uv_index, PLACEHOLDER),
        precipitation: or_fallback(day.precipitation, "0"),
        sunrise: day.sunrise.as_deref().map(|t| clock_label(t, tz)),
        sunset: day.sunset.as_deref().map(|t| clock_label(t, tz)),
    }
}

/// Civil date of a forecast entry. Plain `YYYY-MM-DD` is taken as-is.
fn forecast_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| parse_timestamp(raw, tz).map(|dt| dt.date_naive()))
}

fn forecast_header<Tz: TimeZone>(day: &DailyForecast, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let Some(raw) = day.date.as_deref() else {
        return PLACEHOLDER.to_string();
    };

    match forecast_date(raw, &now.timezone()) {
        Some(date) if date.day() == now.day() && date.month() == now.month() => {
            "Today".to_string()
        }
        Some(date) => date.format("%a").to_string(),
        None => weekday_label(raw, &now.timezone()),
    }
}

pub fn weather_view<Tz: TimeZone>(wx: &WeatherPayload, now: &DateTime<Tz>) -> WeatherView
where
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();

    let current = wx.current.as_ref().map(|c| CurrentView {
        temp: rounded(c.temp),
        icon: icon(c.code),
        description: c.code.map(description_for).unwrap_or(UNKNOWN_DESCRIPTION),
        feels_like: rounded(c.feels_like),
        humidity: rounded(c.humidity),
        wind_speed: rounded(c.wind_speed),
        wind_direction: compass_label(c.wind_direction),
        pressure: rounded(c.pressure),
    });

    // The second forecast entry is tomorrow; a served `tomorrow` block fills in
    // when the forecast is short.
    let tomorrow = wx.forecast.get(1).or(wx.tomorrow.as_ref()).map(|d| day_view(d, &tz));

    WeatherView {
        current,
        today: wx.today.as_ref().map(|d| day_view(d, &tz)),
        tomorrow,
        forecast: wx
            .forecast
            .iter()
            .map(|d| ForecastDayView {
                header: forecast_header(d, now),
                icon: icon(d.code),
                high: rounded(d.max),
                low: rounded(d.min),
            })
            .collect(),
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.current {
            Some(c) => {
                writeln!(f, "Now       {} {}°  {}", c.icon, c.temp, c.description)?;
                writeln!(
                    f,
                    "          feels {}°  humidity {}%  wind {} km/h {}  pressure {} hPa",
                    c.feels_like, c.humidity, c.wind_speed, c.wind_direction, c.pressure
                )?;
            }
            None => writeln!(f, "Now       no data")?,
        }

        for (name, day) in [("Today", &self.today), ("Tomorrow", &self.tomorrow)] {
            if let Some(d) = day {
                writeln!(
                    f,
                    "{name:<9} {} {}°/{}°  UV {}  rain {} mm  sun {}-{}",
                    d.icon,
                    d.high,
                    d.low,
                    d.uv_index,
                    d.precipitation,
                    d.sunrise.as_deref().unwrap_or(PLACEHOLDER),
                    d.sunset.as_deref().unwrap_or(PLACEHOLDER),
                )?;
            }
        }

        if !self.forecast.is_empty() {
            writeln!(f)?;
            for d in &self.forecast {
                writeln!(f, "{:<9} {} {}° {}°", d.header, d.icon, d.high, d.low)?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourView {
    pub label: String,
    pub icon: &'static str,
    pub temp: String,
    pub precipitation_pct: i64,
    pub high_precipitation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyView {
    pub day: TargetDay,
    pub hours: Vec<HourView>,
}

pub fn hourly_view<Tz: TimeZone>(
    wx: &WeatherPayload,
    day: TargetDay,
    now: &DateTime<Tz>,
) -> HourlyView
where
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    let hours = select_day(&wx.hourly, day, now)
        .into_iter()
        .map(|h| {
            let pct = precipitation_percent(h.precipitation);
            HourView {
                label: hour_label(&h.time, &tz),
                icon: icon(h.code),
                temp: rounded(h.temp),
                precipitation_pct: pct,
                high_precipitation: is_high_precipitation(pct),
            }
        })
        .collect();

    HourlyView { day, hours }
}

impl fmt::Display for HourlyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours.is_empty() {
            return writeln!(f, "No hourly data for {}", self.day);
        }

        for h in &self.hours {
            let flag = if h.high_precipitation { " !" } else { "" };
            writeln!(
                f,
                "{:>5} {} {:>3}° {:>3}%{flag}",
                h.label, h.icon, h.temp, h.precipitation_pct
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirQualityView {
    pub aqi: Option<String>,
    pub aqi_badge: Badge,
    pub pm25: Option<String>,
    pub pm25_badge: Badge,
}

pub fn air_quality_view(aq: &AirQualityPayload) -> AirQualityView {
    AirQualityView {
        aqi: aq.aqi.map(|v| rounded(Some(v))),
        aqi_badge: Badge::for_aqi(aq.aqi),
        pm25: aq.pm25.map(|v| rounded(Some(v))),
        pm25_badge: Badge::for_pm25(aq.pm25),
    }
}

impl fmt::Display for AirQualityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = |value: &Option<String>, badge: &Badge| match value {
            Some(v) if badge.is_blank() => v.clone(),
            Some(v) => format!("{v} ({})", badge.label),
            None => PLACEHOLDER.to_string(),
        };

        writeln!(f, "AQI    {}", line(&self.aqi, &self.aqi_badge))?;
        writeln!(f, "PM2.5  {}", line(&self.pm25, &self.pm25_badge))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateView {
    pub local: String,
    pub utc: String,
    /// Only set when both the Gregorian and Hebrew dates were served.
    pub combined: Option<String>,
}

pub fn date_view(time: &TimePayload) -> DateView {
    let present = |s: &Option<String>| s.as_deref().filter(|s| !s.is_empty()).map(str::to_owned);

    let combined = match (present(&time.date), present(&time.hebrew)) {
        (Some(date), Some(hebrew)) => Some(combined_date_label(&date, &hebrew)),
        _ => None,
    };

    DateView {
        local: time.local.clone().unwrap_or_else(|| "--:--".to_string()),
        utc: time.utc.clone().unwrap_or_else(|| "--:--".to_string()),
        combined,
    }
}

impl fmt::Display for DateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  (UTC {})", self.local, self.utc)?;
        if let Some(combined) = &self.combined {
            writeln!(f, "{combined}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingView {
    pub title: String,
    pub when: String,
}

pub fn meeting_view(next: &NextMeetingPayload) -> MeetingView {
    let when = match (&next.start_time, &next.title) {
        (Some(start), Some(_)) => {
            format!("{start} ({})", next.starts_in.as_deref().unwrap_or_default())
        }
        _ => next.starts_in.clone().unwrap_or_default(),
    };

    MeetingView {
        title: next.title.clone().unwrap_or_else(|| "No upcoming".to_string()),
        when,
    }
}

impl fmt::Display for MeetingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.when.is_empty() {
            writeln!(f, "{}", self.title)
        } else {
            writeln!(f, "{}  {}", self.title, self.when)
        }
    }
}

/// Well-known outlets, matched against the article host.
const NEWS_OUTLETS: &[(&str, &str)] = &[
    ("haaretz", "Haaretz"),
    ("jpost", "Jerusalem Post"),
    ("timesofisrael", "Times of Israel"),
    ("ynet", "Ynet"),
    ("i24news", "i24NEWS"),
    ("reuters", "Reuters"),
    ("bbc", "BBC"),
    ("cnn", "CNN"),
    ("ap.org", "AP News"),
];

/// Outlet name for a story: the served `source`, else derived from its link.
pub fn source_name(item: &NewsItem) -> String {
    if let Some(source) = item.source.as_deref().filter(|s| !s.is_empty()) {
        return source.to_string();
    }

    let host = item
        .link
        .as_deref()
        .and_then(|link| Url::parse(link).ok())
        .and_then(|url| url.host_str().map(str::to_lowercase));

    let Some(host) = host else {
        return "NEWS".to_string();
    };

    let name = NEWS_OUTLETS
        .iter()
        .find(|(needle, _)| host.contains(needle))
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| {
            host.replacen("www.", "", 1).split('.').next().unwrap_or_default().to_string()
        });

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => name,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineView {
    pub title: String,
    pub source: String,
    pub age: String,
    pub link: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsView {
    pub headlines: Vec<HeadlineView>,
}

/// Merge feeds in order, drop repeated titles, keep the first
/// [`MAX_NEWS_ITEMS`].
pub fn news_view<Tz: TimeZone>(feeds: &[Vec<NewsItem>], now: &DateTime<Tz>) -> NewsView {
    let mut seen = HashSet::new();

    let headlines = feeds
        .iter()
        .flatten()
        .filter(|item| seen.insert(item.title.clone()))
        .take(MAX_NEWS_ITEMS)
        .map(|item| HeadlineView {
            title: item.title.clone().unwrap_or_else(|| "(no title)".to_string()),
            source: source_name(item),
            age: time_ago_label(item.published.as_deref(), now),
            link: item.link.clone(),
            summary: item
                .summary
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        })
        .collect();

    NewsView { headlines }
}

impl fmt::Display for NewsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headlines.is_empty() {
            return writeln!(f, "No news");
        }
        for h in &self.headlines {
            writeln!(f, "{}  [{} • {}]", h.title, h.source, h.age)?;
            if let Some(summary) = &h.summary {
                writeln!(f, "    {summary}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedAlertView {
    pub status_class: String,
    pub status_text: String,
    pub last_updated: String,
    pub locations: Vec<String>,
    pub count_text: String,
}

pub fn red_alert_view<Tz: TimeZone>(alert: &RedAlertPayload, now: &DateTime<Tz>) -> RedAlertView
where
    Tz::Offset: fmt::Display,
{
    let status = alert.status.as_deref().unwrap_or_default();

    let status_text = match alert.last_alert_display.as_deref().filter(|s| !s.is_empty()) {
        Some(last) => format!("Last: {last}"),
        None => match status {
            "clear" => "No recent alerts",
            "active" => "Active Alert",
            "unknown" => "Status Unknown",
            "error" => "Connection Error",
            _ => "Checking...",
        }
        .to_string(),
    };

    let count_text = if alert.alerts.is_empty() {
        "No alerts".to_string()
    } else {
        let n = alert.location_count.unwrap_or(alert.alerts.len() as u32);
        format!("{n} location{} affected", if n == 1 { "" } else { "s" })
    };

    RedAlertView {
        status_class: format!("status-dot {status}"),
        status_text,
        last_updated: last_updated_label(alert.last_updated.as_deref(), now),
        locations: alert.alerts.clone(),
        count_text,
    }
}

impl fmt::Display for RedAlertView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  (updated {})", self.status_text, self.last_updated)?;
        for location in &self.locations {
            writeln!(f, "  {location}")?;
        }
        writeln!(f, "{}", self.count_text)
    }
}

/// Home-page banner for the most recent alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBannerView {
    /// Whether the red overlay is raised.
    pub active: bool,
    pub text: String,
}

pub fn alert_banner_view<Tz: TimeZone>(
    latest: &LatestAlertPayload,
    now: &DateTime<Tz>,
) -> AlertBannerView
where
    Tz::Offset: fmt::Display,
{
    if latest.is_empty() {
        return AlertBannerView { active: false, text: "No recent alerts".to_string() };
    }

    let what = [&latest.text, &latest.title, &latest.location]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(String::as_str)
        .unwrap_or_default();

    let when = latest.when.as_deref().map(|t| alert_time_label(t, now)).unwrap_or_default();

    let text = if when.is_empty() { what.to_string() } else { format!("{what} — {when}") };
    AlertBannerView { active: true, text }
}

impl fmt::Display for AlertBannerView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.active { "[!] " } else { "" };
        writeln!(f, "{marker}{}", self.text)
    }
}
