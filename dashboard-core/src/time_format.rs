//! Time and date formatting for the dashboard widgets.
//!
//! Every function takes the reference instant (or time zone) explicitly, so
//! output is a pure function of its arguments. Callers pass `Local::now()`.
//!
//! Malformed input never raises: each formatter has a documented fallback
//! string that the widget renders in place of a value.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt;

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Placeholder for a missing or unreadable timestamp.
pub const MISSING: &str = "—";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse an ISO-8601 / RFC 3339 / RFC 2822 timestamp into `tz`.
///
/// Timestamps without an offset (`2025-09-15T14:00`) are read as wall-clock
/// time in `tz`. A bare date is midnight UTC.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(tz));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
}

fn elapsed_ms<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> Option<i64> {
    let then = parse_timestamp(raw, &now.timezone())?;
    Some(now.timestamp_millis() - then.timestamp_millis())
}

/// Compact age used in the email list: `now`, `5m`, `3h`, `2d`.
///
/// Future timestamps clamp to `now`; unparseable input yields `""`.
pub fn relative_time<Tz: TimeZone>(timestamp: &str, now: &DateTime<Tz>) -> String {
    let Some(diff) = elapsed_ms(timestamp, now) else {
        log::debug!("relative_time: unparseable timestamp {timestamp:?}");
        return String::new();
    };

    let minutes = diff.max(0) / MS_PER_MINUTE;
    if minutes < 1 {
        return "now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h");
    }

    format!("{}d", hours / 24)
}

/// "Last updated" line on the alert card.
///
/// Uses its own thresholds and ends in a calendar date instead of a day
/// count; it is intentionally not shared with [`relative_time`].
pub fn last_updated_label<Tz: TimeZone>(timestamp: Option<&str>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let Some(raw) = timestamp else {
        return MISSING.to_string();
    };
    let Some(then) = parse_timestamp(raw, &now.timezone()) else {
        return MISSING.to_string();
    };

    let minutes = (now.timestamp_millis() - then.timestamp_millis()).div_euclid(MS_PER_MINUTE);
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes}m ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }

    then.format("%-m/%-d/%Y").to_string()
}

/// Age line on news cards: `3d ago`, `5h ago`, `12m ago`, never below `1m`.
pub fn time_ago_label<Tz: TimeZone>(published: Option<&str>, now: &DateTime<Tz>) -> String {
    let Some(diff) = published.and_then(|p| elapsed_ms(p, now)) else {
        return "Recently".to_string();
    };

    let hours = diff.div_euclid(MS_PER_HOUR);
    let days = hours.div_euclid(24);

    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else {
        let minutes = diff.div_euclid(MS_PER_MINUTE);
        format!("{}m ago", minutes.max(1))
    }
}

/// Time left until an event, e.g. candle lighting: `1d 2h 5m` or `2h 5m`.
pub fn countdown_label(delta: Duration) -> String {
    let total = delta.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let mins = (total % 3_600) / 60;

    if days > 0 {
        format!("{days}d {hours}h {mins}m")
    } else {
        format!("{hours}h {mins}m")
    }
}

/// `HH:MM` in `tz`, 24-hour clock.
pub fn clock_label<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    parse_timestamp(timestamp, tz)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Hourly strip label, `14:00`. Hours are not zero-padded.
pub fn hour_label<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    parse_timestamp(timestamp, tz)
        .map(|dt| dt.format("%-H:00").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Short weekday name, `Mon`.
pub fn weekday_label<Tz: TimeZone>(timestamp: &str, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    parse_timestamp(timestamp, tz)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Alert banner time: `HH:MM`, suffixed with `(-nD)` when the alert fired on
/// an earlier civil day.
pub fn alert_time_label<Tz: TimeZone>(timestamp: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let Some(then) = parse_timestamp(timestamp, &now.timezone()) else {
        return String::new();
    };

    let day_diff = (now.date_naive() - then.date_naive()).num_days();
    let clock = then.format("%H:%M");

    if day_diff > 0 {
        format!("{clock} (-{day_diff}D)")
    } else {
        clock.to_string()
    }
}

/// Holiday card countdown.
pub fn days_until_label(days: i64) -> String {
    match days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("in {n} days"),
    }
}

/// Gregorian half of the header date, e.g. `Mon, 15 Sep`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GregorianParts {
    pub weekday: String,
    pub day: String,
    pub month: String,
}

impl GregorianParts {
    /// Split `"Ddd, D Mon"`. Missing pieces stay empty.
    pub fn parse(raw: &str) -> Self {
        let mut halves = raw.split(", ");
        let weekday = halves.next().unwrap_or_default().to_string();
        let mut day_month = halves.next().unwrap_or_default().split(' ');

        Self {
            weekday,
            day: day_month.next().unwrap_or_default().to_string(),
            month: day_month.next().unwrap_or_default().to_string(),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            weekday: date.format("%a").to_string(),
            day: date.day().to_string(),
            month: date.format("%b").to_string(),
        }
    }
}

/// Hebrew half of the header date, e.g. `22 Elul 5785`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HebrewParts {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl HebrewParts {
    /// Split `"D Month YYYY"` on single spaces. Missing pieces stay empty.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(' ');
        let mut next = || parts.next().unwrap_or_default().to_string();

        Self { day: next(), month: next(), year: next() }
    }
}

/// Gregorian and Hebrew date shown together in the dashboard header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualCalendarDate {
    pub gregorian: GregorianParts,
    pub hebrew: HebrewParts,
}

impl DualCalendarDate {
    pub fn new(gregorian: GregorianParts, hebrew: HebrewParts) -> Self {
        Self { gregorian, hebrew }
    }

    /// Build from the two strings served by `/api/time`.
    pub fn parse(english: &str, hebrew: &str) -> Self {
        Self::new(GregorianParts::parse(english), HebrewParts::parse(hebrew))
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DualCalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.gregorian;
        let h = &self.hebrew;
        write!(
            f,
            "{}, {}, {} | {}, {}, {}",
            g.weekday.to_uppercase(),
            g.day,
            g.month.to_uppercase(),
            h.day,
            h.month.to_uppercase(),
            h.year,
        )
    }
}

/// `"MON, 15, SEP | 22, ELUL, 5785"` from `"Mon, 15 Sep"` and `"22 Elul 5785"`.
pub fn combined_date_label(english: &str, hebrew: &str) -> String {
    DualCalendarDate::parse(english, hebrew).label()
}
