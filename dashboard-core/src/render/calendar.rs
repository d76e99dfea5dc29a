//! Calendar-shaped widgets: the two-day agenda, upcoming holidays, the
//! Friday Shabbat card and the daily zmanim table.

use chrono::{DateTime, NaiveDate, TimeZone};
use std::fmt;

use crate::{
    model::{
        AgendaPayload, CalendarEvent, HolidaysPayload, ShabbatPayload, TimedEntry, ZmanimPayload,
    },
    time_format::{MISSING, clock_label, countdown_label, days_until_label, parse_timestamp},
};

/// Clock time in `tz`; `—` when the backend sent nothing.
fn zman<Tz: TimeZone>(raw: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    match raw {
        Some(raw) => clock_label(raw, tz),
        None => MISSING.to_string(),
    }
}

fn entry_time(entry: &Option<TimedEntry>) -> Option<&str> {
    entry.as_ref().and_then(|e| e.time.as_deref())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    /// `HH:MM`, or `All day` for date-only events.
    pub time: String,
    pub title: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgendaView {
    pub today: Vec<EventLine>,
    pub tomorrow: Vec<EventLine>,
}

fn event_line<Tz: TimeZone>(ev: &CalendarEvent, tz: &Tz) -> EventLine
where
    Tz::Offset: fmt::Display,
{
    // Anything longer than `YYYY-MM-DD` carries a time of day.
    let time = match ev.start.as_deref() {
        Some(start) if start.len() > 10 => clock_label(start, tz),
        _ => "All day".to_string(),
    };

    EventLine {
        time,
        title: ev.title.clone().unwrap_or_else(|| "(no title)".to_string()),
        location: ev.location.clone().filter(|l| !l.is_empty()),
    }
}

pub fn agenda_view<Tz: TimeZone>(agenda: &AgendaPayload, tz: &Tz) -> AgendaView
where
    Tz::Offset: fmt::Display,
{
    AgendaView {
        today: agenda.today.iter().map(|ev| event_line(ev, tz)).collect(),
        tomorrow: agenda.tomorrow.iter().map(|ev| event_line(ev, tz)).collect(),
    }
}

impl fmt::Display for AgendaView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, events) in [("Today", &self.today), ("Tomorrow", &self.tomorrow)] {
            writeln!(f, "{name}")?;
            if events.is_empty() {
                writeln!(f, "  No events")?;
            }
            for ev in events {
                write!(f, "  {} — {}", ev.time, ev.title)?;
                match &ev.location {
                    Some(location) => writeln!(f, "  @ {location}")?,
                    None => writeln!(f)?,
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayView {
    pub name: String,
    pub date: String,
    pub kind: String,
    /// `Today`, `Tomorrow`, `in 8 days`.
    pub when: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HolidaysView {
    pub holidays: Vec<HolidayView>,
}

pub fn holidays_view(payload: &HolidaysPayload) -> HolidaysView {
    let holidays = payload
        .holidays
        .iter()
        .map(|h| HolidayView {
            name: h.name.clone().unwrap_or_default(),
            date: h.formatted_date.clone().or_else(|| h.date.clone()).unwrap_or_default(),
            kind: h.kind.clone().unwrap_or_default(),
            when: h.days_until.map(days_until_label).unwrap_or_default(),
        })
        .collect();

    HolidaysView { holidays }
}

impl fmt::Display for HolidaysView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.holidays.is_empty() {
            return writeln!(f, "No upcoming holidays found");
        }
        for h in &self.holidays {
            writeln!(f, "{:<24} {:<18} {:<10} {}", h.name, h.date, h.kind, h.when)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShabbatView {
    /// `Fri 18:05`
    pub candles: String,
    pub havdalah: String,
    pub parsha: String,
    /// Next major holiday with its date, `Sukkot (Oct 7)`.
    pub holiday: String,
    /// Countdown to candle lighting while it is still ahead.
    pub candles_in: Option<String>,
}

pub fn shabbat_view<Tz: TimeZone>(sab: &ShabbatPayload, now: &DateTime<Tz>) -> ShabbatView
where
    Tz::Offset: fmt::Display,
{
    let tz = now.timezone();
    let day_and_clock = |raw: Option<&str>| {
        raw.and_then(|r| parse_timestamp(r, &tz))
            .map(|dt| dt.format("%a %H:%M").to_string())
            .unwrap_or_else(|| MISSING.to_string())
    };

    let candle_at = entry_time(&sab.candle).and_then(|r| parse_timestamp(r, &tz));
    let candles_in = candle_at
        .filter(|at| at > now)
        .map(|at| countdown_label(at.signed_duration_since(now)));

    let mut holiday = sab.next_holiday.clone().unwrap_or_else(|| MISSING.to_string());
    if let Some(date) = &sab.next_holiday_date {
        holiday.push_str(&format!(" ({date})"));
    }

    ShabbatView {
        candles: day_and_clock(entry_time(&sab.candle)),
        havdalah: day_and_clock(entry_time(&sab.havdalah)),
        parsha: sab.parsha.clone().unwrap_or_else(|| MISSING.to_string()),
        holiday,
        candles_in,
    }
}

impl fmt::Display for ShabbatView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Candles   {}", self.candles)?;
        match &self.candles_in {
            Some(left) => writeln!(f, "  (in {left})")?,
            None => writeln!(f)?,
        }
        writeln!(f, "Havdalah  {}", self.havdalah)?;
        writeln!(f, "Parsha    {}", self.parsha)?;
        writeln!(f, "Holiday   {}", self.holiday)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZmanimView {
    /// `Monday, September 15, 2025`
    pub date: String,
    pub parsha: String,
    pub candle_lighting: String,
    pub havdalah: String,
    /// Daily times in the order the day runs.
    pub times: Vec<(&'static str, String)>,
}

pub fn zmanim_view<Tz: TimeZone>(data: &ZmanimPayload, tz: &Tz) -> ZmanimView
where
    Tz::Offset: fmt::Display,
{
    let z = &data.zmanim;
    let times = [
        ("Alot HaShachar", &z.alot_hashachar),
        ("Misheyakir", &z.misheyakir),
        ("Sunrise", &z.sunrise),
        ("Sof Zman Shma", &z.sof_zman_shma_gra),
        ("Sof Zman Tefillah", &z.sof_zman_tfilla_gra),
        ("Chatzot", &z.chatzot),
        ("Mincha Gedola", &z.mincha_gedola),
        ("Mincha Ketana", &z.mincha_ketana),
        ("Plag HaMincha", &z.plag_hamincha),
        ("Sunset", &z.sunset),
        ("Tzeit HaKochavim", &z.tzeit_hakochavim),
    ]
    .into_iter()
    .map(|(label, raw)| (label, zman(raw.as_deref(), tz)))
    .collect();

    let date = data
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string());

    ZmanimView {
        date,
        parsha: data.shabbat.parsha.clone().unwrap_or_else(|| MISSING.to_string()),
        candle_lighting: zman(entry_time(&data.shabbat.candle_lighting), tz),
        havdalah: zman(entry_time(&data.shabbat.havdalah), tz),
        times,
    }
}

impl fmt::Display for ZmanimView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.date)?;
        for (label, time) in &self.times {
            writeln!(f, "  {label:<18} {time}")?;
        }
        writeln!(
            f,
            "Parsha {}  candles {}  havdalah {}",
            self.parsha, self.candle_lighting, self.havdalah
        )
    }
}
