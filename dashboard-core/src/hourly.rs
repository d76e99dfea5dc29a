//! Picks the hourly samples shown under the "Today" and "Tomorrow" tabs.

use anyhow::anyhow;
use chrono::{DateTime, Datelike, Duration, TimeZone};
use std::{convert::TryFrom, fmt};

use crate::{model::HourlySample, time_format::parse_timestamp};

/// Most samples a single tab shows.
pub const MAX_HOURLY_SAMPLES: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetDay {
    Today,
    Tomorrow,
}

impl TargetDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetDay::Today => "today",
            TargetDay::Tomorrow => "tomorrow",
        }
    }

    pub const fn all() -> &'static [TargetDay] {
        &[TargetDay::Today, TargetDay::Tomorrow]
    }

    /// Reference instant for this day; tomorrow is exactly 24h after `now`.
    fn anchor<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        match self {
            TargetDay::Today => now.clone(),
            TargetDay::Tomorrow => now.clone() + Duration::hours(24),
        }
    }
}

impl fmt::Display for TargetDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TargetDay {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "today" => Ok(TargetDay::Today),
            "tomorrow" => Ok(TargetDay::Tomorrow),
            _ => Err(anyhow!("Unknown day '{value}'. Expected: today, tomorrow.")),
        }
    }
}

/// Samples that fall on `target`'s civil day, in their original order.
///
/// Days are compared by day-of-month and month in `now`'s zone. For
/// [`TargetDay::Today`] samples strictly before `now` are dropped. The result
/// holds at most [`MAX_HOURLY_SAMPLES`] entries. Samples whose time cannot be
/// parsed never match.
pub fn select_day<Tz: TimeZone>(
    samples: &[HourlySample],
    target: TargetDay,
    now: &DateTime<Tz>,
) -> Vec<HourlySample> {
    let tz = now.timezone();
    let anchor = target.anchor(now);
    let (day, month) = (anchor.day(), anchor.month());

    samples
        .iter()
        .filter_map(|sample| match parse_timestamp(&sample.time, &tz) {
            Some(at) => Some((sample, at)),
            None => {
                log::debug!("dropping hourly sample with unreadable time {:?}", sample.time);
                None
            }
        })
        .filter(|(_, at)| at.day() == day && at.month() == month)
        .filter(|(_, at)| {
            target == TargetDay::Tomorrow || at.timestamp_millis() >= now.timestamp_millis()
        })
        .map(|(sample, _)| sample.clone())
        .take(MAX_HOURLY_SAMPLES)
        .collect()
}
