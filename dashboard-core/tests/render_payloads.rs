//! Renders realistic backend payloads end to end.

use chrono::{DateTime, FixedOffset, TimeZone};
use dashboard_core::{
    TargetDay,
    model::{
        AgendaPayload, AirQualityPayload, EmailItem, HolidaysPayload, LatestAlertPayload,
        RedAlertPayload, ShabbatPayload, TimePayload, WeatherPayload, ZmanimPayload,
    },
    render::{
        agenda_view, air_quality_view, alert_banner_view, date_view, holidays_view, hourly_view,
        inbox_view, red_alert_view, shabbat_view, weather_view, zmanim_view,
    },
};

const WEATHER_JSON: &str = r#"{
  "current": {"temp": 27.6, "code": 3, "feels_like": 29.1, "humidity": 61,
              "wind_speed": 11.4, "wind_direction": 292, "pressure": 1011.8},
  "today": {"max": 31.2, "min": 21.0, "code": 1, "uv_index": 7.5, "precipitation": 0,
            "sunrise": "2025-09-15T06:24", "sunset": "2025-09-15T18:51"},
  "forecast": [
    {"date": "2025-09-15", "max": 31.2, "min": 21.0, "code": 1},
    {"date": "2025-09-16", "max": 29.8, "min": 20.4, "code": 61, "uv_index": 0,
     "precipitation": 2.4, "sunrise": "2025-09-16T06:25", "sunset": "2025-09-16T18:50"},
    {"date": "2025-09-17", "max": 28.0, "min": 19.9, "code": 95}
  ],
  "hourly": [
    {"time": "2025-09-15T09:00", "temp": 24.0, "code": 0, "precipitation": 0},
    {"time": "2025-09-15T10:00", "temp": 25.5, "code": 1, "precipitation": 0},
    {"time": "2025-09-15T11:00", "temp": 26.9, "code": 2, "precipitation": 0.1},
    {"time": "2025-09-16T00:00", "temp": 21.3, "code": 61, "precipitation": 5.3},
    {"time": "2025-09-16T01:00", "temp": 21.0, "code": 61}
  ]
}"#;

fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3 * 3600).unwrap().with_ymd_and_hms(2025, 9, 15, 10, 0, 0).unwrap()
}

fn weather() -> WeatherPayload {
    serde_json::from_str(WEATHER_JSON).expect("weather fixture should deserialize")
}

#[test]
fn weather_payload_renders_every_section() {
    let view = weather_view(&weather(), &now());

    let current = view.current.as_ref().expect("current");
    assert_eq!(current.temp, "28");
    assert_eq!(current.description, "Overcast");
    assert_eq!(current.wind_direction, "WNW");
    assert_eq!(current.pressure, "1012");

    let today = view.today.as_ref().expect("today");
    assert_eq!(today.uv_index, "7.5");
    assert_eq!(today.precipitation, "0");
    assert_eq!(today.sunrise.as_deref(), Some("06:24"));

    let tomorrow = view.tomorrow.as_ref().expect("tomorrow");
    assert_eq!(tomorrow.icon, "🌧️");
    assert_eq!(tomorrow.uv_index, "--");
    assert_eq!(tomorrow.precipitation, "2.4");

    let headers: Vec<_> = view.forecast.iter().map(|d| d.header.as_str()).collect();
    assert_eq!(headers, ["Today", "Tue", "Wed"]);

    let text = view.to_string();
    assert!(text.contains("Overcast"));
}

#[test]
fn hourly_tabs_split_the_series() {
    let wx = weather();

    let today = hourly_view(&wx, TargetDay::Today, &now());
    let labels: Vec<_> = today.hours.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, ["10:00", "11:00"]);

    let tomorrow = hourly_view(&wx, TargetDay::Tomorrow, &now());
    assert_eq!(tomorrow.hours.len(), 2);
    assert!(tomorrow.hours[0].high_precipitation);
    assert_eq!(tomorrow.hours[1].precipitation_pct, 0);
}

#[test]
fn partial_payloads_still_render() {
    let wx: WeatherPayload = serde_json::from_str(r#"{"current": {"temp": null}}"#).unwrap();
    let view = weather_view(&wx, &now());
    assert_eq!(view.current.map(|c| c.temp), Some("--".to_string()));
    assert!(view.forecast.is_empty());

    let aq: AirQualityPayload = serde_json::from_str(r#"{"aqi": null, "pm25": 38.2}"#).unwrap();
    let aq_view = air_quality_view(&aq);
    assert!(aq_view.aqi_badge.is_blank());
    assert_eq!(aq_view.pm25_badge.class, "badge aqi-usg");
}

#[test]
fn time_payload_builds_header_date() {
    let time: TimePayload = serde_json::from_str(
        r#"{"local": "13:05", "utc": "10:05", "date": "Tue, 2 Sep", "hebrew": "9 Elul 5785"}"#,
    )
    .unwrap();

    let view = date_view(&time);
    assert_eq!(view.combined.as_deref(), Some("TUE, 2, SEP | 9, ELUL, 5785"));
    assert!(view.to_string().starts_with("13:05  (UTC 10:05)"));
}

#[test]
fn alert_payload_with_locations() {
    let alert: RedAlertPayload = serde_json::from_str(
        r#"{"status": "active", "last_alert_display": "09:58",
            "last_updated": "2025-09-15T06:30:00Z",
            "alerts": ["Ashkelon", "Sderot"], "location_count": 2}"#,
    )
    .unwrap();

    let view = red_alert_view(&alert, &now());
    assert_eq!(view.status_text, "Last: 09:58");
    assert_eq!(view.count_text, "2 locations affected");
    // 06:30Z is 09:30 local, thirty minutes before now.
    assert_eq!(view.last_updated, "30m ago");
}

#[test]
fn email_list_shows_sender_and_age() {
    let items: Vec<EmailItem> = serde_json::from_str(
        r#"[
          {"id": "18f2", "account": "me@example.com", "subject": "Parent-teacher meeting",
           "from": "School Office <office@school.example>",
           "received": "Mon, 15 Sep 2025 06:12:44 +0000"},
          {"id": "18f3", "account": "me@example.com", "subject": null,
           "from": "alerts@bank.example", "received": "2025-09-14T05:00:00+03:00"}
        ]"#,
    )
    .unwrap();

    let view = inbox_view(&items, &now());
    assert_eq!(view.emails[0].sender, "School Office");
    assert_eq!(view.emails[0].age, "47m");
    assert_eq!(view.emails[1].subject, "(no subject)");
    assert_eq!(view.emails[1].age, "1d");
}

#[test]
fn agenda_payload_splits_days() {
    let agenda: AgendaPayload = serde_json::from_str(
        r#"{"today": [{"title": "Dentist", "location": "Emek Refaim 12",
                       "start": "2025-09-15T14:30:00+03:00", "end": "2025-09-15T15:00:00+03:00"}],
            "tomorrow": [{"title": "Grandma's birthday", "location": "",
                          "start": "2025-09-16", "end": "2025-09-17"}]}"#,
    )
    .unwrap();

    let view = agenda_view(&agenda, &now().timezone());
    assert_eq!(view.today[0].time, "14:30");
    assert_eq!(view.tomorrow[0].time, "All day");
    assert!(view.to_string().contains("14:30 — Dentist  @ Emek Refaim 12"));
}

#[test]
fn alert_banner_handles_both_empty_shapes_and_old_alerts() {
    let empty: LatestAlertPayload = serde_json::from_str("{}").unwrap();
    assert!(!alert_banner_view(&empty, &now()).active);

    let latest: LatestAlertPayload = serde_json::from_str(
        r#"{"title": "Rocket and missile fire", "location": "Nahal Oz",
            "when": "2025-09-14 23:41:00", "text": "Nahal Oz"}"#,
    )
    .unwrap();
    let banner = alert_banner_view(&latest, &now());
    assert!(banner.active);
    assert_eq!(banner.text, "Nahal Oz — 23:41 (-1D)");
}

#[test]
fn holidays_payload_counts_days() {
    let payload: HolidaysPayload = serde_json::from_str(
        r#"{"holidays": [
              {"name": "Rosh Hashana 5786", "date": "2025-09-23", "type": "Religious",
               "days_until": 8, "formatted_date": "Tue, 23 Sep 2025"},
              {"name": "Yom HaAtzma'ut", "date": "2026-04-22", "type": "National",
               "days_until": 219, "formatted_date": "Wed, 22 Apr 2026"}
            ],
            "count": 2, "last_updated": "2025-09-15T10:00:00+03:00", "source": "HebCal API"}"#,
    )
    .unwrap();

    let view = holidays_view(&payload);
    assert_eq!(view.holidays[0].kind, "Religious");
    assert_eq!(view.holidays[0].when, "in 8 days");
    assert_eq!(view.holidays[1].date, "Wed, 22 Apr 2026");
}

#[test]
fn shabbat_and_zmanim_payloads() {
    let sab: ShabbatPayload = serde_json::from_str(
        r#"{"candle": {"title": "Candle lighting: 18:05", "time": "2025-09-19T18:05:00+03:00"},
            "havdalah": {"title": "Havdalah: 19:18", "time": "2025-09-20T19:18:00+03:00"},
            "parsha": "Parashat Nitzavim", "next_holiday": "Rosh Hashana 5786",
            "next_holiday_date": "Sep 23"}"#,
    )
    .unwrap();
    let view = shabbat_view(&sab, &now());
    assert_eq!(view.candles, "Fri 18:05");
    assert_eq!(view.candles_in.as_deref(), Some("4d 8h 5m"));

    let zmanim: ZmanimPayload = serde_json::from_str(
        r#"{"date": "2025-09-15", "location": "Jerusalem",
            "zmanim": {"sunrise": "2025-09-15T06:24:00+03:00",
                       "sunset": "2025-09-15T18:51:00+03:00"},
            "shabbat": {"parsha": "Nitzavim",
                        "candle_lighting": {"title": "Candle lighting",
                                            "time": "2025-09-19T18:05:00+03:00"}}}"#,
    )
    .unwrap();
    let view = zmanim_view(&zmanim, &now().timezone());
    assert_eq!(view.candle_lighting, "18:05");
    assert_eq!(view.havdalah, "—");
    assert!(view.times.contains(&("Sunset", "18:51".to_string())));
}
