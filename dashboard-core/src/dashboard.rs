//! Polling loop state: the latest payload per widget plus the UI state.
//!
//! The last successful fetch wins. A fetch that yields no data leaves the
//! previously stored payload, and therefore the previous render, untouched.
//! Concurrent refreshes are not sequenced against each other.

use anyhow::anyhow;
use chrono::{DateTime, TimeZone};
use std::{convert::TryFrom, fmt, time::Duration};

use crate::{
    config::RefreshIntervals,
    model::{
        AgendaPayload, AirQualityPayload, EmailItem, HolidaysPayload, LatestAlertPayload,
        NewsItem, NextMeetingPayload, RedAlertPayload, ShabbatPayload, TimePayload,
        WeatherPayload, ZmanimPayload,
    },
    render,
    source::DashboardSource,
    state::{DashboardState, WeatherTab},
};

/// Second news feed merged into the headline list.
pub const LOCAL_NEWS_QUERY: &str = "Jerusalem";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Widget {
    Weather,
    Hourly,
    AirQuality,
    Date,
    Meeting,
    News,
    Alert,
    AlertBanner,
    Agenda,
    Email,
    Holidays,
    Shabbat,
    Zmanim,
}

impl Widget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Widget::Weather => "weather",
            Widget::Hourly => "hourly",
            Widget::AirQuality => "air",
            Widget::Date => "date",
            Widget::Meeting => "meeting",
            Widget::News => "news",
            Widget::Alert => "alert",
            Widget::AlertBanner => "banner",
            Widget::Agenda => "agenda",
            Widget::Email => "email",
            Widget::Holidays => "holidays",
            Widget::Shabbat => "shabbat",
            Widget::Zmanim => "zmanim",
        }
    }

    pub const fn all() -> &'static [Widget] {
        &[
            Widget::Date,
            Widget::AlertBanner,
            Widget::Agenda,
            Widget::Meeting,
            Widget::Weather,
            Widget::Hourly,
            Widget::AirQuality,
            Widget::Shabbat,
            Widget::Email,
            Widget::News,
            Widget::Alert,
            Widget::Zmanim,
            Widget::Holidays,
        ]
    }

    pub fn refresh_interval(&self, intervals: &RefreshIntervals) -> Duration {
        let secs = match self {
            Widget::Weather | Widget::Hourly => intervals.weather,
            Widget::AirQuality => intervals.air_quality,
            Widget::Date => intervals.time,
            Widget::Meeting => intervals.meeting,
            Widget::News => intervals.news,
            Widget::Alert | Widget::AlertBanner => intervals.alerts,
            Widget::Agenda => intervals.calendar,
            Widget::Email => intervals.emails,
            Widget::Holidays => intervals.holidays,
            Widget::Shabbat => intervals.shabbat,
            Widget::Zmanim => intervals.zmanim,
        };
        Duration::from_secs(secs)
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Widget {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Widget::all().iter().copied().find(|w| w.as_str() == lower).ok_or_else(|| {
            anyhow!(
                "Unknown widget '{value}'. Supported widgets: {}.",
                Widget::all().iter().map(Widget::as_str).collect::<Vec<_>>().join(", ")
            )
        })
    }
}

/// Latest payload received for each widget.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub weather: Option<WeatherPayload>,
    pub air_quality: Option<AirQualityPayload>,
    pub time: Option<TimePayload>,
    pub meeting: Option<NextMeetingPayload>,
    pub news: Option<Vec<Vec<NewsItem>>>,
    pub alert: Option<RedAlertPayload>,
    pub latest_alert: Option<LatestAlertPayload>,
    pub agenda: Option<AgendaPayload>,
    pub emails: Option<Vec<EmailItem>>,
    pub holidays: Option<HolidaysPayload>,
    pub shabbat: Option<ShabbatPayload>,
    pub zmanim: Option<ZmanimPayload>,
}

fn apply<T>(slot: &mut Option<T>, fresh: Option<T>) -> bool {
    match fresh {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

#[derive(Debug)]
pub struct Dashboard {
    source: Box<dyn DashboardSource>,
    pub state: DashboardState,
    snapshot: Snapshot,
}

impl Dashboard {
    pub fn new(source: Box<dyn DashboardSource>, state: DashboardState) -> Self {
        Self { source, state, snapshot: Snapshot::default() }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Fetch fresh data for `widget`. Returns whether anything new was stored.
    pub async fn refresh(&mut self, widget: Widget) -> bool {
        let s = &mut self.snapshot;
        let updated = match widget {
            Widget::Weather | Widget::Hourly => {
                apply(&mut s.weather, self.source.fetch_weather().await)
            }
            Widget::AirQuality => apply(&mut s.air_quality, self.source.fetch_air_quality().await),
            Widget::Date => apply(&mut s.time, self.source.fetch_time().await),
            Widget::Meeting => apply(&mut s.meeting, self.source.fetch_next_meeting().await),
            Widget::News => {
                let feeds: Vec<_> = [
                    self.source.fetch_news(None).await,
                    self.source.fetch_news(Some(LOCAL_NEWS_QUERY)).await,
                ]
                .into_iter()
                .flatten()
                .collect();
                apply(&mut s.news, (!feeds.is_empty()).then_some(feeds))
            }
            Widget::Alert => apply(&mut s.alert, self.source.fetch_red_alert().await),
            Widget::AlertBanner => {
                apply(&mut s.latest_alert, self.source.fetch_latest_alert().await)
            }
            Widget::Agenda => apply(&mut s.agenda, self.source.fetch_calendar().await),
            Widget::Email => apply(&mut s.emails, self.source.fetch_emails(None).await),
            Widget::Holidays => apply(&mut s.holidays, self.source.fetch_holidays().await),
            Widget::Shabbat => apply(&mut s.shabbat, self.source.fetch_shabbat().await),
            Widget::Zmanim => apply(&mut s.zmanim, self.source.fetch_zmanim().await),
        };

        if !updated {
            log::info!("{widget}: keeping previous data");
        }
        updated
    }

    pub async fn refresh_all(&mut self) {
        for widget in Widget::all() {
            // Hourly shares the weather payload.
            if *widget != Widget::Hourly {
                self.refresh(*widget).await;
            }
        }
    }

    /// Render `widget` from the stored payload, or `None` if nothing arrived yet.
    pub fn render<Tz: TimeZone>(&self, widget: Widget, now: &DateTime<Tz>) -> Option<String>
    where
        Tz::Offset: fmt::Display,
    {
        let s = &self.snapshot;
        let tz = now.timezone();
        let text = match widget {
            Widget::Weather => render::weather_view(s.weather.as_ref()?, now).to_string(),
            Widget::Hourly => {
                let wx = s.weather.as_ref()?;
                match self.state.weather_tab.hourly_day() {
                    Some(day) => render::hourly_view(wx, day, now).to_string(),
                    None => render::weather_view(wx, now).to_string(),
                }
            }
            Widget::AirQuality => render::air_quality_view(s.air_quality.as_ref()?).to_string(),
            Widget::Date => render::date_view(s.time.as_ref()?).to_string(),
            Widget::Meeting => render::meeting_view(s.meeting.as_ref()?).to_string(),
            Widget::News => render::news_view(s.news.as_ref()?, now).to_string(),
            Widget::Alert => render::red_alert_view(s.alert.as_ref()?, now).to_string(),
            Widget::AlertBanner => {
                render::alert_banner_view(s.latest_alert.as_ref()?, now).to_string()
            }
            Widget::Agenda => render::agenda_view(s.agenda.as_ref()?, &tz).to_string(),
            Widget::Email => render::inbox_view(s.emails.as_ref()?, now).to_string(),
            Widget::Holidays => render::holidays_view(s.holidays.as_ref()?).to_string(),
            Widget::Shabbat => render::shabbat_view(s.shabbat.as_ref()?, now).to_string(),
            Widget::Zmanim => render::zmanim_view(s.zmanim.as_ref()?, &tz).to_string(),
        };
        Some(text)
    }

    pub fn select_weather_tab(&mut self, tab: WeatherTab) {
        self.state.weather_tab = tab;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HourlySample;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    #[derive(Debug, Clone)]
    struct FakeSource {
        online: Arc<AtomicBool>,
        aqi: f64,
    }

    impl FakeSource {
        fn up<T>(&self, value: T) -> Option<T> {
            self.online.load(Ordering::SeqCst).then_some(value)
        }
    }

    #[async_trait]
    impl DashboardSource for FakeSource {
        async fn fetch_weather(&self) -> Option<WeatherPayload> {
            self.up(WeatherPayload {
                hourly: vec![
                    HourlySample { time: "2025-09-15T11:00:00Z".into(), ..Default::default() },
                    HourlySample { time: "2025-09-16T11:00:00Z".into(), ..Default::default() },
                ],
                ..Default::default()
            })
        }

        async fn fetch_air_quality(&self) -> Option<AirQualityPayload> {
            self.up(AirQualityPayload { aqi: Some(self.aqi), pm25: None })
        }

        async fn fetch_time(&self) -> Option<TimePayload> {
            self.up(TimePayload {
                date: Some("Mon, 15 Sep".into()),
                hebrew: Some("22 Elul 5785".into()),
                ..Default::default()
            })
        }

        async fn fetch_next_meeting(&self) -> Option<NextMeetingPayload> {
            self.up(NextMeetingPayload::default())
        }

        async fn fetch_news(&self, query: Option<&str>) -> Option<Vec<NewsItem>> {
            let title = query.unwrap_or("national").to_string();
            self.up(vec![NewsItem { title: Some(title), ..Default::default() }])
        }

        async fn fetch_red_alert(&self) -> Option<RedAlertPayload> {
            self.up(RedAlertPayload::default())
        }

        async fn fetch_calendar(&self) -> Option<AgendaPayload> {
            self.up(AgendaPayload::default())
        }

        async fn fetch_emails(&self, _account: Option<&str>) -> Option<Vec<EmailItem>> {
            self.up(vec![EmailItem {
                subject: Some("Lunch?".into()),
                from: Some("Noa <noa@example.com>".into()),
                received: Some("2025-09-15T10:10:00Z".into()),
                ..Default::default()
            }])
        }

        async fn fetch_latest_alert(&self) -> Option<LatestAlertPayload> {
            self.up(LatestAlertPayload::default())
        }

        async fn fetch_holidays(&self) -> Option<HolidaysPayload> {
            self.up(HolidaysPayload::default())
        }

        async fn fetch_shabbat(&self) -> Option<ShabbatPayload> {
            self.up(ShabbatPayload::default())
        }

        async fn fetch_zmanim(&self) -> Option<ZmanimPayload> {
            self.up(ZmanimPayload::default())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 15, 10, 30, 0).unwrap()
    }

    #[tokio::test]
    async fn failed_fetch_keeps_previous_render() {
        let online = Arc::new(AtomicBool::new(true));
        let source = FakeSource { online: online.clone(), aqi: 42.0 };
        let mut dash = Dashboard::new(Box::new(source), DashboardState::default());

        assert!(dash.render(Widget::AirQuality, &now()).is_none());
        assert!(dash.refresh(Widget::AirQuality).await);
        let before = dash.render(Widget::AirQuality, &now()).expect("rendered");
        assert!(before.contains("42 (Good)"));

        online.store(false, Ordering::SeqCst);
        assert!(!dash.refresh(Widget::AirQuality).await);
        assert_eq!(dash.render(Widget::AirQuality, &now()), Some(before));
    }

    #[tokio::test]
    async fn refresh_all_fills_every_widget() {
        let source = FakeSource { online: Arc::new(AtomicBool::new(true)), aqi: 120.0 };
        let mut dash = Dashboard::new(Box::new(source), DashboardState::default());

        dash.refresh_all().await;

        for widget in Widget::all() {
            assert!(dash.render(*widget, &now()).is_some(), "{widget} should render");
        }
        let date = dash.render(Widget::Date, &now()).expect("date");
        assert!(date.contains("MON, 15, SEP | 22, ELUL, 5785"));
        assert_eq!(dash.snapshot().news.as_ref().map(Vec::len), Some(2));

        let inbox = dash.render(Widget::Email, &now()).expect("email");
        assert!(inbox.contains("Noa • 20m"));
        let banner = dash.render(Widget::AlertBanner, &now()).expect("banner");
        assert_eq!(banner, "No recent alerts\n");
    }

    #[tokio::test]
    async fn hourly_follows_selected_tab() {
        let source = FakeSource { online: Arc::new(AtomicBool::new(true)), aqi: 1.0 };
        let mut dash = Dashboard::new(Box::new(source), DashboardState::default());
        dash.refresh(Widget::Hourly).await;

        let today = dash.render(Widget::Hourly, &now()).expect("today");
        assert_eq!(today.lines().count(), 1);

        dash.select_weather_tab(WeatherTab::Forecast);
        let forecast = dash.render(Widget::Hourly, &now()).expect("forecast");
        assert!(forecast.starts_with("Now       no data"));
    }

    #[test]
    fn widget_names_roundtrip() {
        for widget in Widget::all() {
            let parsed = Widget::try_from(widget.as_str()).expect("roundtrip should succeed");
            assert_eq!(*widget, parsed);
        }
        let err = Widget::try_from("video").unwrap_err();
        assert!(err.to_string().contains("Unknown widget"));
    }

    #[test]
    fn intervals_per_widget() {
        let intervals = RefreshIntervals::default();
        assert_eq!(Widget::Alert.refresh_interval(&intervals), Duration::from_secs(30));
        assert_eq!(Widget::Hourly.refresh_interval(&intervals), Duration::from_secs(300));
        assert_eq!(Widget::AlertBanner.refresh_interval(&intervals), Duration::from_secs(30));
        assert_eq!(Widget::Agenda.refresh_interval(&intervals), Duration::from_secs(60));
        assert_eq!(Widget::Holidays.refresh_interval(&intervals), Duration::from_secs(21_600));
    }
}
