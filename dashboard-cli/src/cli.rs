use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use dashboard_core::{
    Config, Dashboard, DashboardState, FileStore, PreferenceStore, TargetDay, WeatherTab, Widget,
    source::source_from_config,
    state::{
        KEY_DASHBOARD, KEY_VIDEO_MUTED, KEY_VIDEO_ON, KEY_VIDEO_ROOM, KEY_VIDEO_ZOOM,
        KEY_WEATHER_TAB, room_label,
    },
};
use inquire::{CustomType, Text};

const PREFERENCE_KEYS: &[&str] = &[
    KEY_DASHBOARD,
    KEY_WEATHER_TAB,
    KEY_VIDEO_ON,
    KEY_VIDEO_ZOOM,
    KEY_VIDEO_MUTED,
    KEY_VIDEO_ROOM,
];

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Home dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend URL and request timeout.
    Configure,

    /// Fetch once and print a widget.
    Show {
        /// Widget name (weather, hourly, air, date, meeting, news, alert, banner,
        /// agenda, email, holidays, shabbat, zmanim) or "all".
        #[arg(default_value = "all")]
        widget: String,

        /// Hourly strip to show: "today" or "tomorrow". Defaults to the stored tab.
        #[arg(long)]
        day: Option<String>,
    },

    /// Keep polling a widget at its configured interval.
    Watch {
        /// Widget name, as for `show`.
        widget: String,
    },

    /// Inspect or change stored UI preferences.
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Print the stored preferences.
    Show,

    /// Store a single preference, e.g. `prefs set video_on true`.
    Set { key: String, value: String },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { widget, day } => show(&widget, day.as_deref()).await,
            Command::Watch { widget } => watch(&widget).await,
            Command::Prefs { action } => prefs(action),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    cfg.api_base_url = Text::new("Dashboard backend URL:")
        .with_default(&cfg.api_base_url)
        .prompt()
        .context("Failed to read backend URL")?;

    cfg.request_timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(cfg.request_timeout_secs)
        .prompt()
        .context("Failed to read request timeout")?;

    cfg.validate()?;
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn load_state(store: &FileStore) -> DashboardState {
    DashboardState::load(store, DashboardState::default())
}

fn parse_widgets(name: &str) -> anyhow::Result<Vec<Widget>> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(Widget::all().to_vec());
    }
    Ok(vec![Widget::try_from(name)?])
}

fn build_dashboard(day: Option<&str>) -> anyhow::Result<Dashboard> {
    let cfg = Config::load()?;
    let source = source_from_config(&cfg)?;
    let store = FileStore::open_default()?;

    let mut dashboard = Dashboard::new(source, load_state(&store));
    if let Some(day) = day {
        let tab = match TargetDay::try_from(day)? {
            TargetDay::Today => WeatherTab::Today,
            TargetDay::Tomorrow => WeatherTab::Tomorrow,
        };
        dashboard.select_weather_tab(tab);
    }

    Ok(dashboard)
}

fn print_widget(dashboard: &Dashboard, widget: Widget) {
    println!("== {widget}");
    match dashboard.render(widget, &Local::now()) {
        Some(text) => print!("{text}"),
        None => println!("no data"),
    }
}

async fn show(name: &str, day: Option<&str>) -> anyhow::Result<()> {
    let widgets = parse_widgets(name)?;
    let mut dashboard = build_dashboard(day)?;

    if widgets.len() > 1 {
        dashboard.refresh_all().await;
    } else {
        for widget in &widgets {
            dashboard.refresh(*widget).await;
        }
    }
    for widget in widgets {
        print_widget(&dashboard, widget);
    }

    Ok(())
}

async fn watch(name: &str) -> anyhow::Result<()> {
    let widget = Widget::try_from(name)?;
    let cfg = Config::load()?;
    let mut dashboard = build_dashboard(None)?;

    let mut ticker = tokio::time::interval(widget.refresh_interval(&cfg.refresh));
    log::info!("watching {widget} every {:?}", widget.refresh_interval(&cfg.refresh));

    loop {
        ticker.tick().await;
        if dashboard.refresh(widget).await {
            print_widget(&dashboard, widget);
        }
    }
}

fn prefs(action: PrefsCommand) -> anyhow::Result<()> {
    let mut store = FileStore::open_default()?;

    match action {
        PrefsCommand::Show => {}
        PrefsCommand::Set { key, value } => {
            if !PREFERENCE_KEYS.contains(&key.as_str()) {
                return Err(anyhow!(
                    "Unknown preference '{key}'. Supported keys: {}.",
                    PREFERENCE_KEYS.join(", ")
                ));
            }
            store.set(&key, &value)?;
        }
    }

    let state = load_state(&store);
    println!("Preferences ({})", store.path().display());
    println!("  layout       {}", state.body_class());
    println!("  weather tab  {}", state.weather_tab.as_str());
    println!(
        "  video        {}  zoom={} muted={}",
        if state.video.on { "on" } else { "off" },
        state.video.zoom,
        state.video.muted
    );
    if let Some(room) = &state.video.room {
        println!("  room         {}", room_label(room));
    }

    Ok(())
}
