//! UI state for the dashboard page and the store it persists to.
//!
//! The page keeps a handful of preferences between visits (which dashboard
//! layout is active, the weather tab, video feed toggles). They live in an
//! explicit [`DashboardState`] value; persistence goes through whatever
//! [`PreferenceStore`] the caller injects.

use directories::ProjectDirs;
use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::hourly::TargetDay;

pub const KEY_DASHBOARD: &str = "selectedDash";
pub const KEY_WEATHER_TAB: &str = "weather_tab";
pub const KEY_VIDEO_ON: &str = "video_on";
pub const KEY_VIDEO_ZOOM: &str = "video_zoom";
pub const KEY_VIDEO_MUTED: &str = "video_muted";
pub const KEY_VIDEO_ROOM: &str = "video_room";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read preferences file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write preferences file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse preferences file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize preferences")]
    Serialize(#[from] toml::ser::Error),

    #[error("could not determine platform data directory")]
    NoDataDir,
}

/// String key/value persistence, the shape of browser local storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept in a flat TOML table on disk. Every `set` writes through.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self { path, values: BTreeMap::new() });
        }

        let contents = fs::read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        let values = toml::from_str(&contents)
            .map_err(|source| StoreError::Parse { path: path.clone(), source })?;

        Ok(Self { path, values })
    }

    /// Open the store in the platform data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf, StoreError> {
        let dirs = ProjectDirs::from("dev", "home-dashboard", "dashboard-cli")
            .ok_or(StoreError::NoDataDir)?;

        Ok(dirs.data_dir().join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|source| StoreError::Write { path: parent.to_path_buf(), source })?;
        }

        let toml = toml::to_string_pretty(&self.values)?;
        fs::write(&self.path, toml)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherTab {
    #[default]
    Today,
    Tomorrow,
    Forecast,
}

impl WeatherTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherTab::Today => "today",
            WeatherTab::Tomorrow => "tomorrow",
            WeatherTab::Forecast => "forecast",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(WeatherTab::Today),
            "tomorrow" => Some(WeatherTab::Tomorrow),
            "forecast" => Some(WeatherTab::Forecast),
            _ => None,
        }
    }

    /// Hourly strip shown under this tab, if any.
    pub fn hourly_day(&self) -> Option<TargetDay> {
        match self {
            WeatherTab::Today => Some(TargetDay::Today),
            WeatherTab::Tomorrow => Some(TargetDay::Tomorrow),
            WeatherTab::Forecast => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPrefs {
    pub on: bool,
    pub zoom: bool,
    pub muted: bool,
    pub room: Option<String>,
}

impl Default for VideoPrefs {
    fn default() -> Self {
        Self { on: false, zoom: false, muted: true, room: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    /// Active layout, 1-based.
    pub dashboard: u8,
    pub weather_tab: WeatherTab,
    pub video: VideoPrefs,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self { dashboard: 1, weather_tab: WeatherTab::default(), video: VideoPrefs::default() }
    }
}

fn read_bool(store: &impl PreferenceStore, key: &str, fallback: bool) -> bool {
    match store.get(key) {
        Some(v) => v == "true",
        None => fallback,
    }
}

impl DashboardState {
    /// Load stored preferences, taking anything missing from `fallback`.
    pub fn load(store: &impl PreferenceStore, fallback: DashboardState) -> Self {
        let dashboard = match store.get(KEY_DASHBOARD) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::debug!("ignoring stored dashboard {raw:?}");
                fallback.dashboard
            }),
            None => fallback.dashboard,
        };

        let weather_tab = store
            .get(KEY_WEATHER_TAB)
            .and_then(|raw| WeatherTab::parse(&raw))
            .unwrap_or(fallback.weather_tab);

        let video = VideoPrefs {
            on: read_bool(store, KEY_VIDEO_ON, fallback.video.on),
            zoom: read_bool(store, KEY_VIDEO_ZOOM, fallback.video.zoom),
            muted: read_bool(store, KEY_VIDEO_MUTED, fallback.video.muted),
            room: store.get(KEY_VIDEO_ROOM).or(fallback.video.room),
        };

        Self { dashboard, weather_tab, video }
    }

    pub fn save(&self, store: &mut impl PreferenceStore) -> Result<(), StoreError> {
        store.set(KEY_DASHBOARD, &self.dashboard.to_string())?;
        store.set(KEY_WEATHER_TAB, self.weather_tab.as_str())?;
        store.set(KEY_VIDEO_ON, &self.video.on.to_string())?;
        store.set(KEY_VIDEO_ZOOM, &self.video.zoom.to_string())?;
        store.set(KEY_VIDEO_MUTED, &self.video.muted.to_string())?;
        if let Some(room) = &self.video.room {
            store.set(KEY_VIDEO_ROOM, room)?;
        }
        Ok(())
    }

    /// Class the page body carries for the active layout.
    pub fn body_class(&self) -> String {
        format!("dash-{}", self.dashboard)
    }

    pub fn toggle_video(&mut self) {
        self.video.on = !self.video.on;
    }

    pub fn toggle_zoom(&mut self) {
        self.video.zoom = !self.video.zoom;
    }

    pub fn toggle_mute(&mut self) {
        self.video.muted = !self.video.muted;
    }

    pub fn video_button_label(&self) -> &'static str {
        if self.video.on { "Turn Off" } else { "Turn On" }
    }
}

/// Tab label for a camera room key: `front-door` becomes `Front Door`.
pub fn room_label(key: &str) -> String {
    let spaced = key.replacen('-', " ", 1);
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;

    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_yields_fallback() {
        let store = MemoryStore::new();
        let state = DashboardState::load(&store, DashboardState::default());

        assert_eq!(state, DashboardState::default());
        assert_eq!(state.body_class(), "dash-1");
        assert!(state.video.muted);
    }

    #[test]
    fn stored_values_override_fallback() {
        let mut store = MemoryStore::new();
        store.set(KEY_DASHBOARD, "3").unwrap();
        store.set(KEY_WEATHER_TAB, "forecast").unwrap();
        store.set(KEY_VIDEO_ON, "true").unwrap();
        store.set(KEY_VIDEO_MUTED, "false").unwrap();
        store.set(KEY_VIDEO_ROOM, "living-room").unwrap();

        let mut fallback = DashboardState::default();
        fallback.video.room = Some("front-door".into());

        let state = DashboardState::load(&store, fallback);
        assert_eq!(state.dashboard, 3);
        assert_eq!(state.weather_tab, WeatherTab::Forecast);
        assert!(state.video.on);
        assert!(!state.video.muted);
        assert_eq!(state.video.room.as_deref(), Some("living-room"));
    }

    #[test]
    fn non_true_strings_read_as_false() {
        let mut store = MemoryStore::new();
        store.set(KEY_VIDEO_MUTED, "yes").unwrap();
        store.set(KEY_DASHBOARD, "two").unwrap();

        let state = DashboardState::load(&store, DashboardState::default());
        assert!(!state.video.muted);
        assert_eq!(state.dashboard, 1);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let mut state = DashboardState::default();
        state.dashboard = 2;
        state.weather_tab = WeatherTab::Tomorrow;
        state.toggle_video();
        state.toggle_zoom();
        state.video.room = Some("garden".into());

        let mut store = MemoryStore::new();
        state.save(&mut store).unwrap();

        assert_eq!(store.get(KEY_VIDEO_ON).as_deref(), Some("true"));
        assert_eq!(DashboardState::load(&store, DashboardState::default()), state);
        assert_eq!(state.video_button_label(), "Turn Off");
    }

    #[test]
    fn file_store_persists_between_opens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("preferences.toml");

        let mut state = DashboardState::default();
        state.dashboard = 4;
        state.toggle_mute();

        let mut store = FileStore::open(&path).expect("open new store");
        state.save(&mut store).expect("save");

        let reopened = FileStore::open(&path).expect("reopen store");
        assert_eq!(DashboardState::load(&reopened, DashboardState::default()), state);
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.toml");
        fs::write(&path, "this is = = not toml").expect("write");

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse preferences file"));
    }

    #[test]
    fn weather_tabs_map_to_hourly_days() {
        assert_eq!(WeatherTab::Today.hourly_day(), Some(TargetDay::Today));
        assert_eq!(WeatherTab::Tomorrow.hourly_day(), Some(TargetDay::Tomorrow));
        assert_eq!(WeatherTab::Forecast.hourly_day(), None);
        assert_eq!(WeatherTab::parse("bogus"), None);
    }

    #[test]
    fn room_labels() {
        assert_eq!(room_label("front-door"), "Front Door");
        assert_eq!(room_label("kids-room-2"), "Kids Room-2");
        assert_eq!(room_label("garden"), "Garden");
    }
}
