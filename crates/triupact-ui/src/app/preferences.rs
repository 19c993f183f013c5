//! Browser persistence and environment helpers for the app shell.

use chrono::{DateTime, Utc};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use js_sys::Date;
use triupact_core::StorageError;
use triupact_core::http::ApiEndpoint;
use triupact_core::storage::KeyValueStore;

use crate::features::dashboard::state::{SECTIONS_KEY, SectionVisibility};
use crate::shell::{DESKTOP_QUERY, SIDEBAR_KEY, SidebarState};
use crate::theme::{THEME_KEY, ThemeMode};

/// `localStorage` as a plain string store; values are not JSON-encoded.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StorageError::new(key, format!("{err:?}")))
    }

    fn remove(&self, key: &str) {
        if LocalStorage::raw().remove_item(key).is_err() {
            console::warn!("local storage remove failed", key.to_string());
        }
    }
}

/// API endpoint from the compile-time `TRIUPACT_API_URL`.
pub(crate) fn api_endpoint() -> ApiEndpoint {
    ApiEndpoint::from_base(option_env!("TRIUPACT_API_URL"))
}

/// Wall-clock instant from the browser.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(Date::now() as i64).unwrap_or_default()
}

/// `true` when the viewport matches the desktop breakpoint.
pub(crate) fn is_desktop() -> bool {
    window()
        .match_media(DESKTOP_QUERY)
        .ok()
        .flatten()
        .is_some_and(|media| media.matches())
}

pub(crate) fn load_sidebar() -> SidebarState {
    SidebarState::restore(BrowserStore.get(SIDEBAR_KEY).as_deref(), is_desktop())
}

pub(crate) fn persist_sidebar(state: SidebarState) {
    persist(SIDEBAR_KEY, state.stored_value());
}

pub(crate) fn load_theme() -> ThemeMode {
    ThemeMode::from_stored(BrowserStore.get(THEME_KEY).as_deref())
}

pub(crate) fn persist_theme(theme: ThemeMode) {
    persist(THEME_KEY, theme.as_str());
}

pub(crate) fn load_sections() -> SectionVisibility {
    SectionVisibility::from_stored(BrowserStore.get(SECTIONS_KEY).as_deref())
}

pub(crate) fn persist_sections(sections: &SectionVisibility) {
    match sections.to_stored() {
        Ok(value) => persist(SECTIONS_KEY, &value),
        Err(err) => console::warn!("dashboard sections encode failed", err.to_string()),
    }
}

fn persist(key: &str, value: &str) {
    if let Err(err) = BrowserStore.set(key, value) {
        console::warn!("storage write failed", err.to_string());
    }
}
