// Persisted plugin settings, merged over defaults from the host's data blob

use serde::{Deserialize, Serialize};

/// Which metadata fields participate in search matching. Derived from
/// `Settings` and passed into the ranker; display toggles stay out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFacets {
    pub match_path: bool,
    pub match_alias: bool,
    pub match_tag: bool,
}

impl Default for SearchFacets {
    fn default() -> Self {
        Settings::default().facets()
    }
}

/// User-facing toggles, persisted by the host as an opaque JSON blob.
/// Field names stay camelCase so existing saved blobs keep deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Show the file's path under each result.
    pub show_file_path: bool,
    /// Keep the trailing file-name segment in the displayed path.
    pub include_file_name_in_path: bool,
    pub enable_tag_search: bool,
    pub enable_alias_search: bool,
    pub enable_path_search: bool,
    /// Ask the host to load every deferred tab when the plugin starts.
    pub load_all_tabs_on_startup: bool,
    /// Beta: UI shell shows the tab list while Ctrl is held. Persisted here,
    /// consumed only by the shell.
    pub enable_tab_view: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            show_file_path: true,
            include_file_name_in_path: true,
            enable_tag_search: true,
            enable_alias_search: true,
            enable_path_search: true,
            load_all_tabs_on_startup: false,
            enable_tab_view: false,
        }
    }
}

impl Settings {
    /// Merge a saved blob over the defaults. Missing fields take their
    /// default, unknown fields are ignored, and a malformed blob falls back
    /// to pure defaults rather than failing the load.
    pub fn from_saved(data: Option<serde_json::Value>) -> Self {
        match data {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Settings::default(),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        // Serializing a plain struct of bools cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn facets(&self) -> SearchFacets {
        SearchFacets {
            match_path: self.enable_path_search,
            match_alias: self.enable_alias_search,
            match_tag: self.enable_tag_search,
        }
    }
}

/// Host-side persistence for the settings blob.
pub trait SettingsStore {
    fn load_data(&self) -> Option<serde_json::Value>;
    fn save_data(&mut self, data: &serde_json::Value);
}
