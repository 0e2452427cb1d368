use serde::{Deserialize, Deserializer, Serialize};

/// Bottom-tab the application was showing when it was last closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Bible,
    Planner,
    Favorites,
    Settings,
    Login,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Bible => "bible",
            Tab::Planner => "planner",
            Tab::Favorites => "favorites",
            Tab::Settings => "settings",
            Tab::Login => "login",
        }
    }

    pub fn from_str(s: &str) -> Option<Tab> {
        match s {
            "bible" => Some(Tab::Bible),
            "planner" => Some(Tab::Planner),
            "favorites" => Some(Tab::Favorites),
            "settings" => Some(Tab::Settings),
            "login" => Some(Tab::Login),
            _ => None,
        }
    }

}

/// Reading font size. Stored as the raw Portuguese name under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontSize {
    Pequena,
    #[default]
    Media,
    Grande,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Pequena => "pequena",
            FontSize::Media => "média",
            FontSize::Grande => "grande",
        }
    }

    /// Point size used when rendering verse text
    pub fn points(&self) -> u32 {
        match self {
            FontSize::Pequena => 15,
            FontSize::Media => 19,
            FontSize::Grande => 23,
        }
    }

    /// Resolve a stored value; anything unknown falls back to `média`.
    pub fn from_stored(s: &str) -> FontSize {
        match s.trim() {
            "pequena" => FontSize::Pequena,
            "média" | "media" => FontSize::Media,
            "grande" => FontSize::Grande,
            _ => FontSize::Media,
        }
    }

    pub fn all() -> &'static [FontSize] {
        &[FontSize::Pequena, FontSize::Media, FontSize::Grande]
    }
}

/// Display preferences held by the preference manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub last_tab: Tab,
    pub font_size: FontSize,
}

/// On-disk shape of the `preferences` key: `{ "darkMode": .., "lastTab": .. }`.
///
/// `lastTab` is read as a plain string so an unknown tab name only resets the
/// tab instead of discarding the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesRecord {
    #[serde(rename = "darkMode", default, deserialize_with = "null_as_false")]
    pub dark_mode: bool,

    #[serde(rename = "lastTab", default)]
    pub last_tab: Option<String>,
}

impl PreferencesRecord {
    pub fn new(dark_mode: bool, last_tab: Tab) -> Self {
        Self {
            dark_mode,
            last_tab: Some(last_tab.as_str().to_string()),
        }
    }

    pub fn tab(&self) -> Tab {
        self.last_tab
            .as_deref()
            .and_then(Tab::from_str)
            .unwrap_or_default()
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = Preferences::default();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.last_tab, Tab::Bible);
        assert_eq!(prefs.font_size, FontSize::Media);
    }

    #[test]
    fn test_font_size_points() {
        assert_eq!(FontSize::Pequena.points(), 15);
        assert_eq!(FontSize::Media.points(), 19);
        assert_eq!(FontSize::Grande.points(), 23);
    }

    #[test]
    fn test_unknown_font_size_falls_back_to_media() {
        assert_eq!(FontSize::from_stored("enorme"), FontSize::Media);
        assert_eq!(FontSize::from_stored(""), FontSize::Media);
        assert_eq!(FontSize::from_stored("grande"), FontSize::Grande);
        for size in FontSize::all() {
            assert_eq!(FontSize::from_stored(size.as_str()), *size);
        }
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_string(&PreferencesRecord::new(true, Tab::Favorites)).unwrap();
        assert_eq!(json, r#"{"darkMode":true,"lastTab":"favorites"}"#);
    }

    #[test]
    fn test_record_with_unknown_tab_keeps_dark_mode() {
        let record: PreferencesRecord =
            serde_json::from_str(r#"{"darkMode": true, "lastTab": "calendar"}"#).unwrap();
        assert!(record.dark_mode);
        assert_eq!(record.tab(), Tab::Bible);
    }

    #[test]
    fn test_partial_record() {
        let record: PreferencesRecord = serde_json::from_str(r#"{"lastTab": "settings"}"#).unwrap();
        assert!(!record.dark_mode);
        assert_eq!(record.tab(), Tab::Settings);
    }

    #[test]
    fn test_null_dark_mode_keeps_tab() {
        let record: PreferencesRecord =
            serde_json::from_str(r#"{"darkMode": null, "lastTab": "planner"}"#).unwrap();
        assert!(!record.dark_mode);
        assert_eq!(record.tab(), Tab::Planner);
    }
}
