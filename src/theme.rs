//! Light/dark preference, persisted through eframe storage. Storage
//! failure degrades to a session-only theme.

use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemePreference::Light => egui::Visuals::light(),
            ThemePreference::Dark => egui::Visuals::dark(),
        }
    }

    /// Toggle button icon: shows the theme a click switches to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            ThemePreference::Light => "🌙",
            ThemePreference::Dark => "☀",
        }
    }

    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default()
    }

    pub fn store(self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light() {
        assert_eq!(ThemePreference::default(), ThemePreference::Light);
        assert_eq!(ThemePreference::load(None), ThemePreference::Light);
    }

    #[test]
    fn toggle_flips_between_the_two_themes() {
        assert_eq!(ThemePreference::Light.toggled(), ThemePreference::Dark);
        assert_eq!(ThemePreference::Dark.toggled(), ThemePreference::Light);
        assert_eq!(ThemePreference::Light.toggled().toggled(), ThemePreference::Light);
    }

    #[test]
    fn icon_shows_the_other_theme() {
        assert_eq!(ThemePreference::Light.toggle_icon(), "🌙");
        assert_eq!(ThemePreference::Dark.toggle_icon(), "☀");
    }

    #[test]
    fn persisted_values_are_lowercase() {
        assert_eq!(serde_json::to_string(&ThemePreference::Dark).unwrap(), r#""dark""#);
        let parsed: ThemePreference = serde_json::from_str(r#""light""#).unwrap();
        assert_eq!(parsed, ThemePreference::Light);
    }
}
