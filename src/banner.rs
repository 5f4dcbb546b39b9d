//! Transient status messages shown after an action completes. One shared
//! implementation for every panel; messages auto-dismiss after a few
//! seconds instead of piling up.

use std::time::{Duration, Instant};

const DISPLAY_FOR: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    message: String,
    is_error: bool,
    shown_at: Instant,
}

impl Banner {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            shown_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            shown_at: Instant::now(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= DISPLAY_FOR
    }

    fn ui(&self, ui: &mut egui::Ui) {
        let color = if self.is_error {
            egui::Color32::RED
        } else {
            egui::Color32::from_rgb(0x2e, 0x8b, 0x57)
        };
        ui.colored_label(color, &self.message);
    }
}

/// Render the banner if one is active, dropping it once it expires.
pub fn show(ui: &mut egui::Ui, banner: &mut Option<Banner>) {
    if banner.as_ref().is_some_and(|b| b.expired_at(Instant::now())) {
        *banner = None;
    }
    if let Some(active) = banner {
        active.ui(ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_expires_after_display_window() {
        let banner = Banner::info("saved");
        let now = banner.shown_at;
        assert!(!banner.expired_at(now));
        assert!(!banner.expired_at(now + Duration::from_secs(4)));
        assert!(banner.expired_at(now + Duration::from_secs(5)));
    }

    #[test]
    fn error_and_info_classes_are_distinct() {
        assert!(!Banner::info("ok").is_error());
        assert!(Banner::error("boom").is_error());
        assert_eq!(Banner::error("boom").message(), "boom");
    }
}
