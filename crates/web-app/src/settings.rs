use log::error;

/// Duration of the vibration at the end of a rest.
pub const VIBRATION_MS: u32 = 200;

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, String>;
    async fn set_settings(&self, settings: Settings) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, String>;
    async fn write_settings(&self, settings: Settings) -> Result<(), String>;
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Vibrate when a rest is over.
    pub vibration: bool,
    /// Show a notification when a rest is over.
    pub notifications: bool,
    pub install_prompt_seen: bool,
}

impl Settings {
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        match self.theme {
            Theme::System => {
                let Some(window) = web_sys::window() else {
                    error!("failed to access window to determine preferred color scheme");
                    return Theme::Light;
                };
                match window.match_media("(prefers-color-scheme: dark)") {
                    Ok(Some(media_query_list)) => {
                        if media_query_list.matches() {
                            Theme::Dark
                        } else {
                            Theme::Light
                        }
                    }
                    Ok(None) => {
                        error!("failed to determine preferred color scheme");
                        Theme::Light
                    }
                    Err(_) => {
                        error!("failed to match media to determine preferred color scheme");
                        Theme::Light
                    }
                }
            }
            Theme::Light | Theme::Dark => self.theme,
        }
    }

    /// Whether the hint for installing the app should be shown.
    #[must_use]
    pub fn show_install_prompt(&self, standalone: bool) -> bool {
        !self.install_prompt_seen && !standalone
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            vibration: true,
            notifications: false,
            install_prompt_seen: false,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn iter() -> std::slice::Iter<'static, Theme> {
        static THEMES: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];
        THEMES.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Theme::System => "Sistema",
            Theme::Light => "Claro",
            Theme::Dark => "Escuro",
        }
    }
}

/// Vibrate the device, if supported.
pub fn vibrate(milliseconds: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if !window.navigator().vibrate_with_duration(milliseconds) {
        log::debug!("vibration not supported");
    }
}
