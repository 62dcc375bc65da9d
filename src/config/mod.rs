use crate::error::{NoteError, NoteResult};
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

const MAX_DELAY_MS: u32 = 60_000;

fn default_ack_clear_ms() -> u32 {
    2000
}

fn default_unmount_delay_ms() -> u32 {
    200
}

fn default_emoji_base_url() -> String {
    "/emoji".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Widget settings.
///
/// Read from `window.ENV.ACCOUNT_NOTE` when present. Keys may be written either
/// as `ack_clear_ms` or `ACK_CLEAR_MS`; anything missing keeps its default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NoteConfig {
    /// How long the "Saved" acknowledgment stays up after an explicit save.
    #[serde(default = "default_ack_clear_ms", alias = "ACK_CLEAR_MS")]
    pub ack_clear_ms: u32,

    /// Fade-out time before the "Saved" text is removed.
    #[serde(default = "default_unmount_delay_ms", alias = "UNMOUNT_DELAY_MS")]
    pub unmount_delay_ms: u32,

    /// UI locale tag. Falls back to the browser language when unset.
    #[serde(default, alias = "LOCALE")]
    pub locale: Option<String>,

    #[serde(default = "default_emoji_base_url", alias = "EMOJI_BASE_URL")]
    pub emoji_base_url: String,

    #[serde(default = "default_log_level", alias = "LOG_LEVEL")]
    pub log_level: String,
}

impl Default for NoteConfig {
    fn default() -> Self {
        Self {
            ack_clear_ms: default_ack_clear_ms(),
            unmount_delay_ms: default_unmount_delay_ms(),
            locale: None,
            emoji_base_url: default_emoji_base_url(),
            log_level: default_log_level(),
        }
    }
}

impl NoteConfig {
    pub fn from_json(json: &str) -> NoteResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> NoteResult<()> {
        for (field, value) in [
            ("ack_clear_ms", self.ack_clear_ms),
            ("unmount_delay_ms", self.unmount_delay_ms),
        ] {
            if value == 0 || value > MAX_DELAY_MS {
                return Err(NoteError::InvalidDelay {
                    field,
                    value,
                    max: MAX_DELAY_MS,
                });
            }
        }
        Ok(())
    }

    /// Load from the page, falling back to defaults on any problem.
    pub fn load() -> Self {
        let mut config = match read_window_env() {
            Some(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(target: "note.config", error = %e, "config_rejected_using_defaults");
                Self::default()
            }),
            None => Self::default(),
        };

        if config.locale.is_none() {
            config.locale = web_sys::window().and_then(|w| w.navigator().language());
        }

        config
    }

    pub fn locale(&self) -> Locale {
        self.locale
            .as_deref()
            .map(Locale::parse)
            .unwrap_or_default()
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// `window.ENV.ACCOUNT_NOTE`, re-serialized as JSON.
fn read_window_env() -> Option<String> {
    let window = web_sys::window()?;
    let env = window.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }

    let section = js_sys::Reflect::get(&env, &"ACCOUNT_NOTE".into()).ok()?;
    if section.is_undefined() || section.is_null() {
        return None;
    }

    js_sys::JSON::stringify(&section)
        .ok()
        .and_then(|s| s.as_string())
}
