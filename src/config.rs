use std::collections::BTreeMap;

use crate::error::{TourError, TourResult};

pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_MASK_COLOR: &str = "rgba(0, 0, 0, 0.6)";
pub const DEFAULT_FONT_FAMILY: &str = "\"Courier New\", Courier, monospace";

/// Tour definition as fetched from the configuration endpoint. Immutable for
/// the lifetime of a tour instance.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourConfig {
    #[serde(default, alias = "list")]
    pub steps: Vec<Step>,

    #[serde(default)]
    pub font_family: Option<String>,

    #[serde(default = "default_mask_color", alias = "bgColor")]
    pub mask_color: String,

    #[serde(default = "default_autoplay_interval", alias = "autoPlayTimerMs")]
    pub autoplay_interval_ms: u64,

    #[serde(
        default,
        alias = "showNotification",
        deserialize_with = "deserialize_flag"
    )]
    pub show_notifications: bool,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(alias = "selector")]
    pub target_selector: String,

    #[serde(alias = "message")]
    pub caption: LocalizedText,

    #[serde(alias = "position")]
    pub callout_position: CalloutPosition,

    #[serde(default, alias = "positionMobile")]
    pub callout_position_mobile: Option<MobilePosition>,

    #[serde(default, alias = "notificationMessage")]
    pub unavailable_message: Option<LocalizedText>,
}

/// A caption that is either a single string or a per-language table.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    ByLang(BTreeMap<String, String>),
}

impl LocalizedText {
    /// Text for `lang`, falling back to the first entry of the table.
    pub fn resolve(&self, lang: &str) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::ByLang(table) => table
                .get(lang)
                .or_else(|| table.values().next())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Plain(text) => text.trim().is_empty(),
            Self::ByLang(table) => table.is_empty(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalloutPosition {
    Left,
    Right,
    Top,
    Bottom,
}

impl CalloutPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

/// Mobile layouts only ever stack the balloon above or below the target.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobilePosition {
    Top,
    Bottom,
}

impl TourConfig {
    pub fn validate(&self) -> TourResult<()> {
        if self.autoplay_interval_ms == 0 {
            return Err(TourError::validation("autoplayIntervalMs must be > 0"));
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.target_selector.trim().is_empty() {
                return Err(TourError::validation(format!(
                    "step {index} has an empty target selector"
                )));
            }
            if step.caption.is_empty() {
                return Err(TourError::validation(format!(
                    "step {index} has an empty caption"
                )));
            }
        }
        Ok(())
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY)
    }
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            font_family: None,
            mask_color: default_mask_color(),
            autoplay_interval_ms: default_autoplay_interval(),
            show_notifications: false,
        }
    }
}

fn default_mask_color() -> String {
    DEFAULT_MASK_COLOR.to_string()
}

fn default_autoplay_interval() -> u64 {
    DEFAULT_AUTOPLAY_INTERVAL_MS
}

/// Parses a boolean token: `yes`/`true`/`1` and `no`/`false`/`0`, case
/// insensitive, surrounding whitespace ignored. Anything else is a
/// [`TourError::Parse`].
pub fn parse_boolean(value: &str) -> TourResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        other => Err(TourError::parse(format!(
            "invalid boolean token '{other}'"
        ))),
    }
}

/// Accepts JSON bools, 0/1 numbers, and boolean token strings.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum FlagRepr {
        Bool(bool),
        Num(u64),
        Text(String),
    }

    let repr = <FlagRepr as serde::Deserialize>::deserialize(deserializer)?;
    let token = match repr {
        FlagRepr::Bool(b) => return Ok(b),
        FlagRepr::Num(n) => n.to_string(),
        FlagRepr::Text(s) => s,
    };
    parse_boolean(&token).map_err(serde::de::Error::custom)
}
