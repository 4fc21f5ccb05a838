//! Shared types for Makeupify components.
//!
//! This crate provides the plain data types used across makeupify-core,
//! makeupify-tui and makeupify-cli. Everything here is serializable so the
//! same values can be written to config files and printed by the CLI.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Gender context folded into the styling instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Self::Female),
            "male" | "m" => Ok(Self::Male),
            other => Err(format!("unknown gender '{other}' (expected female or male)")),
        }
    }
}

/// How the makeup look is described to the generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MakeupMethod {
    /// Pick a look from the preset catalog
    #[default]
    Preset,
    /// Describe the look in free text
    Text,
    /// Copy the look from a reference photo
    Transfer,
}

impl MakeupMethod {
    pub const ALL: [MakeupMethod; 3] = [
        MakeupMethod::Preset,
        MakeupMethod::Text,
        MakeupMethod::Transfer,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Preset => "Presets",
            Self::Text => "Describe",
            Self::Transfer => "Copy a look",
        }
    }

    /// Next tab, wrapping around
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Preset => Self::Text,
            Self::Text => Self::Transfer,
            Self::Transfer => Self::Preset,
        }
    }

    /// Previous tab, wrapping around
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Preset => Self::Transfer,
            Self::Text => Self::Preset,
            Self::Transfer => Self::Text,
        }
    }
}

/// Method tag sent to the generator. Presets travel as text instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMethod {
    Text,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetCategory {
    Style,
    Retouch,
}

impl PresetCategory {
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Style => "Styles",
            Self::Retouch => "Retouch & Fix",
        }
    }
}

/// Static catalog entry describing a ready-made look
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    pub genders: &'static [Gender],
    pub category: PresetCategory,
}

impl Preset {
    #[must_use]
    pub fn applies_to(&self, gender: Gender) -> bool {
        self.genders.contains(&gender)
    }
}

/// Phrase appended to the free-text prompt with one keystroke
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickTag {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

/// Action deferred behind the ad interstitial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingAction {
    Generate,
    Download,
}

/// Wizard step, in flow order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    #[default]
    Upload,
    GenderSelect,
    MethodConfig,
    Result,
}

impl Step {
    /// 1-based step number shown in the progress header
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Upload => 1,
            Self::GenderSelect => 2,
            Self::MethodConfig => 3,
            Self::Result => 4,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Upload => "Upload your photo",
            Self::GenderSelect => "Who is in the photo?",
            Self::MethodConfig => "Choose your look",
            Self::Result => "Your makeover",
        }
    }
}

/// UI color scheme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "tr")]
    Turkish,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "ar")]
    Arabic,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::Turkish,
        Language::Spanish,
        Language::Portuguese,
        Language::German,
        Language::French,
        Language::Japanese,
        Language::Korean,
        Language::Arabic,
    ];

    /// Name of the language in that language
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Turkish => "Türkçe",
            Self::Spanish => "Español",
            Self::Portuguese => "Português",
            Self::German => "Deutsch",
            Self::French => "Français",
            Self::Japanese => "日本語",
            Self::Korean => "한국어",
            Self::Arabic => "العربية",
        }
    }

    #[must_use]
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Arabic)
    }

    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

static DATA_URI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:(image/[A-Za-z0-9.+-]+);base64,").expect("data URI pattern is valid")
});

/// Image carried as a `data:<mime>;base64,<payload>` URI.
///
/// The framing is validated on construction; the payload is kept as base64
/// text so it can be sent to the generator without re-encoding.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EncodedImage {
    uri: String,
    prefix_len: usize,
    mime_len: usize,
}

impl EncodedImage {
    /// Parse a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not an image data URI with a
    /// non-empty base64 payload.
    pub fn parse(uri: impl Into<String>) -> Result<Self, String> {
        let uri = uri.into();
        let Some(caps) = DATA_URI_PREFIX.captures(&uri) else {
            return Err("not an image data URI".to_string());
        };
        let prefix_len = caps.get(0).map_or(0, |m| m.end());
        let mime_len = caps.get(1).map_or(0, |m| m.len());
        if uri.len() == prefix_len {
            return Err("data URI has an empty payload".to_string());
        }
        Ok(Self {
            uri,
            prefix_len,
            mime_len,
        })
    }

    /// Build a data URI from raw image bytes.
    #[must_use]
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self::from_base64(mime_type, &BASE64.encode(bytes))
    }

    /// Build a data URI around an already base64-encoded payload.
    #[must_use]
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        let prefix = format!("data:{mime_type};base64,");
        let prefix_len = prefix.len();
        Self {
            uri: format!("{prefix}{payload}"),
            prefix_len,
            mime_len: mime_type.len(),
        }
    }

    /// Full data URI
    #[must_use]
    pub fn as_uri(&self) -> &str {
        &self.uri
    }

    /// Mime type from the framing, e.g. `image/jpeg`
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.uri["data:".len().."data:".len() + self.mime_len]
    }

    /// Base64 payload with the framing stripped
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.uri[self.prefix_len..]
    }

    /// Decode the payload to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.payload().as_bytes())
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("mime_type", &self.mime_type())
            .field("payload_len", &self.payload().len())
            .finish()
    }
}

impl TryFrom<String> for EncodedImage {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EncodedImage> for String {
    fn from(value: EncodedImage) -> Self {
        value.uri
    }
}
