use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::HookError;

/// Spice level used when a request does not specify one
pub const DEFAULT_SPICE_LEVEL: u8 = 2;

/// Hook style requested by the caller.
///
/// Anything unrecognised collapses to [`Style::Mixed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Mixed,
    Question,
    Shock,
    Story,
    Challenge,
    Proof,
    Curiosity,
    Controversial,
}

impl Style {
    pub const ALL: [Style; 8] = [
        Style::Mixed,
        Style::Question,
        Style::Shock,
        Style::Story,
        Style::Challenge,
        Style::Proof,
        Style::Curiosity,
        Style::Controversial,
    ];

    /// Parse a style tag, defaulting to `Mixed` when absent or unknown
    pub fn parse_lenient(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Style::Mixed;
        };
        let value = value.trim();
        Style::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(value))
            .unwrap_or(Style::Mixed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Mixed => "mixed",
            Style::Question => "question",
            Style::Shock => "shock",
            Style::Story => "story",
            Style::Challenge => "challenge",
            Style::Proof => "proof",
            Style::Curiosity => "curiosity",
            Style::Controversial => "controversial",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controversy tier that a spice level maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiceTier {
    Mild,
    Medium,
    Hot,
    Extreme,
}

/// How provocative hooks should be, always within 1..=4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SpiceLevel(u8);

impl SpiceLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Clamp an arbitrary number into the valid range
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        let rounded = value.round().clamp(Self::MIN as f64, Self::MAX as f64);
        SpiceLevel(rounded as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn tier(&self) -> SpiceTier {
        match self.0 {
            1 => SpiceTier::Mild,
            2 => SpiceTier::Medium,
            3 => SpiceTier::Hot,
            _ => SpiceTier::Extreme,
        }
    }
}

impl Default for SpiceLevel {
    fn default() -> Self {
        SpiceLevel(DEFAULT_SPICE_LEVEL)
    }
}

/// Inbound request body as sent by the front end
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookRequest {
    pub topic: Option<String>,
    pub niche: Option<String>,
    /// Non-string values are treated as absent
    #[serde(default, deserialize_with = "string_or_none")]
    pub style: Option<String>,
    pub spice_level: Option<f64>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

impl HookRequest {
    /// Check required fields and normalise the optional ones
    pub fn validate(&self) -> Result<GenerationRequest, HookError> {
        let topic = self
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HookError::Validation("Topic is required".to_string()))?;

        let niche = self
            .niche
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| HookError::Validation("Niche is required".to_string()))?;

        Ok(GenerationRequest {
            topic: topic.to_string(),
            niche: niche.to_string(),
            style: Style::parse_lenient(self.style.as_deref()),
            spice_level: self
                .spice_level
                .map(SpiceLevel::clamped)
                .unwrap_or_default(),
        })
    }
}

/// A validated, normalised generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub topic: String,
    pub niche: String,
    pub style: Style,
    pub spice_level: SpiceLevel,
}

/// A hook candidate as returned by the model, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateHook {
    pub text: Option<String>,
    pub style: Option<String>,
    pub explanation: Option<String>,
    /// Self-reported by the model; never trusted
    pub word_count: Option<u64>,
}

impl CandidateHook {
    /// Read a candidate out of an arbitrary JSON value.
    ///
    /// Fields of the wrong type are treated as missing. A bare string is
    /// accepted as a candidate with only `text` set.
    pub fn from_value(value: &Value) -> Self {
        if let Some(text) = value.as_str() {
            return CandidateHook {
                text: Some(text.to_string()),
                ..Default::default()
            };
        }

        let string_field = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| value.get(*k).and_then(Value::as_str))
                .map(String::from)
        };

        CandidateHook {
            text: string_field(&["text", "hook"]),
            style: string_field(&["style", "type"]),
            explanation: string_field(&["explanation", "rationale", "reason", "why"]),
            word_count: ["wordCount", "word_count"]
                .iter()
                .find_map(|k| value.get(*k).and_then(Value::as_u64)),
        }
    }
}

/// A hook that passed every acceptance rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedHook {
    pub text: String,
    pub style: String,
    pub explanation: String,
    pub word_count: usize,
}

/// Which branch produced a set of hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookSource {
    /// The model answered and its candidates were filtered
    Model { provider: String },
    /// Templates were used because the model was unavailable or failed
    Fallback { reason: String },
}

impl HookSource {
    pub fn label(&self) -> &'static str {
        match self {
            HookSource::Model { .. } => "model",
            HookSource::Fallback { .. } => "fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, HookSource::Fallback { .. })
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct Generation {
    pub hooks: Vec<ValidatedHook>,
    pub source: HookSource,
}

impl Generation {
    pub fn into_response(self, request: &GenerationRequest) -> HookResponse {
        HookResponse {
            count: self.hooks.len(),
            hooks: self.hooks,
            topic: request.topic.clone(),
            niche: request.niche.clone(),
            style: request.style.as_str().to_string(),
            spice_level: request.spice_level.value(),
            source: self.source.label().to_string(),
        }
    }
}

/// Response body returned to the front end
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookResponse {
    pub hooks: Vec<ValidatedHook>,
    pub count: usize,
    pub topic: String,
    pub niche: String,
    pub style: String,
    pub spice_level: u8,
    pub source: String,
}
