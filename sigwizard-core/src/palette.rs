//! Palette Suggestions
//!
//! A random seed color is sent to a color-scheme service; the first and third
//! colors of the returned analogic scheme become the accent pair.

use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::color::normalize_hex;
use crate::record::SignatureRecord;

pub const SCHEME_ENDPOINT: &str = "https://www.thecolorapi.com/scheme";

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Palette request failed: {0}")]
    Request(String),

    #[error("Palette response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Palette response holds {0} colors, need at least 3")]
    TooFewColors(usize),

    #[error("Palette response color is not a hex value: {0}")]
    InvalidColor(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSuggestion {
    pub primary: String,
    pub secondary: String,
}

impl PaletteSuggestion {
    pub fn apply(&self, record: &mut SignatureRecord) {
        record.primary_color = self.primary.clone();
        record.secondary_color = self.secondary.clone();
    }
}

/// Anything that can answer a scheme request URL with a JSON body.
pub trait PaletteSource {
    fn fetch(&self, url: &str) -> Result<String, PaletteError>;
}

#[derive(Debug, Deserialize)]
pub struct SchemeResponse {
    #[serde(default)]
    pub colors: Vec<SchemeColor>,
}

#[derive(Debug, Deserialize)]
pub struct SchemeColor {
    pub hex: HexValue,
}

#[derive(Debug, Deserialize)]
pub struct HexValue {
    pub value: String,
}

/// Random seed as six lower-case hex digits, without `#`.
pub fn random_seed_color() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    format!("{:02x}{:02x}{:02x}", bytes[0], bytes[1], bytes[2])
}

pub fn scheme_request_url(seed: &str) -> String {
    let seed = seed.trim_start_matches('#');
    format!("{SCHEME_ENDPOINT}?hex={seed}&mode=analogic&count=3")
}

pub fn suggestion_from_response(body: &str) -> Result<PaletteSuggestion, PaletteError> {
    let response: SchemeResponse = serde_json::from_str(body)?;
    if response.colors.len() < 3 {
        return Err(PaletteError::TooFewColors(response.colors.len()));
    }

    let pick = |i: usize| {
        let value = &response.colors[i].hex.value;
        normalize_hex(value).ok_or_else(|| PaletteError::InvalidColor(value.clone()))
    };
    Ok(PaletteSuggestion {
        primary: pick(0)?,
        secondary: pick(2)?,
    })
}

/// Fetch a suggestion for a fresh random seed.
pub fn suggest(source: &dyn PaletteSource) -> Result<PaletteSuggestion, PaletteError> {
    let url = scheme_request_url(&random_seed_color());
    tracing::debug!(%url, "requesting palette");
    suggestion_from_response(&source.fetch(&url)?)
}
