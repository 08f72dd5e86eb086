//! Share Codec - Template Links
//!
//! A share token is a selective projection of the record (plus layout),
//! serialized to compact JSON, taken as UTF-8 bytes and mapped to URL-safe
//! base64. The byte step is explicit so non-Latin text survives intact.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::record::{PartialRecord, RecordField, SignatureRecord};
use crate::templates::Layout;

/// Query parameter carrying the token in a share link.
pub const SHARE_QUERY_PARAM: &str = "template";

pub const APPEARANCE_FIELDS: [RecordField; 2] = [RecordField::PrimaryColor, RecordField::SecondaryColor];

pub const COMPANY_FIELDS: [RecordField; 9] = [
    RecordField::Company,
    RecordField::Address,
    RecordField::WebsiteUrl,
    RecordField::BookCallUrl,
    RecordField::BookVisitUrl,
    RecordField::BookCallLabel,
    RecordField::BookVisitLabel,
    RecordField::Quote,
    RecordField::Disclaimer,
];

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("Token does not hold UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Token does not hold a template object: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid share base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOptions {
    pub include_appearance: bool,
    pub include_company_info: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            include_appearance: true,
            include_company_info: true,
        }
    }
}

/// Decoded token: sparse record fields plus the optional layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(flatten)]
    pub fields: PartialRecord,
}

impl SharePayload {
    pub fn is_empty(&self) -> bool {
        self.layout.is_none() && self.fields.is_empty()
    }

    /// Merge shared fields over `record`; switch `layout` only if one was shared.
    pub fn apply(&self, record: &mut SignatureRecord, layout: &mut Layout) {
        record.merge(&self.fields);
        if let Some(shared) = self.layout {
            *layout = shared;
        }
    }
}

/// Project the opted-in groups of `record` into a payload.
pub fn project(record: &SignatureRecord, layout: Layout, options: ShareOptions) -> SharePayload {
    let mut fields = Vec::new();
    if options.include_appearance {
        fields.extend_from_slice(&APPEARANCE_FIELDS);
    }
    if options.include_company_info {
        fields.extend_from_slice(&COMPANY_FIELDS);
    }
    SharePayload {
        layout: options.include_appearance.then_some(layout),
        fields: PartialRecord::project(record, &fields),
    }
}

/// Compact JSON with object keys in sorted order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    serde_json::to_string(&v)
}

/// Build a token, or `None` when nothing was opted in.
pub fn encode(record: &SignatureRecord, layout: Layout, options: ShareOptions) -> Option<String> {
    let payload = project(record, layout, options);
    if payload.is_empty() {
        return None;
    }

    let json = match canonical_json(&payload) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, "could not serialize share payload");
            return None;
        }
    };
    let token = URL_SAFE_NO_PAD.encode(json.as_bytes());
    debug!(bytes = json.len(), token_len = token.len(), "encoded share token");
    Some(token)
}

/// Inverse of `encode`. A missing or blank token is an empty payload.
pub fn decode(token: Option<&str>) -> Result<SharePayload, ShareError> {
    let token = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(SharePayload::default()),
    };

    let bytes = URL_SAFE_NO_PAD.decode(to_url_safe_alphabet(token))?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

/// Accept standard-alphabet and padded tokens alongside URL-safe ones.
fn to_url_safe_alphabet(token: &str) -> String {
    token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' | ' ' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Set the share query parameter on `base_url`, replacing any previous token.
///
/// Other query pairs and the fragment are kept where they were.
pub fn build_share_link(base_url: &str, token: &str) -> Result<String, ShareError> {
    let mut url = Url::parse(base_url)?;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != SHARE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(SHARE_QUERY_PARAM, token);
    Ok(url.into())
}

/// Pull the share token out of a link. Absence is not an error.
pub fn token_from_link(link: &str) -> Option<String> {
    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "share link is not a URL");
            return None;
        }
    };
    url.query_pairs()
        .find(|(key, _)| key == SHARE_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
