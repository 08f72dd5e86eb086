//! Layout System - Signature Markup Renderers
//!
//! Every layout is a pure function of `(record, theme, labels)` producing one
//! self-contained block of nested `<table>` markup. Tables are the only layout
//! model mail clients honor reliably, so no flexbox or grid appears anywhere.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::color::sanitize_color;
use crate::record::SignatureRecord;

pub mod blocks;
mod classic;
mod compact;
mod modern;

pub use classic::ClassicLayout;
pub use compact::CompactLayout;
pub use modern::ModernLayout;

pub const AVATAR_SERVICE: &str = "https://i.pravatar.cc/100";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Classic,
    Compact,
    Modern,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Classic, Layout::Compact, Layout::Modern];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Compact => "compact",
            Self::Modern => "modern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for Theme {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownVariant { kind: "theme", value: s.to_string() }),
        }
    }
}

impl FromStr for Layout {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "compact" => Ok(Self::Compact),
            "modern" => Ok(Self::Modern),
            _ => Err(UnknownVariant { kind: "layout", value: s.to_string() }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Words printed next to contact rows plus the default CTA labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewLabels {
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub book_call_button: String,
    pub book_visit_button: String,
}

/// Theme-dependent text and background tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub main_text: &'static str,
    pub secondary_text: &'static str,
    pub bold_text: &'static str,
    pub disclaimer: &'static str,
}

pub trait LayoutRenderer: Send + Sync {
    fn layout(&self) -> Layout;
    fn render(&self, record: &SignatureRecord, theme: Theme, labels: &PreviewLabels) -> String;
}

pub fn renderer_for(layout: Layout) -> &'static dyn LayoutRenderer {
    match layout {
        Layout::Classic => &ClassicLayout,
        Layout::Compact => &CompactLayout,
        Layout::Modern => &ModernLayout,
    }
}

/// Render `record` with the selected layout.
pub fn render(
    layout: Layout,
    record: &SignatureRecord,
    theme: Theme,
    labels: &PreviewLabels,
) -> String {
    let html = renderer_for(layout).render(record, theme, labels);
    tracing::debug!(%layout, %theme, bytes = html.len(), "rendered signature");
    html
}

/// Values every layout derives from the record before templating.
pub(crate) struct RenderContext<'a> {
    pub record: &'a SignatureRecord,
    pub labels: &'a PreviewLabels,
    pub full_name: String,
    pub primary: String,
    pub secondary: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(record: &'a SignatureRecord, labels: &'a PreviewLabels) -> Self {
        Self {
            record,
            labels,
            full_name: record.full_name(),
            primary: sanitize_color(&record.primary_color),
            secondary: sanitize_color(&record.secondary_color),
        }
    }

    /// Picture URL, or the placeholder avatar keyed by the full name.
    pub fn avatar_url(&self) -> String {
        if self.record.picture_url.is_empty() {
            placeholder_avatar(&self.full_name)
        } else {
            self.record.picture_url.clone()
        }
    }

    pub fn book_call_label(&self) -> &str {
        cta_label(&self.record.book_call_label, &self.labels.book_call_button)
    }

    pub fn book_visit_label(&self) -> &str {
        cta_label(&self.record.book_visit_label, &self.labels.book_visit_button)
    }
}

/// Display form of a website: no scheme, no `www.`, no trailing slash.
pub fn website_display(url: &str) -> &str {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.strip_suffix('/').unwrap_or(rest)
}

/// `tel:` target with every whitespace character removed.
pub fn tel_target(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Deterministic placeholder avatar for people without a picture.
pub fn placeholder_avatar(full_name: &str) -> String {
    let key: String = full_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{AVATAR_SERVICE}?u={}", urlencoding::encode(&key))
}

pub fn cta_label<'a>(label: &'a str, default: &'a str) -> &'a str {
    if label.is_empty() {
        default
    } else {
        label
    }
}
