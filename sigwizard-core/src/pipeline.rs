//! Signature Studio - Single Entry Point For The Shell
//!
//! Owns the mutable session state and is the only place that calls the
//! renderers, the share codec and the clipboard. Everything it delegates to
//! is pure; this is where state changes happen.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::clipboard::{plain_text, Clipboard, ClipboardError};
use crate::color::complementary_color;
use crate::config::StudioConfig;
use crate::i18n::{is_default_call_label, is_default_visit_label, preview_labels, Language};
use crate::palette::{PaletteError, PaletteSuggestion};
use crate::record::{RecordField, SignatureRecord};
use crate::share::{self, ShareError, ShareOptions};
use crate::snapshot::{self, KeyValueStore, Snapshot, SnapshotError};
use crate::templates::{self, Layout, PreviewLabels, Theme};

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Share error: {0}")]
    Share(#[from] ShareError),
}

/// One render of the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSignature {
    pub layout: Layout,
    pub theme: Theme,
    pub html: String,
    pub plain_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyOutcome {
    Copied,
    Failed,
    /// Nothing to copy, e.g. a share link with no group opted in.
    Skipped,
}

/// Transient feedback for the copy buttons, reverted after `reset_after`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyStatus {
    pub outcome: CopyOutcome,
    pub message: String,
    #[serde(with = "millis")]
    pub reset_after: Duration,
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

#[derive(Debug, Clone)]
pub struct SignatureStudio {
    lang: Language,
    theme: Theme,
    layout: Layout,
    record: SignatureRecord,
    defaults: SignatureRecord,
    config: StudioConfig,
}

impl SignatureStudio {
    pub fn new(config: StudioConfig) -> Self {
        let defaults = SignatureRecord::sample();
        Self {
            lang: config.default_language,
            theme: Theme::default(),
            layout: Layout::default(),
            record: defaults.clone(),
            defaults,
            config,
        }
    }

    /// Use `defaults` as the base record instead of the built-in sample.
    pub fn with_defaults(mut self, defaults: SignatureRecord) -> Self {
        self.record = defaults.clone();
        self.defaults = defaults;
        self
    }

    /// Restore the saved session, then apply a share token over it.
    ///
    /// Shared fields win over saved ones. A bad token is logged and treated
    /// as "no shared data".
    pub fn load(&mut self, store: &dyn KeyValueStore, share_token: Option<&str>) {
        let saved = snapshot::load_snapshot(store, &self.defaults);
        self.lang = saved.lang;
        self.theme = saved.theme;
        self.layout = saved.layout;
        self.record = saved.signature_data;

        match share::decode(share_token) {
            Ok(payload) if payload.is_empty() => {}
            Ok(payload) => {
                info!(layout = ?payload.layout, "applying shared template");
                payload.apply(&mut self.record, &mut self.layout);
            }
            Err(err) => warn!(error = %err, "ignoring malformed share token"),
        }
    }

    /// Like `load`, reading the token from a share link.
    pub fn load_from_link(&mut self, store: &dyn KeyValueStore, link: &str) {
        let token = share::token_from_link(link);
        self.load(store, token.as_deref());
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StudioError> {
        snapshot::save_snapshot(store, &self.snapshot())?;
        Ok(())
    }

    /// Back to defaults; only the language survives, in memory and in `store`.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) -> Result<(), StudioError> {
        snapshot::reset_snapshot(store, self.lang)?;
        self.record = self.defaults.clone();
        self.layout = Layout::default();
        self.theme = Theme::default();
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lang: self.lang,
            theme: self.theme,
            layout: self.layout,
            signature_data: self.record.clone(),
        }
    }

    pub fn record(&self) -> &SignatureRecord {
        &self.record
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn labels(&self) -> PreviewLabels {
        preview_labels(self.lang)
    }

    /// Change one field. A new primary color also derives the secondary one.
    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        if field == RecordField::PrimaryColor {
            self.record.secondary_color = complementary_color(&value);
        }
        self.record.set(field, value);
    }

    /// Switch language, relabeling CTA buttons still on a stock label.
    pub fn set_language(&mut self, lang: Language) {
        self.lang = lang;
        let labels = preview_labels(lang);
        if is_default_call_label(&self.record.book_call_label) {
            self.record.book_call_label = labels.book_call_button;
        }
        if is_default_visit_label(&self.record.book_visit_label) {
            self.record.book_visit_label = labels.book_visit_button;
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
    }

    /// Apply a palette fetch result; on failure the colors stay as they were.
    pub fn apply_palette(&mut self, result: Result<PaletteSuggestion, PaletteError>) -> bool {
        match result {
            Ok(suggestion) => {
                suggestion.apply(&mut self.record);
                true
            }
            Err(err) => {
                warn!(error = %err, "palette suggestion failed, keeping colors");
                false
            }
        }
    }

    pub fn render(&self) -> RenderedSignature {
        let html = templates::render(self.layout, &self.record, self.theme, &self.labels());
        RenderedSignature {
            layout: self.layout,
            theme: self.theme,
            plain_text: plain_text(&html),
            html,
        }
    }

    pub fn share_token(&self, options: ShareOptions) -> Option<String> {
        share::encode(&self.record, self.layout, options)
    }

    /// Share link on the configured base URL, or `None` when nothing was opted in.
    pub fn share_link(&self, options: ShareOptions) -> Result<Option<String>, StudioError> {
        match self.share_token(options) {
            Some(token) => Ok(Some(share::build_share_link(
                &self.config.share_base_url,
                &token,
            )?)),
            None => Ok(None),
        }
    }

    pub fn copy_signature(&self, clipboard: &dyn Clipboard) -> CopyStatus {
        let rendered = self.render();
        let result = clipboard.write_html(&rendered.html, &rendered.plain_text);
        self.status(result, "Signature copied", "Copy failed")
    }

    pub fn copy_share_link(&self, clipboard: &dyn Clipboard, options: ShareOptions) -> CopyStatus {
        match self.share_link(options) {
            Ok(Some(link)) => self.status(clipboard.write_text(&link), "Link copied", "Copy failed"),
            Ok(None) => CopyStatus {
                outcome: CopyOutcome::Skipped,
                message: String::new(),
                reset_after: Duration::ZERO,
            },
            Err(err) => {
                warn!(error = %err, "could not build share link");
                CopyStatus {
                    outcome: CopyOutcome::Failed,
                    message: format!("Copy failed: {err}"),
                    reset_after: Duration::from_millis(self.config.status_reset_ms),
                }
            }
        }
    }

    fn status(&self, result: Result<(), ClipboardError>, ok: &str, failed: &str) -> CopyStatus {
        let reset_after = Duration::from_millis(self.config.status_reset_ms);
        match result {
            Ok(()) => CopyStatus {
                outcome: CopyOutcome::Copied,
                message: ok.to_string(),
                reset_after,
            },
            Err(err) => {
                warn!(error = %err, "clipboard write failed");
                CopyStatus {
                    outcome: CopyOutcome::Failed,
                    message: format!("{failed}: {err}"),
                    reset_after,
                }
            }
        }
    }
}

impl Default for SignatureStudio {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardContent, MemoryClipboard};
    use crate::snapshot::{MemoryStore, STORAGE_KEY};

    #[test]
    fn test_primary_color_derives_secondary() {
        let mut studio = SignatureStudio::default();
        studio.set_field(RecordField::PrimaryColor, "#000000");
        assert_eq!(studio.record().primary_color, "#000000");
        assert_eq!(studio.record().secondary_color, "#FFFFFF");

        studio.set_field(RecordField::PrimaryColor, "bogus");
        assert_eq!(studio.record().secondary_color, "#4A4A4A");
    }

    #[test]
    fn test_language_change_relabels_stock_ctas_only() {
        let mut studio = SignatureStudio::default();
        studio.set_field(RecordField::BookVisitLabel, "Drop by the shop");
        studio.set_language(Language::En);
        assert_eq!(studio.record().book_call_label, "Book a call");
        assert_eq!(studio.record().book_visit_label, "Drop by the shop");
    }

    #[test]
    fn test_share_token_overrides_snapshot() {
        let mut store = MemoryStore::new();
        let mut saved = SignatureStudio::default();
        saved.set_field(RecordField::Company, "Saved Co");
        saved.set_field(RecordField::FirstName, "Ada");
        saved.save(&mut store).unwrap();

        let mut sharer = SignatureStudio::default();
        sharer.set_field(RecordField::Company, "Shared Co");
        sharer.set_layout(Layout::Modern);
        let token = sharer.share_token(ShareOptions::default()).unwrap();

        let mut studio = SignatureStudio::default();
        studio.load(&store, Some(&token));
        assert_eq!(studio.record().company, "Shared Co");
        assert_eq!(studio.record().first_name, "Ada");
        assert_eq!(studio.layout(), Layout::Modern);
    }

    #[test]
    fn test_bad_token_does_not_block_load() {
        let mut studio = SignatureStudio::default();
        studio.load(&MemoryStore::new(), Some("%%%not-a-token"));
        assert_eq!(studio.record(), &SignatureRecord::sample());
    }

    #[test]
    fn test_load_from_link() {
        let sharer = SignatureStudio::default().with_defaults(SignatureRecord {
            company: "Linked".into(),
            ..Default::default()
        });
        let link = sharer.share_link(ShareOptions::default()).unwrap().unwrap();
        assert!(link.starts_with(crate::config::DEFAULT_SHARE_BASE_URL));

        let mut studio = SignatureStudio::default();
        studio.load_from_link(&MemoryStore::new(), &link);
        assert_eq!(studio.record().company, "Linked");
    }

    #[test]
    fn test_reset_keeps_language() {
        let mut store = MemoryStore::new();
        let mut studio = SignatureStudio::default();
        studio.set_language(Language::Es);
        studio.toggle_theme();
        studio.set_field(RecordField::FirstName, "Ada");
        studio.save(&mut store).unwrap();

        studio.reset(&mut store).unwrap();
        assert_eq!(studio.record(), &SignatureRecord::sample());
        assert_eq!(studio.theme(), Theme::Light);
        assert!(store.get(STORAGE_KEY).unwrap().unwrap().contains("\"es\""));
    }

    #[test]
    fn test_copy_signature_places_html_and_text() {
        let studio = SignatureStudio::default();
        let clipboard = MemoryClipboard::new();
        let status = studio.copy_signature(&clipboard);
        assert_eq!(status.outcome, CopyOutcome::Copied);
        assert_eq!(status.reset_after, Duration::from_millis(2500));

        match clipboard.contents() {
            Some(ClipboardContent::Html { html, alt_text }) => {
                assert!(html.starts_with("<div class=\"signature-container\">"));
                assert!(alt_text.contains("Emily Cooper"));
                assert!(!alt_text.contains('<'));
            }
            other => panic!("unexpected clipboard contents: {other:?}"),
        }
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let studio = SignatureStudio::default();
        let status = studio.copy_signature(&MemoryClipboard::failing());
        assert_eq!(status.outcome, CopyOutcome::Failed);
        assert!(status.message.starts_with("Copy failed"));
    }

    #[test]
    fn test_copy_share_link_without_groups_is_skipped() {
        let studio = SignatureStudio::default();
        let clipboard = MemoryClipboard::new();
        let options = ShareOptions {
            include_appearance: false,
            include_company_info: false,
        };
        assert_eq!(studio.copy_share_link(&clipboard, options).outcome, CopyOutcome::Skipped);
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_share_link_on_configured_base_with_stale_token() {
        let studio = SignatureStudio::new(StudioConfig {
            share_base_url: "https://sig.example/app?template=stale#editor".into(),
            ..StudioConfig::default()
        });
        let token = studio.share_token(ShareOptions::default()).unwrap();
        let link = studio.share_link(ShareOptions::default()).unwrap().unwrap();
        assert_eq!(link, format!("https://sig.example/app?template={token}#editor"));

        assert_eq!(share::token_from_link(&link), Some(token));
    }

    #[test]
    fn test_copy_share_link_with_bad_base_url_fails() {
        let studio = SignatureStudio::new(StudioConfig {
            share_base_url: "sigwizard.app".into(),
            ..StudioConfig::default()
        });
        assert!(matches!(
            studio.share_link(ShareOptions::default()),
            Err(StudioError::Share(ShareError::BaseUrl(_)))
        ));

        let clipboard = MemoryClipboard::new();
        let status = studio.copy_share_link(&clipboard, ShareOptions::default());
        assert_eq!(status.outcome, CopyOutcome::Failed);
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn test_failed_palette_keeps_colors() {
        let mut studio = SignatureStudio::default();
        assert!(!studio.apply_palette(Err(PaletteError::Request("offline".into()))));
        assert_eq!(studio.record().primary_color, "#D81B60");

        assert!(studio.apply_palette(Ok(PaletteSuggestion {
            primary: "#112233".into(),
            secondary: "#445566".into(),
        })));
        assert_eq!(studio.record().secondary_color, "#445566");
    }
}
