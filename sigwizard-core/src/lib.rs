//! SigWizard Core - Email Signature Composition Engine
//!
//! # Ground Rules
//! 1. Tables Only: rendered markup targets mail clients, not browsers
//! 2. Blank Means Absent: an empty field removes its whole block
//! 3. Total Functions: colors, renderers and the codec never abort the caller
//! 4. Deterministic Output: same record, same markup, same token
//! 5. Shell Owns State: the core receives records by reference and never mutates them

pub mod color;
pub mod record;
pub mod templates;
pub mod share;
pub mod snapshot;
pub mod clipboard;
pub mod palette;
pub mod i18n;
pub mod config;
pub mod pipeline;

pub use color::{complementary_color, contrast_color, COMPLEMENT_FALLBACK, CONTRAST_FALLBACK};
pub use record::{PartialRecord, RecordField, SignatureRecord};
pub use templates::{render, Layout, LayoutRenderer, PreviewLabels, Theme};
pub use share::{decode, encode, ShareError, ShareOptions, SharePayload};
pub use snapshot::{FileStore, KeyValueStore, MemoryStore, Snapshot};
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use i18n::{preview_labels, Language};
pub use config::StudioConfig;
pub use pipeline::{CopyOutcome, CopyStatus, RenderedSignature, SignatureStudio, StudioError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
