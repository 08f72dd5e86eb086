//! Built-in preview labels for the supported interface languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::templates::{PreviewLabels, UnknownVariant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    De,
    Es,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Fr, Language::En, Language::De, Language::Es];

    pub fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant { kind: "language", value: s.to_string() })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub fn preview_labels(lang: Language) -> PreviewLabels {
    let (phone, email, address, website, call, visit) = match lang {
        Language::Fr => ("Tél :", "E-mail :", "Adresse :", "Site :", "Réserver un appel", "Planifier une visite"),
        Language::En => ("Phone:", "Email:", "Address:", "Website:", "Book a call", "Plan a visit"),
        Language::De => ("Tel.:", "E-Mail:", "Adresse:", "Webseite:", "Anruf buchen", "Besuch planen"),
        Language::Es => ("Tel.:", "Correo:", "Dirección:", "Web:", "Reservar una llamada", "Planificar una visita"),
    };
    PreviewLabels {
        phone: phone.into(),
        email: email.into(),
        address: address.into(),
        website: website.into(),
        book_call_button: call.into(),
        book_visit_button: visit.into(),
    }
}

/// True when `label` is some language's stock "book a call" text.
pub fn is_default_call_label(label: &str) -> bool {
    Language::ALL
        .into_iter()
        .any(|lang| preview_labels(lang).book_call_button == label)
}

/// True when `label` is some language's stock "book a visit" text.
pub fn is_default_visit_label(label: &str) -> bool {
    Language::ALL
        .into_iter()
        .any(|lang| preview_labels(lang).book_visit_button == label)
}
