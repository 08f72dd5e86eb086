//! Signature Record - The Field Set Shared By Every Component
//!
//! Every field is a plain string that defaults to empty. Blank means "omit
//! the block", never "render an empty placeholder".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::color::sanitize_color;

/// Declares `SignatureRecord`, `PartialRecord` and `RecordField` from one
/// field list so the three stay in lockstep.
macro_rules! signature_fields {
    ($( $field:ident => $variant:ident, $wire:literal; )+) => {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct SignatureRecord {
            $(
                #[serde(default)]
                pub $field: String,
            )+
        }

        /// Sparse view of a record: `None` means "leave the target untouched".
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct PartialRecord {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RecordField {
            $( $variant, )+
        }

        impl RecordField {
            pub const ALL: &'static [RecordField] = &[$( RecordField::$variant, )+];

            /// Name used in JSON payloads, snapshots and share tokens.
            pub fn wire_name(self) -> &'static str {
                match self {
                    $( RecordField::$variant => $wire, )+
                }
            }
        }

        impl FromStr for RecordField {
            type Err = UnknownField;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok(RecordField::$variant), )+
                    other => Err(UnknownField(other.to_string())),
                }
            }
        }

        impl SignatureRecord {
            pub fn get(&self, field: RecordField) -> &str {
                match field {
                    $( RecordField::$variant => &self.$field, )+
                }
            }

            pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
                let value = value.into();
                match field {
                    $( RecordField::$variant => self.$field = value, )+
                }
            }

            /// Overwrite every field that is present in `partial`.
            pub fn merge(&mut self, partial: &PartialRecord) {
                $(
                    if let Some(value) = &partial.$field {
                        self.$field = value.clone();
                    }
                )+
            }

            pub fn merged(mut self, partial: &PartialRecord) -> Self {
                self.merge(partial);
                self
            }
        }

        impl PartialRecord {
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }

            pub fn get(&self, field: RecordField) -> Option<&str> {
                match field {
                    $( RecordField::$variant => self.$field.as_deref(), )+
                }
            }

            /// Copy `fields` out of `record`, leaving every other field absent.
            pub fn project(record: &SignatureRecord, fields: &[RecordField]) -> Self {
                let mut partial = Self::default();
                for field in fields {
                    let value = Some(record.get(*field).to_string());
                    match field {
                        $( RecordField::$variant => partial.$field = value, )+
                    }
                }
                partial
            }
        }
    };
}

signature_fields! {
    first_name => FirstName, "firstName";
    last_name => LastName, "lastName";
    role => Role, "role";
    company => Company, "company";
    phone_number => PhoneNumber, "phoneNumber";
    email => Email, "email";
    address => Address, "address";
    picture_url => PictureUrl, "pictureUrl";
    instagram_url => InstagramUrl, "instagramUrl";
    facebook_url => FacebookUrl, "facebookUrl";
    linkedin_url => LinkedinUrl, "linkedinUrl";
    website_url => WebsiteUrl, "websiteUrl";
    youtube_url => YoutubeUrl, "youtubeUrl";
    primary_color => PrimaryColor, "primaryColor";
    secondary_color => SecondaryColor, "secondaryColor";
    disclaimer => Disclaimer, "disclaimer";
    quote => Quote, "quote";
    book_call_url => BookCallUrl, "bookCallUrl";
    book_visit_url => BookVisitUrl, "bookVisitUrl";
    book_call_label => BookCallLabel, "bookCallLabel";
    book_visit_label => BookVisitLabel, "bookVisitLabel";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown signature field '{0}'")]
pub struct UnknownField(pub String);

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl SignatureRecord {
    /// The record a fresh session starts from.
    pub fn sample() -> Self {
        Self {
            first_name: "Emily".into(),
            last_name: "Cooper".into(),
            role: "Marketing Associate".into(),
            company: "Savoir".into(),
            phone_number: "+33 7 12 34 56 78".into(),
            email: "emily.cooper@savoir.com".into(),
            address: "1 Place de l'Estrapade, 75005 Paris, France".into(),
            picture_url: "https://i.pravatar.cc/100?u=emilycooper".into(),
            instagram_url: "https://www.instagram.com/emilyinparis".into(),
            facebook_url: String::new(),
            linkedin_url: "https://www.linkedin.com/in/emily-cooper-savoir".into(),
            website_url: "https://savoir.com".into(),
            youtube_url: String::new(),
            primary_color: "#D81B60".into(),
            secondary_color: "#3D5A80".into(),
            disclaimer: "Ce message est confidentiel. Merci de ne pas l'imprimer pour préserver l'environnement.".into(),
            quote: "Bring your vision to life with our customizable furniture designs!".into(),
            book_call_url: String::new(),
            book_visit_url: String::new(),
            book_call_label: "Réserver un appel".into(),
            book_visit_label: "Planifier une visite".into(),
        }
    }

    /// `first last`, trimmed; empty when both are blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Role and company joined by `" | "`, skipping blanks.
    pub fn role_and_company(&self) -> String {
        [self.role.as_str(), self.company.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn has_social(&self) -> bool {
        [
            &self.linkedin_url,
            &self.instagram_url,
            &self.facebook_url,
            &self.youtube_url,
        ]
        .iter()
        .any(|url| !url.is_empty())
    }

    pub fn has_cta(&self) -> bool {
        !self.book_call_url.is_empty() || !self.book_visit_url.is_empty()
    }

    /// Copy with both accent colors in canonical `#RRGGBB` form.
    ///
    /// Malformed colors become the neutral gray.
    pub fn normalized_colors(&self) -> Self {
        Self {
            primary_color: sanitize_color(&self.primary_color),
            secondary_color: sanitize_color(&self.secondary_color),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NEUTRAL_GRAY;
    use serde_json::json;

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let record: SignatureRecord = serde_json::from_value(json!({"firstName": "Ada"})).unwrap();
        assert_eq!(record.first_name, "Ada");
        assert_eq!(record.company, "");
        assert_eq!(record.book_visit_label, "");
    }

    #[test]
    fn test_wire_names_round_trip() {
        for field in RecordField::ALL {
            assert_eq!(field.wire_name().parse::<RecordField>(), Ok(*field));
        }
        assert!("nickname".parse::<RecordField>().is_err());
        assert_eq!(RecordField::ALL.len(), 21);
    }

    #[test]
    fn test_serialized_keys_match_wire_names() {
        let value = serde_json::to_value(SignatureRecord::default()).unwrap();
        let object = value.as_object().unwrap();
        for field in RecordField::ALL {
            assert!(object.contains_key(field.wire_name()), "missing {field}");
        }
    }

    #[test]
    fn test_full_name_and_role_line() {
        let mut record = SignatureRecord::default();
        assert_eq!(record.full_name(), "");
        record.last_name = "Lovelace".into();
        assert_eq!(record.full_name(), "Lovelace");
        record.first_name = "Ada".into();
        assert_eq!(record.full_name(), "Ada Lovelace");

        assert_eq!(record.role_and_company(), "");
        record.company = "Analytical Engines".into();
        assert_eq!(record.role_and_company(), "Analytical Engines");
        record.role = "Programmer".into();
        assert_eq!(record.role_and_company(), "Programmer | Analytical Engines");
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let partial = PartialRecord {
            company: Some("Société Générale".into()),
            quote: Some(String::new()),
            ..Default::default()
        };
        let merged = SignatureRecord::sample().merged(&partial);
        assert_eq!(merged.company, "Société Générale");
        assert_eq!(merged.quote, "");
        assert_eq!(merged.first_name, "Emily");
    }

    #[test]
    fn test_partial_skips_absent_fields() {
        let partial = PartialRecord::project(&SignatureRecord::sample(), &[RecordField::Company]);
        assert_eq!(serde_json::to_value(&partial).unwrap(), json!({"company": "Savoir"}));
        assert!(!partial.is_empty());
        assert!(PartialRecord::default().is_empty());
    }

    #[test]
    fn test_keyed_access() {
        let mut record = SignatureRecord::default();
        record.set(RecordField::YoutubeUrl, "https://youtube.com/@ada");
        assert_eq!(record.get(RecordField::YoutubeUrl), "https://youtube.com/@ada");
        assert!(record.has_social());
        assert!(!record.has_cta());
    }

    #[test]
    fn test_normalized_colors() {
        let record = SignatureRecord {
            primary_color: "#d81b60".into(),
            secondary_color: "oops".into(),
            ..Default::default()
        };
        let normalized = record.normalized_colors();
        assert_eq!(normalized.primary_color, "#D81B60");
        assert_eq!(normalized.secondary_color, NEUTRAL_GRAY);
    }
}
