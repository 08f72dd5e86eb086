//! Contract Invariant Tests
//!
//! These tests verify the guarantees every caller relies on.

use sigwizard_core::{
    color::{BLACK, NEUTRAL_GRAY, WHITE},
    complementary_color, contrast_color, decode, encode, preview_labels, render,
    share::{build_share_link, token_from_link},
    snapshot::{load_snapshot, STORAGE_KEY},
    templates::ModernLayout,
    KeyValueStore, Language, Layout, MemoryStore, ShareOptions, SignatureRecord, Theme,
    COMPLEMENT_FALLBACK, CONTRAST_FALLBACK,
};

fn ada() -> SignatureRecord {
    SignatureRecord {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        ..Default::default()
    }
}

fn every_combination() -> impl Iterator<Item = (Layout, Theme)> {
    Layout::ALL
        .into_iter()
        .flat_map(|layout| [Theme::Light, Theme::Dark].map(|theme| (layout, theme)))
}

#[test]
fn invariant_complement_is_involution() {
    for r in (0..=255u32).step_by(51) {
        for g in (0..=255u32).step_by(17) {
            for b in [0u32, 1, 127, 128, 254, 255] {
                let hex = format!("#{r:02X}{g:02X}{b:02X}");
                assert_eq!(complementary_color(&complementary_color(&hex)), hex);
            }
        }
    }
}

#[test]
fn invariant_color_functions_are_total() {
    let adversarial = ["", "abc", "#12", "#", "######", "#12345g", "rgb(0,0,0)", "#ÀÀÀ", "\u{0}"];
    for input in adversarial {
        let complement = complementary_color(input);
        assert_eq!(complement, COMPLEMENT_FALLBACK, "complement of {input:?}");
        let contrast = contrast_color(input);
        assert!(contrast == CONTRAST_FALLBACK || contrast == BLACK, "contrast of {input:?}");
    }
    assert_eq!(contrast_color("#12"), CONTRAST_FALLBACK);
    assert_eq!(contrast_color(""), CONTRAST_FALLBACK);
}

#[test]
fn invariant_name_only_record_has_no_contact_links() {
    for lang in [Language::En, Language::Fr] {
        let labels = preview_labels(lang);
        for (layout, theme) in every_combination() {
            let html = render(layout, &ada(), theme, &labels);
            assert!(
                html.contains("Ada Lovelace") || html.contains("ADA LOVELACE"),
                "{layout}/{theme} lost the name"
            );
            assert!(!html.contains("tel:"), "{layout}/{theme} has a phone link");
            assert!(!html.contains("mailto:"), "{layout}/{theme} has an email link");
            assert!(!html.contains(&labels.phone), "{layout}/{theme} shows an empty label");
            assert!(!html.contains(&labels.book_call_button));
        }
    }
}

#[test]
fn invariant_classic_and_compact_keep_full_name_case() {
    let labels = preview_labels(Language::En);
    for layout in [Layout::Classic, Layout::Compact] {
        assert!(render(layout, &ada(), Theme::Light, &labels).contains("Ada Lovelace"));
    }
}

#[test]
fn invariant_markup_is_table_based() {
    let labels = preview_labels(Language::En);
    for (layout, theme) in every_combination() {
        let html = render(layout, &SignatureRecord::sample(), theme, &labels);
        assert!(html.starts_with(r#"<div class="signature-container">"#));
        assert!(html.ends_with("</table></div>"));
        assert_eq!(html.matches("<table").count(), html.matches("</table>").count());
        assert_eq!(html.matches("<tr>").count(), html.matches("</tr>").count());
        assert!(!html.contains("display:flex"));
        assert!(!html.contains("display:grid"));
    }
}

#[test]
fn invariant_render_is_deterministic() {
    let labels = preview_labels(Language::De);
    for (layout, theme) in every_combination() {
        let record = SignatureRecord::sample();
        assert_eq!(
            render(layout, &record, theme, &labels),
            render(layout, &record, theme, &labels)
        );
    }
}

#[test]
fn invariant_renderers_survive_hostile_records() {
    let hostile = SignatureRecord {
        first_name: "<script>".into(),
        last_name: "\"'&".into(),
        role: "\u{202e}".into(),
        phone_number: "   ".into(),
        email: "a\"onmouseover=\"x".into(),
        website_url: "https://".into(),
        primary_color: "#12".into(),
        secondary_color: "red".into(),
        book_call_url: "javascript:void(0)".into(),
        ..Default::default()
    };
    let labels = preview_labels(Language::Es);
    for (layout, theme) in every_combination() {
        let html = render(layout, &hostile, theme, &labels);
        assert!(!html.contains("<script>"));
        assert!(!html.contains("a\"onmouseover"));
        assert!(!html.contains(":red"));
        assert!(html.contains(NEUTRAL_GRAY));
    }
}

#[test]
fn invariant_share_round_trip_restores_only_included_fields() {
    let record = SignatureRecord {
        company: "Société Générale".to_string(),
        address: "17 cours Valmy, à La Défense, Île-de-France".to_string(),
        disclaimer: "Конфиденциально — 機密".to_string(),
        ..SignatureRecord::sample()
    };
    let token = encode(&record, Layout::Compact, ShareOptions::default()).expect("token");
    let payload = decode(Some(&token)).expect("decode");

    assert_eq!(payload.layout, Some(Layout::Compact));
    let fields = &payload.fields;
    assert_eq!(fields.company.as_deref(), Some("Société Générale"));
    assert_eq!(fields.address.as_deref(), Some(record.address.as_str()));
    assert_eq!(fields.disclaimer.as_deref(), Some(record.disclaimer.as_str()));
    assert_eq!(fields.primary_color.as_deref(), Some("#D81B60"));
    assert_eq!(fields.book_call_label.as_deref(), Some("Réserver un appel"));

    assert_eq!(fields.first_name, None);
    assert_eq!(fields.last_name, None);
    assert_eq!(fields.email, None);
    assert_eq!(fields.phone_number, None);
    assert_eq!(fields.picture_url, None);
    assert_eq!(fields.linkedin_url, None);
}

#[test]
fn invariant_empty_share_selection() {
    let options = ShareOptions {
        include_appearance: false,
        include_company_info: false,
    };
    assert!(encode(&SignatureRecord::sample(), Layout::Classic, options).is_none());
    let payload = decode(None).expect("absent token is not an error");
    assert!(payload.is_empty());
}

#[test]
fn invariant_modern_panel_contrast_boundary() {
    let mut record = ada();
    record.primary_color = "#000000".into();
    assert_eq!(ModernLayout::panel_text_color(&record), WHITE);
    record.primary_color = "#FFFFFF".into();
    assert_eq!(ModernLayout::panel_text_color(&record), BLACK);
    record.primary_color = "#808080".into();
    assert_eq!(ModernLayout::panel_text_color(&record), BLACK);
    record.primary_color = "#7F7F7F".into();
    assert_eq!(ModernLayout::panel_text_color(&record), WHITE);
}

#[test]
fn invariant_cta_label_falls_back_to_default() {
    let record = SignatureRecord {
        book_call_url: "https://cal.example/ada".into(),
        book_call_label: String::new(),
        ..ada()
    };
    for lang in [Language::En, Language::Fr] {
        let labels = preview_labels(lang);
        for (layout, theme) in every_combination() {
            let html = render(layout, &record, theme, &labels);
            assert!(
                html.contains(&format!(">{}</a>", labels.book_call_button)),
                "{layout}/{theme} missing default CTA label"
            );
            assert!(!html.contains("\"></a>"), "{layout}/{theme} rendered an empty button");
        }
    }
}

#[test]
fn invariant_share_link_carries_exactly_one_token() {
    let token = encode(&SignatureRecord::sample(), Layout::Modern, ShareOptions::default())
        .expect("token");
    for base in [
        "https://sig.example/app",
        "https://sig.example/app?template=stale",
        "https://sig.example/app?lang=en&template=stale#editor",
    ] {
        let link = build_share_link(base, &token).expect("absolute base URL");
        assert_eq!(link.matches("template=").count(), 1, "{link}");
        assert_eq!(token_from_link(&link).as_deref(), Some(token.as_str()), "{link}");
        if let Some(fragment_at) = link.find('#') {
            assert!(link.find('?').expect("query") < fragment_at, "{link}");
        }
    }
}

#[test]
fn invariant_one_bad_saved_value_keeps_the_rest() {
    let mut store = MemoryStore::new();
    store
        .set(
            STORAGE_KEY,
            r#"{"lang":"zh","theme":"","layout":"modern","signatureData":{"firstName":"Ada","company":"Acme"}}"#,
        )
        .expect("memory store");

    let snapshot = load_snapshot(&store, &SignatureRecord::sample());
    assert_eq!(snapshot.lang, Language::default());
    assert_eq!(snapshot.theme, Theme::Light);
    assert_eq!(snapshot.layout, Layout::Modern);
    assert_eq!(snapshot.signature_data.first_name, "Ada");
    assert_eq!(snapshot.signature_data.company, "Acme");
    assert_eq!(snapshot.signature_data.email, SignatureRecord::sample().email);
}
