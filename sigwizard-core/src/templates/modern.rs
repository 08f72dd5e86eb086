//! Modern layout: a solid accent panel beside a contact block.
//!
//! The panel is filled with the primary color, so its text and icons take
//! `contrast_color(primary)` instead of the theme palette.

use super::blocks::{
    cta_button, escape, external_href, glyph_svg, render_blocks, social_row, Block, ContactGlyph,
    CtaStyle, SocialNetwork, FONT_STACK, SERIF_STACK, TABLE_OPEN,
};
use super::{tel_target, website_display, Layout, LayoutRenderer, Palette, PreviewLabels, RenderContext, Theme};
use crate::color::{contrast_color, sanitize_color};
use crate::record::SignatureRecord;

pub const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    main_text: "#2D3748",
    secondary_text: "#718096",
    bold_text: "#1A202C",
    disclaimer: "#718096",
};

pub const DARK: Palette = Palette {
    background: "#1A202C",
    main_text: "#E2E8F0",
    secondary_text: "#A0AEC0",
    bold_text: "#F7FAFC",
    disclaimer: "#A0AEC0",
};

const SOCIAL_ORDER: [SocialNetwork; 4] = [
    SocialNetwork::Facebook,
    SocialNetwork::Youtube,
    SocialNetwork::Instagram,
    SocialNetwork::Linkedin,
];

pub struct ModernLayout;

impl ModernLayout {
    /// Text and icon color used inside the accent panel.
    pub fn panel_text_color(record: &SignatureRecord) -> &'static str {
        contrast_color(&sanitize_color(&record.primary_color))
    }
}

impl LayoutRenderer for ModernLayout {
    fn layout(&self) -> Layout {
        Layout::Modern
    }

    fn render(&self, record: &SignatureRecord, theme: Theme, labels: &PreviewLabels) -> String {
        let ctx = RenderContext::new(record, labels);
        let p = match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        };
        let on_panel = Self::panel_text_color(record);
        let display_name = ctx.full_name.to_uppercase();

        let panel = render_blocks(vec![
            Block::filled(&record.picture_url, || {
                format!(
                    r#"<tr><td align="center" style="padding-bottom:12px;"><img src="{}" alt="{}" width="90" height="90" style="display:block;border-radius:50%;width:90px;height:90px;object-fit:cover;border:2px solid {on_panel};" /></td></tr>"#,
                    escape(&record.picture_url),
                    escape(&display_name),
                )
            }),
            Block::filled(&display_name, || {
                format!(
                    r#"<tr><td align="center" style="font-family:{SERIF_STACK};font-size:20px;font-weight:bold;color:{on_panel};line-height:1.1;letter-spacing:1px;padding-bottom:5px;">{}</td></tr>"#,
                    escape(&display_name)
                )
            }),
            Block::filled(&record.role, || {
                format!(
                    r#"<tr><td align="center" style="font-family:{FONT_STACK};color:{on_panel};font-size:14px;padding-bottom:12px;">{}</td></tr>"#,
                    escape(&record.role)
                )
            }),
            Block::when(record.has_social(), || {
                format!(
                    r#"<tr><td align="center">{}</td></tr>"#,
                    social_row(record, &SOCIAL_ORDER, on_panel, "padding:0 5px;")
                )
            }),
        ]);

        let contact = |glyph: ContactGlyph, pad_bottom: u32, body: String| {
            format!(
                r#"<tr><td valign="middle" style="padding-right:10px;padding-bottom:{pad_bottom}px;">{}</td><td valign="middle" style="padding-bottom:{pad_bottom}px;">{body}</td></tr>"#,
                glyph_svg(glyph, 18, p.main_text)
            )
        };
        let link = |href: String, text: &str| {
            format!(
                r#"<a {href} style="color:{};text-decoration:none;">{}</a>"#,
                ctx.secondary,
                escape(text)
            )
        };
        let cta = CtaStyle {
            background: &ctx.primary,
            color: on_panel,
            padding: "8px 16px",
            font_size: 12,
            width: None,
        };

        let details = render_blocks(vec![
            Block::filled(&record.quote, || {
                format!(
                    r#"<tr><td colspan="2" style="padding-bottom:16px;font-style:italic;color:{};">&quot;{}&quot;</td></tr>"#,
                    p.secondary_text,
                    escape(&record.quote)
                )
            }),
            Block::filled(&record.email, || {
                let href = format!(r#"href="mailto:{}""#, escape(&record.email));
                contact(ContactGlyph::Email, 8, link(href, &record.email))
            }),
            Block::filled(&record.website_url, || {
                let href = external_href(&record.website_url);
                contact(ContactGlyph::Website, 8, link(href, website_display(&record.website_url)))
            }),
            Block::filled(&record.phone_number, || {
                let href = format!(r#"href="tel:{}""#, escape(&tel_target(&record.phone_number)));
                contact(ContactGlyph::Phone, 8, link(href, &record.phone_number))
            }),
            Block::filled(&record.address, || {
                contact(ContactGlyph::Address, 0, escape(&record.address))
            }),
            Block::when(record.has_cta(), || {
                let buttons = render_blocks(vec![
                    Block::filled(&record.book_call_url, || {
                        format!(
                            r#"<td style="padding-right:10px;">{}</td>"#,
                            cta_button(&record.book_call_url, ctx.book_call_label(), &cta)
                        )
                    }),
                    Block::filled(&record.book_visit_url, || {
                        format!(
                            "<td>{}</td>",
                            cta_button(&record.book_visit_url, ctx.book_visit_label(), &cta)
                        )
                    }),
                ]);
                format!(
                    r#"<tr><td colspan="2" style="padding-top:16px;">{TABLE_OPEN} style="border-collapse:collapse;"><tbody><tr>{buttons}</tr></tbody></table></td></tr>"#
                )
            }),
        ]);

        let disclaimer = render_blocks(vec![Block::filled(&record.disclaimer, || {
            format!(
                r#"<tr><td colspan="2" style="padding-top:15px;padding-left:24px;padding-right:24px;font-family:{FONT_STACK};font-size:11px;font-style:italic;color:{};text-align:left;">{}</td></tr>"#,
                p.disclaimer,
                escape(&record.disclaimer)
            )
        })]);

        format!(
            concat!(
                r#"<div class="signature-container">"#,
                r#"{table} style="border-collapse:collapse;width:auto;background-color:{bg};font-family:{font};font-size:13px;color:{main};"><tbody><tr>"#,
                r#"<td valign="middle" align="center" style="background-color:{primary};padding:24px;width:200px;">"#,
                r#"{table} style="border-collapse:collapse;width:100%;"><tbody>{panel}</tbody></table>"#,
                r#"</td>"#,
                r#"<td valign="top" style="padding:24px;">"#,
                r#"{table} style="border-collapse:collapse;width:100%;"><tbody>{details}</tbody></table>"#,
                r#"</td>"#,
                r#"</tr>{disclaimer}</tbody></table></div>"#
            ),
            table = TABLE_OPEN,
            bg = p.background,
            font = FONT_STACK,
            main = p.main_text,
            primary = ctx.primary,
            panel = panel,
            details = details,
            disclaimer = disclaimer,
        )
    }
}
