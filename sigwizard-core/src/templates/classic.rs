//! Classic layout: avatar and CTA column, accent divider, text column.

use super::blocks::{
    cta_button, escape, external_href, render_blocks, social_row, Block, CtaStyle, SocialNetwork,
    FONT_STACK, TABLE_OPEN,
};
use super::{tel_target, website_display, Layout, LayoutRenderer, Palette, PreviewLabels, RenderContext, Theme};
use crate::color::WHITE;
use crate::record::SignatureRecord;

pub const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    main_text: "#1E293B",
    secondary_text: "#64748B",
    bold_text: "#1E293B",
    disclaimer: "#777777",
};

pub const DARK: Palette = Palette {
    background: "#1E293B",
    main_text: "#CBD5E1",
    secondary_text: "#94A3B8",
    bold_text: "#F1F5F9",
    disclaimer: "#64748B",
};

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

const SOCIAL_ORDER: [SocialNetwork; 4] = [
    SocialNetwork::Linkedin,
    SocialNetwork::Instagram,
    SocialNetwork::Facebook,
    SocialNetwork::Youtube,
];

/// Spacing knobs for the two-column skeleton shared with Compact.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Density {
    pub avatar: u32,
    pub gutter: u32,
    pub font_size: u32,
    pub name_size: u32,
    pub row_gap: u32,
    pub section_gap: u32,
    pub cta_padding: &'static str,
    pub cta_font_size: u32,
    /// Width of the accent divider, `None` for no divider.
    pub divider: Option<u32>,
}

pub(crate) const CLASSIC: Density = Density {
    avatar: 100,
    gutter: 15,
    font_size: 14,
    name_size: 16,
    row_gap: 2,
    section_gap: 10,
    cta_padding: "8px 12px",
    cta_font_size: 12,
    divider: Some(3),
};

pub struct ClassicLayout;

impl LayoutRenderer for ClassicLayout {
    fn layout(&self) -> Layout {
        Layout::Classic
    }

    fn render(&self, record: &SignatureRecord, theme: Theme, labels: &PreviewLabels) -> String {
        two_column(&RenderContext::new(record, labels), palette(theme), &CLASSIC)
    }
}

/// Avatar column on the left, contact column on the right.
pub(crate) fn two_column(ctx: &RenderContext<'_>, p: Palette, d: &Density) -> String {
    let record = ctx.record;
    let row = |pad_bottom: u32, color: &str, body: String| {
        format!(
            r#"<tr><td style="padding-bottom:{pad_bottom}px;font-family:{FONT_STACK};color:{color};line-height:1.4;">{body}</td></tr>"#
        )
    };
    let labelled = |label: &str, value: String| {
        format!(
            r#"<strong style="color:{};font-weight:bold;">{}</strong> {value}"#,
            p.bold_text,
            escape(label)
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
        color: WHITE,
        padding: d.cta_padding,
        font_size: d.cta_font_size,
        width: Some(d.avatar),
    };
    let avatar = d.avatar;

    let left = render_blocks(vec![
        Block::filled(&ctx.full_name, || {
            format!(
                r#"<tr><td style="padding-bottom:{}px;"><img src="{}" alt="{}" width="{avatar}" height="{avatar}" style="display:block;border-radius:4px;width:{avatar}px;height:{avatar}px;object-fit:cover;" /></td></tr>"#,
                d.section_gap,
                escape(&ctx.avatar_url()),
                escape(&ctx.full_name),
            )
        }),
        Block::filled(&record.book_call_url, || {
            format!(
                r#"<tr><td style="padding-bottom:5px;">{}</td></tr>"#,
                cta_button(&record.book_call_url, ctx.book_call_label(), &cta)
            )
        }),
        Block::filled(&record.book_visit_url, || {
            format!(
                r#"<tr><td>{}</td></tr>"#,
                cta_button(&record.book_visit_url, ctx.book_visit_label(), &cta)
            )
        }),
    ]);

    let role_line = record.role_and_company();
    let right = render_blocks(vec![
        Block::filled(&ctx.full_name, || {
            format!(
                r#"<tr><td style="padding-bottom:2px;font-family:{FONT_STACK};font-size:{}px;font-weight:bold;color:{};line-height:1.2;">{}</td></tr>"#,
                d.name_size,
                p.bold_text,
                escape(&ctx.full_name)
            )
        }),
        Block::filled(&role_line, || {
            row(d.section_gap - 2, p.secondary_text, escape(&role_line))
        }),
        Block::filled(&record.phone_number, || {
            let href = format!(r#"href="tel:{}""#, escape(&tel_target(&record.phone_number)));
            row(d.row_gap, p.main_text, labelled(&ctx.labels.phone, link(href, &record.phone_number)))
        }),
        Block::filled(&record.email, || {
            let href = format!(r#"href="mailto:{}""#, escape(&record.email));
            row(d.row_gap, p.main_text, labelled(&ctx.labels.email, link(href, &record.email)))
        }),
        Block::filled(&record.address, || {
            row(d.row_gap, p.main_text, labelled(&ctx.labels.address, escape(&record.address)))
        }),
        Block::filled(&record.website_url, || {
            let href = external_href(&record.website_url);
            let text = website_display(&record.website_url);
            row(0, p.main_text, labelled(&ctx.labels.website, link(href, text)))
        }),
        Block::when(record.has_social(), || {
            format!(
                r#"<tr><td style="padding-top:{}px;">{}</td></tr>"#,
                d.section_gap,
                social_row(record, &SOCIAL_ORDER, p.main_text, "padding-right:8px;")
            )
        }),
        Block::filled(&record.disclaimer, || {
            format!(
                r#"<tr><td style="padding-top:{}px;font-family:{FONT_STACK};font-size:{}px;font-style:italic;color:{};line-height:1.4;">{}</td></tr>"#,
                d.section_gap + 5,
                d.font_size - 2,
                p.disclaimer,
                escape(&record.disclaimer)
            )
        }),
    ]);

    let divider = d
        .divider
        .map(|w| format!("border-left:{w}px solid {};", ctx.primary))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="signature-container">"#,
            r#"{table} style="border-collapse:collapse;width:100%;background-color:{bg};font-family:{font};font-size:{size}px;color:{main};"><tbody><tr>"#,
            r#"<td valign="top" style="padding-right:{gutter}px;width:{avatar}px;">"#,
            r#"{table} style="border-collapse:collapse;width:{avatar}px;"><tbody>{left}</tbody></table>"#,
            r#"</td>"#,
            r#"<td valign="top" style="{divider}padding-left:{gutter}px;">"#,
            r#"{table} style="border-collapse:collapse;width:100%;"><tbody>{right}</tbody></table>"#,
            r#"</td>"#,
            r#"</tr></tbody></table></div>"#
        ),
        table = TABLE_OPEN,
        bg = p.background,
        font = FONT_STACK,
        size = d.font_size,
        main = p.main_text,
        gutter = d.gutter,
        avatar = d.avatar,
        left = left,
        divider = divider,
        right = right,
    )
}
