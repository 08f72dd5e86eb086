//! Block Composition - Conditional Markup Fragments
//!
//! A layout is an ordered list of blocks. Each block carries the predicate
//! that decides whether it is emitted, so "skip if blank" lives in one place.

use crate::record::SignatureRecord;

pub const FONT_STACK: &str = "Arial, sans-serif";
pub const SERIF_STACK: &str = "Georgia, Times, 'Times New Roman', serif";

/// Opening tag of a collapsed layout table.
pub const TABLE_OPEN: &str = r#"<table cellpadding="0" cellspacing="0" border="0" role="presentation""#;

pub struct Block<'a> {
    visible: bool,
    render: Box<dyn FnOnce() -> String + 'a>,
}

impl<'a> Block<'a> {
    pub fn when(visible: bool, render: impl FnOnce() -> String + 'a) -> Self {
        Self {
            visible,
            render: Box::new(render),
        }
    }

    /// Visible when `value` is non-blank.
    pub fn filled(value: &str, render: impl FnOnce() -> String + 'a) -> Self {
        Self::when(!value.is_empty(), render)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Concatenate the output of every visible block, in order.
pub fn render_blocks(blocks: Vec<Block<'_>>) -> String {
    blocks
        .into_iter()
        .filter(Block::is_visible)
        .map(|block| (block.render)())
        .collect()
}

/// Escape text for HTML element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<a>` opening attributes for an external link.
pub fn external_href(url: &str) -> String {
    format!(
        r#"href="{}" target="_blank" rel="noopener noreferrer""#,
        escape(url)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialNetwork {
    Linkedin,
    Instagram,
    Facebook,
    Youtube,
}

impl SocialNetwork {
    pub fn url(self, record: &SignatureRecord) -> &str {
        match self {
            Self::Linkedin => &record.linkedin_url,
            Self::Instagram => &record.instagram_url,
            Self::Facebook => &record.facebook_url,
            Self::Youtube => &record.youtube_url,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linkedin => "LinkedIn",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Youtube => "YouTube",
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Linkedin => "M19 0h-14c-2.761 0-5 2.239-5 5v14c0 2.761 2.239 5 5 5h14c2.762 0 5-2.239 5-5v-14c0-2.761-2.238-5-5-5zm-11 19h-3v-11h3v11zm-1.5-12.268c-.966 0-1.75-.79-1.75-1.764s.784-1.764 1.75-1.764 1.75.79 1.75 1.764-.783 1.764-1.75 1.764zm13.5 12.268h-3v-5.604c0-3.368-4-3.113-4 0v5.604h-3v-11h3v1.765c1.396-2.586 7-2.777 7 2.476v6.759z",
            Self::Instagram => "M12 2.163c3.204 0 3.584.012 4.85.07 3.252.148 4.771 1.691 4.919 4.919.058 1.265.069 1.645.069 4.85s-.012 3.584-.07 4.85c-.148 3.225-1.664 4.771-4.919 4.919-1.266.058-1.644.07-4.85.07s-3.584-.012-4.85-.07c-3.252-.148-4.771-1.691-4.919-4.919-.058-1.265-.07-1.645-.07-4.85s.012-3.584.07-4.85c.148-3.225 1.664-4.771 4.919-4.919 1.266-.058 1.644-.07 4.85-.07zm0-2.163c-3.259 0-3.667.014-4.947.072-4.358.2-6.78 2.618-6.98 6.98-.059 1.281-.073 1.689-.073 4.948s.014 3.667.072 4.947c.2 4.358 2.618 6.78 6.98 6.98 1.281.058 1.689.072 4.948.072s3.667-.014 4.947-.072c4.358-.2 6.78-2.618 6.98-6.98.059-1.281.073-1.689.073-4.948s-.014-3.667-.072-4.947c-.2-4.358-2.618-6.78-6.98-6.98-1.281-.059-1.689-.073-4.948-.073zm0 5.838c-3.403 0-6.162 2.759-6.162 6.162s2.759 6.162 6.162 6.162 6.162-2.759 6.162-6.162-2.759-6.162-6.162-6.162zm0 10.162c-2.209 0-4-1.79-4-4s1.791-4 4-4 4 1.79 4 4-1.791 4-4 4zm6.406-11.845c-.796 0-1.441.645-1.441 1.44s.645 1.44 1.441 1.44 1.441-.645 1.441-1.44-.645-1.44-1.441-1.44z",
            Self::Facebook => "M24 12.073c0-6.627-5.373-12-12-12s-12 5.373-12 12c0 5.99 4.388 10.954 10.125 11.854v-8.385h-3.038v-3.47h3.038v-2.661c0-3.004 1.792-4.669 4.533-4.669 1.312 0 2.686.235 2.686.235v2.953h-1.513c-1.49 0-1.956.925-1.956 1.874v2.267h3.317l-.53 3.47h-2.787v8.385c5.737-.9 10.125-5.864 10.125-11.854z",
            Self::Youtube => "M19.615 3.184c-3.604-.246-11.631-.245-15.23 0-3.897.266-4.356 2.62-4.385 8.816.029 6.185.484 8.549 4.385 8.816 3.6.245 11.626.246 15.23 0 3.897-.266 4.356-2.62 4.385-8.816-.029-6.185-.484-8.549-4.385-8.816zm-10.615 12.816v-8l8 3.993-8 4.007z",
        }
    }
}

/// Glyphs for the Modern layout's contact rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactGlyph {
    Email,
    Website,
    Phone,
    Address,
}

impl ContactGlyph {
    fn path(self) -> &'static str {
        match self {
            Self::Email => "M22 6c0-1.1-.9-2-2-2H4c-1.1 0-2 .9-2 2v12c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V6zm-2 0l-8 5-8-5h16zm0 12H4V8l8 5 8-5v10z",
            Self::Website => "M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm-1 17.93c-3.95-.49-7-3.85-7-7.93 0-.62.08-1.21.21-1.79L9 15v1c0 1.1.9 2 2 2v1.93zm6.9-2.54c-.26-.81-1-1.39-1.9-1.39h-1v-3c0-.55-.45-1-1-1H8v-2h2c.55 0 1-.45 1-1V7h2c1.1 0 2-.9 2-2v-.41c2.93 1.19 5 4.06 5 7.41 0 2.08-.8 3.97-2.1 5.39z",
            Self::Phone => "M6.62 10.79c1.44 2.83 3.76 5.14 6.59 6.59l2.2-2.2c.27-.27.67-.36 1.02-.24 1.12.37 2.33.57 3.57.57.55 0 1 .45 1 1V20c0 .55-.45 1-1 1-9.39 0-17-7.61-17-17 0-.55.45-1 1-1h3.5c.55 0 1 .45 1 1 0 1.25.2 2.45.57 3.57.11.35.03.74-.25 1.02l-2.2 2.2z",
            Self::Address => "M12 2C8.13 2 5 5.13 5 9c0 5.25 7 13 7 13s7-7.75 7-13c0-3.87-3.13-7-7-7zm0 9.5c-1.38 0-2.5-1.12-2.5-2.5s1.12-2.5 2.5-2.5 2.5 1.12 2.5 2.5-1.12 2.5-2.5 2.5z",
        }
    }
}

fn svg(path: &str, size: u32, fill: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 24 24" fill="{fill}" style="display:block;"><path d="{path}"/></svg>"#
    )
}

pub fn social_svg(network: SocialNetwork, size: u32, fill: &str) -> String {
    svg(network.path(), size, fill)
}

pub fn glyph_svg(glyph: ContactGlyph, size: u32, fill: &str) -> String {
    svg(glyph.path(), size, fill)
}

/// Row of social icons, one cell per non-blank network URL.
///
/// Returns an empty string when no network is filled in.
pub fn social_row(
    record: &SignatureRecord,
    order: &[SocialNetwork],
    fill: &str,
    cell_style: &str,
) -> String {
    let cells = render_blocks(
        order
            .iter()
            .map(|&network| {
                let url = network.url(record);
                Block::filled(url, move || {
                    format!(
                        r#"<td style="{cell_style}"><a {} title="{}" style="display:block;text-decoration:none;">{}</a></td>"#,
                        external_href(url),
                        network.name(),
                        social_svg(network, 20, fill),
                    )
                })
            })
            .collect(),
    );
    if cells.is_empty() {
        return String::new();
    }
    format!(r#"{TABLE_OPEN} style="border-collapse:collapse;"><tbody><tr>{cells}</tr></tbody></table>"#)
}

/// Inline-block call-to-action anchor.
pub struct CtaStyle<'a> {
    pub background: &'a str,
    pub color: &'a str,
    pub padding: &'a str,
    pub font_size: u32,
    pub width: Option<u32>,
}

pub fn cta_button(href: &str, label: &str, style: &CtaStyle<'_>) -> String {
    let width = style
        .width
        .map(|w| format!("width:{w}px;box-sizing:border-box;text-align:center;"))
        .unwrap_or_default();
    format!(
        r#"<a {} style="background-color:{};color:{};padding:{};border-radius:4px;text-decoration:none;display:inline-block;font-size:{}px;font-weight:bold;font-family:{FONT_STACK};{width}">{}</a>"#,
        external_href(href),
        style.background,
        style.color,
        style.padding,
        style.font_size,
        escape(label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_visible_blocks_render_in_order() {
        let html = render_blocks(vec![
            Block::when(true, || "a".to_string()),
            Block::filled("", || "b".to_string()),
            Block::filled("x", || "c".to_string()),
        ]);
        assert_eq!(html, "ac");
    }

    #[test]
    fn test_hidden_block_is_never_evaluated() {
        let html = render_blocks(vec![Block::when(false, || -> String { panic!("evaluated") })]);
        assert!(html.is_empty());
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("Société"), "Société");
    }

    #[test]
    fn test_social_row_empty_without_urls() {
        let record = SignatureRecord::default();
        assert_eq!(social_row(&record, &[SocialNetwork::Linkedin], "#000", ""), "");
    }

    #[test]
    fn test_social_row_keeps_order() {
        let record = SignatureRecord {
            linkedin_url: "https://linkedin.com/in/ada".into(),
            youtube_url: "https://youtube.com/@ada".into(),
            ..Default::default()
        };
        let html = social_row(
            &record,
            &[SocialNetwork::Youtube, SocialNetwork::Linkedin],
            "#000000",
            "padding-right:8px;",
        );
        let yt = html.find("YouTube").unwrap();
        let li = html.find("LinkedIn").unwrap();
        assert!(yt < li);
        assert!(!html.contains("Instagram"));
    }

    #[test]
    fn test_cta_button_escapes_label() {
        let html = cta_button(
            "https://cal.com/ada?x=1&y=2",
            "Book <now>",
            &CtaStyle {
                background: "#D81B60",
                color: "#FFFFFF",
                padding: "8px 12px",
                font_size: 12,
                width: Some(100),
            },
        );
        assert!(html.contains("Book &lt;now&gt;"));
        assert!(html.contains(r#"href="https://cal.com/ada?x=1&amp;y=2""#));
        assert!(html.contains("width:100px;"));
    }
}
