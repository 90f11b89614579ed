//! Template-to-markup rendering for message previews.
//!
//! A single-pass, non-reentrant transform: callers render a raw template
//! exactly once. Re-running on already-rendered output is unsupported.
//! `{{ name }}` placeholders are left untouched; variable interpolation
//! happens in the sending service, not here. Labels and URLs are not
//! HTML-escaped, so attacker-controlled input must be sanitized upstream.

use marketing_core::config::ContentConfig;

const CTA_OPEN: &str = "<cta text=\"";
const LINE_BREAK: &str = "<br/>";

/// Visual theme applied to expanded call-to-action elements.
#[derive(Debug, Clone)]
pub struct CtaStyle {
    pub background: String,
    pub text_color: String,
}

impl Default for CtaStyle {
    fn default() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            text_color: "#ffffff".to_string(),
        }
    }
}

impl From<&ContentConfig> for CtaStyle {
    fn from(config: &ContentConfig) -> Self {
        Self {
            background: config.cta_background.clone(),
            text_color: config.cta_text_color.clone(),
        }
    }
}

/// Expands author-authored marketing text into displayable markup.
pub struct ContentRenderer {
    style: CtaStyle,
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self {
            style: CtaStyle::default(),
        }
    }

    pub fn with_style(style: CtaStyle) -> Self {
        Self { style }
    }

    /// Render raw template text into preview markup. Total: malformed tags
    /// degrade to literal passthrough, never an error.
    pub fn render(&self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }
        let content = content
            .replace("\r\n", LINE_BREAK)
            .replace('\n', LINE_BREAK)
            .replace('\r', LINE_BREAK);
        self.expand_cta_tags(&content)
    }

    /// Replace every well-formed `<cta text=".." link="..">` token with a
    /// styled anchor. The attribute order is fixed: a tag with `link` before
    /// `text` is not recognized and stays literal.
    fn expand_cta_tags(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        let mut rest = content;
        while let Some(pos) = rest.find(CTA_OPEN) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            match parse_cta(tail) {
                Some(tag) => {
                    self.push_anchor(&mut out, tag.label, tag.link);
                    rest = &tail[tag.consumed..];
                }
                None => {
                    // Malformed tag stays literal; step past the opener so
                    // the scan advances.
                    out.push_str(CTA_OPEN);
                    rest = &tail[CTA_OPEN.len()..];
                }
            }
        }
        out.push_str(rest);
        out
    }

    fn push_anchor(&self, out: &mut String, label: &str, link: &str) {
        out.push_str("<a href=\"");
        out.push_str(link);
        out.push_str("\" style=\"display:block;background:");
        out.push_str(&self.style.background);
        out.push_str(";color:");
        out.push_str(&self.style.text_color);
        out.push_str(";border-radius:8px;padding:12px 24px;text-align:center;text-decoration:none\">");
        out.push_str(label);
        out.push_str("</a>");
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct CtaTag<'a> {
    label: &'a str,
    link: &'a str,
    /// bytes of the input covered by the tag token
    consumed: usize,
}

/// Parse one CTA token anchored at the start of `input`. The grammar is
/// fixed: `<cta text="LABEL" link="URL">`, double-quoted values with no
/// embedded `"`.
fn parse_cta(input: &str) -> Option<CtaTag<'_>> {
    let rest = input.strip_prefix(CTA_OPEN)?;
    let label_end = rest.find('"')?;
    let (label, rest) = rest.split_at(label_end);
    let rest = rest.strip_prefix("\" link=\"")?;
    let link_end = rest.find('"')?;
    let (link, rest) = rest.split_at(link_end);
    let rest = rest.strip_prefix("\">")?;
    Some(CtaTag {
        label,
        link,
        consumed: input.len() - rest.len(),
    })
}

/// Render with the default CTA theme.
pub fn render(content: &str) -> String {
    ContentRenderer::new().render(content)
}
