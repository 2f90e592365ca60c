//! Rendered document types.

use std::hash::{DefaultHasher, Hash, Hasher};

use super::callout::CalloutBlock;
use super::{scanner, transform};

/// A rendered article: the transformed markup plus a structural view of it
/// with image nodes tagged explicitly.
///
/// The tree is what downstream consumers walk: the image index derives
/// ordinals from it and the UI lays it out, so nothing ever has to
/// re-scan realized display output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Original raw content blob
    source: String,
    /// Transformed markup text
    html: String,
    /// Structural view of `html`
    blocks: Vec<Block>,
}

/// One structural unit of rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A run of markup passed through untouched
    Raw(String),
    /// A rewritten annotation block
    Callout(CalloutBlock),
    /// A standalone image element
    Image(ImageNode),
    /// A figure grouping; may carry a caption that applies to images inside
    Figure(FigureNode),
}

/// An image element tagged during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageNode {
    /// Source reference; empty when the element had no usable `src`
    pub src: String,
    /// Alt text, absent when missing or empty
    pub alt: Option<String>,
}

/// A figure grouping with its caption, if one was present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureNode {
    pub children: Vec<Block>,
    pub caption: Option<String>,
}

impl Document {
    /// Create an empty document (shown as an empty state by callers).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Render raw stored content into a document.
    ///
    /// Runs the callout transform, then scans the result into the block
    /// tree. Absent content yields an empty document.
    pub fn render(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::empty();
        };
        let html = transform(Some(raw));
        let blocks = scanner::scan_blocks(raw);
        Self {
            source: raw.to_string(),
            html,
            blocks,
        }
    }

    /// The raw content this document was rendered from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The transformed markup text.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The structural view of the rendered content.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// True when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.html.trim().is_empty()
    }

    /// Identity of the rendered output.
    ///
    /// Derived from the rendered text, not the article that produced it:
    /// two different raw contents that happen to render to equal text have
    /// equal fingerprints, and index snapshots are accepted or rejected
    /// against this value.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.html.hash(&mut hasher);
        hasher.finish()
    }
}

/// Strip markup tags from a text run and decode the common entities,
/// yielding plain text for terminal display.
pub fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                // Unterminated tag: keep the text as-is
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    decode_entities(&out)
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let mut replaced = false;
        for (entity, ch) in [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#39;", '\''),
            ("&apos;", '\''),
            ("&nbsp;", ' '),
        ] {
            if let Some(stripped) = rest.strip_prefix(entity) {
                out.push(ch);
                rest = stripped;
                replaced = true;
                break;
            }
        }
        if !replaced {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}
