//! Content transformation and the rendered document tree.
//!
//! This module handles:
//! - Rewriting `[!kind]` callout markers into structured blocks
//! - Scanning transformed markup into a block tree with tagged images
//! - Plain-text projection for terminal display

mod callout;
mod scanner;
mod types;

pub use callout::{CalloutBlock, CalloutKind};
pub use types::{Block, Document, FigureNode, ImageNode, strip_tags};

use callout::Segment;

/// Transform raw stored content into displayable markup.
///
/// Pure text-to-text: callout markers are rewritten into structured
/// blocks, everything else passes through unchanged. Absent content
/// yields empty output, and content with no markers is returned
/// byte-identical. Applying the transform to its own output is the
/// identity, since the emitted block template never re-matches.
///
/// # Example
///
/// ```
/// use lectern::content::transform;
///
/// let out = transform(Some("[!warning] Be careful\nThis may be risky."));
/// assert!(out.contains("callout-warning"));
/// assert!(out.contains("<strong>Be careful</strong>"));
/// ```
pub fn transform(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let segments = callout::scan(raw);
    let mut out = String::with_capacity(raw.len());
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        match segment {
            Segment::Verbatim(line) => out.push_str(line),
            Segment::Callout(block) => out.push_str(&block.to_html()),
        }
    }
    out
}
